//! Applies and reverts migration units one at a time.
//!
//! Applied units are tracked in sea-orm-migration's `seaql_migrations` table. Runs
//! against the same database must be serialized by the caller.

use std::collections::HashSet;

use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr};
use sea_orm_migration::MigratorTrait;
use serde::Serialize;
use thiserror::Error;

use super::dialect::Reversibility;
use super::{Migrator, units};

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("migration {unit} failed: {source}")]
    UnitFailed {
        unit: String,
        #[source]
        source: DbErr,
    },

    #[error("migration {unit} cannot be rolled back on {backend:?}: {reason}")]
    Irreversible {
        unit: String,
        backend: DbBackend,
        reason: &'static str,
    },

    #[error(transparent)]
    Db(#[from] DbErr),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitStatus {
    pub name: String,
    pub applied: bool,
}

/// What to do when a rollback would cross a unit whose inverse is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrreversiblePolicy {
    /// Fail before reverting anything.
    Refuse,
    /// Revert anyway and report the unit.
    Flag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollbackStep {
    pub unit: String,
    pub reversibility: Reversibility,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlaggedUnit {
    pub unit: String,
    pub reason: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RollbackReport {
    pub reverted: Vec<String>,
    pub flagged: Vec<FlaggedUnit>,
}

pub async fn status(db: &DatabaseConnection) -> Result<Vec<UnitStatus>, MigrationError> {
    let applied = applied_names(db).await?;
    let applied: HashSet<&str> = applied.iter().map(String::as_str).collect();
    Ok(units()
        .iter()
        .map(|unit| UnitStatus {
            name: unit.name().to_owned(),
            applied: applied.contains(unit.name()),
        })
        .collect())
}

/// Apply up to `steps` pending units (all when `None`). Stops at the first failure.
pub async fn apply(
    db: &DatabaseConnection,
    steps: Option<u32>,
) -> Result<Vec<String>, MigrationError> {
    Migrator::install(db).await?;
    let pending = Migrator::get_pending_migrations(db).await?;
    let limit = steps.map_or(pending.len(), |n| n as usize);

    let mut applied = Vec::new();
    for migration in pending.iter().take(limit) {
        let unit = migration.name().to_owned();
        tracing::info!(unit = %unit, "applying migration");
        if let Err(source) = Migrator::up(db, Some(1)).await {
            tracing::error!(
                unit = %unit,
                error = %source,
                remaining = pending.len() - applied.len() - 1,
                "migration failed, later units not applied"
            );
            return Err(MigrationError::UnitFailed { unit, source });
        }
        applied.push(unit);
    }

    if applied.is_empty() {
        tracing::info!("no pending migrations");
    }
    Ok(applied)
}

/// Units a rollback of `steps` (all when `None`) would revert, newest first.
pub fn plan_rollback(
    backend: DbBackend,
    applied: &[String],
    steps: Option<u32>,
) -> Vec<RollbackStep> {
    let known = units();
    let limit = steps.map_or(applied.len(), |n| n as usize);
    applied
        .iter()
        .rev()
        .take(limit)
        .map(|name| RollbackStep {
            unit: name.clone(),
            reversibility: known
                .iter()
                .find(|unit| unit.name() == name.as_str())
                .map_or(Reversibility::Reversible, |unit| unit.reversibility(backend)),
        })
        .collect()
}

pub async fn rollback(
    db: &DatabaseConnection,
    steps: Option<u32>,
    policy: IrreversiblePolicy,
) -> Result<RollbackReport, MigrationError> {
    let backend = db.get_database_backend();
    let applied = applied_names(db).await?;
    let plan = plan_rollback(backend, &applied, steps);

    if policy == IrreversiblePolicy::Refuse {
        for step in &plan {
            if let Reversibility::Irreversible(reason) = step.reversibility {
                return Err(MigrationError::Irreversible {
                    unit: step.unit.clone(),
                    backend,
                    reason,
                });
            }
        }
    }

    let mut report = RollbackReport::default();
    for step in plan {
        if let Reversibility::Irreversible(reason) = step.reversibility {
            tracing::warn!(unit = %step.unit, reason, "inverse is a no-op on this backend");
            report.flagged.push(FlaggedUnit {
                unit: step.unit.clone(),
                reason,
            });
        }
        tracing::info!(unit = %step.unit, "reverting migration");
        if let Err(source) = Migrator::down(db, Some(1)).await {
            tracing::error!(unit = %step.unit, error = %source, "rollback failed");
            return Err(MigrationError::UnitFailed {
                unit: step.unit,
                source,
            });
        }
        report.reverted.push(step.unit);
    }
    Ok(report)
}

async fn applied_names(db: &DatabaseConnection) -> Result<Vec<String>, DbErr> {
    Migrator::install(db).await?;
    Ok(Migrator::get_applied_migrations(db)
        .await?
        .iter()
        .map(|migration| migration.name().to_owned())
        .collect())
}
