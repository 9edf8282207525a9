//! Adds `ADMIN` to the user role set.
//!
//! On Postgres the value cannot be removed again, so `down` leaves the type as is
//! and the runner reports the unit as flagged.

use sea_orm::DbBackend;
use sea_orm_migration::prelude::*;

use super::dialect::{Reversibility, USER_ROLE, apply_all, enum_dialect};

const BEFORE: &[&str] = &["CUSTOMER", "SELLER"];
const AFTER: &[&str] = &["CUSTOMER", "SELLER", "ADMIN"];

pub fn reversibility(backend: DbBackend) -> Reversibility {
    enum_dialect(backend).narrowing()
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let dialect = enum_dialect(manager.get_database_backend());
        apply_all(manager, dialect.alter_values(&USER_ROLE, BEFORE, AFTER)?).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let dialect = enum_dialect(manager.get_database_backend());
        match dialect.alter_values(&USER_ROLE, AFTER, BEFORE) {
            Ok(changes) => apply_all(manager, changes).await,
            Err(unsupported) => {
                tracing::warn!(reason = %unsupported, "enum narrowing skipped");
                Ok(())
            }
        }
    }
}
