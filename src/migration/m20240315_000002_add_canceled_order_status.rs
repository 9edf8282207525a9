use sea_orm::DbBackend;
use sea_orm_migration::prelude::*;

use super::dialect::{ORDER_STATUS, Reversibility, apply_all, enum_dialect};

const BEFORE: &[&str] = &["pending", "confirmed", "shipping", "completed"];
const AFTER: &[&str] = &["pending", "confirmed", "shipping", "completed", "canceled"];

pub fn reversibility(backend: DbBackend) -> Reversibility {
    enum_dialect(backend).narrowing()
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let dialect = enum_dialect(manager.get_database_backend());
        apply_all(manager, dialect.alter_values(&ORDER_STATUS, BEFORE, AFTER)?).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let dialect = enum_dialect(manager.get_database_backend());
        match dialect.alter_values(&ORDER_STATUS, AFTER, BEFORE) {
            // MySQL rejects the rewrite while an order is still canceled.
            Ok(changes) => apply_all(manager, changes).await,
            Err(unsupported) => {
                tracing::warn!(reason = %unsupported, "enum narrowing skipped");
                Ok(())
            }
        }
    }
}
