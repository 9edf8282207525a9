use sea_orm_migration::prelude::*;

use super::dialect::{USER_ROLE, USER_STATUS, apply_all, enum_dialect};
use super::timestamp_col;

const ROLES: &[&str] = &["CUSTOMER", "SELLER"];
const STATUSES: &[&str] = &["ACTIVE", "INACTIVE"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let dialect = enum_dialect(manager.get_database_backend());
        apply_all(manager, dialect.create_type(&USER_ROLE, ROLES)).await?;
        apply_all(manager, dialect.create_type(&USER_STATUS, STATUSES)).await?;

        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    // Business key supplied by the caller, never generated.
                    .col(
                        ColumnDef::new(User::UserId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(User::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(User::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(&mut dialect.column_def(&USER_ROLE, ROLES))
                    .col(&mut dialect.column_def(&USER_STATUS, STATUSES))
                    .col(&mut timestamp_col("createdAt"))
                    .col(&mut timestamp_col("updatedAt"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        let dialect = enum_dialect(manager.get_database_backend());
        apply_all(manager, dialect.drop_type(&USER_STATUS)).await?;
        apply_all(manager, dialect.drop_type(&USER_ROLE)).await
    }
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "User")]
    Table,
    #[sea_orm(iden = "UserID")]
    UserId,
    #[sea_orm(iden = "Name")]
    Name,
    #[sea_orm(iden = "Email")]
    Email,
}
