use sea_orm_migration::prelude::*;

use super::dialect::{POST_STATUS, apply_all, enum_dialect};
use super::timestamp_col;
use crate::associations::POST_AUTHOR;

const STATUSES: &[&str] = &["DRAFT", "PUBLISHED", "HIDDEN"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let dialect = enum_dialect(manager.get_database_backend());
        apply_all(manager, dialect.create_type(&POST_STATUS, STATUSES)).await?;

        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .col(
                        ColumnDef::new(Post::PostId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Post::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Post::Content).text().not_null())
                    // Renamed to ImagePath by m20240310_000002.
                    .col(ColumnDef::new(Post::Image).string_len(255).null())
                    .col(&mut dialect.column_def(&POST_STATUS, STATUSES))
                    .col(ColumnDef::new(Post::UserId).string_len(64).not_null())
                    .col(&mut timestamp_col("createdAt"))
                    .col(&mut timestamp_col("updatedAt"))
                    .foreign_key(&mut POST_AUTHOR.foreign_key())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await?;

        let dialect = enum_dialect(manager.get_database_backend());
        apply_all(manager, dialect.drop_type(&POST_STATUS)).await
    }
}

#[derive(DeriveIden)]
enum Post {
    #[sea_orm(iden = "Post")]
    Table,
    #[sea_orm(iden = "PostID")]
    PostId,
    #[sea_orm(iden = "Title")]
    Title,
    #[sea_orm(iden = "Content")]
    Content,
    #[sea_orm(iden = "Image")]
    Image,
    #[sea_orm(iden = "UserID")]
    UserId,
}
