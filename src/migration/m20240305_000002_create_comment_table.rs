use sea_orm_migration::prelude::*;

use super::timestamp_col;
use crate::associations::{COMMENT_AUTHOR, COMMENT_POST};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .col(
                        ColumnDef::new(Comment::CommentId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Comment::Content).text().not_null())
                    .col(ColumnDef::new(Comment::UserId).string_len(64).not_null())
                    .col(ColumnDef::new(Comment::PostId).string_len(64).not_null())
                    .col(&mut timestamp_col("createdAt"))
                    .col(&mut timestamp_col("updatedAt"))
                    .foreign_key(&mut COMMENT_AUTHOR.foreign_key())
                    .foreign_key(&mut COMMENT_POST.foreign_key())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Comment {
    #[sea_orm(iden = "Comment")]
    Table,
    #[sea_orm(iden = "CommentID")]
    CommentId,
    #[sea_orm(iden = "Content")]
    Content,
    #[sea_orm(iden = "UserID")]
    UserId,
    #[sea_orm(iden = "PostID")]
    PostId,
}
