use sea_orm_migration::prelude::*;

use super::timestamp_col;
use crate::associations::{PRODUCT_REVIEW_AUTHOR, PRODUCT_REVIEW_PRODUCT};
use crate::entity::product_review::{MAX_RATING, MIN_RATING};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductReview::Table)
                    .col(
                        ColumnDef::new(ProductReview::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProductReview::Rating)
                            .integer()
                            .not_null()
                            .check(Expr::col(ProductReview::Rating).between(MIN_RATING, MAX_RATING)),
                    )
                    .col(ColumnDef::new(ProductReview::Comment).text().null())
                    .col(ColumnDef::new(ProductReview::ProductId).integer().not_null())
                    .col(
                        ColumnDef::new(ProductReview::UserId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(&mut timestamp_col("createdAt"))
                    .col(&mut timestamp_col("updatedAt"))
                    .foreign_key(&mut PRODUCT_REVIEW_PRODUCT.foreign_key())
                    .foreign_key(&mut PRODUCT_REVIEW_AUTHOR.foreign_key())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductReview::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProductReview {
    #[sea_orm(iden = "ProductReview")]
    Table,
    Id,
    #[sea_orm(iden = "Rating")]
    Rating,
    #[sea_orm(iden = "Comment")]
    Comment,
    #[sea_orm(iden = "ProductID")]
    ProductId,
    #[sea_orm(iden = "UserID")]
    UserId,
}
