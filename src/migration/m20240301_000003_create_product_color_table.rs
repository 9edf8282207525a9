use sea_orm_migration::prelude::*;

use super::timestamp_col;
use crate::associations::PRODUCT_COLOR_PRODUCT;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductColor::Table)
                    .col(
                        ColumnDef::new(ProductColor::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProductColor::ColorName)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProductColor::ProductId).integer().not_null())
                    .col(&mut timestamp_col("createdAt"))
                    .col(&mut timestamp_col("updatedAt"))
                    .foreign_key(&mut PRODUCT_COLOR_PRODUCT.foreign_key())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductColor::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProductColor {
    #[sea_orm(iden = "ProductColor")]
    Table,
    Id,
    #[sea_orm(iden = "ColorName")]
    ColorName,
    #[sea_orm(iden = "ProductID")]
    ProductId,
}
