use sea_orm_migration::prelude::*;

use super::timestamp_col;
use crate::associations::PRODUCT_CREATOR;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .col(
                        ColumnDef::new(Product::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Product::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Product::Description).text().null())
                    .col(
                        ColumnDef::new(Product::Price)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Product::ImgPath).string_len(255).null())
                    // Nullable: the product outlives its creator.
                    .col(ColumnDef::new(Product::UserId).string_len(64).null())
                    .col(&mut timestamp_col("createdAt"))
                    .col(&mut timestamp_col("updatedAt"))
                    .foreign_key(&mut PRODUCT_CREATOR.foreign_key())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Product::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Product {
    #[sea_orm(iden = "Product")]
    Table,
    Id,
    #[sea_orm(iden = "Name")]
    Name,
    #[sea_orm(iden = "Description")]
    Description,
    #[sea_orm(iden = "Price")]
    Price,
    #[sea_orm(iden = "ImgPath")]
    ImgPath,
    #[sea_orm(iden = "UserID")]
    UserId,
}
