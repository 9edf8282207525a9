use sea_orm_migration::prelude::*;

use super::timestamp_col;
use crate::associations::{CART_ITEM_CART, CART_ITEM_PRODUCT, CART_OWNER};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No unique key on UserID: "one cart per user" is an application convention.
        manager
            .create_table(
                Table::create()
                    .table(Carts::Table)
                    .col(
                        ColumnDef::new(Carts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Carts::UserId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Carts::TotalPrice)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(&mut timestamp_col("createdAt"))
                    .col(&mut timestamp_col("updatedAt"))
                    .foreign_key(&mut CART_OWNER.foreign_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CartItems::Table)
                    .col(
                        ColumnDef::new(CartItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CartItems::CartId).integer().not_null())
                    .col(ColumnDef::new(CartItems::ProductId).integer().not_null())
                    .col(
                        ColumnDef::new(CartItems::Quantity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(&mut timestamp_col("createdAt"))
                    .col(&mut timestamp_col("updatedAt"))
                    .foreign_key(&mut CART_ITEM_CART.foreign_key())
                    .foreign_key(&mut CART_ITEM_PRODUCT.foreign_key())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CartItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Carts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Carts {
    Table,
    Id,
    #[sea_orm(iden = "UserID")]
    UserId,
    #[sea_orm(iden = "TotalPrice")]
    TotalPrice,
}

#[derive(DeriveIden)]
enum CartItems {
    Table,
    Id,
    #[sea_orm(iden = "cartId")]
    CartId,
    #[sea_orm(iden = "productId")]
    ProductId,
    Quantity,
}
