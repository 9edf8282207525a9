use sea_orm_migration::prelude::*;

use super::dialect::{ORDER_STATUS, apply_all, enum_dialect};
use super::timestamp_col;
use crate::associations::{ORDER_BUYER, ORDER_ITEM_ORDER, ORDER_ITEM_PRODUCT};

const STATUSES: &[&str] = &["pending", "confirmed", "shipping", "completed"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let dialect = enum_dialect(manager.get_database_backend());
        apply_all(manager, dialect.create_type(&ORDER_STATUS, STATUSES)).await?;

        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .col(
                        ColumnDef::new(Orders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::UserId).string_len(64).null())
                    .col(&mut dialect.column_def(&ORDER_STATUS, STATUSES))
                    .col(
                        ColumnDef::new(Orders::TotalPrice)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Orders::PaymentMethod).string_len(64).null())
                    .col(ColumnDef::new(Orders::ShippingAddress).text().null())
                    .col(&mut timestamp_col("createdAt"))
                    .col(&mut timestamp_col("updatedAt"))
                    .foreign_key(&mut ORDER_BUYER.foreign_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderItems::Table)
                    .col(
                        ColumnDef::new(OrderItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderItems::OrderId).integer().not_null())
                    .col(ColumnDef::new(OrderItems::ProductId).integer().null())
                    .col(ColumnDef::new(OrderItems::Quantity).integer().not_null())
                    .col(
                        ColumnDef::new(OrderItems::Price)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(&mut timestamp_col("createdAt"))
                    .col(&mut timestamp_col("updatedAt"))
                    .foreign_key(&mut ORDER_ITEM_ORDER.foreign_key())
                    .foreign_key(&mut ORDER_ITEM_PRODUCT.foreign_key())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;

        let dialect = enum_dialect(manager.get_database_backend());
        apply_all(manager, dialect.drop_type(&ORDER_STATUS)).await
    }
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    #[sea_orm(iden = "UserID")]
    UserId,
    #[sea_orm(iden = "totalPrice")]
    TotalPrice,
    #[sea_orm(iden = "paymentMethod")]
    PaymentMethod,
    #[sea_orm(iden = "shippingAddress")]
    ShippingAddress,
}

#[derive(DeriveIden)]
enum OrderItems {
    Table,
    Id,
    #[sea_orm(iden = "orderId")]
    OrderId,
    #[sea_orm(iden = "productId")]
    ProductId,
    Quantity,
    Price,
}
