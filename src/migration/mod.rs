//! Schema migrations, applied in identifier order.

pub mod dialect;
pub mod runner;

mod m20240301_000001_create_user_table;
mod m20240301_000002_create_product_table;
mod m20240301_000003_create_product_color_table;
mod m20240301_000004_create_product_review_table;
mod m20240302_000001_create_cart_tables;
mod m20240302_000002_create_order_tables;
mod m20240305_000001_create_post_table;
mod m20240305_000002_create_comment_table;
mod m20240310_000001_add_product_mod3d;
mod m20240310_000002_rename_post_image_column;
mod m20240315_000001_add_admin_user_role;
mod m20240315_000002_add_canceled_order_status;

use sea_orm::DbBackend;
use sea_orm_migration::prelude::*;

use self::dialect::Reversibility;

pub struct Migrator;

/// A migration together with what its inverse can restore on each backend.
pub struct Unit {
    pub migration: Box<dyn MigrationTrait>,
    reversibility: fn(DbBackend) -> Reversibility,
}

impl Unit {
    fn new<M: MigrationTrait + 'static>(migration: M) -> Self {
        Self {
            migration: Box::new(migration),
            reversibility: |_| Reversibility::Reversible,
        }
    }

    fn reversible_by(mut self, reversibility: fn(DbBackend) -> Reversibility) -> Self {
        self.reversibility = reversibility;
        self
    }

    pub fn name(&self) -> &str {
        self.migration.name()
    }

    pub fn reversibility(&self, backend: DbBackend) -> Reversibility {
        (self.reversibility)(backend)
    }
}

pub fn units() -> Vec<Unit> {
    vec![
        Unit::new(m20240301_000001_create_user_table::Migration),
        Unit::new(m20240301_000002_create_product_table::Migration),
        Unit::new(m20240301_000003_create_product_color_table::Migration),
        Unit::new(m20240301_000004_create_product_review_table::Migration),
        Unit::new(m20240302_000001_create_cart_tables::Migration),
        Unit::new(m20240302_000002_create_order_tables::Migration),
        Unit::new(m20240305_000001_create_post_table::Migration),
        Unit::new(m20240305_000002_create_comment_table::Migration),
        Unit::new(m20240310_000001_add_product_mod3d::Migration),
        Unit::new(m20240310_000002_rename_post_image_column::Migration),
        Unit::new(m20240315_000001_add_admin_user_role::Migration)
            .reversible_by(m20240315_000001_add_admin_user_role::reversibility),
        Unit::new(m20240315_000002_add_canceled_order_status::Migration)
            .reversible_by(m20240315_000002_add_canceled_order_status::reversibility),
    ]
}

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        units().into_iter().map(|unit| unit.migration).collect()
    }
}

/// `createdAt` / `updatedAt` column defaulting to the insert time.
fn timestamp_col(name: &'static str) -> ColumnDef {
    ColumnDef::new(Alias::new(name))
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}
