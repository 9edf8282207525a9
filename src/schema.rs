//! Registry of the declared table shapes, read from the entity definitions.

use sea_orm::sea_query::{QueryBuilder, SimpleExpr, SqliteQueryBuilder};
use sea_orm::{ColumnTrait, EntityTrait, IdenStatic, Iterable, PrimaryKeyToColumn};
use serde::Serialize;

use crate::entity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub column_type: String,
    pub nullable: bool,
    /// Column default as it appears after `DEFAULT` in the DDL.
    pub default: Option<String>,
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableInfo {
    pub table: String,
    pub primary_key: Vec<String>,
    pub columns: Vec<ColumnInfo>,
}

impl TableInfo {
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|column| column.name == name)
    }
}

pub fn describe<E: EntityTrait>() -> TableInfo {
    let columns = E::Column::iter()
        .map(|column| {
            let def = column.def();
            ColumnInfo {
                name: column.as_str().to_owned(),
                column_type: format!("{:?}", def.get_column_type()),
                nullable: def.is_null(),
                default: def.get_column_default().map(render_default),
                unique: def.is_unique(),
            }
        })
        .collect();
    let primary_key = E::PrimaryKey::iter()
        .map(|key| key.into_column().as_str().to_owned())
        .collect();
    TableInfo {
        table: E::default().table_name().to_owned(),
        primary_key,
        columns,
    }
}

fn render_default(expr: &SimpleExpr) -> String {
    let mut sql = String::new();
    SqliteQueryBuilder.prepare_simple_expr(expr, &mut sql);
    sql
}

/// Every table, in migration order.
pub fn registry() -> Vec<TableInfo> {
    vec![
        describe::<entity::User>(),
        describe::<entity::Product>(),
        describe::<entity::ProductColor>(),
        describe::<entity::ProductReview>(),
        describe::<entity::Cart>(),
        describe::<entity::CartItem>(),
        describe::<entity::Orders>(),
        describe::<entity::OrderItem>(),
        describe::<entity::Post>(),
        describe::<entity::Comment>(),
    ]
}

pub fn find_table(table: &str) -> Option<TableInfo> {
    registry().into_iter().find(|info| info.table == table)
}
