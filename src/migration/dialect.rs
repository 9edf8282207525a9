//! Backend-specific handling of enumerated columns.
//!
//! Postgres keeps enums as named types that can only grow (`ALTER TYPE .. ADD VALUE`).
//! MySQL inlines the closed set in the column type, so any change rewrites the column.
//! SQLite has no enum type at all and stores the tags as plain strings.

use sea_orm::sea_query::extension::postgres::{
    Type, TypeAlterStatement, TypeCreateStatement, TypeDropStatement,
};
use sea_orm::sea_query::{Alias, ColumnDef, Table, TableAlterStatement};
use sea_orm::{DbBackend, DbErr};
use sea_orm_migration::prelude::SchemaManager;
use thiserror::Error;

/// An enumerated column and the database type backing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumColumn {
    pub table: &'static str,
    pub column: &'static str,
    /// Postgres type name; must match the entity's `enum_name`.
    pub type_name: &'static str,
    pub default: &'static str,
}

pub const USER_ROLE: EnumColumn = EnumColumn {
    table: "User",
    column: "Role",
    type_name: "user_role",
    default: "CUSTOMER",
};

pub const USER_STATUS: EnumColumn = EnumColumn {
    table: "User",
    column: "status",
    type_name: "user_status",
    default: "ACTIVE",
};

pub const ORDER_STATUS: EnumColumn = EnumColumn {
    table: "orders",
    column: "status",
    type_name: "order_status",
    default: "pending",
};

pub const POST_STATUS: EnumColumn = EnumColumn {
    table: "Post",
    column: "Status",
    type_name: "post_status",
    default: "DRAFT",
};

/// Whether a migration's inverse restores the prior schema on a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reversibility {
    Reversible,
    /// The inverse runs as a no-op; the reason is reported to the operator.
    Irreversible(&'static str),
}

/// A requested enum change the backend cannot express.
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "cannot remove {removed:?} from {}.{} on {backend:?}: {reason}",
    .column.table,
    .column.column
)]
pub struct Unsupported {
    pub backend: DbBackend,
    pub column: EnumColumn,
    pub removed: Vec<String>,
    pub reason: &'static str,
}

impl From<Unsupported> for DbErr {
    fn from(err: Unsupported) -> Self {
        DbErr::Migration(err.to_string())
    }
}

/// One DDL statement produced by a dialect.
#[derive(Debug, Clone)]
pub enum SchemaChange {
    CreateType(TypeCreateStatement),
    AlterType(TypeAlterStatement),
    DropType(TypeDropStatement),
    AlterTable(TableAlterStatement),
}

impl SchemaChange {
    pub async fn apply(self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        match self {
            SchemaChange::CreateType(stmt) => manager.create_type(stmt).await,
            SchemaChange::AlterType(stmt) => manager.alter_type(stmt).await,
            SchemaChange::DropType(stmt) => manager.drop_type(stmt).await,
            SchemaChange::AlterTable(stmt) => manager.alter_table(stmt).await,
        }
    }
}

pub async fn apply_all(manager: &SchemaManager<'_>, changes: Vec<SchemaChange>) -> Result<(), DbErr> {
    for change in changes {
        change.apply(manager).await?;
    }
    Ok(())
}

pub trait EnumDialect: Send + Sync {
    fn backend(&self) -> DbBackend;

    /// Statements to run before a table using `column` is created.
    fn create_type(&self, column: &EnumColumn, values: &[&str]) -> Vec<SchemaChange>;

    /// Statements to run after the last table using `column` is dropped.
    fn drop_type(&self, column: &EnumColumn) -> Vec<SchemaChange>;

    /// `NOT NULL` column definition with the column's default.
    fn column_def(&self, column: &EnumColumn, values: &[&str]) -> ColumnDef;

    /// Move the permitted set from `from` to `to`.
    fn alter_values(
        &self,
        column: &EnumColumn,
        from: &[&str],
        to: &[&str],
    ) -> Result<Vec<SchemaChange>, Unsupported>;

    /// Whether removing a member can be expressed.
    fn narrowing(&self) -> Reversibility;
}

pub fn enum_dialect(backend: DbBackend) -> &'static dyn EnumDialect {
    match backend {
        DbBackend::Postgres => &PostgresEnums,
        DbBackend::MySql => &MySqlEnums,
        DbBackend::Sqlite => &SqliteEnums,
    }
}

fn difference<'a>(left: &[&'a str], right: &[&str]) -> Vec<&'a str> {
    left.iter()
        .copied()
        .filter(|value| !right.iter().any(|other| *other == *value))
        .collect()
}

pub struct PostgresEnums;

const PG_NO_DROP_VALUE: &str = "postgres enum types cannot drop a value in place";

impl EnumDialect for PostgresEnums {
    fn backend(&self) -> DbBackend {
        DbBackend::Postgres
    }

    fn create_type(&self, column: &EnumColumn, values: &[&str]) -> Vec<SchemaChange> {
        vec![SchemaChange::CreateType(
            Type::create()
                .as_enum(Alias::new(column.type_name))
                .values(values.iter().map(|value| Alias::new(*value)))
                .to_owned(),
        )]
    }

    fn drop_type(&self, column: &EnumColumn) -> Vec<SchemaChange> {
        vec![SchemaChange::DropType(
            Type::drop()
                .if_exists()
                .name(Alias::new(column.type_name))
                .to_owned(),
        )]
    }

    fn column_def(&self, column: &EnumColumn, _values: &[&str]) -> ColumnDef {
        ColumnDef::new(Alias::new(column.column))
            .custom(Alias::new(column.type_name))
            .not_null()
            .default(column.default)
            .to_owned()
    }

    fn alter_values(
        &self,
        column: &EnumColumn,
        from: &[&str],
        to: &[&str],
    ) -> Result<Vec<SchemaChange>, Unsupported> {
        let removed = difference(from, to);
        if !removed.is_empty() {
            return Err(Unsupported {
                backend: DbBackend::Postgres,
                column: *column,
                removed: removed.into_iter().map(str::to_owned).collect(),
                reason: PG_NO_DROP_VALUE,
            });
        }
        // The value survives a rollback, so re-applying must tolerate it.
        Ok(difference(to, from)
            .into_iter()
            .map(|value| {
                SchemaChange::AlterType(
                    Type::alter()
                        .name(Alias::new(column.type_name))
                        .add_value(Alias::new(value))
                        .if_not_exists()
                        .to_owned(),
                )
            })
            .collect())
    }

    fn narrowing(&self) -> Reversibility {
        Reversibility::Irreversible(PG_NO_DROP_VALUE)
    }
}

pub struct MySqlEnums;

impl EnumDialect for MySqlEnums {
    fn backend(&self) -> DbBackend {
        DbBackend::MySql
    }

    fn create_type(&self, _column: &EnumColumn, _values: &[&str]) -> Vec<SchemaChange> {
        Vec::new()
    }

    fn drop_type(&self, _column: &EnumColumn) -> Vec<SchemaChange> {
        Vec::new()
    }

    fn column_def(&self, column: &EnumColumn, values: &[&str]) -> ColumnDef {
        ColumnDef::new(Alias::new(column.column))
            .enumeration(
                Alias::new(column.type_name),
                values.iter().map(|value| Alias::new(*value)),
            )
            .not_null()
            .default(column.default)
            .to_owned()
    }

    fn alter_values(
        &self,
        column: &EnumColumn,
        from: &[&str],
        to: &[&str],
    ) -> Result<Vec<SchemaChange>, Unsupported> {
        if from == to {
            return Ok(Vec::new());
        }
        // The whole column is rewritten; rows holding a removed tag make this fail.
        Ok(vec![SchemaChange::AlterTable(
            Table::alter()
                .table(Alias::new(column.table))
                .modify_column(&mut self.column_def(column, to))
                .to_owned(),
        )])
    }

    fn narrowing(&self) -> Reversibility {
        Reversibility::Reversible
    }
}

pub struct SqliteEnums;

impl EnumDialect for SqliteEnums {
    fn backend(&self) -> DbBackend {
        DbBackend::Sqlite
    }

    fn create_type(&self, _column: &EnumColumn, _values: &[&str]) -> Vec<SchemaChange> {
        Vec::new()
    }

    fn drop_type(&self, _column: &EnumColumn) -> Vec<SchemaChange> {
        Vec::new()
    }

    fn column_def(&self, column: &EnumColumn, _values: &[&str]) -> ColumnDef {
        ColumnDef::new(Alias::new(column.column))
            .string_len(32)
            .not_null()
            .default(column.default)
            .to_owned()
    }

    fn alter_values(
        &self,
        _column: &EnumColumn,
        _from: &[&str],
        _to: &[&str],
    ) -> Result<Vec<SchemaChange>, Unsupported> {
        Ok(Vec::new())
    }

    fn narrowing(&self) -> Reversibility {
        Reversibility::Reversible
    }
}
