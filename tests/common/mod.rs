#![allow(dead_code)]

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use shop_social::{
    config::AppConfig,
    db::create_orm_conn,
    dto::{products::NewProduct, users::NewUser},
    entity::{product, user},
    migration::runner,
    services::{product_service, user_service},
    state::AppState,
};

/// A fresh in-memory database. One connection, so every handle sees the same data.
pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    let config = AppConfig {
        database_url: "sqlite::memory:".into(),
        max_connections: 1,
        sql_log: false,
    };
    create_orm_conn(&config).await
}

pub async fn setup_state() -> anyhow::Result<AppState> {
    let orm = connect().await?;
    runner::apply(&orm, None).await?;
    Ok(AppState::new(orm))
}

pub async fn create_user(state: &AppState, key: &str) -> anyhow::Result<user::Model> {
    Ok(user_service::create_user(
        state,
        NewUser {
            user_id: key.to_owned(),
            name: key.to_owned(),
            email: format!("{key}@example.com"),
            role: None,
        },
    )
    .await?)
}

pub async fn create_product(
    state: &AppState,
    name: &str,
    price: Decimal,
    owner: Option<&str>,
) -> anyhow::Result<product::Model> {
    Ok(product_service::create_product(
        state,
        NewProduct {
            name: name.to_owned(),
            description: None,
            price,
            img_path: None,
            mod3d: None,
            user_id: owner.map(str::to_owned),
        },
    )
    .await?)
}

pub async fn count_rows(db: &DatabaseConnection, sql: &str) -> anyhow::Result<i64> {
    let row = db
        .query_one(Statement::from_string(db.get_database_backend(), sql.to_owned()))
        .await?
        .ok_or_else(|| anyhow::anyhow!("no row for {sql}"))?;
    Ok(row.try_get_by_index::<i64>(0)?)
}

/// User tables currently present, sorted.
pub async fn table_names(db: &DatabaseConnection) -> anyhow::Result<Vec<String>> {
    let rows = db
        .query_all(Statement::from_string(
            db.get_database_backend(),
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        ))
        .await?;
    let mut names = Vec::with_capacity(rows.len());
    for row in rows {
        names.push(row.try_get::<String>("", "name")?);
    }
    Ok(names)
}

pub struct PhysicalColumn {
    pub name: String,
    pub sql_type: String,
    pub nullable: bool,
    pub default: Option<String>,
}

pub async fn physical_columns(db: &DatabaseConnection, table: &str) -> anyhow::Result<Vec<PhysicalColumn>> {
    let rows = db
        .query_all(Statement::from_string(
            db.get_database_backend(),
            format!(r#"PRAGMA table_info("{table}")"#),
        ))
        .await?;
    let mut columns = Vec::with_capacity(rows.len());
    for row in rows {
        columns.push(PhysicalColumn {
            name: row.try_get::<String>("", "name")?,
            sql_type: row.try_get::<String>("", "type")?,
            nullable: row.try_get::<i64>("", "notnull")? == 0,
            default: row.try_get::<Option<String>>("", "dflt_value")?,
        });
    }
    Ok(columns)
}

/// Columns covered by a single-column `UNIQUE` constraint. Primary keys are left out.
pub async fn unique_columns(db: &DatabaseConnection, table: &str) -> anyhow::Result<BTreeSet<String>> {
    let backend = db.get_database_backend();
    let indexes = db
        .query_all(Statement::from_string(backend, format!(r#"PRAGMA index_list("{table}")"#)))
        .await?;
    let mut columns = BTreeSet::new();
    for index in indexes {
        if index.try_get::<i64>("", "unique")? == 0 || index.try_get::<String>("", "origin")? == "pk" {
            continue;
        }
        let name = index.try_get::<String>("", "name")?;
        let info = db
            .query_all(Statement::from_string(backend, format!(r#"PRAGMA index_info("{name}")"#)))
            .await?;
        if let [only] = info.as_slice() {
            columns.insert(only.try_get::<String>("", "name")?);
        }
    }
    Ok(columns)
}
