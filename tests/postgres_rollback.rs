mod common;

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use shop_social::{
    config::AppConfig,
    db::create_orm_conn,
    dto::orders::{NewOrder, OrderLine},
    entity::orders::OrderStatus,
    migration::runner::{self, IrreversiblePolicy, MigrationError},
    services::order_service,
    state::AppState,
};

const CANCELED_UNIT: &str = "m20240315_000002_add_canceled_order_status";
const ADMIN_UNIT: &str = "m20240315_000001_add_admin_user_role";

/// Native enum types only exist on Postgres, so this flow needs a real server.
async fn postgres() -> anyhow::Result<Option<DatabaseConnection>> {
    let database_url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) if url.starts_with("postgres") => url,
        _ => {
            eprintln!("Skipping test: set TEST_DATABASE_URL to a postgres:// URL to run enum rollback tests.");
            return Ok(None);
        }
    };
    let db = create_orm_conn(&AppConfig {
        database_url,
        max_connections: 2,
        sql_log: false,
    })
    .await?;
    // Start from an empty schema whatever an earlier run left behind.
    runner::rollback(&db, None, IrreversiblePolicy::Flag).await?;
    Ok(Some(db))
}

#[tokio::test]
async fn widening_survives_flagged_rollback_and_reapply() -> anyhow::Result<()> {
    let Some(db) = postgres().await? else {
        return Ok(());
    };
    runner::apply(&db, None).await?;
    let before = runner::status(&db).await?;
    assert!(before.iter().all(|unit| unit.applied));

    // Refuse fails up front and touches nothing.
    let refused = runner::rollback(&db, None, IrreversiblePolicy::Refuse).await;
    assert!(matches!(refused, Err(MigrationError::Irreversible { .. })));
    assert_eq!(runner::status(&db).await?, before);

    let refused = runner::rollback(&db, Some(1), IrreversiblePolicy::Refuse).await;
    match refused {
        Err(MigrationError::Irreversible { unit, .. }) => assert_eq!(unit, CANCELED_UNIT),
        other => panic!("expected an irreversible refusal, got {other:?}"),
    }
    assert_eq!(runner::status(&db).await?, before);

    // Flag reverts the bookkeeping but the enum keeps its value.
    let report = runner::rollback(&db, Some(1), IrreversiblePolicy::Flag).await?;
    assert_eq!(report.reverted, vec![CANCELED_UNIT.to_owned()]);
    assert_eq!(report.flagged.len(), 1);
    assert_eq!(report.flagged[0].unit, CANCELED_UNIT);
    let pending: Vec<_> = runner::status(&db)
        .await?
        .into_iter()
        .filter(|unit| !unit.applied)
        .map(|unit| unit.name)
        .collect();
    assert_eq!(pending, vec![CANCELED_UNIT.to_owned()]);

    // Re-applying must tolerate the value that is still there.
    assert_eq!(runner::apply(&db, None).await?, vec![CANCELED_UNIT.to_owned()]);
    assert_eq!(runner::status(&db).await?, before);

    let state = AppState::new(db.clone());
    let buyer = common::create_user(&state, "pg-buyer").await?;
    let widget = common::create_product(&state, "Widget", Decimal::new(1000, 2), None).await?;
    let order = order_service::place_order(
        &state,
        NewOrder {
            user_id: buyer.user_id.clone(),
            lines: vec![OrderLine {
                product_id: widget.id,
                quantity: 1,
            }],
            payment_method: None,
            shipping_address: None,
        },
    )
    .await?;
    let canceled = order_service::update_status(&state, order.order.id, OrderStatus::Canceled).await?;
    assert_eq!(canceled.status, OrderStatus::Canceled);

    let report = runner::rollback(&db, None, IrreversiblePolicy::Flag).await?;
    let flagged: Vec<_> = report.flagged.iter().map(|unit| unit.unit.as_str()).collect();
    assert_eq!(flagged, vec![CANCELED_UNIT, ADMIN_UNIT]);
    Ok(())
}

