mod common;

use sea_orm::{ConnectionTrait, Statement};
use shop_social::migration::runner::{self, IrreversiblePolicy, MigrationError};

const ALL_TABLES: [&str; 11] = [
    "Comment",
    "Post",
    "Product",
    "ProductColor",
    "ProductReview",
    "User",
    "cart_items",
    "carts",
    "order_items",
    "orders",
    "seaql_migrations",
];

#[tokio::test]
async fn forward_then_backward_restores_empty_schema() -> anyhow::Result<()> {
    let db = common::connect().await?;

    let applied = runner::apply(&db, None).await?;
    assert_eq!(applied.len(), 12);
    assert_eq!(common::table_names(&db).await?, ALL_TABLES);
    assert!(runner::status(&db).await?.iter().all(|unit| unit.applied));

    // Nothing left to apply.
    assert!(runner::apply(&db, None).await?.is_empty());

    let report = runner::rollback(&db, None, IrreversiblePolicy::Refuse).await?;
    assert_eq!(report.reverted.len(), 12);
    assert_eq!(report.reverted[0], "m20240315_000002_add_canceled_order_status");
    // Enum widening is a no-op in both directions on SQLite.
    assert!(report.flagged.is_empty());

    assert_eq!(common::table_names(&db).await?, vec!["seaql_migrations"]);
    assert!(runner::status(&db).await?.iter().all(|unit| !unit.applied));
    Ok(())
}

#[tokio::test]
async fn partial_rollback_restores_prior_shape() -> anyhow::Result<()> {
    let db = common::connect().await?;
    runner::apply(&db, None).await?;

    // Undo the rename and the mod3D column.
    let report = runner::rollback(&db, Some(4), IrreversiblePolicy::Refuse).await?;
    assert_eq!(
        report.reverted,
        vec![
            "m20240315_000002_add_canceled_order_status",
            "m20240315_000001_add_admin_user_role",
            "m20240310_000002_rename_post_image_column",
            "m20240310_000001_add_product_mod3d",
        ]
    );

    let post: Vec<String> = common::physical_columns(&db, "Post")
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert!(post.contains(&"Image".to_string()));
    assert!(!post.contains(&"ImagePath".to_string()));

    let product: Vec<String> = common::physical_columns(&db, "Product")
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert!(!product.contains(&"mod3D".to_string()));

    // And forward again.
    let applied = runner::apply(&db, None).await?;
    assert_eq!(applied.len(), 4);
    let post: Vec<String> = common::physical_columns(&db, "Post")
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert!(post.contains(&"ImagePath".to_string()));
    Ok(())
}

#[tokio::test]
async fn failing_unit_stops_the_sequence() -> anyhow::Result<()> {
    let db = common::connect().await?;
    assert_eq!(runner::apply(&db, Some(8)).await?.len(), 8);

    // Someone already added the column by hand.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"ALTER TABLE "Product" ADD COLUMN "mod3D" varchar(255)"#,
    ))
    .await?;

    let err = runner::apply(&db, None).await.unwrap_err();
    match err {
        MigrationError::UnitFailed { unit, .. } => {
            assert_eq!(unit, "m20240310_000001_add_product_mod3d")
        }
        other => panic!("unexpected error: {other}"),
    }

    let pending: Vec<String> = runner::status(&db)
        .await?
        .into_iter()
        .filter(|unit| !unit.applied)
        .map(|unit| unit.name)
        .collect();
    assert_eq!(
        pending,
        vec![
            "m20240310_000001_add_product_mod3d",
            "m20240310_000002_rename_post_image_column",
            "m20240315_000001_add_admin_user_role",
            "m20240315_000002_add_canceled_order_status",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn step_limited_apply_leaves_rest_pending() -> anyhow::Result<()> {
    let db = common::connect().await?;
    let applied = runner::apply(&db, Some(2)).await?;
    assert_eq!(
        applied,
        vec![
            "m20240301_000001_create_user_table",
            "m20240301_000002_create_product_table",
        ]
    );
    let status = runner::status(&db).await?;
    assert_eq!(status.iter().filter(|unit| unit.applied).count(), 2);
    assert_eq!(status.len(), 12);
    Ok(())
}
