mod common;

use rust_decimal::Decimal;
use shop_social::{
    dto::{
        orders::{NewOrder, OrderLine},
        posts::{NewComment, NewPost},
        users::NewUser,
    },
    entity::{
        orders::OrderStatus,
        post::PostStatus,
        user::{Role, UserStatus},
    },
    error::AppError,
    services::{order_service, post_service, user_service},
};

// Integration flow: place an order, move it through statuses, read it back.
#[tokio::test]
async fn place_order_and_move_status_freely() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let buyer = common::create_user(&state, "buyer").await?;
    let widget = common::create_product(&state, "Widget", Decimal::new(1000, 2), None).await?;
    let gadget = common::create_product(&state, "Gadget", Decimal::new(333, 2), None).await?;

    let placed = order_service::place_order(
        &state,
        NewOrder {
            user_id: buyer.user_id.clone(),
            lines: vec![
                OrderLine {
                    product_id: widget.id,
                    quantity: 2,
                },
                OrderLine {
                    product_id: gadget.id,
                    quantity: 3,
                },
            ],
            payment_method: Some("cash".into()),
            shipping_address: Some("Somewhere".into()),
        },
    )
    .await?;

    assert_eq!(placed.order.status, OrderStatus::Pending);
    assert_eq!(placed.order.total_price.to_string(), "29.99");
    assert_eq!(placed.items.len(), 2);
    assert_eq!(placed.items[1].price, Decimal::new(333, 2));

    // Transitions are not policed: pending straight to shipping.
    let shipped = order_service::update_status(&state, placed.order.id, OrderStatus::Shipping).await?;
    assert_eq!(shipped.status, OrderStatus::Shipping);

    // The widened status is storable.
    let canceled = order_service::update_status(&state, placed.order.id, OrderStatus::Canceled).await?;
    assert_eq!(canceled.status, OrderStatus::Canceled);

    let fetched = order_service::get_order(&state, placed.order.id).await?;
    assert_eq!(fetched.order.status, OrderStatus::Canceled);
    assert_eq!(fetched.order.shipping_address.as_deref(), Some("Somewhere"));
    assert_eq!(fetched.items.len(), 2);

    let listed = order_service::list_orders(&state, &buyer.user_id).await?;
    assert_eq!(listed.len(), 1);
    Ok(())
}

#[tokio::test]
async fn invalid_orders_are_rejected_without_writes() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let buyer = common::create_user(&state, "buyer").await?;
    let widget = common::create_product(&state, "Widget", Decimal::new(1000, 2), None).await?;

    let empty = order_service::place_order(
        &state,
        NewOrder {
            user_id: buyer.user_id.clone(),
            lines: Vec::new(),
            payment_method: None,
            shipping_address: None,
        },
    )
    .await;
    assert!(matches!(empty, Err(AppError::BadRequest(_))));

    let unknown = order_service::place_order(
        &state,
        NewOrder {
            user_id: buyer.user_id.clone(),
            lines: vec![
                OrderLine {
                    product_id: widget.id,
                    quantity: 1,
                },
                OrderLine {
                    product_id: 4242,
                    quantity: 1,
                },
            ],
            payment_method: None,
            shipping_address: None,
        },
    )
    .await;
    assert!(matches!(unknown, Err(AppError::BadRequest(_))));

    let bulk = order_service::place_order(
        &state,
        NewOrder {
            user_id: buyer.user_id.clone(),
            lines: vec![OrderLine {
                product_id: widget.id,
                quantity: 1_000_000_000,
            }],
            payment_method: None,
            shipping_address: None,
        },
    )
    .await;
    assert!(matches!(bulk, Err(AppError::BadRequest(_))));

    assert_eq!(common::count_rows(&state.orm, "SELECT COUNT(*) FROM orders").await?, 0);
    assert_eq!(common::count_rows(&state.orm, "SELECT COUNT(*) FROM order_items").await?, 0);
    assert!(matches!(
        order_service::update_status(&state, 1, OrderStatus::Completed).await,
        Err(AppError::NotFound)
    ));
    Ok(())
}

#[tokio::test]
async fn widened_roles_and_statuses_round_trip() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = common::create_user(&state, "staff").await?;
    assert_eq!(user.role, Role::Customer);
    assert_eq!(user.status, UserStatus::Active);

    let user = user_service::set_role(&state, &user.user_id, Role::Admin).await?;
    assert_eq!(user.role, Role::Admin);
    let user = user_service::set_status(&state, &user.user_id, UserStatus::Inactive).await?;
    assert_eq!(user_service::get_user(&state, &user.user_id).await?.status, UserStatus::Inactive);

    let post = post_service::create_post(
        &state,
        NewPost {
            post_id: "hello".into(),
            user_id: user.user_id.clone(),
            title: "Hello".into(),
            content: "First".into(),
            image_path: Some("img/hello.png".into()),
        },
    )
    .await?;
    assert_eq!(post.status, PostStatus::Draft);
    assert_eq!(post.post_id, "hello");
    let post = post_service::set_status(&state, &post.post_id, PostStatus::Published).await?;
    assert_eq!(post.status, PostStatus::Published);
    assert_eq!(post.image_path.as_deref(), Some("img/hello.png"));
    Ok(())
}

#[tokio::test]
async fn blank_business_keys_are_rejected() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let keyless = user_service::create_user(
        &state,
        NewUser {
            user_id: "  ".into(),
            name: "Nobody".into(),
            email: "nobody@example.com".into(),
            role: None,
        },
    )
    .await;
    assert!(matches!(keyless, Err(AppError::BadRequest(_))));

    let author = common::create_user(&state, "author").await?;
    let post = post_service::create_post(
        &state,
        NewPost {
            post_id: String::new(),
            user_id: author.user_id.clone(),
            title: "Untitled".into(),
            content: "body".into(),
            image_path: None,
        },
    )
    .await;
    assert!(matches!(post, Err(AppError::BadRequest(_))));

    let post = post_service::create_post(
        &state,
        NewPost {
            post_id: "keyed".into(),
            user_id: author.user_id.clone(),
            title: "Titled".into(),
            content: "body".into(),
            image_path: None,
        },
    )
    .await?;
    let comment = post_service::add_comment(
        &state,
        NewComment {
            comment_id: String::new(),
            user_id: author.user_id.clone(),
            post_id: post.post_id.clone(),
            content: "first".into(),
        },
    )
    .await;
    assert!(matches!(comment, Err(AppError::BadRequest(_))));

    assert_eq!(common::count_rows(&state.orm, r#"SELECT COUNT(*) FROM "User""#).await?, 1);
    assert_eq!(common::count_rows(&state.orm, r#"SELECT COUNT(*) FROM "Comment""#).await?, 0);
    Ok(())
}
