mod common;

use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use shop_social::{
    dto::{
        cart::AddToCartRequest,
        orders::{NewOrder, OrderLine},
        posts::{NewComment, NewPost},
        products::NewReview,
    },
    entity::{
        CartItem, Comment, OrderItem, Orders, Post, Product, ProductColor, ProductReview,
        cart_item, comment, order_item, post, product, product_color, product_review,
    },
    error::AppError,
    services::{
        cart_service, impact_service, order_service, post_service, product_service, review_service,
        user_service,
    },
    state::AppState,
};
use uuid::Uuid;

async fn seed_post(state: &AppState, author: &str, key: &str) -> anyhow::Result<post::Model> {
    Ok(post_service::create_post(
        state,
        NewPost {
            post_id: key.to_owned(),
            user_id: author.to_owned(),
            title: format!("Post {key}"),
            content: "body".into(),
            image_path: None,
        },
    )
    .await?)
}

async fn seed_comment(state: &AppState, author: &str, post_id: &str) -> anyhow::Result<()> {
    post_service::add_comment(
        state,
        NewComment {
            comment_id: Uuid::new_v4().to_string(),
            user_id: author.to_owned(),
            post_id: post_id.to_owned(),
            content: "nice".into(),
        },
    )
    .await?;
    Ok(())
}

#[tokio::test]
async fn deleting_product_removes_colors_and_reviews() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let reviewer = common::create_user(&state, "reviewer").await?;
    let product = common::create_product(&state, "Lamp", Decimal::new(4500, 2), None).await?;
    let other = common::create_product(&state, "Chair", Decimal::new(9900, 2), None).await?;

    for color in ["red", "blue"] {
        product_service::add_color(&state, product.id, color).await?;
    }
    product_service::add_color(&state, other.id, "green").await?;
    review_service::add_review(
        &state,
        NewReview {
            product_id: product.id,
            user_id: reviewer.user_id.clone(),
            rating: 4,
            comment: None,
        },
    )
    .await?;

    let detail = product_service::product_detail(&state, product.id).await?;
    assert_eq!(detail.colors.len(), 2);
    assert_eq!(detail.reviews.len(), 1);

    product_service::delete_product(&state, product.id).await?;

    let colors = ProductColor::find()
        .filter(product_color::Column::ProductId.eq(product.id))
        .count(&state.orm)
        .await?;
    let reviews = ProductReview::find()
        .filter(product_review::Column::ProductId.eq(product.id))
        .count(&state.orm)
        .await?;
    assert_eq!(colors, 0);
    assert_eq!(reviews, 0);

    // Unrelated rows survive.
    let detail = product_service::product_detail(&state, other.id).await?;
    assert_eq!(detail.colors.len(), 1);
    Ok(())
}

#[tokio::test]
async fn deleting_post_removes_its_comments() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let author = common::create_user(&state, "author").await?;
    let post = seed_post(&state, &author.user_id, "p-1").await?;
    let kept = seed_post(&state, &author.user_id, "p-2").await?;
    seed_comment(&state, &author.user_id, &post.post_id).await?;
    seed_comment(&state, &author.user_id, &post.post_id).await?;
    seed_comment(&state, &author.user_id, &kept.post_id).await?;

    assert_eq!(post_service::post_thread(&state, "p-1").await?.comments.len(), 2);

    post_service::delete_post(&state, "p-1").await?;

    let orphans = Comment::find()
        .filter(comment::Column::PostId.eq("p-1"))
        .count(&state.orm)
        .await?;
    assert_eq!(orphans, 0);
    assert_eq!(post_service::post_thread(&state, "p-2").await?.comments.len(), 1);
    Ok(())
}

#[tokio::test]
async fn deleting_user_cascades_and_clears_owners() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let seller = common::create_user(&state, "seller").await?;
    let buyer = common::create_user(&state, "buyer").await?;

    let product =
        common::create_product(&state, "Kettle", Decimal::new(2999, 2), Some(&seller.user_id)).await?;
    let post = seed_post(&state, &seller.user_id, "seller-post").await?;
    seed_comment(&state, &buyer.user_id, &post.post_id).await?;
    let order = order_service::place_order(
        &state,
        NewOrder {
            user_id: seller.user_id.clone(),
            lines: vec![OrderLine {
                product_id: product.id,
                quantity: 1,
            }],
            payment_method: None,
            shipping_address: None,
        },
    )
    .await?;
    let cart = cart_service::create_cart(&state, &seller.user_id).await?;
    cart_service::add_item(
        &state,
        cart.id,
        AddToCartRequest {
            product_id: product.id,
            quantity: 1,
        },
    )
    .await?;

    let impact = impact_service::deletion_impact(&state, "User", seller.user_id.as_str()).await?;
    assert_eq!(impact.deleted_from("User"), 1);
    assert_eq!(impact.deleted_from("Post"), 1);
    assert_eq!(impact.deleted_from("Comment"), 1);
    assert_eq!(impact.deleted_from("carts"), 1);
    assert_eq!(impact.deleted_from("cart_items"), 1);
    assert_eq!(impact.deleted_from("ProductReview"), 0);
    assert_eq!(impact.deleted_from("Product"), 0);
    let cleared: Vec<(&str, u64)> = impact.cleared.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    assert_eq!(cleared, vec![("fk_Product_UserID", 1), ("fk_orders_UserID", 1)]);

    // Counting changes nothing.
    assert!(user_service::get_user(&state, &seller.user_id).await.is_ok());

    user_service::delete_user(&state, &seller.user_id).await?;

    // Posts and their comments go with the author, even comments by other users.
    assert_eq!(
        Post::find()
            .filter(post::Column::UserId.eq(seller.user_id.as_str()))
            .count(&state.orm)
            .await?,
        0
    );
    assert_eq!(
        Comment::find()
            .filter(comment::Column::PostId.eq(post.post_id.as_str()))
            .count(&state.orm)
            .await?,
        0
    );
    assert!(matches!(
        cart_service::cart_with_items(&state, cart.id).await,
        Err(AppError::NotFound)
    ));

    // Products and orders outlive their owner.
    let product = Product::find_by_id(product.id)
        .one(&state.orm)
        .await?
        .expect("product survives");
    assert_eq!(product.user_id, None);
    let order = order_service::get_order(&state, order.order.id).await?;
    assert_eq!(order.order.user_id, None);
    assert_eq!(order.items.len(), 1);

    // The buyer is untouched.
    assert!(user_service::get_user(&state, &buyer.user_id).await.is_ok());
    Ok(())
}

#[tokio::test]
async fn deleting_cart_and_order_removes_their_items() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let buyer = common::create_user(&state, "buyer").await?;
    let product = common::create_product(&state, "Pen", Decimal::new(150, 2), None).await?;

    let cart = cart_service::create_cart(&state, &buyer.user_id).await?;
    cart_service::add_item(
        &state,
        cart.id,
        AddToCartRequest {
            product_id: product.id,
            quantity: 3,
        },
    )
    .await?;
    let order = order_service::place_order(
        &state,
        NewOrder {
            user_id: buyer.user_id.clone(),
            lines: vec![OrderLine {
                product_id: product.id,
                quantity: 2,
            }],
            payment_method: Some("card".into()),
            shipping_address: None,
        },
    )
    .await?;

    cart_service::delete_cart(&state, cart.id).await?;
    order_service::delete_order(&state, order.order.id).await?;

    let cart_items = CartItem::find()
        .filter(cart_item::Column::CartId.eq(cart.id))
        .count(&state.orm)
        .await?;
    let order_items = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order.order.id))
        .count(&state.orm)
        .await?;
    assert_eq!(cart_items, 0);
    assert_eq!(order_items, 0);
    assert!(Orders::find_by_id(order.order.id).one(&state.orm).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn deleting_product_keeps_order_lines_with_captured_price() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let buyer = common::create_user(&state, "buyer").await?;
    let product = common::create_product(&state, "Desk", Decimal::new(12000, 2), None).await?;
    let order = order_service::place_order(
        &state,
        NewOrder {
            user_id: buyer.user_id.clone(),
            lines: vec![OrderLine {
                product_id: product.id,
                quantity: 1,
            }],
            payment_method: None,
            shipping_address: None,
        },
    )
    .await?;

    let impact = impact_service::deletion_impact(&state, "Product", product.id).await?;
    assert_eq!(impact.deleted_from("Product"), 1);
    assert_eq!(impact.deleted_from("order_items"), 0);
    assert_eq!(impact.cleared_by("fk_order_items_productId"), 1);

    product_service::delete_product(&state, product.id).await?;

    let order = order_service::get_order(&state, order.order.id).await?;
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].product_id, None);
    assert_eq!(order.items[0].price.to_string(), "120.00");
    assert!(
        Product::find()
            .filter(product::Column::Id.eq(product.id))
            .one(&state.orm)
            .await?
            .is_none()
    );
    Ok(())
}

#[tokio::test]
async fn deleting_missing_rows_is_not_found() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    assert!(matches!(
        user_service::delete_user(&state, "nobody").await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        product_service::delete_product(&state, 404).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        post_service::delete_post(&state, "missing").await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        impact_service::deletion_impact(&state, "User", "nobody").await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        impact_service::deletion_impact(&state, "Nowhere", 1).await,
        Err(AppError::BadRequest(_))
    ));
    Ok(())
}
