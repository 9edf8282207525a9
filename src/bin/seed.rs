use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use shop_social::{
    config::AppConfig,
    db::create_orm_conn,
    dto::{
        cart::AddToCartRequest,
        orders::{NewOrder, OrderLine},
        posts::{NewComment, NewPost},
        products::{NewProduct, NewReview},
        users::NewUser,
    },
    entity::{Product, User, post::PostStatus, product, user},
    migration::runner,
    services::{cart_service, order_service, post_service, product_service, review_service, user_service},
    state::AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,shop_social=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config).await?;
    // Ensure migrations are applied.
    runner::apply(&orm, None).await?;
    let state = AppState::new(orm);

    let admin = ensure_user(&state, "Admin", "admin@example.com", user::Role::Admin).await?;
    let seller = ensure_user(&state, "Seller", "seller@example.com", user::Role::Seller).await?;
    let customer = ensure_user(&state, "Customer", "user@example.com", user::Role::Customer).await?;

    let products = seed_products(&state, &seller.user_id).await?;
    let Some(first) = products.first() else {
        println!("Seed completed. Nothing else to do.");
        return Ok(());
    };

    review_service::add_review(
        &state,
        NewReview {
            product_id: first.id,
            user_id: customer.user_id.clone(),
            rating: 5,
            comment: Some("Exactly as pictured".into()),
        },
    )
    .await?;

    let cart = cart_service::create_cart(&state, &customer.user_id).await?;
    let cart = cart_service::add_item(
        &state,
        cart.id,
        AddToCartRequest {
            product_id: first.id,
            quantity: 2,
        },
    )
    .await?;

    let order = order_service::place_order(
        &state,
        NewOrder {
            user_id: customer.user_id.clone(),
            lines: products
                .iter()
                .map(|p| OrderLine {
                    product_id: p.id,
                    quantity: 1,
                })
                .collect(),
            payment_method: Some("cash".into()),
            shipping_address: Some("1 Market Street".into()),
        },
    )
    .await?;

    let post = post_service::create_post(
        &state,
        NewPost {
            post_id: Uuid::new_v4().to_string(),
            user_id: admin.user_id.clone(),
            title: "Welcome".into(),
            content: "New arrivals every week.".into(),
            image_path: None,
        },
    )
    .await?;
    post_service::set_status(&state, &post.post_id, PostStatus::Published).await?;
    post_service::add_comment(
        &state,
        NewComment {
            comment_id: Uuid::new_v4().to_string(),
            user_id: customer.user_id.clone(),
            post_id: post.post_id.clone(),
            content: "Looking forward to it".into(),
        },
    )
    .await?;

    println!(
        "Seed completed. Admin ID: {}, Customer ID: {}, cart total: {}, order total: {}",
        admin.user_id, customer.user_id, cart.cart.total_price, order.order.total_price
    );
    Ok(())
}

async fn ensure_user(
    state: &AppState,
    name: &str,
    email: &str,
    role: user::Role,
) -> anyhow::Result<user::Model> {
    let existing = User::find()
        .filter(user::Column::Email.eq(email))
        .one(&state.orm)
        .await?;
    let user = match existing {
        Some(u) => u,
        None => {
            user_service::create_user(
                state,
                NewUser {
                    user_id: Uuid::new_v4().to_string(),
                    name: name.to_owned(),
                    email: email.to_owned(),
                    role: Some(role),
                },
            )
            .await?
        }
    };

    println!("Ensured user {email} (role={:?})", user.role);
    Ok(user)
}

async fn seed_products(state: &AppState, seller_id: &str) -> anyhow::Result<Vec<product::Model>> {
    let catalog = [
        ("Canvas Tote", "Sturdy everyday bag", Decimal::new(1999, 2), Some("img/tote.png")),
        ("Ceramic Mug", "Holds 350ml", Decimal::new(1250, 2), None),
        ("Sticker Pack", "Ten vinyl stickers", Decimal::new(499, 2), None),
    ];

    let mut seeded = Vec::with_capacity(catalog.len());
    for (name, description, price, img_path) in catalog {
        let existing = Product::find()
            .filter(product::Column::Name.eq(name))
            .one(&state.orm)
            .await?;
        let product = match existing {
            Some(p) => p,
            None => {
                let product = product_service::create_product(
                    state,
                    NewProduct {
                        name: name.to_owned(),
                        description: Some(description.to_owned()),
                        price,
                        img_path: img_path.map(str::to_owned),
                        mod3d: None,
                        user_id: Some(seller_id.to_owned()),
                    },
                )
                .await?;
                product_service::add_color(state, product.id, "black").await?;
                product
            }
        };
        seeded.push(product);
    }

    println!("Seeded {} products", seeded.len());
    Ok(seeded)
}
