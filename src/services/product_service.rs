use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryOrder, Set, TransactionTrait};

use crate::{
    dto::products::{NewProduct, ProductDetail},
    entity::{
        Product, ProductColor, ProductReview,
        product::{ActiveModel, Model as ProductModel},
        product_color::{self, Model as ColorModel},
        product_review,
    },
    error::{AppError, AppResult},
    money::{self, Monetary},
    state::AppState,
};

fn check_price(price: Decimal) -> AppResult<()> {
    if price.is_sign_negative() {
        return Err(AppError::BadRequest("price must not be negative".to_string()));
    }
    if !money::fits_column(price) {
        return Err(AppError::BadRequest(format!(
            "price must not exceed {}",
            money::MAX_AMOUNT
        )));
    }
    Ok(())
}

pub async fn create_product(state: &AppState, payload: NewProduct) -> AppResult<ProductModel> {
    check_price(payload.price)?;

    let product = ActiveModel {
        name: Set(payload.name),
        description: Set(payload.description),
        price: Set(payload.price),
        img_path: Set(payload.img_path),
        mod3d: Set(payload.mod3d),
        user_id: Set(payload.user_id),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;

    tracing::debug!(product_id = product.id, price = %product.price, "product created");
    Ok(product.with_normalized_money())
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ProductModel> {
    let result = Product::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Monetary::with_normalized_money);
    match result {
        Some(p) => Ok(p),
        None => Err(AppError::NotFound),
    }
}

pub async fn product_detail(state: &AppState, id: i32) -> AppResult<ProductDetail> {
    let product = get_product(state, id).await?;
    let colors = product
        .find_related(ProductColor)
        .order_by_asc(product_color::Column::Id)
        .all(&state.orm)
        .await?;
    let reviews = product
        .find_related(ProductReview)
        .order_by_asc(product_review::Column::Id)
        .all(&state.orm)
        .await?;

    Ok(ProductDetail {
        product,
        colors,
        reviews,
    })
}

pub async fn update_price(state: &AppState, id: i32, price: Decimal) -> AppResult<ProductModel> {
    check_price(price)?;
    let mut active: ActiveModel = get_product(state, id).await?.into();
    active.price = Set(price);
    let product = active.update(&state.orm).await?;
    Ok(product.with_normalized_money())
}

pub async fn add_color(state: &AppState, product_id: i32, color_name: &str) -> AppResult<ColorModel> {
    // Surface a missing product as NotFound rather than a foreign key error.
    get_product(state, product_id).await?;
    let color = product_color::ActiveModel {
        color_name: Set(color_name.to_owned()),
        product_id: Set(product_id),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;
    Ok(color)
}

/// Delete a product with its colors, reviews and cart lines. Order lines keep the
/// captured price and lose the product reference.
pub async fn delete_product(state: &AppState, id: i32) -> AppResult<()> {
    let txn = state.orm.begin().await?;
    let result = Product::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    txn.commit().await?;

    tracing::debug!(
        product_id = id,
        cascaded = ?state.associations.cascade_closure("Product"),
        "product deleted"
    );
    Ok(())
}
