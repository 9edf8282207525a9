use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::{
    dto::cart::{AddToCartRequest, CartLine, CartWithItems},
    entity::{
        Cart, CartItem, Product,
        cart::{self, Model as CartModel},
        cart_item::{self, Column as ItemCol},
    },
    error::{AppError, AppResult},
    money::{self, Monetary},
    state::AppState,
};

pub async fn create_cart(state: &AppState, user_id: &str) -> AppResult<CartModel> {
    let cart = cart::ActiveModel {
        user_id: Set(user_id.to_owned()),
        total_price: Set(Decimal::ZERO),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;
    Ok(cart.with_normalized_money())
}

/// Put `quantity` of a product in the cart, replacing any existing quantity, and
/// recompute the cart total.
pub async fn add_item(
    state: &AppState,
    cart_id: i32,
    payload: AddToCartRequest,
) -> AppResult<CartWithItems> {
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    let txn = state.orm.begin().await?;

    let cart = match Cart::find_by_id(cart_id).one(&txn).await? {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };
    if Product::find_by_id(payload.product_id).one(&txn).await?.is_none() {
        return Err(AppError::BadRequest("product not found".to_string()));
    }

    let exist = CartItem::find()
        .filter(
            Condition::all()
                .add(ItemCol::CartId.eq(cart_id))
                .add(ItemCol::ProductId.eq(payload.product_id)),
        )
        .one(&txn)
        .await?;

    match exist {
        Some(item) => {
            let mut active: cart_item::ActiveModel = item.into();
            active.quantity = Set(payload.quantity);
            active.update(&txn).await?;
        }
        None => {
            cart_item::ActiveModel {
                cart_id: Set(cart_id),
                product_id: Set(payload.product_id),
                quantity: Set(payload.quantity),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }
    }

    let cart = recalculate_total(&txn, cart).await?;
    txn.commit().await?;

    tracing::debug!(
        cart_id,
        product_id = payload.product_id,
        quantity = payload.quantity,
        total = %cart.total_price,
        "cart updated"
    );
    cart_with_items(state, cart_id).await
}

pub async fn remove_item(state: &AppState, cart_id: i32, product_id: i32) -> AppResult<CartWithItems> {
    let txn = state.orm.begin().await?;

    let cart = match Cart::find_by_id(cart_id).one(&txn).await? {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };
    let result = CartItem::delete_many()
        .filter(ItemCol::CartId.eq(cart_id))
        .filter(ItemCol::ProductId.eq(product_id))
        .exec(&txn)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    recalculate_total(&txn, cart).await?;
    txn.commit().await?;
    cart_with_items(state, cart_id).await
}

pub async fn cart_with_items(state: &AppState, cart_id: i32) -> AppResult<CartWithItems> {
    let cart = match Cart::find_by_id(cart_id).one(&state.orm).await? {
        Some(c) => c.with_normalized_money(),
        None => return Err(AppError::NotFound),
    };

    let items = CartItem::find()
        .filter(ItemCol::CartId.eq(cart_id))
        .order_by_asc(ItemCol::Id)
        .find_also_related(Product)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(item, product)| CartLine {
            item,
            product: product.map(Monetary::with_normalized_money),
        })
        .collect();

    Ok(CartWithItems { cart, items })
}

pub async fn delete_cart(state: &AppState, cart_id: i32) -> AppResult<()> {
    let txn = state.orm.begin().await?;
    let result = Cart::delete_by_id(cart_id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    txn.commit().await?;
    Ok(())
}

async fn recalculate_total<C>(conn: &C, cart: CartModel) -> AppResult<CartModel>
where
    C: ConnectionTrait,
{
    let lines = CartItem::find()
        .filter(ItemCol::CartId.eq(cart.id))
        .find_also_related(Product)
        .all(conn)
        .await?;

    let total = lines
        .iter()
        .filter_map(|(item, product)| {
            product
                .as_ref()
                .map(|p| money::line_total(p.price, item.quantity))
        })
        .collect::<Option<Vec<_>>>()
        .and_then(money::checked_sum)
        .ok_or_else(|| AppError::BadRequest(format!("cart total exceeds {}", money::MAX_AMOUNT)))?;

    let mut active: cart::ActiveModel = cart.into();
    active.total_price = Set(total);
    let cart = active.update(conn).await?;
    Ok(cart.with_normalized_money())
}
