use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::{
    dto::orders::{NewOrder, OrderWithItems},
    entity::{
        OrderItem, Orders, Product,
        order_item::{self, Column as OrderItemCol},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Model as OrderModel, OrderStatus},
    },
    error::{AppError, AppResult},
    money::{self, Monetary},
    state::AppState,
};

/// Create a pending order, capturing each product's current price.
pub async fn place_order(state: &AppState, payload: NewOrder) -> AppResult<OrderWithItems> {
    if payload.lines.is_empty() {
        return Err(AppError::BadRequest("order has no lines".into()));
    }
    if payload.lines.iter().any(|line| line.quantity <= 0) {
        return Err(AppError::BadRequest("order has invalid quantity".into()));
    }

    let txn = state.orm.begin().await?;

    let mut priced = Vec::with_capacity(payload.lines.len());
    let mut total_price = Decimal::ZERO;
    for line in &payload.lines {
        let product = match Product::find_by_id(line.product_id).one(&txn).await? {
            Some(p) => p,
            None => {
                return Err(AppError::BadRequest(format!(
                    "product {} not found",
                    line.product_id
                )));
            }
        };
        let unit_price = money::normalize(product.price);
        total_price = money::line_total(unit_price, line.quantity)
            .and_then(|line_total| money::checked_sum([total_price, line_total]))
            .ok_or_else(|| {
                AppError::BadRequest(format!("order total exceeds {}", money::MAX_AMOUNT))
            })?;
        priced.push((line, unit_price));
    }

    let order = OrderActive {
        user_id: Set(Some(payload.user_id)),
        status: Set(OrderStatus::Pending),
        total_price: Set(total_price),
        payment_method: Set(payload.payment_method),
        shipping_address: Set(payload.shipping_address),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::with_capacity(priced.len());
    for (line, unit_price) in priced {
        let item = order_item::ActiveModel {
            order_id: Set(order.id),
            product_id: Set(Some(line.product_id)),
            quantity: Set(line.quantity),
            price: Set(unit_price),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        items.push(item.with_normalized_money());
    }

    txn.commit().await?;

    tracing::info!(order_id = order.id, total = %order.total_price, lines = items.len(), "order placed");
    Ok(OrderWithItems {
        order: order.with_normalized_money(),
        items,
    })
}

pub async fn get_order(state: &AppState, id: i32) -> AppResult<OrderWithItems> {
    let order = Orders::find_by_id(id).one(&state.orm).await?;
    let order = match order {
        Some(o) => o.with_normalized_money(),
        None => return Err(AppError::NotFound),
    };

    let items = order
        .find_related(OrderItem)
        .order_by_asc(OrderItemCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Monetary::with_normalized_money)
        .collect();

    Ok(OrderWithItems { order, items })
}

pub async fn list_orders(state: &AppState, user_id: &str) -> AppResult<Vec<OrderModel>> {
    let orders = Orders::find()
        .filter(OrderCol::UserId.eq(user_id))
        .order_by_desc(OrderCol::CreatedAt)
        .order_by_desc(OrderCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Monetary::with_normalized_money)
        .collect();
    Ok(orders)
}

/// Move an order to any status. Transitions are not checked.
pub async fn update_status(state: &AppState, id: i32, status: OrderStatus) -> AppResult<OrderModel> {
    let order = Orders::find_by_id(id).one(&state.orm).await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let previous = order.status;
    let mut active: OrderActive = order.into();
    active.status = Set(status);
    let order = active.update(&state.orm).await?;

    tracing::debug!(order_id = id, from = ?previous, to = ?status, "order status changed");
    Ok(order.with_normalized_money())
}

pub async fn delete_order(state: &AppState, id: i32) -> AppResult<()> {
    let txn = state.orm.begin().await?;
    let result = Orders::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    txn.commit().await?;
    Ok(())
}
