use serde::{Deserialize, Serialize};

use crate::entity::{order_item, orders};

#[derive(Debug, Clone, Deserialize)]
pub struct OrderLine {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewOrder {
    pub user_id: String,
    pub lines: Vec<OrderLine>,
    pub payment_method: Option<String>,
    pub shipping_address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderWithItems {
    pub order: orders::Model,
    pub items: Vec<order_item::Model>,
}
