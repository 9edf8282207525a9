use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entity::{product, product_color, product_review};

#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub img_path: Option<String>,
    pub mod3d: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub product_id: i32,
    pub user_id: String,
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductDetail {
    pub product: product::Model,
    pub colors: Vec<product_color::Model>,
    pub reviews: Vec<product_review::Model>,
}
