pub mod cart_service;
pub mod impact_service;
pub mod order_service;
pub mod post_service;
pub mod product_service;
pub mod review_service;
pub mod user_service;

use crate::error::{AppError, AppResult};

/// Business keys are chosen by the creating caller and never generated here.
pub(crate) fn business_key(field: &str, key: String) -> AppResult<String> {
    if key.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(key)
}
