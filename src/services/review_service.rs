use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::{
    dto::products::NewReview,
    entity::{
        ProductReview,
        product_review::{ActiveModel, Model as ReviewModel},
    },
    error::{AppError, AppResult},
    state::AppState,
};

/// Ratings outside 1..=5 are rejected by the model hook and come back as an ORM error.
pub async fn add_review(state: &AppState, payload: NewReview) -> AppResult<ReviewModel> {
    let review = ActiveModel {
        rating: Set(payload.rating),
        comment: Set(payload.comment),
        product_id: Set(payload.product_id),
        user_id: Set(payload.user_id),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;
    Ok(review)
}

pub async fn update_rating(state: &AppState, id: i32, rating: i32) -> AppResult<ReviewModel> {
    let existing = ProductReview::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };

    let mut active: ActiveModel = existing.into();
    active.rating = Set(rating);
    Ok(active.update(&state.orm).await?)
}
