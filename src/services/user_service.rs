use sea_orm::{ActiveModelTrait, EntityTrait, Set, TransactionTrait};

use crate::{
    dto::users::NewUser,
    entity::{
        User,
        user::{ActiveModel, Model as UserModel, Role, UserStatus},
    },
    error::{AppError, AppResult},
    services::business_key,
    state::AppState,
};

pub async fn create_user(state: &AppState, payload: NewUser) -> AppResult<UserModel> {
    if payload.email.trim().is_empty() {
        return Err(AppError::BadRequest("email is required".to_string()));
    }

    let user_id = business_key("user id", payload.user_id)?;

    let user = ActiveModel {
        user_id: Set(user_id),
        name: Set(payload.name),
        email: Set(payload.email),
        role: Set(payload.role.unwrap_or(Role::Customer)),
        status: Set(UserStatus::Active),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;

    tracing::debug!(user_id = %user.user_id, role = ?user.role, "user created");
    Ok(user)
}

pub async fn get_user(state: &AppState, user_id: &str) -> AppResult<UserModel> {
    let user = User::find_by_id(user_id.to_owned()).one(&state.orm).await?;
    match user {
        Some(u) => Ok(u),
        None => Err(AppError::NotFound),
    }
}

pub async fn set_status(state: &AppState, user_id: &str, status: UserStatus) -> AppResult<UserModel> {
    let mut active: ActiveModel = get_user(state, user_id).await?.into();
    active.status = Set(status);
    Ok(active.update(&state.orm).await?)
}

pub async fn set_role(state: &AppState, user_id: &str, role: Role) -> AppResult<UserModel> {
    let mut active: ActiveModel = get_user(state, user_id).await?.into();
    active.role = Set(role);
    Ok(active.update(&state.orm).await?)
}

/// Delete a user. Owned posts, comments, reviews and carts go with it; products and
/// orders stay with their owner cleared.
pub async fn delete_user(state: &AppState, user_id: &str) -> AppResult<()> {
    let txn = state.orm.begin().await?;
    let result = User::delete_by_id(user_id.to_owned()).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    txn.commit().await?;

    let graph = &state.associations;
    tracing::debug!(
        user_id,
        cascaded = ?graph.cascade_closure("User"),
        cleared = ?graph
            .nullified_by("User")
            .iter()
            .map(|edge| edge.name)
            .collect::<Vec<_>>(),
        "user deleted"
    );
    Ok(())
}
