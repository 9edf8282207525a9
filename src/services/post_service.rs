use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryOrder, Set, TransactionTrait};

use crate::{
    dto::posts::{NewComment, NewPost, PostThread},
    entity::{
        Comment, Post,
        comment::{self, Model as CommentModel},
        post::{ActiveModel, Model as PostModel, PostStatus},
    },
    error::{AppError, AppResult},
    services::business_key,
    state::AppState,
};

pub async fn create_post(state: &AppState, payload: NewPost) -> AppResult<PostModel> {
    let post_id = business_key("post id", payload.post_id)?;
    let post = ActiveModel {
        post_id: Set(post_id),
        title: Set(payload.title),
        content: Set(payload.content),
        image_path: Set(payload.image_path),
        status: Set(PostStatus::Draft),
        user_id: Set(payload.user_id),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;
    Ok(post)
}

pub async fn get_post(state: &AppState, post_id: &str) -> AppResult<PostModel> {
    match Post::find_by_id(post_id.to_owned()).one(&state.orm).await? {
        Some(p) => Ok(p),
        None => Err(AppError::NotFound),
    }
}

pub async fn set_status(state: &AppState, post_id: &str, status: PostStatus) -> AppResult<PostModel> {
    let mut active: ActiveModel = get_post(state, post_id).await?.into();
    active.status = Set(status);
    Ok(active.update(&state.orm).await?)
}

pub async fn add_comment(state: &AppState, payload: NewComment) -> AppResult<CommentModel> {
    if payload.content.trim().is_empty() {
        return Err(AppError::BadRequest("comment is empty".to_string()));
    }

    let comment_id = business_key("comment id", payload.comment_id)?;

    let comment = comment::ActiveModel {
        comment_id: Set(comment_id),
        content: Set(payload.content),
        user_id: Set(payload.user_id),
        post_id: Set(payload.post_id),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;
    Ok(comment)
}

pub async fn post_thread(state: &AppState, post_id: &str) -> AppResult<PostThread> {
    let post = get_post(state, post_id).await?;
    let comments = post
        .find_related(Comment)
        .order_by_asc(comment::Column::CreatedAt)
        .order_by_asc(comment::Column::CommentId)
        .all(&state.orm)
        .await?;
    Ok(PostThread { post, comments })
}

pub async fn delete_post(state: &AppState, post_id: &str) -> AppResult<()> {
    let txn = state.orm.begin().await?;
    let result = Post::delete_by_id(post_id.to_owned()).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    txn.commit().await?;
    tracing::debug!(post_id, "post deleted");
    Ok(())
}
