use serde::{Deserialize, Serialize};

use crate::entity::{comment, post};

#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    /// Business key chosen by the caller.
    pub post_id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewComment {
    /// Business key chosen by the caller.
    pub comment_id: String,
    pub user_id: String,
    pub post_id: String,
    pub content: String,
}

/// A post with its comments, oldest first.
#[derive(Debug, Serialize)]
pub struct PostThread {
    pub post: post::Model,
    pub comments: Vec<comment::Model>,
}
