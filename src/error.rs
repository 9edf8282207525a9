use thiserror::Error;

use crate::migration::runner::MigrationError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("ORM error: {0}")]
    OrmError(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Migration(#[from] MigrationError),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;
