use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Product '{0}' already exists")]
    AlreadyExists(String),

    #[error("No products found")]
    Empty,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            // A duplicate create surfaces as 400 Bad Request, not 409.
            ProductError::AlreadyExists(name) => {
                AppError::BadRequest(format!("Product '{}' already exists", name))
            }
            ProductError::Empty => AppError::NotFound("No products found".to_string()),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        ProductError::Database(err.to_string())
    }
}
