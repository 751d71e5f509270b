pub mod assets;

use crate::error::HttpAppError;
use depot_core::AppError;

/// Fallback for paths no route matches.
pub async fn route_not_found() -> HttpAppError {
    AppError::NotFound("Route not found".to_string()).into()
}
