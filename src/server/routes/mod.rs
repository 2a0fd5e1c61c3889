mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;
use sqlx::SqlitePool;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use crate::db::queries::categories::get_all_categories;

use super::error::ApiError;

/// Every successful body carries `"success": true` next to its own fields.
#[derive(Serialize)]
pub struct Success<T> {
    success: bool,
    #[serde(flatten)]
    body: T,
}

pub type ApiResponse<T> = Result<Json<Success<T>>, ApiError>;

fn success<T: Serialize>(body: T) -> ApiResponse<T> {
    Ok(Json(Success {
        success: true,
        body,
    }))
}

/// Category id to its label, the shape the web client consumes.
async fn category_map(pool: &SqlitePool) -> Result<BTreeMap<i64, String>, ApiError> {
    let categories = get_all_categories(pool).await?;
    Ok(categories.into_iter().map(|c| (c.id, c.kind)).collect())
}
