use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::queries::{
        categories,
        questions::{count_questions, list_questions},
    },
    db::{Question, QuestionFilter},
    server::{
        app::AppState,
        error::ApiError,
        extract::{ApiJson, ApiPath, ApiQuery},
        pagination::{Page, PageQuery},
    },
};

use super::{category_map, success, ApiResponse};

#[derive(Deserialize)]
struct NewCategory {
    #[serde(rename = "categoryName")]
    category_name: String,
}

#[derive(Serialize)]
struct CategoriesBody {
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct Created {
    created: i64,
}

#[derive(Serialize)]
struct CategoryQuestionsBody {
    questions: Vec<Question>,
    total_questions: i64,
    current_category: i64,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesBody> {
    let categories = category_map(&pool).await?;
    success(CategoriesBody { categories })
}

async fn create_category(
    State(pool): State<SqlitePool>,
    ApiJson(new_category): ApiJson<NewCategory>,
) -> ApiResponse<Created> {
    let id = categories::create_category(&pool, &new_category.category_name).await?;
    tracing::info!(id, name = %new_category.category_name, "Created category");
    success(Created { created: id })
}

async fn category_questions(
    State(pool): State<SqlitePool>,
    ApiPath(category_id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResponse<CategoryQuestionsBody> {
    let page = Page::try_from(query)?;
    let filter = QuestionFilter::Category(category_id);

    let questions = list_questions(&pool, filter, Some(page.window())).await?;
    if questions.is_empty() {
        return Err(ApiError::NoMatch("questions"));
    }

    success(CategoryQuestionsBody {
        questions,
        total_questions: count_questions(&pool, filter).await?,
        current_category: category_id,
    })
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories).post(create_category))
        .route("/categories/{id}/questions", get(category_questions))
        .with_state(state)
}
