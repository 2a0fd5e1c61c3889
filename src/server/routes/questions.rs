use std::collections::BTreeMap;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::queries::questions::{self, count_questions, list_questions},
    db::{NewQuestion, Question, QuestionFilter},
    server::{
        app::AppState,
        deserializers::{deserialize_null_default, LooseInt},
        error::ApiError,
        extract::{ApiJson, ApiPath, ApiQuery},
        pagination::{Page, PageQuery},
    },
};

use super::{category_map, success, ApiResponse};

#[derive(Deserialize)]
struct QuestionForm {
    question: String,
    answer: String,
    difficulty: LooseInt,
    category: LooseInt,
    rating: LooseInt,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    #[serde(default, deserialize_with = "deserialize_null_default")]
    search_term: String,
}

#[derive(Serialize)]
struct QuestionsBody {
    questions: Vec<Question>,
    total_questions: i64,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct SearchResults {
    questions: Vec<Question>,
    total_questions: i64,
}

#[derive(Serialize)]
struct Created {
    created: i64,
}

#[derive(Serialize)]
struct Deleted {
    deleted: i64,
}

async fn get_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResponse<QuestionsBody> {
    let page = Page::try_from(query)?;

    let questions = list_questions(&pool, QuestionFilter::All, Some(page.window())).await?;
    if questions.is_empty() {
        tracing::debug!(page = page.number(), "Page past the last question");
        return Err(ApiError::NoMatch("questions"));
    }

    success(QuestionsBody {
        questions,
        total_questions: count_questions(&pool, QuestionFilter::All).await?,
        categories: category_map(&pool).await?,
    })
}

async fn create_question(
    State(pool): State<SqlitePool>,
    ApiJson(form): ApiJson<QuestionForm>,
) -> ApiResponse<Created> {
    let id = questions::create_question(
        &pool,
        &NewQuestion {
            question: &form.question,
            answer: &form.answer,
            category: form.category.0,
            difficulty: form.difficulty.0,
            rating: form.rating.0,
        },
    )
    .await?;
    tracing::info!(id, category = form.category.0, "Created question");

    success(Created { created: id })
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Deleted> {
    if !questions::delete_question(&pool, id).await? {
        return Err(ApiError::NoMatch("question"));
    }
    tracing::info!(id, "Deleted question");

    success(Deleted { deleted: id })
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(query): ApiQuery<PageQuery>,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResponse<SearchResults> {
    let page = Page::try_from(query)?;

    let (questions, total_questions) =
        questions::search_questions(&pool, &body.search_term, page.window()).await?;
    tracing::debug!(term = %body.search_term, total_questions, "Searched questions");

    success(SearchResults {
        questions,
        total_questions,
    })
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(get_questions).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/questions_search", post(search_questions))
        .with_state(state)
}
