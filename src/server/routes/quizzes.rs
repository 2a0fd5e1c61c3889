use std::collections::HashSet;

use axum::{extract::State, routing::post, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::queries::questions::list_questions,
    db::Question,
    quiz::{pick_unseen, QuizScope},
    server::{
        app::AppState,
        deserializers::{deserialize_null_default, LooseInt},
        error::ApiError,
        extract::ApiJson,
    },
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::{success, ApiResponse};

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    previous_questions: Vec<LooseInt>,
    quiz_category: QuizCategory,
}

// the client also sends the category `type`, only the id matters
#[derive(Deserialize)]
struct QuizCategory {
    id: LooseInt,
}

/// Serialises as the question, or as `{}` once the quiz has run out of questions.
#[derive(Serialize)]
#[serde(untagged)]
enum QuizPick {
    Question(Question),
    Exhausted {},
}

#[derive(Serialize)]
struct QuizBody {
    question: QuizPick,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    ApiJson(request): ApiJson<QuizRequest>,
) -> ApiResponse<QuizBody> {
    let scope = QuizScope::from_category_id(request.quiz_category.id.0);

    let candidates = list_questions(&pool, scope.filter(), None).await?;
    if candidates.is_empty() {
        return Err(ApiError::NoMatch("quiz questions"));
    }

    let previous: HashSet<i64> = request.previous_questions.iter().map(|id| id.0).collect();
    let picked = pick_unseen(candidates, &previous, &mut rand::thread_rng());

    let question = match picked {
        Some(question) => {
            QUIZ_QUESTIONS_SERVED
                .with_label_values(&[scope.label().as_str()])
                .inc();
            tracing::debug!(id = question.id, scope = %scope.label(), "Serving quiz question");
            QuizPick::Question(question)
        }
        None => {
            tracing::debug!(scope = %scope.label(), "Quiz exhausted");
            QuizPick::Exhausted {}
        }
    };

    success(QuizBody { question })
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
