#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;
use trivia_api::db::queries::{categories, questions};
use trivia_api::db::{run_migrations, NewQuestion, Question, QuestionFilter};
use trivia_api::server::app::build_app;

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn spawn_app() -> TestApp {
    // one connection, otherwise every connection gets its own in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    run_migrations(&pool)
        .await
        .expect("Failed to migrate database");

    TestApp {
        router: build_app(pool.clone()),
        pool,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: String) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    pub async fn add_category(&self, name: &str) -> i64 {
        categories::create_category(&self.pool, name)
            .await
            .expect("Failed to insert category")
    }

    pub async fn add_question(&self, category: i64, text: &str) -> i64 {
        questions::create_question(
            &self.pool,
            &NewQuestion {
                question: text,
                answer: "answer",
                category,
                difficulty: 1,
                rating: 3,
            },
        )
        .await
        .expect("Failed to insert question")
    }

    pub async fn question_count(&self) -> i64 {
        questions::count_questions(&self.pool, QuestionFilter::All)
            .await
            .expect("Failed to count questions")
    }

    pub async fn stored_question(&self, id: i64) -> Option<Question> {
        sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty, rating FROM questions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .expect("Failed to fetch question")
    }
}

pub fn assert_error(response: &TestResponse, code: u16, message: &str) {
    assert_eq!(response.status.as_u16(), code, "body: {}", response.body);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], code);
    assert_eq!(response.body["message"], message);
}

pub fn ids(body: &Value) -> Vec<i64> {
    body["questions"]
        .as_array()
        .expect("questions array")
        .iter()
        .map(|q| q["id"].as_i64().expect("question id"))
        .collect()
}
