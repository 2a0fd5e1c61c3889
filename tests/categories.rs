use serde_json::json;

use crate::common::{assert_error, ids, spawn_app};

mod common;

#[tokio::test]
async fn list_categories_maps_ids_to_types() {
    let app = spawn_app().await;
    let science = app.add_category("Science").await;
    let art = app.add_category("Art").await;

    let response = app.get("/categories").await;

    assert_eq!(200, response.status.as_u16());
    assert_eq!(response.body["success"], true);
    let categories = response.body["categories"].as_object().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[&science.to_string()], "Science");
    assert_eq!(categories[&art.to_string()], "Art");
}

#[tokio::test]
async fn list_categories_on_empty_store() {
    let app = spawn_app().await;

    let response = app.get("/categories").await;

    assert_eq!(200, response.status.as_u16());
    assert_eq!(response.body["categories"], json!({}));
}

#[tokio::test]
async fn create_category_returns_new_id() {
    let app = spawn_app().await;

    let response = app
        .post_json("/categories", json!({ "categoryName": "Geography" }))
        .await;

    assert_eq!(200, response.status.as_u16());
    assert_eq!(response.body["success"], true);
    let id = response.body["created"].as_i64().unwrap();

    let listed = app.get("/categories").await;
    assert_eq!(listed.body["categories"][id.to_string()], "Geography");
}

#[tokio::test]
async fn create_category_without_name_fails() {
    let app = spawn_app().await;

    for body in [
        json!({}),
        json!({ "categoryName": null }),
        json!({ "categoryName": 12 }),
    ] {
        let response = app.post_json("/categories", body).await;
        assert_error(&response, 422, "unprocessable");
    }
    let listed = app.get("/categories").await;
    assert_eq!(listed.body["categories"], json!({}));
}

#[tokio::test]
async fn questions_by_category_scenario() {
    let app = spawn_app().await;
    let science = app.add_category("Science").await;
    let art = app.add_category("Art").await;
    let q1 = app.add_question(science, "What is H2O?").await;
    let q2 = app.add_question(science, "What is the speed of light?").await;
    app.add_question(art, "Who painted the Mona Lisa?").await;

    let response = app.get(&format!("/categories/{science}/questions")).await;

    assert_eq!(200, response.status.as_u16());
    assert_eq!(response.body["success"], true);
    assert_eq!(ids(&response.body), vec![q1, q2]);
    assert_eq!(response.body["total_questions"], 2);
    assert_eq!(response.body["current_category"], science);
    assert_eq!(response.body["questions"][0]["category"], science);
}

#[tokio::test]
async fn questions_for_unknown_category_fail() {
    let app = spawn_app().await;
    let science = app.add_category("Science").await;
    app.add_question(science, "What is H2O?").await;

    let response = app.get("/categories/5/questions").await;

    assert_error(&response, 422, "unprocessable");
}

#[tokio::test]
async fn questions_by_category_are_paginated() {
    let app = spawn_app().await;
    let science = app.add_category("Science").await;
    for n in 0..12 {
        app.add_question(science, &format!("Science question {n}")).await;
    }

    let first = app.get(&format!("/categories/{science}/questions")).await;
    let second = app
        .get(&format!("/categories/{science}/questions?page=2"))
        .await;
    let third = app
        .get(&format!("/categories/{science}/questions?page=3"))
        .await;

    assert_eq!(ids(&first.body).len(), 10);
    assert_eq!(ids(&second.body).len(), 2);
    assert_eq!(second.body["total_questions"], 12);
    assert_error(&third, 422, "unprocessable");
}

#[tokio::test]
async fn non_integer_category_id_is_not_found() {
    let app = spawn_app().await;

    let response = app.get("/categories/science/questions").await;

    assert_error(&response, 404, "resource not found");
}
