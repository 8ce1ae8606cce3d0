//! Integration tests for the letter lookup routes

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::*;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(body_bytes(response).await, "ok");
}

#[tokio::test]
async fn test_letter_in_all_languages_keeps_table_order() {
    let app = create_test_app();
    let response = app.get("/lettre/a").await;

    assert_eq!(response.status(), StatusCode::OK);
    let entries = body_json(response).await;
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 7);

    let langs: Vec<&str> = entries.iter().map(|e| e["langue"].as_str().unwrap()).collect();
    assert_eq!(langs, vec!["fr", "en", "es", "jp", "kr", "ar", "ru"]);
    assert_eq!(
        entries[0],
        json!({
            "langue": "fr",
            "lettre": "A",
            "prononciation_standard": "ah",
            "mot_exemple": "Arbre"
        })
    );
}

#[tokio::test]
async fn test_letter_lookup_is_case_insensitive() {
    let app = create_test_app();

    let lower = body_json(app.get("/lettre/b/ru").await).await;
    let response = app.get("/lettre/B/RU").await;
    assert_eq!(response.status(), StatusCode::OK);
    let upper = body_json(response).await;

    assert_eq!(lower, upper);
    assert_eq!(
        upper,
        json!({
            "langue": "ru",
            "lettre": "Б",
            "prononciation_standard": "be",
            "description": "Lettre B en Cyrillique"
        })
    );
}

#[tokio::test]
async fn test_unknown_letter_is_not_found() {
    let app = create_test_app();
    let response = app.get("/lettre/Z").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error = body_json(response).await;
    assert_eq!(error["message"], "Lettre 'z' non trouvée.");
    assert_eq!(error["code"], 404);
}

#[tokio::test]
async fn test_unknown_letter_wins_over_unknown_language() {
    let app = create_test_app();
    let response = app.get("/lettre/z/xx").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error = body_json(response).await;
    assert_eq!(error["message"], "Lettre 'z' non trouvée.");
}

#[tokio::test]
async fn test_unknown_language_for_known_letter() {
    let app = create_test_app();
    let response = app.get("/lettre/a/DE").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error = body_json(response).await;
    assert_eq!(
        error["message"],
        "Langue 'de' non disponible pour la lettre 'a'."
    );
}

#[tokio::test]
async fn test_percent_encoded_letter_is_decoded() {
    let app = create_test_app();
    let response = app.get("/lettre/%C3%A9").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error = body_json(response).await;
    assert_eq!(error["message"], "Lettre 'é' non trouvée.");
}

#[tokio::test]
async fn test_routes_are_also_served_under_api_prefix() {
    let app = create_test_app();
    let response = app.get("/api/lettre/b/en").await;

    assert_eq!(response.status(), StatusCode::OK);
    let entry = body_json(response).await;
    assert_eq!(entry["mot_exemple"], "Ball");
}

#[tokio::test]
async fn test_lookups_never_touch_the_provider() {
    let app = create_test_app();
    app.get("/lettre/a").await;
    app.get("/lettre/a/fr").await;
    assert_eq!(app.provider.calls(), 0);
}

#[tokio::test]
async fn test_not_found_endpoint() {
    let app = create_test_app();
    let response = app.get("/nonexistent").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
