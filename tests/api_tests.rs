use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use animeka::api::AppState;
use animeka::config::Config;
use animeka::models::anime::{AgeRating, AnimeKind, AnimeStatus, NewAnime, Season};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

/// Default API key seeded by migration (must match m20250301_initial.rs)
const DEFAULT_API_KEY: &str = "animeka_default_api_key_please_regenerate";

async fn spawn_app() -> (Router, Arc<AppState>) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;
    config.server.secure_cookies = false;

    let state = animeka::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    (animeka::api::router(state.clone()).await, state)
}

fn sample_anime(title: &str, slug: &str) -> NewAnime {
    NewAnime {
        title: title.to_string(),
        second_title: None,
        slug: slug.to_string(),
        description: "A story worth telling.".to_string(),
        poster: None,
        studio: "Madhouse".to_string(),
        release_date: "2019-04-05".to_string(),
        episode_count: 12,
        status: AnimeStatus::Released,
        age_rating: AgeRating::Sixteen,
        season: Season::Spring,
        kind: AnimeKind::Series,
        genres: vec!["Action".to_string()],
        directors: vec!["Sayo Yamamoto".to_string()],
    }
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_protected_routes_require_auth() {
    let (app, _state) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header("X-Api-Key", "wrong-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header("X-Api-Key", DEFAULT_API_KEY)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_and_login_flow() {
    let (app, _state) = spawn_app().await;

    let payload = serde_json::json!({
        "username": "rin",
        "password": "correct-horse-battery",
    });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["username"], "rin");
    assert!(body["data"]["profile_id"].is_number());

    // Same username again conflicts.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let api_key = body["data"]["api_key"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header("Authorization", format!("Bearer {api_key}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["username"], "rin");
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let (app, _state) = spawn_app().await;

    let payload = serde_json::json!({
        "username": "admin",
        "password": "not-the-password",
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_catalog_endpoints() {
    let (app, state) = spawn_app().await;

    state
        .store()
        .add_anime(&sample_anime("Dororo", "dororo"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/anime")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["items"][0]["slug"], "dororo");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/anime/dororo")
                .header("x-forwarded-for", "203.0.113.7")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["title"], "Dororo");
    assert_eq!(body["data"]["studio"]["name"], "Madhouse");
    assert_eq!(body["data"]["views"], 1);

    // Same IP again: the view is not double counted.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/anime/dororo")
                .header("x-forwarded-for", "203.0.113.7")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["data"]["views"], 1);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/anime/unknown-slug")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/filters")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["genres"][0]["name"], "Action");
    assert_eq!(body["data"]["years"][0], "2019");

    // Genre pages pair the entity with its titles.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/genres/action")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["info"]["name"], "Action");
    assert_eq!(body["data"]["anime"]["items"][0]["slug"], "dororo");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/genres/isekai")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_random_on_empty_catalog_is_null() {
    let (app, _state) = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/anime/random")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_watchlist_and_rating_over_http() {
    let (app, state) = spawn_app().await;

    state
        .store()
        .add_anime(&sample_anime("Mushishi", "mushishi"))
        .await
        .unwrap();

    let auth = ("X-Api-Key", DEFAULT_API_KEY);

    // Toggle into "watching".
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/anime/mushishi/list")
                .header(auth.0, auth.1)
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"category":"watching"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["category"], "watching");

    // Same category again toggles it off.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/anime/mushishi/list")
                .header(auth.0, auth.1)
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"category":"watching"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    let body = json_body(response).await;
    assert!(body["data"]["category"].is_null());

    // Unknown category is a 400.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/anime/mushishi/list")
                .header(auth.0, auth.1)
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"category":"binging"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Favorite flips on and off.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/anime/mushishi/favorite")
                .header(auth.0, auth.1)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["data"]["is_favorite"], true);

    // The favorites shelf is publicly visible.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/profiles/1/favorites")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"][0]["slug"], "mushishi");

    // Star out of range is a 400.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/anime/mushishi/rating")
                .header(auth.0, auth.1)
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"star":11}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/anime/mushishi/rating")
                .header(auth.0, auth.1)
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"star":8}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_comments_over_http() {
    let (app, state) = spawn_app().await;

    state
        .store()
        .add_anime(&sample_anime("Monster", "monster"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/anime/monster/comments")
                .header("X-Api-Key", DEFAULT_API_KEY)
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"text":"Johan is terrifying."}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let comment_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["author_name"], "admin");

    // Empty text rejected.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/anime/monster/comments")
                .header("X-Api-Key", DEFAULT_API_KEY)
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"text":"   "}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Listing is public.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/anime/monster/comments")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Only the author may delete; a different account gets a 403.
    let register = serde_json::json!({
        "username": "tenma",
        "password": "scalpel-and-regret",
    });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(&register).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(&register).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    let other_key = body["data"]["api_key"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/comments/{comment_id}"))
                .header("X-Api-Key", other_key)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/comments/{comment_id}"))
                .header("X-Api-Key", DEFAULT_API_KEY)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
