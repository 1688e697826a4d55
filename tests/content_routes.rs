use axum::{
    body::{self, Body},
    http::{Request, StatusCode, header},
};
use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::json;
use tower::ServiceExt; // for `oneshot`
use uuid::Uuid;

use korsvagen_server::{
    auth::Role,
    auth::jwt::{TokenKeys, issue_access_token, make_access_claims},
    db::entities::{contact_message, news_article, page, site_setting},
    routes::API_PREFIX,
    test_helpers::{TEST_ACCESS_SECRET, TEST_REFRESH_SECRET, test_app},
};

fn api_path(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

fn bearer(role: Role) -> String {
    let keys = TokenKeys::from_secrets(TEST_ACCESS_SECRET.as_bytes(), TEST_REFRESH_SECRET.as_bytes());
    let claims = make_access_claims(&Uuid::new_v4(), "staff@korsvagen.example", role, 3600);
    format!(
        "Bearer {}",
        issue_access_token(&keys, &claims).expect("token should encode")
    )
}

fn now() -> chrono::DateTime<chrono::FixedOffset> {
    Utc::now().fixed_offset()
}

fn page_row(slug: &str) -> page::Model {
    page::Model {
        id: Uuid::new_v4(),
        created_at: now(),
        updated_at: now(),
        slug: slug.to_string(),
        title: "Chi Siamo".to_string(),
        body: "La nostra storia.".to_string(),
        meta_description: None,
        is_published: true,
    }
}

fn article_row(slug: &str) -> news_article::Model {
    news_article::Model {
        id: Uuid::new_v4(),
        created_at: now(),
        updated_at: now(),
        slug: slug.to_string(),
        title: "Nuovo cantiere".to_string(),
        summary: None,
        body: "Dettagli del progetto.".to_string(),
        cover_image_url: None,
        published_at: Some(now()),
        is_published: true,
    }
}

fn contact_row() -> contact_message::Model {
    contact_message::Model {
        id: Uuid::new_v4(),
        created_at: now(),
        updated_at: now(),
        name: "Mario Rossi".to_string(),
        email: "mario@rossi.example".to_string(),
        phone: None,
        message: "Vorrei un preventivo.".to_string(),
        handled: false,
    }
}

fn setting_row(key: &str) -> site_setting::Model {
    site_setting::Model {
        id: Uuid::new_v4(),
        created_at: now(),
        updated_at: now(),
        key: key.to_string(),
        value: json!({"phone": "+39 000 000"}),
    }
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    serde_json::from_slice(&bytes).expect("body should be json")
}

#[tokio::test]
async fn published_page_is_public() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![page_row("chi-siamo")]])
        .into_connection();
    let app = test_app(db);

    let res = app
        .oneshot(
            Request::builder()
                .uri(api_path("/pages/by-slug/chi-siamo"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["slug"], "chi-siamo");
}

#[tokio::test]
async fn unknown_page_is_404_with_error_envelope() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<page::Model>::new()])
        .into_connection();
    let app = test_app(db);

    let res = app
        .oneshot(
            Request::builder()
                .uri(api_path("/pages/by-slug/missing"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = json_body(res).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn news_listing_is_public() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![article_row("nuovo-cantiere")]])
        .into_connection();
    let app = test_app(db);

    let res = app
        .oneshot(
            Request::builder()
                .uri(api_path("/news"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn creating_a_page_requires_authentication() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = test_app(db);

    let payload = json!({"slug": "nuova-pagina", "title": "Nuova", "body": "Testo"});
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(api_path("/pages"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(res).await;
    assert_eq!(body["code"], "AUTH_TOKEN_REQUIRED");
}

#[tokio::test]
async fn editors_can_create_pages() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![page_row("nuova-pagina")]])
        .into_connection();
    let app = test_app(db);

    let payload = json!({"slug": "nuova-pagina", "title": "Nuova", "body": "Testo"});
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(api_path("/pages"))
                .header(header::AUTHORIZATION, bearer(Role::Editor))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["data"]["slug"], "nuova-pagina");
}

#[tokio::test]
async fn page_creation_validates_the_slug() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = test_app(db);

    let payload = json!({"slug": "Not A Slug", "title": "Nuova", "body": "Testo"});
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(api_path("/pages"))
                .header(header::AUTHORIZATION, bearer(Role::Editor))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["errors"][0]["field"], "slug");
}

#[tokio::test]
async fn editors_cannot_delete_pages() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = test_app(db);

    let res = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(api_path(&format!("/pages/{}", Uuid::new_v4())))
                .header(header::AUTHORIZATION, bearer(Role::Editor))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = json_body(res).await;
    assert_eq!(body["code"], "INSUFFICIENT_PRIVILEGES");
}

#[tokio::test]
async fn contact_form_accepts_a_valid_submission() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![contact_row()]])
        .into_connection();
    let app = test_app(db);

    let payload = json!({
        "name": "Mario Rossi",
        "email": "mario@rossi.example",
        "message": "Vorrei un preventivo."
    });
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(api_path("/contact"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn contact_form_rejects_a_bad_email() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = test_app(db);

    let payload = json!({
        "name": "Mario Rossi",
        "email": "not-an-email",
        "message": "Vorrei un preventivo."
    });
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(api_path("/contact"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(body["errors"][0]["field"], "email");
}

#[tokio::test]
async fn contact_inbox_is_admin_only() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = test_app(db);

    let res = app
        .oneshot(
            Request::builder()
                .uri(api_path("/contact"))
                .header(header::AUTHORIZATION, bearer(Role::Editor))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admins_can_page_through_the_contact_inbox() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![contact_row(), contact_row()]])
        .into_connection();
    let app = test_app(db);

    let res = app
        .oneshot(
            Request::builder()
                .uri(api_path("/contact?page=1&page_size=20"))
                .header(header::AUTHORIZATION, bearer(Role::Admin))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["data"]["page"], 1);
    assert_eq!(body["data"]["has_next"], false);
    assert_eq!(body["data"]["data"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn settings_upsert_creates_a_missing_key() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<site_setting::Model>::new()])
        .append_query_results([vec![setting_row("contact_info")]])
        .into_connection();
    let app = test_app(db);

    let payload = json!({"value": {"phone": "+39 000 000"}});
    let res = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(api_path("/settings/contact_info"))
                .header(header::AUTHORIZATION, bearer(Role::Admin))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["data"]["key"], "contact_info");
}

#[tokio::test]
async fn malformed_json_becomes_the_error_envelope() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = test_app(db);

    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(api_path("/contact"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(body["success"], false);
    assert!(body["code"].is_string());
}

#[tokio::test]
async fn unknown_routes_return_json_errors() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = test_app(db);

    let res = app
        .oneshot(
            Request::builder()
                .uri(api_path("/nope"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = json_body(res).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn settings_listing_is_public() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![setting_row("contact_info")]])
        .into_connection();
    let app = test_app(db);

    let res = app
        .oneshot(
            Request::builder()
                .uri(api_path("/settings"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["data"][0]["key"], "contact_info");
}

#[tokio::test]
async fn health_reports_version_and_database_state() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = test_app(db);

    let res = app
        .oneshot(
            Request::builder()
                .uri(api_path("/health"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["success"], true);
    assert!(body["version"].is_string());
}
