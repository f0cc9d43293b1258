//! Integration tests for the article API

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use noticias_domain::traits::ArticleStore;
use noticias_domain::{Article, NewArticle, Statistics};
use noticias_router::handlers::{create_router, AppState, DeleteAllResponse, HealthCheckResponse};
use noticias_store::SqliteStore;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt; // for oneshot

/// Helper to create an app over a fresh in-memory store
fn create_test_app() -> (Router, Arc<Mutex<SqliteStore>>) {
    let store = Arc::new(Mutex::new(SqliteStore::new(":memory:").unwrap()));
    let app = create_router(AppState::from_shared(Arc::clone(&store)));
    (app, store)
}

fn seed(store: &Arc<Mutex<SqliteStore>>, title: &str, source: &str) -> Article {
    store
        .lock()
        .unwrap()
        .create(NewArticle::new(title).with_source(source))
        .unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let (app, store) = create_test_app();
    seed(&store, "Materia para contar", "G1");

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    let health: HealthCheckResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.total_noticias, 1);
}

#[tokio::test]
async fn test_create_applies_defaults() {
    let (app, _store) = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/noticias/",
        Some(r#"{"title": "Nova materia criada pela API"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let article: Article = serde_json::from_slice(&body).unwrap();
    assert_eq!(article.title, "Nova materia criada pela API");
    assert_eq!(article.description, "Sem descrição");
    assert_eq!(article.source, "G1");
    assert_eq!(article.link, "");
}

#[tokio::test]
async fn test_create_json_shape() {
    let (app, _store) = create_test_app();

    let (_, body) = send(
        &app,
        "POST",
        "/noticias/",
        Some(r#"{"title": "Formato do registro", "link": "https://g1.globo.com/a", "source": "X"}"#),
    )
    .await;

    let value: Value = serde_json::from_slice(&body).unwrap();
    let object = value.as_object().unwrap();
    let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["description", "extracted_at", "id", "link", "source", "title"]);
    assert!(object["id"].is_i64());
    assert!(chrono::DateTime::parse_from_rfc3339(object["extracted_at"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_create_rejects_blank_title() {
    let (app, store) = create_test_app();

    let (status, body) = send(&app, "POST", "/noticias/", Some(r#"{"title": "   "}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert!(value.get("title").is_some());
    assert_eq!(store.lock().unwrap().count().unwrap(), 0);
}

#[tokio::test]
async fn test_create_trims_title() {
    let (app, store) = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/noticias/",
        Some(r#"{"title": "   padded title   "}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let article: Article = serde_json::from_slice(&body).unwrap();
    assert_eq!(article.title, "padded title");

    let stored = store.lock().unwrap().get(article.id).unwrap().unwrap();
    assert_eq!(stored.title, "padded title");
}

#[tokio::test]
async fn test_create_rejects_relative_link() {
    let (app, _store) = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/noticias/",
        Some(r#"{"title": "Materia com link ruim", "link": "/materia/1"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert!(value.get("link").is_some());
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let (app, _store) = create_test_app();

    let (status, _) = send(&app, "POST", "/noticias/", Some("{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_newest_first() {
    let (app, store) = create_test_app();
    seed(&store, "Primeira materia A", "G1");
    seed(&store, "Segunda materia B", "G1");
    seed(&store, "Terceira materia C", "G1");

    let (status, body) = send(&app, "GET", "/noticias/", None).await;

    assert_eq!(status, StatusCode::OK);
    let articles: Vec<Article> = serde_json::from_slice(&body).unwrap();
    let titles: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Terceira materia C", "Segunda materia B", "Primeira materia A"]
    );
}

#[tokio::test]
async fn test_retrieve() {
    let (app, store) = create_test_app();
    let seeded = seed(&store, "Materia para buscar", "G1");

    let (status, body) = send(&app, "GET", &format!("/noticias/{}/", seeded.id), None).await;

    assert_eq!(status, StatusCode::OK);
    let article: Article = serde_json::from_slice(&body).unwrap();
    assert_eq!(article, seeded);
}

#[tokio::test]
async fn test_retrieve_missing() {
    let (app, _store) = create_test_app();

    let (status, body) = send(&app, "GET", "/noticias/999/", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value, serde_json::json!({ "detail": "Not found." }));
}

#[tokio::test]
async fn test_put_replaces_fields() {
    let (app, store) = create_test_app();
    let seeded = store
        .lock()
        .unwrap()
        .create(
            NewArticle::new("Titulo original da materia")
                .with_description("Descricao original")
                .with_source("X"),
        )
        .unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/noticias/{}/", seeded.id),
        Some(r#"{"title": "Titulo substituido"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let article: Article = serde_json::from_slice(&body).unwrap();
    assert_eq!(article.title, "Titulo substituido");
    assert_eq!(article.description, "Sem descrição");
    assert_eq!(article.source, "G1");
    assert_eq!(article.extracted_at, seeded.extracted_at);
}

#[tokio::test]
async fn test_put_requires_title() {
    let (app, store) = create_test_app();
    let seeded = seed(&store, "Materia intocada aqui", "G1");

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/noticias/{}/", seeded.id),
        Some(r#"{"description": "sem titulo"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let stored = store.lock().unwrap().get(seeded.id).unwrap().unwrap();
    assert_eq!(stored, seeded);
}

#[tokio::test]
async fn test_patch_changes_only_given_fields() {
    let (app, store) = create_test_app();
    let seeded = store
        .lock()
        .unwrap()
        .create(NewArticle::new("Materia parcialmente editada").with_description("Mantida"))
        .unwrap();

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/noticias/{}/", seeded.id),
        Some(r#"{"source": "Folha"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let article: Article = serde_json::from_slice(&body).unwrap();
    assert_eq!(article.source, "Folha");
    assert_eq!(article.title, seeded.title);
    assert_eq!(article.description, "Mantida");
}

#[tokio::test]
async fn test_update_missing() {
    let (app, _store) = create_test_app();

    let (status, _) = send(&app, "PATCH", "/noticias/42/", Some(r#"{"source": "X"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "PUT", "/noticias/42/", Some(r#"{"title": "Qualquer titulo"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete() {
    let (app, store) = create_test_app();
    let seeded = seed(&store, "Materia a ser apagada", "G1");
    let uri = format!("/noticias/{}/", seeded.id);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_all() {
    let (app, store) = create_test_app();
    for i in 0..3 {
        seed(&store, &format!("Materia numero {}", i), "G1");
    }

    let (status, body) = send(&app, "DELETE", "/noticias/limpar_tudo/", None).await;

    assert_eq!(status, StatusCode::OK);
    let response: DeleteAllResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.deleted, 3);
    assert_eq!(response.message, "3 records deleted");
    assert_eq!(store.lock().unwrap().count().unwrap(), 0);
}

#[tokio::test]
async fn test_statistics() {
    let (app, store) = create_test_app();
    for i in 0..3 {
        seed(&store, &format!("Materia do G1 {}", i), "G1");
    }
    for i in 0..2 {
        seed(&store, &format!("Materia do X {}", i), "X");
    }

    let (status, body) = send(&app, "GET", "/noticias/estatisticas/", None).await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value, serde_json::json!({ "total_noticias": 5, "total_fontes": 2 }));

    let stats: Statistics = serde_json::from_slice(&body).unwrap();
    assert_eq!(stats.distinct_sources, 2);
}

#[tokio::test]
async fn test_statistics_empty() {
    let (app, _store) = create_test_app();

    let (_, body) = send(&app, "GET", "/noticias/estatisticas/", None).await;

    let stats: Statistics = serde_json::from_slice(&body).unwrap();
    assert_eq!(stats.total_records, 0);
    assert_eq!(stats.distinct_sources, 0);
}
