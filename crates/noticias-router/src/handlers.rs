//! HTTP request handlers for the article API.
//!
//! Every route delegates to an [`ArticleStore`] shared behind a mutex; the
//! handlers themselves only parse ids, shape JSON and map errors.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get},
    Router as AxumRouter,
};
use noticias_domain::traits::ArticleStore;
use noticias_domain::{Article, ArticleId, ArticleUpdate, NewArticle, Statistics, ValidationError};
use noticias_store::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

/// Shared application state
pub struct AppState<S> {
    /// The record store
    pub store: Arc<Mutex<S>>,
}

impl<S> AppState<S> {
    /// Wrap a store for sharing across requests
    pub fn new(store: S) -> Self {
        Self::from_shared(Arc::new(Mutex::new(store)))
    }

    /// Use a store that is already shared
    pub fn from_shared(store: Arc<Mutex<S>>) -> Self {
        Self { store }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> AppState<S>
where
    S: ArticleStore,
    ApiError: From<S::Error>,
{
    fn with_store<T>(&self, op: impl FnOnce(&mut S) -> Result<T, S::Error>) -> Result<T, ApiError> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| ApiError::Internal(format!("Store lock error: {}", e)))?;
        Ok(op(&mut *store)?)
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Always "healthy" when the store answers
    pub status: String,
    /// Number of stored articles
    pub total_noticias: usize,
}

/// Bulk delete response
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteAllResponse {
    /// Number of articles removed
    pub deleted: usize,
    /// Confirmation text
    pub message: String,
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No article with the requested id
    #[error("Not found.")]
    NotFound,

    /// A field failed validation
    #[error("{0}")]
    Validation(ValidationError),

    /// The body was not the expected JSON
    #[error("{0}")]
    BadRequest(String),

    /// Store or lock failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." }))).into_response()
            }
            ApiError::Validation(e) => {
                let message = match &e {
                    ValidationError::Blank(_) => "This field may not be blank.",
                    ValidationError::InvalidUrl { .. } => "Enter a valid URL.",
                };
                (StatusCode::BAD_REQUEST, Json(json!({ e.field(): [message] }))).into_response()
            }
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response()
            }
            ApiError::Internal(detail) => {
                error!("Request failed: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal server error." })),
                )
                    .into_response()
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(v) => ApiError::Validation(v),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Ids that are not integers name no article
fn parse_id(raw: &str) -> Result<ArticleId, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

/// GET /noticias/ - List every article, newest first
async fn list_articles<S>(State(state): State<AppState<S>>) -> Result<Json<Vec<Article>>, ApiError>
where
    S: ArticleStore + Send + 'static,
    ApiError: From<S::Error>,
{
    Ok(Json(state.with_store(|store| store.list())?))
}

/// POST /noticias/ - Create an article
async fn create_article<S>(
    State(state): State<AppState<S>>,
    payload: Result<Json<NewArticle>, JsonRejection>,
) -> Result<(StatusCode, Json<Article>), ApiError>
where
    S: ArticleStore + Send + 'static,
    ApiError: From<S::Error>,
{
    let Json(article) = payload?;
    let created = state.with_store(|store| store.create(article))?;
    info!("Created article {}", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /noticias/:id/ - Retrieve one article
async fn get_article<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Article>, ApiError>
where
    S: ArticleStore + Send + 'static,
    ApiError: From<S::Error>,
{
    let id = parse_id(&id)?;
    state
        .with_store(|store| store.get(id))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// PUT /noticias/:id/ - Replace every editable field
async fn replace_article<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<NewArticle>, JsonRejection>,
) -> Result<Json<Article>, ApiError>
where
    S: ArticleStore + Send + 'static,
    ApiError: From<S::Error>,
{
    let id = parse_id(&id)?;
    let Json(article) = payload?;
    state
        .with_store(|store| store.update(id, ArticleUpdate::from(article)))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// PATCH /noticias/:id/ - Change only the given fields
async fn patch_article<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<ArticleUpdate>, JsonRejection>,
) -> Result<Json<Article>, ApiError>
where
    S: ArticleStore + Send + 'static,
    ApiError: From<S::Error>,
{
    let id = parse_id(&id)?;
    let Json(update) = payload?;
    state
        .with_store(|store| store.update(id, update))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// DELETE /noticias/:id/ - Remove one article
async fn delete_article<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    S: ArticleStore + Send + 'static,
    ApiError: From<S::Error>,
{
    let id = parse_id(&id)?;
    if state.with_store(|store| store.delete(id))? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// DELETE /noticias/limpar_tudo/ - Remove every article
async fn delete_all_articles<S>(
    State(state): State<AppState<S>>,
) -> Result<Json<DeleteAllResponse>, ApiError>
where
    S: ArticleStore + Send + 'static,
    ApiError: From<S::Error>,
{
    let deleted = state.with_store(|store| store.delete_all())?;
    info!("Deleted all {} articles", deleted);
    Ok(Json(DeleteAllResponse {
        deleted,
        message: format!("{} records deleted", deleted),
    }))
}

/// GET /noticias/estatisticas/ - Aggregate counts
async fn statistics<S>(State(state): State<AppState<S>>) -> Result<Json<Statistics>, ApiError>
where
    S: ArticleStore + Send + 'static,
    ApiError: From<S::Error>,
{
    Ok(Json(state.with_store(|store| store.statistics())?))
}

/// GET /health - Liveness plus store size
async fn health_check<S>(
    State(state): State<AppState<S>>,
) -> Result<Json<HealthCheckResponse>, ApiError>
where
    S: ArticleStore + Send + 'static,
    ApiError: From<S::Error>,
{
    let total_noticias = state.with_store(|store| store.count())?;
    Ok(Json(HealthCheckResponse {
        status: "healthy".to_string(),
        total_noticias,
    }))
}

/// Create the axum router with all routes
pub fn create_router<S>(state: AppState<S>) -> AxumRouter
where
    S: ArticleStore + Send + 'static,
    ApiError: From<S::Error>,
{
    AxumRouter::new()
        .route("/noticias/", get(list_articles::<S>).post(create_article::<S>))
        .route("/noticias/limpar_tudo/", delete(delete_all_articles::<S>))
        .route("/noticias/estatisticas/", get(statistics::<S>))
        .route(
            "/noticias/:id/",
            get(get_article::<S>)
                .put(replace_article::<S>)
                .patch(patch_article::<S>)
                .delete(delete_article::<S>),
        )
        .route("/health", get(health_check::<S>))
        .with_state(state)
}
