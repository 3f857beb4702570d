use crate::app::engine::{ClassNotFound, ModelEngine};
use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::{JoinError, spawn_blocking};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct HttpState {
    pub engine: ModelEngine,
}

#[derive(Debug, Clone, Deserialize)]
struct HierarchyQuery {
    root: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ClassQuery {
    class: String,
}

#[derive(Debug, Clone, serde::Serialize)]
struct ApiErrorBody {
    error: String,
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> impl IntoResponse {
    (status, Json(ApiErrorBody { error: msg.into() }))
}

/// Maps a blocking engine call to a response. Unknown classes are 404, other failures use
/// `failure_status`.
fn respond<T: Serialize>(
    outcome: std::result::Result<Result<T>, JoinError>,
    failure_status: StatusCode,
) -> Response {
    match outcome {
        Ok(Ok(res)) => Json(res).into_response(),
        Ok(Err(e)) if e.downcast_ref::<ClassNotFound>().is_some() => {
            api_error(StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Ok(Err(e)) => api_error(failure_status, format!("{e:#}")).into_response(),
        Err(e) => api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("task join error: {e}"),
        )
        .into_response(),
    }
}

pub fn build_router(engine: ModelEngine) -> Router {
    let state = Arc::new(HttpState { engine });

    Router::new()
        .route("/health", get(health))
        .route("/classes", get(classes))
        .route("/hierarchy", get(hierarchy))
        .route("/members", get(members))
        .route("/uml", get(uml))
        .route("/summary", get(summary))
        .route("/reload", post(reload))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(engine: ModelEngine, addr: SocketAddr) -> Result<()> {
    let app = build_router(engine);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "serving class model");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    Json(state.engine.health())
}

async fn classes(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let engine = state.engine.clone();
    respond(
        spawn_blocking(move || Ok(engine.classes())).await,
        StatusCode::INTERNAL_SERVER_ERROR,
    )
}

async fn reload(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let engine = state.engine.clone();
    respond(
        spawn_blocking(move || engine.reload()).await,
        StatusCode::INTERNAL_SERVER_ERROR,
    )
}

async fn hierarchy(
    State(state): State<Arc<HttpState>>,
    Query(q): Query<HierarchyQuery>,
) -> impl IntoResponse {
    let engine = state.engine.clone();
    respond(
        spawn_blocking(move || engine.hierarchy(q.root.as_deref())).await,
        StatusCode::BAD_REQUEST,
    )
}

async fn members(
    State(state): State<Arc<HttpState>>,
    Query(q): Query<ClassQuery>,
) -> impl IntoResponse {
    let engine = state.engine.clone();
    respond(
        spawn_blocking(move || engine.members(&q.class)).await,
        StatusCode::BAD_REQUEST,
    )
}

async fn uml(State(state): State<Arc<HttpState>>, Query(q): Query<ClassQuery>) -> impl IntoResponse {
    let engine = state.engine.clone();
    respond(
        spawn_blocking(move || engine.uml(&q.class)).await,
        StatusCode::BAD_REQUEST,
    )
}

async fn summary(
    State(state): State<Arc<HttpState>>,
    Query(q): Query<ClassQuery>,
) -> impl IntoResponse {
    let engine = state.engine.clone();
    respond(
        spawn_blocking(move || engine.summary(&q.class)).await,
        StatusCode::BAD_REQUEST,
    )
}
