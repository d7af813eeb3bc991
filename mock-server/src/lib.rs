use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Settings for the mock shortening service.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub api_key: String,
    /// Prefix of every returned short URL.
    pub site_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: "test-key".to_string(),
            site_url: "http://localhost:4567".to_string(),
        }
    }
}

#[derive(Deserialize)]
pub struct NewLink {
    pub longlink: String,
    #[serde(default)]
    pub shortlink: String,
}

pub struct AppState {
    config: ServiceConfig,
    links: RwLock<HashMap<String, String>>,
}

pub type Shared = Arc<AppState>;

pub fn app(config: ServiceConfig) -> Router {
    let state: Shared = Arc::new(AppState {
        config,
        links: RwLock::new(HashMap::new()),
    });
    Router::new()
        .route("/api/new", post(new_link))
        .route("/{id}", get(follow_link))
        .with_state(state)
}

pub async fn run(listener: TcpListener, config: ServiceConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(config)).await
}

fn failure(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "success": false, "error": message })))
}

async fn new_link(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(input): Json<NewLink>,
) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|key| key == state.config.api_key);
    if !authorized {
        return failure(StatusCode::UNAUTHORIZED, "Not logged in!");
    }
    if input.longlink.is_empty() {
        return failure(StatusCode::BAD_REQUEST, "Long link cannot be empty.");
    }

    let id = if input.shortlink.is_empty() {
        Uuid::new_v4().simple().to_string()[..8].to_string()
    } else {
        input.shortlink
    };

    let mut links = state.links.write().await;
    if links.contains_key(&id) {
        return failure(StatusCode::CONFLICT, "Short URL is already in use!");
    }
    links.insert(id.clone(), input.longlink);
    tracing::info!(%id, "created short link");

    let shorturl = format!("{}/{id}", state.config.site_url.trim_end_matches('/'));
    (
        StatusCode::OK,
        Json(json!({ "success": true, "error": false, "shorturl": shorturl })),
    )
}

async fn follow_link(State(state): State<Shared>, Path(id): Path<String>) -> Result<Redirect, StatusCode> {
    let links = state.links.read().await;
    links
        .get(&id)
        .map(|target| Redirect::permanent(target))
        .ok_or(StatusCode::NOT_FOUND)
}
