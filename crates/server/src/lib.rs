use std::sync::Arc;

use axum::{Router, http::HeaderValue};
use db::DBService;
use services::services::config::Config;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub mod error;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    db: DBService,
    config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DBService, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    pub fn db(&self) -> &DBService {
        &self.db
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    match config
        .cors_origin
        .as_deref()
        .and_then(|origin| origin.parse::<HeaderValue>().ok())
    {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    }
}

/// API router only, without static assets. Endpoint tests drive this.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::barangays::router())
        .merge(routes::farmers::router())
        .merge(routes::farms::router())
        .merge(routes::commodities::router())
        .merge(routes::allocation_types::router())
        .merge(routes::allocations::router())
        .merge(routes::crop_damages::router())
        .merge(routes::eligibilities::router())
        .merge(routes::users::router())
        .merge(routes::dashboard::router())
}

/// Full application: `/api/...` plus the built admin frontend.
pub fn app_router(state: AppState) -> Router {
    let frontend_dir = &state.config().frontend_dir;
    let frontend = ServeDir::new(frontend_dir)
        .fallback(ServeFile::new(frontend_dir.join("index.html")));

    Router::new()
        .nest("/api", api_router())
        .fallback_service(frontend)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(state.config()))
        .with_state(state)
}
