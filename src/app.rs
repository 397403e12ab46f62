use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    Router,
};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::{config::AppConfig, database, error::Result, routes, services::MediaStore};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub media: MediaStore,
}

/// Assembles the API routes and the static media mount over a ready state.
pub fn router(state: AppState) -> Router {
    routes::create_router()
        .nest_service("/media", ServeDir::new(state.media.root()))
        .with_state(state)
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let pool = database::create_pool(&config.database).await?;

    let media = MediaStore::new(&config.media.root);
    media.init().await?;

    let state = AppState { db: pool, media };

    let allowed_origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|_| {
                crate::error::AppError::ConfigError(format!("Invalid CORS origin: {}", origin))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_origin(allowed_origins);

    let app = router(state)
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(cors);

    Ok(app)
}
