//! Web server module

mod error;
mod export;
mod routes;

pub use export::crimes_to_csv;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::Config;
use crate::db::Database;

pub struct AppState {
    pub db: Database,
}

/// Build the API router. Split out of [`start_server`] so tests can drive
/// the routes without binding a socket.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/stats", get(routes::api_stats))
        .route("/api/crime-types", get(routes::api_crime_types))
        .route("/api/arrest-status", get(routes::api_arrest_status))
        .route("/api/crime-locations", get(routes::api_crime_locations))
        .route("/api/crime-trends", get(routes::api_crime_trends))
        .route("/api/recent-crimes", get(routes::api_recent_crimes))
        .route("/api/crimes", get(routes::api_crimes))
        .route("/api/crimes/:id", get(routes::api_crime_detail))
        .route("/api/export-crimes", post(routes::api_export_crimes))
        .route("/api/locations", get(routes::api_locations))
        .route("/api/officers", get(routes::api_officers))
        .route("/api/officer-stats", get(routes::api_officer_stats))
        .route("/api/social-media", get(routes::api_social_media))
        .route("/api/social-media-stats", get(routes::api_social_media_stats))
        .route("/api/weather", get(routes::api_weather))
        .route("/api/weather-crime-stats", get(routes::api_weather_crime_stats))
        // The dashboard client is served separately; allow it to call us
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(config: &Config, db: Database) -> Result<()> {
    let state = Arc::new(AppState { db });
    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("API server starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
