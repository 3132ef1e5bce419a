//! HTTP handlers for the dashboard API

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use super::error::ApiError;
use super::export;
use super::AppState;
use crate::db::{
    ArrestStatusCount, CrimeDetail, CrimeLocationRow, CrimeSummary, CrimeTypeCount,
    DashboardStats, LocationSummary, OfficerStats, OfficerSummary, RecentCrime,
    SocialMediaStats, TrendPoint, WeatherCrimeStats,
};
use crate::db::{SocialMediaPost, WeatherRecord};
use crate::filter::{
    CrimeFilterParams, LocationFilterParams, OfficerFilterParams, SocialMediaFilterParams,
    WeatherFilterParams,
};

const RECENT_CRIMES_LIMIT: i32 = 10;
const CRIME_LOCATIONS_LIMIT: i32 = 100;

/// `GET /api/stats`
pub async fn api_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardStats>, ApiError> {
    let stats = state
        .db
        .dashboard_stats()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch statistics", e))?;
    Ok(Json(stats))
}

/// `GET /api/crime-types`
pub async fn api_crime_types(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CrimeTypeCount>>, ApiError> {
    let counts = state
        .db
        .crime_type_counts()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch crime types", e))?;
    Ok(Json(counts))
}

/// `GET /api/arrest-status`
pub async fn api_arrest_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ArrestStatusCount>>, ApiError> {
    let counts = state
        .db
        .arrest_status_counts()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch arrest status data", e))?;
    Ok(Json(counts))
}

/// `GET /api/crime-locations`
pub async fn api_crime_locations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CrimeLocationRow>>, ApiError> {
    let rows = state
        .db
        .crime_locations(CRIME_LOCATIONS_LIMIT)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch crime locations", e))?;
    Ok(Json(rows))
}

/// `GET /api/crime-trends`
pub async fn api_crime_trends(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TrendPoint>>, ApiError> {
    let trends = state
        .db
        .crime_trends()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch crime trends", e))?;
    Ok(Json(trends))
}

/// `GET /api/recent-crimes`
pub async fn api_recent_crimes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RecentCrime>>, ApiError> {
    let crimes = state
        .db
        .recent_crimes(RECENT_CRIMES_LIMIT)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch recent crimes", e))?;
    Ok(Json(crimes))
}

/// `GET /api/crimes`
pub async fn api_crimes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CrimeFilterParams>,
) -> Result<Json<Vec<CrimeSummary>>, ApiError> {
    let crimes = state
        .db
        .crimes(&params.into())
        .await
        .map_err(|e| ApiError::internal("Failed to fetch crimes", e))?;
    Ok(Json(crimes))
}

/// `GET /api/crimes/:id`
pub async fn api_crime_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CrimeDetail>, ApiError> {
    let detail = state
        .db
        .crime_detail(&id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch crime details", e))?;
    detail
        .map(Json)
        .ok_or(ApiError::NotFound("Crime not found"))
}

/// `POST /api/export-crimes`
///
/// Same filter semantics as `GET /api/crimes`, rendered as a CSV download.
pub async fn api_export_crimes(
    State(state): State<Arc<AppState>>,
    Json(params): Json<CrimeFilterParams>,
) -> Result<impl IntoResponse, ApiError> {
    let crimes = state
        .db
        .crimes(&params.into())
        .await
        .map_err(|e| ApiError::internal("Failed to export crimes", e))?;
    let csv = export::crimes_to_csv(&crimes)
        .map_err(|e| ApiError::internal("Failed to export crimes", e))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=crime_reports.csv",
            ),
        ],
        csv,
    ))
}

/// `GET /api/locations`
pub async fn api_locations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationFilterParams>,
) -> Result<Json<Vec<LocationSummary>>, ApiError> {
    let locations = state
        .db
        .locations(&params.into())
        .await
        .map_err(|e| ApiError::internal("Failed to fetch locations", e))?;
    Ok(Json(locations))
}

/// `GET /api/officers`
pub async fn api_officers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OfficerFilterParams>,
) -> Result<Json<Vec<OfficerSummary>>, ApiError> {
    let officers = state
        .db
        .officers(&params.into())
        .await
        .map_err(|e| ApiError::internal("Failed to fetch officers", e))?;
    Ok(Json(officers))
}

/// `GET /api/officer-stats`
pub async fn api_officer_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<OfficerStats>, ApiError> {
    let stats = state
        .db
        .officer_stats()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch officer statistics", e))?;
    Ok(Json(stats))
}

/// `GET /api/social-media`
pub async fn api_social_media(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SocialMediaFilterParams>,
) -> Result<Json<Vec<SocialMediaPost>>, ApiError> {
    let posts = state
        .db
        .social_media_posts(&params.into())
        .await
        .map_err(|e| ApiError::internal("Failed to fetch social media posts", e))?;
    Ok(Json(posts))
}

/// `GET /api/social-media-stats`
pub async fn api_social_media_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SocialMediaStats>, ApiError> {
    let stats = state
        .db
        .social_media_stats()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch social media statistics", e))?;
    Ok(Json(stats))
}

/// `GET /api/weather`
pub async fn api_weather(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WeatherFilterParams>,
) -> Result<Json<Vec<WeatherRecord>>, ApiError> {
    let records = state
        .db
        .weather_records(&params.into())
        .await
        .map_err(|e| ApiError::internal("Failed to fetch weather data", e))?;
    Ok(Json(records))
}

/// `GET /api/weather-crime-stats`
pub async fn api_weather_crime_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<WeatherCrimeStats>, ApiError> {
    let stats = state
        .db
        .weather_crime_stats()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch weather-crime statistics", e))?;
    Ok(Json(stats))
}
