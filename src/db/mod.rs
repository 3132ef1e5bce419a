//! Database module

mod crimes;
mod locations;
mod officers;
mod schema;
mod seed;
mod social;
mod weather;

pub use crimes::{
    ArrestStatusCount, CrimeDetail, CrimeLocationRow, CrimeSummary, CrimeTypeCount,
    DashboardStats, MostCommonCrime, RecentCrime, TrendPoint,
};
pub use locations::LocationSummary;
pub use officers::{OfficerStats, OfficerSummary, PositionCount, TopOfficer};
pub use social::{LocationCount, SentimentCount, SentimentTrendPoint, SocialMediaStats};
pub use weather::{BandCount, WeatherCrimeRow, WeatherCrimeStats};

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{Pool, Sqlite, SqlitePool};

use crate::config::DatabaseConfig;

/// A monitored address with its map coordinates
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub address: String,
    pub geolocation: String,
    pub type_of_address: String,
}

/// A reported crime, always tied to a location
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CrimeReport {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    #[serde(rename = "type")]
    pub type_of_crime: String,
    #[serde(rename = "status")]
    pub arrest_status: String,
    pub location_id: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PoliceOfficer {
    pub id: String,
    pub name: String,
    pub position: String,
    pub assigned_area: String,
}

/// Follow-up report filed for a crime by an officer
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PoliceReport {
    pub id: String,
    pub date: NaiveDate,
    pub outcome: String,
    pub officer_id: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaPost {
    pub id: String,
    pub date: NaiveDate,
    pub content: String,
    pub sentiment: String,
    pub location: String,
}

/// Daily weather observation. Values keep their display formatting
/// ("0.2 in", "34°F", "12 mph"); banding strips the unit suffix.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    pub id: String,
    pub date: NaiveDate,
    pub precipitation: String,
    pub temperature: String,
    pub wind_speed: String,
}

#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", config.url)).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool. Used by tests running against `sqlite::memory:`.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<()> {
        // Enable WAL mode for better concurrency
        sqlx::query("PRAGMA journal_mode=WAL")
            .execute(&self.pool)
            .await?;
        sqlx::query("PRAGMA synchronous=NORMAL")
            .execute(&self.pool)
            .await?;

        for statement in [
            schema::CREATE_LOCATIONS,
            schema::CREATE_CRIME_REPORTS,
            schema::CREATE_POLICE_OFFICERS,
            schema::CREATE_POLICE_REPORTS,
            schema::CREATE_SOCIAL_MEDIA,
            schema::CREATE_WEATHER_DATA,
            schema::CREATE_INDEX_CRIMES_DATE,
            schema::CREATE_INDEX_CRIMES_LOCATION,
            schema::CREATE_INDEX_REPORTS_CRIME,
            schema::CREATE_INDEX_REPORTS_OFFICER,
            schema::CREATE_INDEX_SOCIAL_DATE,
            schema::CREATE_INDEX_WEATHER_DATE,
        ] {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

/// Render a (year, month) pair as the chart label, e.g. "Jan 2023"
pub(crate) fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_default()
}

/// Parse a "lat,lng" geolocation string into coordinates.
///
/// Rows that fail to parse stay in tabular listings but are reported
/// without coordinates, which keeps them off the map.
pub(crate) fn parse_geolocation(s: &str) -> Option<(f64, f64)> {
    let (lat, lng) = s.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lng: f64 = lng.trim().parse().ok()?;
    if lat.is_finite() && lng.is_finite() {
        Some((lat, lng))
    } else {
        None
    }
}
