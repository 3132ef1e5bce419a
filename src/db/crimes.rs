//! Crime report queries: dashboard stats, breakdowns, trends, filtered
//! listings and single-crime detail assembly.

use anyhow::Result;
use chrono::{Days, NaiveDate, Utc};
use serde::Serialize;

use super::{
    month_label, parse_geolocation, CrimeReport, Database, Location, PoliceOfficer,
    PoliceReport, SocialMediaPost, WeatherRecord,
};
use crate::filter::{CrimeFilter, SqlPredicates};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_crimes: i64,
    pub arrest_rate: i64,
    pub most_common_crime: MostCommonCrime,
    pub recent_crimes: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MostCommonCrime {
    #[serde(rename = "type")]
    pub type_of_crime: String,
    pub count: i64,
    pub percentage: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrimeTypeCount {
    #[serde(rename = "type")]
    pub type_of_crime: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArrestStatusCount {
    pub status: String,
    pub count: i64,
    pub percentage: i64,
}

/// Crimes per calendar month, for the trend chart
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub month: String,
    pub year: i64,
    pub month_num: i64,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecentCrime {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    #[serde(rename = "type")]
    pub type_of_crime: String,
    #[serde(rename = "status")]
    pub arrest_status: String,
    pub address: Option<String>,
}

/// Listing/export row: crime joined with its location and, when a police
/// report exists, the reporting officer's name
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CrimeSummary {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    #[serde(rename = "type")]
    pub type_of_crime: String,
    #[serde(rename = "status")]
    pub arrest_status: String,
    pub address: Option<String>,
    pub location_id: Option<String>,
    pub officer_name: Option<String>,
}

/// Map row: location joined with its crimes, coordinates parsed out of the
/// "lat,lng" string. Unparseable coordinates serialize as null so the map
/// skips the row while the listing keeps it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrimeLocationRow {
    pub id: String,
    pub address: String,
    pub geolocation: String,
    pub type_of_address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub crime_id: Option<String>,
    pub crime_type: Option<String>,
    pub crime_description: Option<String>,
}

/// Composite record for the crime detail view. Related records that do not
/// exist serialize as null, never as an error.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrimeDetail {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    #[serde(rename = "type")]
    pub type_of_crime: String,
    #[serde(rename = "status")]
    pub arrest_status: String,
    pub location_id: String,
    pub location: Option<Location>,
    pub police_report: Option<PoliceReport>,
    pub officer: Option<PoliceOfficer>,
    pub weather: Option<WeatherRecord>,
    pub social_media: Option<SocialMediaPost>,
}

/// round(part / total * 100), 0 when the total is empty
fn percentage(part: i64, total: i64) -> i64 {
    if total > 0 {
        (part as f64 / total as f64 * 100.0).round() as i64
    } else {
        0
    }
}

impl Database {
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let (total_crimes,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM crime_reports")
            .fetch_one(self.pool())
            .await?;

        let (arrested,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM crime_reports WHERE arrest_status = 'Arrested'")
                .fetch_one(self.pool())
                .await?;

        // Ties on count break lexicographically by type name
        let top: Option<(String, i64)> = sqlx::query_as(
            r#"
            SELECT type_of_crime, COUNT(*) AS count
            FROM crime_reports
            GROUP BY type_of_crime
            ORDER BY count DESC, type_of_crime ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(self.pool())
        .await?;

        let today = Utc::now().date_naive();
        let cutoff = today.checked_sub_days(Days::new(30)).unwrap_or(today);
        let (recent_crimes,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM crime_reports WHERE date >= ?")
                .bind(cutoff.format("%Y-%m-%d").to_string())
                .fetch_one(self.pool())
                .await?;

        let (type_of_crime, count) = top.unwrap_or_else(|| ("None".to_string(), 0));
        Ok(DashboardStats {
            total_crimes,
            arrest_rate: percentage(arrested, total_crimes),
            most_common_crime: MostCommonCrime {
                type_of_crime,
                count,
                percentage: percentage(count, total_crimes),
            },
            recent_crimes,
        })
    }

    pub async fn crime_type_counts(&self) -> Result<Vec<CrimeTypeCount>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT type_of_crime, COUNT(*) AS count
            FROM crime_reports
            GROUP BY type_of_crime
            ORDER BY count DESC, type_of_crime ASC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(type_of_crime, count)| CrimeTypeCount {
                type_of_crime,
                count,
            })
            .collect())
    }

    pub async fn arrest_status_counts(&self) -> Result<Vec<ArrestStatusCount>> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM crime_reports")
            .fetch_one(self.pool())
            .await?;

        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT arrest_status, COUNT(*) AS count
            FROM crime_reports
            GROUP BY arrest_status
            ORDER BY arrest_status ASC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(status, count)| ArrestStatusCount {
                status,
                count,
                percentage: percentage(count, total),
            })
            .collect())
    }

    pub async fn crime_trends(&self) -> Result<Vec<TrendPoint>> {
        let rows: Vec<(i64, i64, i64)> = sqlx::query_as(
            r#"
            SELECT CAST(strftime('%Y', date) AS INTEGER) AS year,
                   CAST(strftime('%m', date) AS INTEGER) AS month_num,
                   COUNT(*) AS count
            FROM crime_reports
            GROUP BY year, month_num
            ORDER BY year, month_num
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(year, month_num, count)| TrendPoint {
                month: month_label(year as i32, month_num as u32),
                year,
                month_num,
                count,
            })
            .collect())
    }

    pub async fn recent_crimes(&self, limit: i32) -> Result<Vec<RecentCrime>> {
        let rows: Vec<RecentCrime> = sqlx::query_as(
            r#"
            SELECT c.crime_id AS id, c.date, c.description, c.type_of_crime,
                   c.arrest_status, l.address
            FROM crime_reports c
            LEFT JOIN locations l ON c.location_id = l.location_id
            ORDER BY c.date DESC, c.crime_id ASC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    /// Location/crime join for the map view, capped at 100 rows
    pub async fn crime_locations(&self, limit: i32) -> Result<Vec<CrimeLocationRow>> {
        let rows: Vec<(String, String, String, String, Option<String>, Option<String>, Option<String>)> =
            sqlx::query_as(
                r#"
                SELECT l.location_id, l.address, l.geolocation, l.type_of_address,
                       c.crime_id, c.type_of_crime, c.description
                FROM locations l
                LEFT JOIN crime_reports c ON l.location_id = c.location_id
                ORDER BY l.location_id ASC
                LIMIT ?
                "#,
            )
            .bind(limit)
            .fetch_all(self.pool())
            .await?;

        Ok(rows
            .into_iter()
            .map(
                |(id, address, geolocation, type_of_address, crime_id, crime_type, crime_description)| {
                    let coords = parse_geolocation(&geolocation);
                    CrimeLocationRow {
                        id,
                        address,
                        geolocation,
                        type_of_address,
                        latitude: coords.map(|(lat, _)| lat),
                        longitude: coords.map(|(_, lng)| lng),
                        crime_id,
                        crime_type,
                        crime_description,
                    }
                },
            )
            .collect())
    }

    /// Filtered crime listing. Filter categories AND together; the search
    /// term matches description, crime id or address.
    pub async fn crimes(&self, filter: &CrimeFilter) -> Result<Vec<CrimeSummary>> {
        let mut predicates = SqlPredicates::new();
        if let Some(type_of_crime) = &filter.crime_type {
            predicates.push_eq("c.type_of_crime", type_of_crime);
        }
        if let Some(status) = &filter.status {
            predicates.push_eq("c.arrest_status", status);
        }
        if let Some(dates) = &filter.dates {
            predicates.push_date_range("c.date", dates);
        }
        if let Some(search) = &filter.search {
            predicates.push_search(&["c.description", "c.crime_id", "l.address"], search);
        }

        let sql = format!(
            r#"
            SELECT c.crime_id AS id, c.date, c.description, c.type_of_crime,
                   c.arrest_status, l.address, l.location_id, o.name AS officer_name
            FROM crime_reports c
            LEFT JOIN locations l ON c.location_id = l.location_id
            LEFT JOIN police_reports r ON c.crime_id = r.crime_id
            LEFT JOIN police_officers o ON r.officer_id = o.officer_id
            {}
            ORDER BY c.date DESC, c.crime_id ASC
            "#,
            predicates.where_clause()
        );

        let mut query = sqlx::query_as::<_, CrimeSummary>(&sql);
        for bind in predicates.binds() {
            query = query.bind(bind);
        }
        Ok(query.fetch_all(self.pool()).await?)
    }

    /// Assemble the composite detail record for one crime.
    ///
    /// Returns `Ok(None)` for an unknown id. The social-media lookup takes
    /// the first post dated within ±1 day of the crime; ties lose to the
    /// earliest date, then post id (first match wins).
    pub async fn crime_detail(&self, id: &str) -> Result<Option<CrimeDetail>> {
        let crime: Option<CrimeReport> = sqlx::query_as(
            r#"
            SELECT crime_id AS id, date, description, type_of_crime, arrest_status, location_id
            FROM crime_reports
            WHERE crime_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        let Some(crime) = crime else {
            return Ok(None);
        };

        let location: Option<Location> = sqlx::query_as(
            r#"
            SELECT location_id AS id, address, geolocation, type_of_address
            FROM locations
            WHERE location_id = ?
            "#,
        )
        .bind(&crime.location_id)
        .fetch_optional(self.pool())
        .await?;

        let police_report: Option<PoliceReport> = sqlx::query_as(
            r#"
            SELECT report_id AS id, date, outcome, officer_id
            FROM police_reports
            WHERE crime_id = ?
            ORDER BY report_id ASC
            LIMIT 1
            "#,
        )
        .bind(&crime.id)
        .fetch_optional(self.pool())
        .await?;

        let officer: Option<PoliceOfficer> = match &police_report {
            Some(report) => {
                sqlx::query_as(
                    r#"
                    SELECT officer_id AS id, name, position, assigned_area
                    FROM police_officers
                    WHERE officer_id = ?
                    "#,
                )
                .bind(&report.officer_id)
                .fetch_optional(self.pool())
                .await?
            }
            None => None,
        };

        let weather: Option<WeatherRecord> = sqlx::query_as(
            r#"
            SELECT weather_id AS id, date, precipitation, temperature, wind_speed
            FROM weather_data
            WHERE date = ?
            ORDER BY weather_id ASC
            LIMIT 1
            "#,
        )
        .bind(crime.date)
        .fetch_optional(self.pool())
        .await?;

        let window_start = crime
            .date
            .checked_sub_days(Days::new(1))
            .unwrap_or(crime.date);
        let window_end = crime
            .date
            .checked_add_days(Days::new(1))
            .unwrap_or(crime.date);
        let social_media: Option<SocialMediaPost> = sqlx::query_as(
            r#"
            SELECT post_id AS id, date, content, sentiment, location
            FROM social_media
            WHERE date >= ? AND date <= ?
            ORDER BY date ASC, post_id ASC
            LIMIT 1
            "#,
        )
        .bind(window_start)
        .bind(window_end)
        .fetch_optional(self.pool())
        .await?;

        Ok(Some(CrimeDetail {
            id: crime.id,
            date: crime.date,
            description: crime.description,
            type_of_crime: crime.type_of_crime,
            arrest_status: crime.arrest_status,
            location_id: crime.location_id,
            location,
            police_report,
            officer,
            weather,
            social_media,
        }))
    }
}
