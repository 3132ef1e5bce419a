//! Weather queries and the weather–crime correlation.
//!
//! Weather values are stored as display strings ("0.2 in", "34°F"). Banding
//! parses the leading number; rows whose value does not parse are skipped
//! with a warning instead of failing the whole query.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use super::{Database, WeatherRecord};
use crate::filter::{SqlPredicates, WeatherFilter};

const PRECIPITATION_BANDS: [&str; 4] = [
    "No Precipitation",
    "Light (0-0.2 in)",
    "Moderate (0.2-0.5 in)",
    "Heavy (>0.5 in)",
];

const TEMPERATURE_BANDS: [&str; 4] = [
    "Freezing (<32°F)",
    "Cold (32-50°F)",
    "Moderate (50-70°F)",
    "Hot (>70°F)",
];

/// Per-date weather attributes with the same-day crime count
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherCrimeRow {
    pub date: NaiveDate,
    pub temperature: String,
    pub precipitation: String,
    pub wind_speed: String,
    pub crime_count: i64,
}

/// Crime count within one named weather band
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandCount {
    pub category: String,
    pub crime_count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherCrimeStats {
    pub weather_crime_data: Vec<WeatherCrimeRow>,
    pub precipitation_analysis: Vec<BandCount>,
    pub temperature_analysis: Vec<BandCount>,
}

/// Parse the numeric prefix of a formatted value ("34°F" -> 34.0)
fn leading_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let end = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(trimmed.len());
    let number: f64 = trimmed[..end].parse().ok()?;
    number.is_finite().then_some(number)
}

fn precipitation_band(inches: f64) -> usize {
    if inches == 0.0 {
        0
    } else if inches <= 0.2 {
        1
    } else if inches <= 0.5 {
        2
    } else {
        3
    }
}

fn temperature_band(degrees: f64) -> usize {
    if degrees < 32.0 {
        0
    } else if degrees <= 50.0 {
        1
    } else if degrees <= 70.0 {
        2
    } else {
        3
    }
}

/// Bands in threshold order, empty bands omitted
fn band_counts(names: [&str; 4], totals: [i64; 4]) -> Vec<BandCount> {
    names
        .into_iter()
        .zip(totals)
        .filter(|(_, crime_count)| *crime_count > 0)
        .map(|(category, crime_count)| BandCount {
            category: category.to_string(),
            crime_count,
        })
        .collect()
}

impl Database {
    pub async fn weather_records(&self, filter: &WeatherFilter) -> Result<Vec<WeatherRecord>> {
        let mut predicates = SqlPredicates::new();
        if let Some(dates) = &filter.dates {
            predicates.push_date_range("date", dates);
        }
        if let Some(search) = &filter.search {
            predicates.push_search(&["temperature", "precipitation", "wind_speed"], search);
        }

        let sql = format!(
            r#"
            SELECT weather_id AS id, date, precipitation, temperature, wind_speed
            FROM weather_data
            {}
            ORDER BY date DESC, weather_id ASC
            "#,
            predicates.where_clause()
        );

        let mut query = sqlx::query_as::<_, WeatherRecord>(&sql);
        for bind in predicates.binds() {
            query = query.bind(bind);
        }
        Ok(query.fetch_all(self.pool()).await?)
    }

    pub async fn weather_crime_stats(&self) -> Result<WeatherCrimeStats> {
        let combined: Vec<(NaiveDate, String, String, String, i64)> = sqlx::query_as(
            r#"
            SELECT w.date, w.temperature, w.precipitation, w.wind_speed,
                   COALESCE(c.count, 0) AS crime_count
            FROM weather_data w
            LEFT JOIN (
                SELECT date, COUNT(*) AS count
                FROM crime_reports
                GROUP BY date
            ) c ON w.date = c.date
            ORDER BY w.date ASC, w.weather_id ASC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        let weather_crime_data = combined
            .into_iter()
            .map(
                |(date, temperature, precipitation, wind_speed, crime_count)| WeatherCrimeRow {
                    date,
                    temperature,
                    precipitation,
                    wind_speed,
                    crime_count,
                },
            )
            .collect();

        // Inner join: only dates with both a weather record and crimes
        // contribute to the band analysis
        let joined: Vec<(String, String, String, i64)> = sqlx::query_as(
            r#"
            SELECT w.weather_id, w.precipitation, w.temperature,
                   COUNT(c.crime_id) AS crime_count
            FROM weather_data w
            JOIN crime_reports c ON w.date = c.date
            GROUP BY w.weather_id, w.precipitation, w.temperature
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        let mut precipitation_totals = [0i64; 4];
        let mut temperature_totals = [0i64; 4];
        for (weather_id, precipitation, temperature, crime_count) in joined {
            match leading_number(&precipitation) {
                Some(inches) => precipitation_totals[precipitation_band(inches)] += crime_count,
                None => warn!(
                    "Skipping weather record {weather_id}: unparseable precipitation '{precipitation}'"
                ),
            }
            match leading_number(&temperature) {
                Some(degrees) => temperature_totals[temperature_band(degrees)] += crime_count,
                None => warn!(
                    "Skipping weather record {weather_id}: unparseable temperature '{temperature}'"
                ),
            }
        }

        Ok(WeatherCrimeStats {
            weather_crime_data,
            precipitation_analysis: band_counts(PRECIPITATION_BANDS, precipitation_totals),
            temperature_analysis: band_counts(TEMPERATURE_BANDS, temperature_totals),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_number_strips_unit_suffix() {
        assert_eq!(leading_number("34°F"), Some(34.0));
        assert_eq!(leading_number("0.2 in"), Some(0.2));
        assert_eq!(leading_number("12 mph"), Some(12.0));
        assert_eq!(leading_number(" 70°F "), Some(70.0));
    }

    #[test]
    fn leading_number_rejects_non_numeric() {
        assert_eq!(leading_number("N/A"), None);
        assert_eq!(leading_number(""), None);
        assert_eq!(leading_number("°F"), None);
    }

    #[test]
    fn temperature_bands_match_thresholds() {
        assert_eq!(TEMPERATURE_BANDS[temperature_band(28.0)], "Freezing (<32°F)");
        assert_eq!(TEMPERATURE_BANDS[temperature_band(34.0)], "Cold (32-50°F)");
        assert_eq!(TEMPERATURE_BANDS[temperature_band(32.0)], "Cold (32-50°F)");
        assert_eq!(TEMPERATURE_BANDS[temperature_band(50.0)], "Cold (32-50°F)");
        assert_eq!(TEMPERATURE_BANDS[temperature_band(70.0)], "Moderate (50-70°F)");
        assert_eq!(TEMPERATURE_BANDS[temperature_band(75.0)], "Hot (>70°F)");
    }

    #[test]
    fn precipitation_bands_match_thresholds() {
        assert_eq!(PRECIPITATION_BANDS[precipitation_band(0.0)], "No Precipitation");
        assert_eq!(PRECIPITATION_BANDS[precipitation_band(0.2)], "Light (0-0.2 in)");
        assert_eq!(PRECIPITATION_BANDS[precipitation_band(0.5)], "Moderate (0.2-0.5 in)");
        assert_eq!(PRECIPITATION_BANDS[precipitation_band(0.6)], "Heavy (>0.5 in)");
    }

    #[test]
    fn empty_bands_are_omitted() {
        let counts = band_counts(PRECIPITATION_BANDS, [2, 0, 1, 0]);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].category, "No Precipitation");
        assert_eq!(counts[0].crime_count, 2);
        assert_eq!(counts[1].category, "Moderate (0.2-0.5 in)");
    }
}
