//! Filter-to-SQL translation
//!
//! Listing endpoints accept optional query-string filters. Sentinel values
//! ("all_types", "all_statuses", ...) sent by the dashboard dropdowns mean
//! "no filter" and are normalized to `None` here, so query code only ever
//! sees real filter values.

use chrono::NaiveDate;
use serde::Deserialize;

/// Inclusive date range parsed from "MM/DD/YYYY - MM/DD/YYYY"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Parse the date-picker wire format. Anything malformed (missing
    /// " - " separator, unparseable dates) means "no date filter".
    pub fn parse(raw: &str) -> Option<Self> {
        let (start, end) = raw.split_once(" - ")?;
        let start = NaiveDate::parse_from_str(start.trim(), "%m/%d/%Y").ok()?;
        let end = NaiveDate::parse_from_str(end.trim(), "%m/%d/%Y").ok()?;
        Some(Self { start, end })
    }
}

/// Drop dropdown sentinel values, keeping only real filters
fn without_sentinel(value: Option<String>, sentinel: &str) -> Option<String> {
    value.filter(|v| v != sentinel && !v.is_empty())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrimeFilterParams {
    #[serde(rename = "type")]
    pub crime_type: Option<String>,
    pub status: Option<String>,
    pub date_range: Option<String>,
    pub search: Option<String>,
}

/// Normalized crime listing/export filter
#[derive(Debug, Default)]
pub struct CrimeFilter {
    pub crime_type: Option<String>,
    pub status: Option<String>,
    pub dates: Option<DateRange>,
    pub search: Option<String>,
}

impl From<CrimeFilterParams> for CrimeFilter {
    fn from(params: CrimeFilterParams) -> Self {
        Self {
            crime_type: without_sentinel(params.crime_type, "all_types"),
            status: without_sentinel(params.status, "all_statuses"),
            dates: params.date_range.as_deref().and_then(DateRange::parse),
            search: non_empty(params.search),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFilterParams {
    #[serde(rename = "type")]
    pub address_type: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Default)]
pub struct LocationFilter {
    pub address_type: Option<String>,
    pub search: Option<String>,
}

impl From<LocationFilterParams> for LocationFilter {
    fn from(params: LocationFilterParams) -> Self {
        Self {
            address_type: without_sentinel(params.address_type, "all_types"),
            search: non_empty(params.search),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficerFilterParams {
    pub position: Option<String>,
    pub area: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Default)]
pub struct OfficerFilter {
    pub position: Option<String>,
    pub area: Option<String>,
    pub search: Option<String>,
}

impl From<OfficerFilterParams> for OfficerFilter {
    fn from(params: OfficerFilterParams) -> Self {
        Self {
            position: without_sentinel(params.position, "all_positions"),
            area: without_sentinel(params.area, "all_areas"),
            search: non_empty(params.search),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaFilterParams {
    pub sentiment: Option<String>,
    pub location: Option<String>,
    pub date_range: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Default)]
pub struct SocialMediaFilter {
    pub sentiment: Option<String>,
    pub location: Option<String>,
    pub dates: Option<DateRange>,
    pub search: Option<String>,
}

impl From<SocialMediaFilterParams> for SocialMediaFilter {
    fn from(params: SocialMediaFilterParams) -> Self {
        Self {
            sentiment: without_sentinel(params.sentiment, "all_sentiments"),
            location: without_sentinel(params.location, "all_locations"),
            dates: params.date_range.as_deref().and_then(DateRange::parse),
            search: non_empty(params.search),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherFilterParams {
    pub date_range: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Default)]
pub struct WeatherFilter {
    pub dates: Option<DateRange>,
    pub search: Option<String>,
}

impl From<WeatherFilterParams> for WeatherFilter {
    fn from(params: WeatherFilterParams) -> Self {
        Self {
            dates: params.date_range.as_deref().and_then(DateRange::parse),
            search: non_empty(params.search),
        }
    }
}

/// Collects WHERE predicates and their bind values for a listing query.
///
/// Filter categories AND together; the multi-column search is a single
/// predicate with OR across its columns. Search uses `instr()` so matching
/// stays case-sensitive regardless of SQLite's LIKE configuration.
#[derive(Debug, Default)]
pub struct SqlPredicates {
    clauses: Vec<String>,
    binds: Vec<String>,
}

impl SqlPredicates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_eq(&mut self, column: &str, value: &str) {
        self.clauses.push(format!("{column} = ?"));
        self.binds.push(value.to_string());
    }

    pub fn push_search(&mut self, columns: &[&str], term: &str) {
        let alternatives: Vec<String> = columns
            .iter()
            .map(|column| format!("instr({column}, ?) > 0"))
            .collect();
        self.clauses.push(format!("({})", alternatives.join(" OR ")));
        for _ in columns {
            self.binds.push(term.to_string());
        }
    }

    pub fn push_date_range(&mut self, column: &str, range: &DateRange) {
        self.clauses.push(format!("{column} >= ? AND {column} <= ?"));
        self.binds.push(range.start.format("%Y-%m-%d").to_string());
        self.binds.push(range.end.format("%Y-%m-%d").to_string());
    }

    /// " WHERE ..." fragment, or empty when no filter applies
    pub fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub fn binds(&self) -> &[String] {
        &self.binds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_range_parses_inclusive_bounds() {
        let range = DateRange::parse("01/05/2023 - 02/18/2023").unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2023, 2, 18).unwrap());
    }

    #[test]
    fn date_range_without_separator_is_no_filter() {
        assert_eq!(DateRange::parse("01/05/2023"), None);
        assert_eq!(DateRange::parse("01/05/2023 to 02/18/2023"), None);
    }

    #[test]
    fn date_range_with_garbage_dates_is_no_filter() {
        assert_eq!(DateRange::parse("yesterday - tomorrow"), None);
        assert_eq!(DateRange::parse("13/45/2023 - 01/01/2024"), None);
    }

    #[test]
    fn sentinels_normalize_to_none() {
        let filter: CrimeFilter = CrimeFilterParams {
            crime_type: Some("all_types".to_string()),
            status: Some("all_statuses".to_string()),
            date_range: None,
            search: Some(String::new()),
        }
        .into();
        assert!(filter.crime_type.is_none());
        assert!(filter.status.is_none());
        assert!(filter.dates.is_none());
        assert!(filter.search.is_none());
    }

    #[test]
    fn real_values_survive_normalization() {
        let filter: CrimeFilter = CrimeFilterParams {
            crime_type: Some("Theft".to_string()),
            status: Some("Pending".to_string()),
            date_range: Some("01/01/2023 - 12/31/2023".to_string()),
            search: Some("wallet".to_string()),
        }
        .into();
        assert_eq!(filter.crime_type.as_deref(), Some("Theft"));
        assert_eq!(filter.status.as_deref(), Some("Pending"));
        assert!(filter.dates.is_some());
        assert_eq!(filter.search.as_deref(), Some("wallet"));
    }

    #[test]
    fn predicates_and_together() {
        let mut predicates = SqlPredicates::new();
        predicates.push_eq("type_of_crime", "Theft");
        predicates.push_search(&["description", "crime_id"], "wallet");
        predicates.push_date_range(
            "date",
            &DateRange::parse("01/01/2023 - 12/31/2023").unwrap(),
        );

        assert_eq!(
            predicates.where_clause(),
            " WHERE type_of_crime = ? AND (instr(description, ?) > 0 OR instr(crime_id, ?) > 0) \
             AND date >= ? AND date <= ?"
        );
        assert_eq!(
            predicates.binds(),
            &[
                "Theft".to_string(),
                "wallet".to_string(),
                "wallet".to_string(),
                "2023-01-01".to_string(),
                "2023-12-31".to_string(),
            ]
        );
    }

    #[test]
    fn empty_predicates_emit_no_where() {
        assert_eq!(SqlPredicates::new().where_clause(), "");
    }
}
