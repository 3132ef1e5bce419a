//! Location queries

use anyhow::Result;
use serde::Serialize;

use super::Database;
use crate::filter::{LocationFilter, SqlPredicates};

/// Listing row: location plus its crime count. The count comes from a left
/// join against a grouped subquery, so locations without crimes report null.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummary {
    pub id: String,
    pub address: String,
    pub geolocation: String,
    pub type_of_address: String,
    pub crime_count: Option<i64>,
}

impl Database {
    pub async fn locations(&self, filter: &LocationFilter) -> Result<Vec<LocationSummary>> {
        let mut predicates = SqlPredicates::new();
        if let Some(address_type) = &filter.address_type {
            predicates.push_eq("l.type_of_address", address_type);
        }
        if let Some(search) = &filter.search {
            predicates.push_search(&["l.address", "l.location_id"], search);
        }

        let sql = format!(
            r#"
            SELECT l.location_id AS id, l.address, l.geolocation, l.type_of_address,
                   cc.crime_count
            FROM locations l
            LEFT JOIN (
                SELECT location_id, COUNT(*) AS crime_count
                FROM crime_reports
                GROUP BY location_id
            ) cc ON l.location_id = cc.location_id
            {}
            ORDER BY l.location_id ASC
            "#,
            predicates.where_clause()
        );

        let mut query = sqlx::query_as::<_, LocationSummary>(&sql);
        for bind in predicates.binds() {
            query = query.bind(bind);
        }
        Ok(query.fetch_all(self.pool()).await?)
    }
}
