//! Police officer queries

use anyhow::Result;
use serde::Serialize;

use super::Database;
use crate::filter::{OfficerFilter, SqlPredicates};

/// Listing row: officer plus authored case count (null when no reports)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OfficerSummary {
    pub id: String,
    pub name: String,
    pub position: String,
    pub assigned_area: String,
    pub case_count: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PositionCount {
    pub position: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopOfficer {
    pub id: String,
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficerStats {
    pub by_position: Vec<PositionCount>,
    pub top_officers: Vec<TopOfficer>,
}

impl Database {
    pub async fn officers(&self, filter: &OfficerFilter) -> Result<Vec<OfficerSummary>> {
        let mut predicates = SqlPredicates::new();
        if let Some(position) = &filter.position {
            predicates.push_eq("o.position", position);
        }
        if let Some(area) = &filter.area {
            predicates.push_eq("o.assigned_area", area);
        }
        if let Some(search) = &filter.search {
            predicates.push_search(&["o.name", "o.officer_id"], search);
        }

        let sql = format!(
            r#"
            SELECT o.officer_id AS id, o.name, o.position, o.assigned_area,
                   cc.case_count
            FROM police_officers o
            LEFT JOIN (
                SELECT officer_id, COUNT(*) AS case_count
                FROM police_reports
                GROUP BY officer_id
            ) cc ON o.officer_id = cc.officer_id
            {}
            ORDER BY o.officer_id ASC
            "#,
            predicates.where_clause()
        );

        let mut query = sqlx::query_as::<_, OfficerSummary>(&sql);
        for bind in predicates.binds() {
            query = query.bind(bind);
        }
        Ok(query.fetch_all(self.pool()).await?)
    }

    pub async fn officer_stats(&self) -> Result<OfficerStats> {
        let by_position: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT position, COUNT(*) AS count
            FROM police_officers
            GROUP BY position
            ORDER BY position ASC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        // LEFT join keeps zero-report officers in the ranking
        let top_officers: Vec<(String, String, i64)> = sqlx::query_as(
            r#"
            SELECT o.officer_id, o.name, COUNT(r.report_id) AS count
            FROM police_officers o
            LEFT JOIN police_reports r ON o.officer_id = r.officer_id
            GROUP BY o.officer_id, o.name
            ORDER BY count DESC, o.officer_id ASC
            LIMIT 10
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(OfficerStats {
            by_position: by_position
                .into_iter()
                .map(|(position, count)| PositionCount { position, count })
                .collect(),
            top_officers: top_officers
                .into_iter()
                .map(|(id, name, count)| TopOfficer { id, name, count })
                .collect(),
        })
    }
}
