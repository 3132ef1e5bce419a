//! Social media post queries

use anyhow::Result;
use serde::Serialize;

use super::{month_label, Database, SocialMediaPost};
use crate::filter::{SocialMediaFilter, SqlPredicates};

#[derive(Debug, Clone, Serialize)]
pub struct SentimentCount {
    pub sentiment: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationCount {
    pub location: String,
    pub count: i64,
}

/// One row per (month, sentiment) pair; the chart re-pivots these into
/// per-month sentiment columns
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentTrendPoint {
    pub month: String,
    pub year: i64,
    pub month_num: i64,
    pub sentiment: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaStats {
    pub by_sentiment: Vec<SentimentCount>,
    pub by_location: Vec<LocationCount>,
    pub posts_over_time: Vec<SentimentTrendPoint>,
}

impl Database {
    pub async fn social_media_posts(
        &self,
        filter: &SocialMediaFilter,
    ) -> Result<Vec<SocialMediaPost>> {
        let mut predicates = SqlPredicates::new();
        if let Some(sentiment) = &filter.sentiment {
            predicates.push_eq("sentiment", sentiment);
        }
        if let Some(location) = &filter.location {
            predicates.push_eq("location", location);
        }
        if let Some(dates) = &filter.dates {
            predicates.push_date_range("date", dates);
        }
        if let Some(search) = &filter.search {
            predicates.push_search(&["content"], search);
        }

        let sql = format!(
            r#"
            SELECT post_id AS id, date, content, sentiment, location
            FROM social_media
            {}
            ORDER BY date DESC, post_id ASC
            "#,
            predicates.where_clause()
        );

        let mut query = sqlx::query_as::<_, SocialMediaPost>(&sql);
        for bind in predicates.binds() {
            query = query.bind(bind);
        }
        Ok(query.fetch_all(self.pool()).await?)
    }

    pub async fn social_media_stats(&self) -> Result<SocialMediaStats> {
        let by_sentiment: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT sentiment, COUNT(*) AS count
            FROM social_media
            GROUP BY sentiment
            ORDER BY sentiment ASC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        let by_location: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT location, COUNT(*) AS count
            FROM social_media
            GROUP BY location
            ORDER BY count DESC, location ASC
            LIMIT 10
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        let over_time: Vec<(i64, i64, String, i64)> = sqlx::query_as(
            r#"
            SELECT CAST(strftime('%Y', date) AS INTEGER) AS year,
                   CAST(strftime('%m', date) AS INTEGER) AS month_num,
                   sentiment,
                   COUNT(*) AS count
            FROM social_media
            GROUP BY year, month_num, sentiment
            ORDER BY year, month_num, sentiment
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(SocialMediaStats {
            by_sentiment: by_sentiment
                .into_iter()
                .map(|(sentiment, count)| SentimentCount { sentiment, count })
                .collect(),
            by_location: by_location
                .into_iter()
                .map(|(location, count)| LocationCount { location, count })
                .collect(),
            posts_over_time: over_time
                .into_iter()
                .map(|(year, month_num, sentiment, count)| SentimentTrendPoint {
                    month: month_label(year as i32, month_num as u32),
                    year,
                    month_num,
                    sentiment,
                    count,
                })
                .collect(),
        })
    }
}
