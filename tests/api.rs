//! Integration tests against the seeded canonical dataset.
//!
//! Each test runs on its own in-memory SQLite database so assertions are
//! exact: 10 rows per table, known ids, known dates.

use sqlx::sqlite::SqlitePoolOptions;

use crimewatch::db::Database;
use crimewatch::filter::{
    CrimeFilter, DateRange, LocationFilter, OfficerFilter, SocialMediaFilter, WeatherFilter,
};
use crimewatch::web::crimes_to_csv;

async fn seeded_db() -> Database {
    // A single connection keeps the whole test on one :memory: database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("connect to in-memory sqlite");
    let db = Database::from_pool(pool);
    db.run_migrations().await.expect("run migrations");
    db.seed_if_empty().await.expect("seed dataset");
    db
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let db = seeded_db().await;
    db.seed_if_empty().await.expect("second seed is a no-op");

    let crimes = db.crimes(&CrimeFilter::default()).await.unwrap();
    assert_eq!(crimes.len(), 10);
}

#[tokio::test]
async fn dashboard_stats_for_seed_data() {
    let db = seeded_db().await;
    let stats = db.dashboard_stats().await.unwrap();

    assert_eq!(stats.total_crimes, 10);
    assert_eq!(stats.arrest_rate, 30);
    // Theft and Assault both have 3 crimes; the tie breaks
    // lexicographically by type name
    assert_eq!(stats.most_common_crime.type_of_crime, "Assault");
    assert_eq!(stats.most_common_crime.count, 3);
    assert_eq!(stats.most_common_crime.percentage, 30);
    // All seed crimes are from 2023
    assert_eq!(stats.recent_crimes, 0);
}

#[tokio::test]
async fn crime_type_counts_order_by_count_then_name() {
    let db = seeded_db().await;
    let counts = db.crime_type_counts().await.unwrap();

    let expected = [
        ("Assault", 3),
        ("Theft", 3),
        ("Vandalism", 2),
        ("Cyber Crime", 1),
        ("Fraud", 1),
    ];
    let actual: Vec<(&str, i64)> = counts
        .iter()
        .map(|c| (c.type_of_crime.as_str(), c.count))
        .collect();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn arrest_status_percentages() {
    let db = seeded_db().await;
    let counts = db.arrest_status_counts().await.unwrap();

    let actual: Vec<(&str, i64, i64)> = counts
        .iter()
        .map(|c| (c.status.as_str(), c.count, c.percentage))
        .collect();
    assert_eq!(
        actual,
        [("Arrested", 3, 30), ("No Arrest", 4, 40), ("Pending", 3, 30)]
    );
}

#[tokio::test]
async fn crime_trends_are_chronological() {
    let db = seeded_db().await;
    let trends = db.crime_trends().await.unwrap();

    assert_eq!(trends.len(), 9);
    assert_eq!(trends[0].month, "Jan 2023");
    assert_eq!(trends[0].count, 2);
    assert!(trends.windows(2).all(|w| {
        (w[0].year, w[0].month_num) < (w[1].year, w[1].month_num)
    }));
}

#[tokio::test]
async fn recent_crimes_come_newest_first() {
    let db = seeded_db().await;
    let crimes = db.recent_crimes(10).await.unwrap();

    assert_eq!(crimes.len(), 10);
    assert_eq!(crimes[0].id, "C10");
    assert_eq!(crimes[0].address.as_deref(), Some("678 Cypress Ave"));
    assert_eq!(crimes[9].id, "C01");
}

#[tokio::test]
async fn crime_locations_parse_coordinates() {
    let db = seeded_db().await;
    let rows = db.crime_locations(100).await.unwrap();

    assert_eq!(rows.len(), 10);
    let first = rows.iter().find(|r| r.id == "L01").unwrap();
    assert_eq!(first.latitude, Some(40.7128));
    assert_eq!(first.longitude, Some(-74.0060));
    assert_eq!(first.crime_id.as_deref(), Some("C01"));
}

#[tokio::test]
async fn unfiltered_crimes_return_full_set_newest_first() {
    let db = seeded_db().await;
    let crimes = db.crimes(&CrimeFilter::default()).await.unwrap();

    assert_eq!(crimes.len(), 10);
    assert_eq!(crimes[0].id, "C10");
    let c01 = crimes.iter().find(|c| c.id == "C01").unwrap();
    assert_eq!(c01.officer_name.as_deref(), Some("John Smith"));
    assert_eq!(c01.address.as_deref(), Some("123 Main St"));
}

#[tokio::test]
async fn type_filter_selects_matching_crimes() {
    let db = seeded_db().await;
    let filter = CrimeFilter {
        crime_type: Some("Theft".to_string()),
        ..Default::default()
    };
    let crimes = db.crimes(&filter).await.unwrap();

    assert_eq!(crimes.len(), 3);
    assert!(crimes.iter().all(|c| c.type_of_crime == "Theft"));
}

#[tokio::test]
async fn filters_intersect_across_categories() {
    let db = seeded_db().await;

    let matching = CrimeFilter {
        crime_type: Some("Assault".to_string()),
        status: Some("Arrested".to_string()),
        ..Default::default()
    };
    assert_eq!(db.crimes(&matching).await.unwrap().len(), 3);

    // No seed theft led to an arrest, so ANDing the filters empties the set
    let disjoint = CrimeFilter {
        crime_type: Some("Theft".to_string()),
        status: Some("Arrested".to_string()),
        ..Default::default()
    };
    assert_eq!(db.crimes(&disjoint).await.unwrap().len(), 0);
}

#[tokio::test]
async fn date_range_is_inclusive_on_both_bounds() {
    let db = seeded_db().await;
    let filter = CrimeFilter {
        dates: DateRange::parse("01/05/2023 - 02/18/2023"),
        ..Default::default()
    };
    let crimes = db.crimes(&filter).await.unwrap();

    let ids: Vec<&str> = crimes.iter().map(|c| c.id.as_str()).collect();
    // C01 sits on the start bound, C03 on the end bound
    assert_eq!(ids, ["C03", "C02", "C01"]);
}

#[tokio::test]
async fn search_is_case_sensitive_across_columns() {
    let db = seeded_db().await;

    let by_description = CrimeFilter {
        search: Some("stolen".to_string()),
        ..Default::default()
    };
    assert_eq!(db.crimes(&by_description).await.unwrap().len(), 1);

    let wrong_case = CrimeFilter {
        search: Some("STOLEN".to_string()),
        ..Default::default()
    };
    assert_eq!(db.crimes(&wrong_case).await.unwrap().len(), 0);

    let by_address = CrimeFilter {
        search: Some("Main".to_string()),
        ..Default::default()
    };
    let crimes = db.crimes(&by_address).await.unwrap();
    assert_eq!(crimes.len(), 1);
    assert_eq!(crimes[0].id, "C01");

    let by_id = CrimeFilter {
        search: Some("C09".to_string()),
        ..Default::default()
    };
    assert_eq!(db.crimes(&by_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn crime_detail_assembles_all_related_records() {
    let db = seeded_db().await;
    let detail = db.crime_detail("C01").await.unwrap().expect("C01 exists");

    assert_eq!(detail.type_of_crime, "Theft");
    assert_eq!(detail.location_id, "L01");
    assert_eq!(detail.location.as_ref().unwrap().address, "123 Main St");

    let report = detail.police_report.as_ref().expect("R01 linked");
    assert_eq!(report.id, "R01");
    assert_eq!(report.outcome, "Suspect identified");

    let officer = detail.officer.as_ref().expect("PO_05 assigned");
    assert_eq!(officer.id, "PO_05");
    assert_eq!(officer.name, "John Smith");

    let weather = detail.weather.as_ref().expect("weather for 2023-01-05");
    assert_eq!(weather.temperature, "34°F");

    // P01 (2023-01-06) is the only post within ±1 day of the crime
    let post = detail.social_media.as_ref().expect("nearby post");
    assert_eq!(post.id, "P01");
}

#[tokio::test]
async fn unknown_crime_id_is_none_not_empty() {
    let db = seeded_db().await;
    assert!(db.crime_detail("C999").await.unwrap().is_none());
}

#[tokio::test]
async fn locations_carry_crime_counts() {
    let db = seeded_db().await;
    let locations = db.locations(&LocationFilter::default()).await.unwrap();

    assert_eq!(locations.len(), 10);
    assert!(locations.iter().all(|l| l.crime_count == Some(1)));

    let residential = LocationFilter {
        address_type: Some("Residential".to_string()),
        ..Default::default()
    };
    assert_eq!(db.locations(&residential).await.unwrap().len(), 3);

    let searched = LocationFilter {
        search: Some("Main".to_string()),
        ..Default::default()
    };
    let found = db.locations(&searched).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "L01");
}

#[tokio::test]
async fn officers_carry_case_counts_with_left_join_nulls() {
    let db = seeded_db().await;
    let officers = db.officers(&OfficerFilter::default()).await.unwrap();

    assert_eq!(officers.len(), 10);
    let sarah = officers.iter().find(|o| o.id == "PO_02").unwrap();
    assert_eq!(sarah.case_count, Some(2));
    // PO_07 authored no reports; the left join reports null, not zero
    let robert = officers.iter().find(|o| o.id == "PO_07").unwrap();
    assert_eq!(robert.case_count, None);

    let by_position = OfficerFilter {
        position: Some("Officer".to_string()),
        ..Default::default()
    };
    assert_eq!(db.officers(&by_position).await.unwrap().len(), 3);

    let by_area = OfficerFilter {
        area: Some("Downtown Precinct".to_string()),
        ..Default::default()
    };
    assert_eq!(db.officers(&by_area).await.unwrap().len(), 2);

    let searched = OfficerFilter {
        search: Some("Sarah".to_string()),
        ..Default::default()
    };
    assert_eq!(db.officers(&searched).await.unwrap().len(), 1);
}

#[tokio::test]
async fn officer_stats_keep_zero_report_officers() {
    let db = seeded_db().await;
    let stats = db.officer_stats().await.unwrap();

    let positions: Vec<(&str, i64)> = stats
        .by_position
        .iter()
        .map(|p| (p.position.as_str(), p.count))
        .collect();
    assert_eq!(
        positions,
        [("Captain", 2), ("Lieutenant", 2), ("Officer", 3), ("Sergeant", 3)]
    );

    assert_eq!(stats.top_officers.len(), 10);
    assert_eq!(stats.top_officers[0].id, "PO_02");
    assert_eq!(stats.top_officers[0].count, 2);
    let robert = stats.top_officers.iter().find(|o| o.id == "PO_07").unwrap();
    assert_eq!(robert.count, 0);
}

#[tokio::test]
async fn social_media_filters_apply() {
    let db = seeded_db().await;

    let all = db
        .social_media_posts(&SocialMediaFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 10);
    assert_eq!(all[0].id, "P10");

    let negative = SocialMediaFilter {
        sentiment: Some("Negative".to_string()),
        ..Default::default()
    };
    assert_eq!(db.social_media_posts(&negative).await.unwrap().len(), 4);

    let new_york = SocialMediaFilter {
        location: Some("New York".to_string()),
        ..Default::default()
    };
    assert_eq!(db.social_media_posts(&new_york).await.unwrap().len(), 2);

    let searched = SocialMediaFilter {
        search: Some("police".to_string()),
        ..Default::default()
    };
    assert_eq!(db.social_media_posts(&searched).await.unwrap().len(), 3);
}

#[tokio::test]
async fn social_media_stats_bucket_by_month_and_sentiment() {
    let db = seeded_db().await;
    let stats = db.social_media_stats().await.unwrap();

    let sentiments: Vec<(&str, i64)> = stats
        .by_sentiment
        .iter()
        .map(|s| (s.sentiment.as_str(), s.count))
        .collect();
    assert_eq!(
        sentiments,
        [("Negative", 4), ("Neutral", 3), ("Positive", 3)]
    );

    // Five cities with two posts each; count ties break by name
    let locations: Vec<&str> = stats
        .by_location
        .iter()
        .map(|l| l.location.as_str())
        .collect();
    assert_eq!(
        locations,
        ["Chicago", "Houston", "Los Angeles", "New York", "Phoenix"]
    );
    assert!(stats.by_location.iter().all(|l| l.count == 2));

    // January has posts with two different sentiments, so it yields two
    // (month, sentiment) rows; every other month yields one
    assert_eq!(stats.posts_over_time.len(), 10);
    assert_eq!(stats.posts_over_time[0].month, "Jan 2023");
    assert_eq!(stats.posts_over_time[0].sentiment, "Negative");
    assert_eq!(stats.posts_over_time[1].month, "Jan 2023");
    assert_eq!(stats.posts_over_time[1].sentiment, "Positive");
}

#[tokio::test]
async fn weather_listing_filters_apply() {
    let db = seeded_db().await;

    let all = db.weather_records(&WeatherFilter::default()).await.unwrap();
    assert_eq!(all.len(), 10);
    assert_eq!(all[0].id, "W10");

    let january = WeatherFilter {
        dates: DateRange::parse("01/01/2023 - 01/31/2023"),
        ..Default::default()
    };
    let records = db.weather_records(&january).await.unwrap();
    assert_eq!(records.len(), 2);

    let searched = WeatherFilter {
        search: Some("0.2".to_string()),
        ..Default::default()
    };
    assert_eq!(db.weather_records(&searched).await.unwrap().len(), 2);
}

#[tokio::test]
async fn weather_crime_stats_band_correctly() {
    let db = seeded_db().await;
    let stats = db.weather_crime_stats().await.unwrap();

    // Every seeded weather date has exactly one crime
    assert_eq!(stats.weather_crime_data.len(), 10);
    assert!(stats.weather_crime_data.iter().all(|r| r.crime_count == 1));
    assert_eq!(
        stats.weather_crime_data[0].date.to_string(),
        "2023-01-05"
    );

    let precipitation: Vec<(&str, i64)> = stats
        .precipitation_analysis
        .iter()
        .map(|b| (b.category.as_str(), b.crime_count))
        .collect();
    assert_eq!(
        precipitation,
        [
            ("No Precipitation", 3),
            ("Light (0-0.2 in)", 3),
            ("Moderate (0.2-0.5 in)", 3),
            ("Heavy (>0.5 in)", 1),
        ]
    );

    let temperature: Vec<(&str, i64)> = stats
        .temperature_analysis
        .iter()
        .map(|b| (b.category.as_str(), b.crime_count))
        .collect();
    assert_eq!(
        temperature,
        [
            ("Freezing (<32°F)", 1),
            ("Cold (32-50°F)", 3),
            ("Moderate (50-70°F)", 4),
            ("Hot (>70°F)", 2),
        ]
    );
}

#[tokio::test]
async fn export_row_count_matches_listing() {
    let db = seeded_db().await;
    let crimes = db.crimes(&CrimeFilter::default()).await.unwrap();
    let csv = String::from_utf8(crimes_to_csv(&crimes).unwrap()).unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Crime ID,Date,Description,Type,Status,Address,Officer");
    assert_eq!(lines.len() - 1, crimes.len());
    assert!(lines[1].starts_with("\"C10\",\"2023-09-10\""));
}
