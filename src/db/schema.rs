//! Database schema definitions

pub const CREATE_LOCATIONS: &str = r#"
CREATE TABLE IF NOT EXISTS locations (
    location_id TEXT PRIMARY KEY,
    address TEXT NOT NULL,
    geolocation TEXT NOT NULL,
    type_of_address TEXT NOT NULL
)
"#;

pub const CREATE_CRIME_REPORTS: &str = r#"
CREATE TABLE IF NOT EXISTS crime_reports (
    crime_id TEXT PRIMARY KEY,
    date TEXT NOT NULL,
    description TEXT NOT NULL,
    type_of_crime TEXT NOT NULL,
    arrest_status TEXT NOT NULL,
    location_id TEXT NOT NULL REFERENCES locations(location_id)
)
"#;

pub const CREATE_POLICE_OFFICERS: &str = r#"
CREATE TABLE IF NOT EXISTS police_officers (
    officer_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    position TEXT NOT NULL,
    assigned_area TEXT NOT NULL
)
"#;

pub const CREATE_POLICE_REPORTS: &str = r#"
CREATE TABLE IF NOT EXISTS police_reports (
    report_id TEXT PRIMARY KEY,
    date TEXT NOT NULL,
    outcome TEXT NOT NULL,
    crime_id TEXT NOT NULL REFERENCES crime_reports(crime_id),
    officer_id TEXT NOT NULL REFERENCES police_officers(officer_id)
)
"#;

pub const CREATE_SOCIAL_MEDIA: &str = r#"
CREATE TABLE IF NOT EXISTS social_media (
    post_id TEXT PRIMARY KEY,
    date TEXT NOT NULL,
    content TEXT NOT NULL,
    sentiment TEXT NOT NULL,
    location TEXT NOT NULL
)
"#;

pub const CREATE_WEATHER_DATA: &str = r#"
CREATE TABLE IF NOT EXISTS weather_data (
    weather_id TEXT PRIMARY KEY,
    date TEXT NOT NULL,
    precipitation TEXT NOT NULL,
    temperature TEXT NOT NULL,
    wind_speed TEXT NOT NULL
)
"#;

// === INDEXES (optimized for the dashboard queries) ===

// For date-ordered listings, trends and the weather date join
pub const CREATE_INDEX_CRIMES_DATE: &str =
    "CREATE INDEX IF NOT EXISTS idx_crimes_date ON crime_reports(date)";

// For per-location crime counts
pub const CREATE_INDEX_CRIMES_LOCATION: &str =
    "CREATE INDEX IF NOT EXISTS idx_crimes_location ON crime_reports(location_id)";

// For the crime -> police report lookup in detail assembly
pub const CREATE_INDEX_REPORTS_CRIME: &str =
    "CREATE INDEX IF NOT EXISTS idx_reports_crime ON police_reports(crime_id)";

// For per-officer case counts
pub const CREATE_INDEX_REPORTS_OFFICER: &str =
    "CREATE INDEX IF NOT EXISTS idx_reports_officer ON police_reports(officer_id)";

// For date-ordered post listings and the ±1 day detail window
pub const CREATE_INDEX_SOCIAL_DATE: &str =
    "CREATE INDEX IF NOT EXISTS idx_social_date ON social_media(date)";

// For the weather date join and date-ordered weather listings
pub const CREATE_INDEX_WEATHER_DATE: &str =
    "CREATE INDEX IF NOT EXISTS idx_weather_date ON weather_data(date)";
