//! Crimewatch - crime analytics dashboard API
//!
//! Serves a browser dashboard with:
//! - Filtered listings of crimes, locations, officers, posts and weather
//! - Aggregate statistics (breakdowns, monthly trends, officer rankings)
//! - Weather-crime correlation with precipitation/temperature banding

pub mod config;
pub mod db;
pub mod filter;
pub mod web;
