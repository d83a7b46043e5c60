use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub location: String,
    pub organizer_id: i64,
    pub capacity: i32,
    pub category: Option<String>,
}

/// An event joined with its organizer's name and the availability projection.
/// This is the shape the listing endpoint returns.
#[derive(Debug, Clone, Serialize)]
pub struct EventDetails {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub location: String,
    pub organizer_id: i64,
    pub capacity: i32,
    pub category: Option<String>,
    pub organizer_name: String,
    pub current_participants: i64,
    pub available_spots: i64,
}
