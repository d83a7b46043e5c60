use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub registration_date: DateTime<Utc>,
}

/// A registration joined with the registrant and the event, as returned
/// by the listing endpoint.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RegistrationDetails {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub registration_date: DateTime<Utc>,
    pub full_name: String,
    pub email: String,
    pub title: String,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub location: String,
}
