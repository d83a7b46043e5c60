use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attendance {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub status: String,
    pub check_in_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AttendanceDetails {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub status: String,
    pub check_in_time: DateTime<Utc>,
    pub full_name: String,
    pub email: String,
    pub event_title: String,
}
