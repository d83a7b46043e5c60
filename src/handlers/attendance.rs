use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use sqlx::PgPool;

use crate::admission::{attendance_action, AttendanceAction};
use crate::handlers::{ensure_user_exists, lock_event};
use crate::models::AttendanceDetails;
use crate::utils::error::AppError;
use crate::utils::response::empty_success;

#[derive(Deserialize)]
pub struct AttendanceQuery {
    pub event_id: Option<i64>,
}

/// GET /api/attendance: attendance records, optionally for one event.
pub async fn list_attendance(
    State(pool): State<PgPool>,
    Query(params): Query<AttendanceQuery>,
) -> Result<Response, AppError> {
    let records = sqlx::query_as::<_, AttendanceDetails>(
        "SELECT a.id, a.event_id, a.user_id, a.status, a.check_in_time, \
         u.full_name, u.email, e.title AS event_title \
         FROM attendance a \
         JOIN users u ON u.id = a.user_id \
         JOIN events e ON e.id = a.event_id \
         WHERE ($1::BIGINT IS NULL OR a.event_id = $1) \
         ORDER BY a.check_in_time",
    )
    .bind(params.event_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(records).into_response())
}

#[derive(Deserialize)]
pub struct MarkAttendance {
    pub event_id: i64,
    pub user_id: i64,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "present".to_string()
}

/// POST /api/attendance: idempotent upsert keyed on (event, user).
///
/// A second mark for the same pair updates the existing row and refreshes
/// the check-in time instead of duplicating it. Attendance deliberately
/// does not require a prior registration.
pub async fn mark_attendance(
    State(pool): State<PgPool>,
    Json(payload): Json<MarkAttendance>,
) -> Result<Response, AppError> {
    let mut tx = pool.begin().await?;

    lock_event(&mut *tx, payload.event_id).await?;
    ensure_user_exists(&mut *tx, payload.user_id).await?;

    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM attendance WHERE event_id = $1 AND user_id = $2")
            .bind(payload.event_id)
            .bind(payload.user_id)
            .fetch_optional(&mut *tx)
            .await?;

    let message = match attendance_action(existing) {
        AttendanceAction::Create => {
            sqlx::query("INSERT INTO attendance (event_id, user_id, status) VALUES ($1, $2, $3)")
                .bind(payload.event_id)
                .bind(payload.user_id)
                .bind(&payload.status)
                .execute(&mut *tx)
                .await?;

            "Attendance recorded successfully"
        }
        AttendanceAction::Update(id) => {
            sqlx::query("UPDATE attendance SET status = $2, check_in_time = now() WHERE id = $1")
                .bind(id)
                .bind(&payload.status)
                .execute(&mut *tx)
                .await?;

            "Attendance updated successfully"
        }
    };

    tx.commit().await?;

    Ok(empty_success(message).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_present() {
        let payload: MarkAttendance =
            serde_json::from_str(r#"{"event_id":1,"user_id":2}"#).unwrap();
        assert_eq!(payload.status, "present");
    }
}
