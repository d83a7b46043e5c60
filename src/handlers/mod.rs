use axum::response::{IntoResponse, Response};
use serde::Serialize;
use sqlx::PgConnection;

use crate::utils::error::AppError;
use crate::utils::response::success;

pub mod attendance;
pub mod events;
pub mod feedback;
pub mod registrations;
pub mod users;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "convene-api",
    };

    success(payload, "Convene API is running").into_response()
}

/// Locks the event row for the rest of the transaction and returns its
/// capacity. Every mutating (event, user) write goes through this first,
/// so admission decisions for one event are serialized.
pub(crate) async fn lock_event(conn: &mut PgConnection, event_id: i64) -> Result<i32, AppError> {
    sqlx::query_scalar::<_, i32>("SELECT capacity FROM events WHERE id = $1 FOR UPDATE")
        .bind(event_id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
}

pub(crate) async fn ensure_user_exists(
    conn: &mut PgConnection,
    user_id: i64,
) -> Result<(), AppError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
        .bind(user_id)
        .fetch_one(conn)
        .await?;

    if exists {
        Ok(())
    } else {
        Err(AppError::NotFound("User not found".to_string()))
    }
}
