use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use sqlx::PgPool;

use crate::admission::{admit_registration, RegistrationDecision};
use crate::handlers::{ensure_user_exists, lock_event};
use crate::models::RegistrationDetails;
use crate::utils::error::AppError;
use crate::utils::response::empty_success;

#[derive(Deserialize)]
pub struct RegistrationQuery {
    pub event_id: Option<i64>,
    pub user_id: Option<i64>,
}

/// GET /api/registrations: registrations for an event or for a user,
/// joined with registrant and event details.
pub async fn list_registrations(
    State(pool): State<PgPool>,
    Query(params): Query<RegistrationQuery>,
) -> Result<Response, AppError> {
    let registrations = sqlx::query_as::<_, RegistrationDetails>(
        "SELECT r.id, r.event_id, r.user_id, r.registration_date, \
         u.full_name, u.email, \
         e.title, e.event_date, e.event_time, e.location \
         FROM event_registrations r \
         JOIN users u ON u.id = r.user_id \
         JOIN events e ON e.id = r.event_id \
         WHERE ($1::BIGINT IS NULL OR r.event_id = $1) \
           AND ($2::BIGINT IS NULL OR r.user_id = $2) \
         ORDER BY r.registration_date",
    )
    .bind(params.event_id)
    .bind(params.user_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(registrations).into_response())
}

#[derive(Deserialize)]
pub struct Register {
    pub event_id: i64,
    pub user_id: i64,
}

/// POST /api/registrations: capacity-checked registration.
///
/// The whole admission runs in one transaction holding the event row
/// lock, so two concurrent requests for the last seat cannot both pass
/// the capacity check. A rejected decision rolls back untouched.
pub async fn register(
    State(pool): State<PgPool>,
    Json(payload): Json<Register>,
) -> Result<Response, AppError> {
    let mut tx = pool.begin().await?;

    let capacity = lock_event(&mut *tx, payload.event_id).await?;
    ensure_user_exists(&mut *tx, payload.user_id).await?;

    let already_registered: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM event_registrations WHERE event_id = $1 AND user_id = $2)",
    )
    .bind(payload.event_id)
    .bind(payload.user_id)
    .fetch_one(&mut *tx)
    .await?;

    let registered: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM event_registrations WHERE event_id = $1")
            .bind(payload.event_id)
            .fetch_one(&mut *tx)
            .await?;

    match admit_registration(already_registered, capacity, registered) {
        RegistrationDecision::Admitted => {
            sqlx::query("INSERT INTO event_registrations (event_id, user_id) VALUES ($1, $2)")
                .bind(payload.event_id)
                .bind(payload.user_id)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;

            Ok(empty_success("Successfully registered for event").into_response())
        }
        RegistrationDecision::Rejected(reason) => {
            Err(AppError::ValidationError(reason.message().to_string()))
        }
    }
}

#[derive(Deserialize)]
pub struct CancelQuery {
    pub registration_id: i64,
    pub user_id: i64,
}

/// DELETE /api/registrations: cancel a registration. Only the registrant
/// may cancel their own registration.
pub async fn cancel(
    State(pool): State<PgPool>,
    Query(params): Query<CancelQuery>,
) -> Result<Response, AppError> {
    let owner: i64 = sqlx::query_scalar("SELECT user_id FROM event_registrations WHERE id = $1")
        .bind(params.registration_id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Registration not found".to_string()))?;

    if owner != params.user_id {
        return Err(AppError::Forbidden(
            "Only the registrant can cancel this registration".to_string(),
        ));
    }

    sqlx::query("DELETE FROM event_registrations WHERE id = $1")
        .bind(params.registration_id)
        .execute(&pool)
        .await?;

    Ok(empty_success("Registration cancelled successfully").into_response())
}
