use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use sqlx::PgPool;

use crate::admission::{admit_feedback, FeedbackDecision};
use crate::handlers::{ensure_user_exists, lock_event};
use crate::models::FeedbackDetails;
use crate::utils::error::AppError;
use crate::utils::response::empty_success;

#[derive(Deserialize)]
pub struct FeedbackQuery {
    pub event_id: Option<i64>,
}

/// GET /api/feedback: feedback entries, newest first, optionally for
/// one event.
pub async fn list_feedback(
    State(pool): State<PgPool>,
    Query(params): Query<FeedbackQuery>,
) -> Result<Response, AppError> {
    let entries = sqlx::query_as::<_, FeedbackDetails>(
        "SELECT f.id, f.event_id, f.user_id, f.rating, f.comment, f.created_at, \
         u.full_name, e.title AS event_title \
         FROM feedback f \
         JOIN users u ON u.id = f.user_id \
         JOIN events e ON e.id = f.event_id \
         WHERE ($1::BIGINT IS NULL OR f.event_id = $1) \
         ORDER BY f.created_at DESC",
    )
    .bind(params.event_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(entries).into_response())
}

#[derive(Deserialize)]
pub struct SubmitFeedback {
    pub event_id: i64,
    pub user_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
}

/// POST /api/feedback: one feedback entry per (event, user). A second
/// submission is rejected and never touches the stored entry.
pub async fn submit_feedback(
    State(pool): State<PgPool>,
    Json(payload): Json<SubmitFeedback>,
) -> Result<Response, AppError> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::ValidationError(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    lock_event(&mut *tx, payload.event_id).await?;
    ensure_user_exists(&mut *tx, payload.user_id).await?;

    let already_submitted: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM feedback WHERE event_id = $1 AND user_id = $2)",
    )
    .bind(payload.event_id)
    .bind(payload.user_id)
    .fetch_one(&mut *tx)
    .await?;

    match admit_feedback(already_submitted) {
        FeedbackDecision::Admitted => {
            sqlx::query(
                "INSERT INTO feedback (event_id, user_id, rating, comment) VALUES ($1, $2, $3, $4)",
            )
            .bind(payload.event_id)
            .bind(payload.user_id)
            .bind(payload.rating)
            .bind(&payload.comment)
            .execute(&mut *tx)
            .await?;
            tx.commit().await?;

            Ok(empty_success("Feedback submitted successfully").into_response())
        }
        FeedbackDecision::AlreadySubmitted => Err(AppError::ValidationError(
            FeedbackDecision::rejection_message().to_string(),
        )),
    }
}
