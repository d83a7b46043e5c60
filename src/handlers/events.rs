use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::json;
use sqlx::{FromRow, PgPool};

use crate::admission::project_availability;
use crate::models::EventDetails;
use crate::utils::error::AppError;
use crate::utils::response::{empty_success, success};

/// Row shape of the listing query: event fields plus organizer name and
/// the registration count. `available_spots` is derived afterwards via
/// the availability projection.
#[derive(FromRow)]
struct EventRow {
    id: i64,
    title: String,
    description: Option<String>,
    event_date: NaiveDate,
    event_time: NaiveTime,
    location: String,
    organizer_id: i64,
    capacity: i32,
    category: Option<String>,
    organizer_name: String,
    current_participants: i64,
}

impl EventRow {
    fn into_details(self) -> EventDetails {
        let availability = project_availability(self.capacity, self.current_participants);
        EventDetails {
            id: self.id,
            title: self.title,
            description: self.description,
            event_date: self.event_date,
            event_time: self.event_time,
            location: self.location,
            organizer_id: self.organizer_id,
            capacity: self.capacity,
            category: self.category,
            organizer_name: self.organizer_name,
            current_participants: availability.current_participants,
            available_spots: availability.available_spots,
        }
    }
}

const LIST_SQL: &str = "SELECT e.id, e.title, e.description, e.event_date, e.event_time, \
     e.location, e.organizer_id, e.capacity, e.category, \
     u.full_name AS organizer_name, \
     (SELECT COUNT(*) FROM event_registrations r WHERE r.event_id = e.id) AS current_participants \
     FROM events e \
     JOIN users u ON u.id = e.organizer_id \
     WHERE ($1::BIGINT IS NULL OR e.id = $1) \
       AND ($2::BIGINT IS NULL OR e.organizer_id = $2) \
     ORDER BY e.event_date, e.event_time";

#[derive(Deserialize)]
pub struct EventQuery {
    pub event_id: Option<i64>,
    pub organizer_id: Option<i64>,
}

/// GET /api/events: all events, one organizer's events, or a single
/// event when `event_id` is given (returned as a bare object).
pub async fn list_events(
    State(pool): State<PgPool>,
    Query(params): Query<EventQuery>,
) -> Result<Response, AppError> {
    let rows = sqlx::query_as::<_, EventRow>(LIST_SQL)
        .bind(params.event_id)
        .bind(params.organizer_id)
        .fetch_all(&pool)
        .await?;

    let mut events: Vec<EventDetails> = rows.into_iter().map(EventRow::into_details).collect();

    if params.event_id.is_some() {
        let event = events
            .pop()
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
        return Ok(Json(event).into_response());
    }

    Ok(Json(events).into_response())
}

#[derive(Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub location: String,
    pub organizer_id: i64,
    pub capacity: i32,
    pub category: Option<String>,
}

/// POST /api/events: create an event. Capacity is taken as-is: a zero or
/// negative value simply makes the event immediately full.
pub async fn create_event(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateEvent>,
) -> Result<Response, AppError> {
    let organizer_exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(payload.organizer_id)
            .fetch_one(&pool)
            .await?;
    if !organizer_exists {
        return Err(AppError::NotFound("Organizer not found".to_string()));
    }

    let event_id: i64 = sqlx::query_scalar(
        "INSERT INTO events (title, description, event_date, event_time, location, organizer_id, capacity, category) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING id",
    )
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(payload.event_date)
    .bind(payload.event_time)
    .bind(&payload.location)
    .bind(payload.organizer_id)
    .bind(payload.capacity)
    .bind(&payload.category)
    .fetch_one(&pool)
    .await?;

    Ok(success(json!({ "event_id": event_id }), "Event created successfully").into_response())
}

#[derive(Deserialize)]
pub struct UpdateEvent {
    pub event_id: i64,
    // caller identity, checked against the stored organizer
    pub organizer_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub location: String,
    pub capacity: i32,
    pub category: Option<String>,
}

/// PUT /api/events: full update of an event, restricted to its organizer.
pub async fn update_event(
    State(pool): State<PgPool>,
    Json(payload): Json<UpdateEvent>,
) -> Result<Response, AppError> {
    ensure_owned_by(&pool, payload.event_id, payload.organizer_id).await?;

    sqlx::query(
        "UPDATE events SET title = $2, description = $3, event_date = $4, event_time = $5, \
         location = $6, capacity = $7, category = $8 \
         WHERE id = $1",
    )
    .bind(payload.event_id)
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(payload.event_date)
    .bind(payload.event_time)
    .bind(&payload.location)
    .bind(payload.capacity)
    .bind(&payload.category)
    .execute(&pool)
    .await?;

    Ok(empty_success("Event updated successfully").into_response())
}

#[derive(Deserialize)]
pub struct DeleteEventQuery {
    pub event_id: i64,
    pub organizer_id: i64,
}

/// DELETE /api/events: delete an event and (by cascade) its
/// registrations, attendance, and feedback. Organizer only.
pub async fn delete_event(
    State(pool): State<PgPool>,
    Query(params): Query<DeleteEventQuery>,
) -> Result<Response, AppError> {
    ensure_owned_by(&pool, params.event_id, params.organizer_id).await?;

    sqlx::query("DELETE FROM events WHERE id = $1")
        .bind(params.event_id)
        .execute(&pool)
        .await?;

    Ok(empty_success("Event deleted successfully").into_response())
}

async fn ensure_owned_by(pool: &PgPool, event_id: i64, caller_id: i64) -> Result<(), AppError> {
    let owner: i64 = sqlx::query_scalar("SELECT organizer_id FROM events WHERE id = $1")
        .bind(event_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    if owner != caller_id {
        return Err(AppError::Forbidden(
            "Only the event organizer can modify this event".to_string(),
        ));
    }

    Ok(())
}
