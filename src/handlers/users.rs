use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use sqlx::PgPool;

use crate::models::UserProfile;
use crate::utils::error::AppError;
use crate::utils::response::success;

const PROFILE_COLUMNS: &str = "id, full_name, email, role, phone, created_at";

#[derive(Deserialize)]
pub struct UserQuery {
    pub user_id: Option<i64>,
}

/// GET /api/users: all users, or a single user when `user_id` is given.
/// Only public profile fields are returned, never the password hash.
pub async fn list_users(
    State(pool): State<PgPool>,
    Query(params): Query<UserQuery>,
) -> Result<Response, AppError> {
    if let Some(user_id) = params.user_id {
        let user = sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        return Ok(Json(user).into_response());
    }

    let users = sqlx::query_as::<_, UserProfile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM users ORDER BY id"
    ))
    .fetch_all(&pool)
    .await?;

    Ok(Json(users).into_response())
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub full_name: String,
    pub email: String,
    // Hashing happens upstream; this API only stores the digest.
    pub password_hash: String,
    #[serde(default = "default_role")]
    pub role: String,
    pub phone: Option<String>,
}

fn default_role() -> String {
    "participant".to_string()
}

/// POST /api/users: create a user profile.
pub async fn create_user(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateUser>,
) -> Result<Response, AppError> {
    if payload.role != "organizer" && payload.role != "participant" {
        return Err(AppError::ValidationError(
            "Role must be 'organizer' or 'participant'".to_string(),
        ));
    }

    let user = sqlx::query_as::<_, UserProfile>(&format!(
        "INSERT INTO users (full_name, email, password_hash, role, phone) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING {PROFILE_COLUMNS}"
    ))
    .bind(&payload.full_name)
    .bind(&payload.email)
    .bind(&payload.password_hash)
    .bind(&payload.role)
    .bind(&payload.phone)
    .fetch_one(&pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::ValidationError("Email already registered".to_string())
        }
        _ => AppError::DatabaseError(e),
    })?;

    Ok(success(user, "User registered successfully").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_defaults_to_participant() {
        let payload: CreateUser = serde_json::from_str(
            r#"{"full_name":"Ada","email":"ada@example.com","password_hash":"x"}"#,
        )
        .unwrap();
        assert_eq!(payload.role, "participant");
        assert!(payload.phone.is_none());
    }
}
