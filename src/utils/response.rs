use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Failure envelope: `{ "success": false, "error": "<message>" }`.
/// The error is a free-text message, not a structured code.
#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: String,
}

pub fn success<T>(data: T, message: impl Into<String>) -> impl IntoResponse
where
    T: Serialize,
{
    let body = ApiResponse {
        success: true,
        data: Some(data),
        message: Some(message.into()),
    };
    (StatusCode::OK, Json(body))
}

pub fn empty_success(message: impl Into<String>) -> impl IntoResponse {
    let body: ApiResponse<()> = ApiResponse {
        success: true,
        data: None,
        message: Some(message.into()),
    };
    (StatusCode::OK, Json(body))
}

pub fn error(message: impl Into<String>, status: StatusCode) -> Response {
    let body = ApiErrorResponse {
        success: false,
        error: message.into(),
    };

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let body = ApiResponse {
            success: true,
            data: Some(serde_json::json!({"event_id": 7})),
            message: Some("Event created successfully".to_string()),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["event_id"], 7);
        assert_eq!(json["message"], "Event created successfully");
    }

    #[test]
    fn empty_success_omits_data() {
        let body: ApiResponse<()> = ApiResponse {
            success: true,
            data: None,
            message: Some("ok".to_string()),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("data").is_none());
    }

    #[test]
    fn error_envelope_is_flat_free_text() {
        let body = ApiErrorResponse {
            success: false,
            error: "Event is full".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Event is full");
    }
}
