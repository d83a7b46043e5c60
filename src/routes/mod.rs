use axum::{routing::get, Router};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::config::{apply_security_headers, create_cors_layer};
use crate::handlers::{self, attendance, events, feedback, registrations, users};

pub fn create_routes(pool: PgPool) -> Router {
    let api = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/events",
            get(events::list_events)
                .post(events::create_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route(
            "/registrations",
            get(registrations::list_registrations)
                .post(registrations::register)
                .delete(registrations::cancel),
        )
        .route(
            "/attendance",
            get(attendance::list_attendance).post(attendance::mark_attendance),
        )
        .route(
            "/feedback",
            get(feedback::list_feedback).post(feedback::submit_feedback),
        );

    let router = Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(pool);

    apply_security_headers(router)
}
