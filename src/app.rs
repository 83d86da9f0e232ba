use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/index.html", get(handlers::index))
        .route("/manifest.webmanifest", get(handlers::manifest))
        .route("/icon.svg", get(handlers::icon))
        .route("/api/state", get(handlers::get_state))
        .route("/api/day", post(handlers::set_day))
        .route("/api/note", post(handlers::set_note))
        .route("/api/target", post(handlers::set_target))
        .route("/api/pace", get(handlers::get_pace))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/export", get(handlers::export_quarter))
        .route(
            "/api/subscriptions",
            post(handlers::save_subscription).delete(handlers::delete_subscription),
        )
        .route("/api/fcm-token", post(handlers::save_token))
        .route("/api/reminders/run", post(handlers::run_reminders))
        .with_state(state)
}
