use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/form", get(handlers::entry_form))
        .route("/form/duration", get(handlers::duration_field))
        .route("/form/submit", post(handlers::submit_workout))
        .route("/form/email", get(handlers::email_link))
        .route("/export", get(handlers::export))
        .route("/api/stats", get(handlers::get_stats))
        .with_state(state)
}
