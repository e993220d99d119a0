use crate::dashboard::{DashboardView, PageRegions};
use crate::dates;
use crate::errors::AppError;
use crate::form::EntryForm;
use crate::models::{FormFields, FormParams, StatsResponse};
use crate::state::AppState;
use crate::stats::build_stats_at;
use crate::ui::{
    render_backend_unavailable, render_dashboard, render_duration_field, render_form_page,
    render_submission_result, render_validation_alert,
};
use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use tracing::{error, info, warn};

/// Fetches once, then renders. A failed fetch leaves every region empty.
pub async fn dashboard(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let today = dates::today();
    let mut regions = PageRegions::default();

    match state.backend.fetch_workouts().await {
        Ok(records) => {
            DashboardView::build_at(today, &records).apply(&mut regions, &state.charts)?;
        }
        Err(err) => error!("error fetching workout data: {err}"),
    }

    Ok(Html(render_dashboard(&regions)))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let records = state.backend.fetch_workouts().await?;
    Ok(Json(build_stats_at(dates::today(), &records)))
}

pub async fn entry_form(Query(params): Query<FormParams>) -> Html<String> {
    let form = EntryForm::load(&params, dates::today());
    Html(render_form_page(&form))
}

pub async fn duration_field(Query(params): Query<FormParams>) -> Html<String> {
    let form = EntryForm::load(&params, dates::today());
    Html(render_duration_field(&form).into_string())
}

pub async fn submit_workout(
    State(state): State<AppState>,
    Form(fields): Form<FormFields>,
) -> Html<String> {
    let mut form = EntryForm::from_fields(fields);
    let submission = match form.validate() {
        Ok(submission) => submission,
        Err(err) => {
            warn!(field = err.field(), "workout form rejected: {err}");
            return Html(render_validation_alert(err).into_string());
        }
    };

    let fragment = match state.backend.submit_workout(&submission).await {
        Ok(fragment) => fragment,
        Err(err) => {
            error!("error submitting workout: {err}");
            return Html(render_backend_unavailable().into_string());
        }
    };

    let redirect = form.record_response(&fragment);
    if redirect.is_some() {
        info!(date = %submission.date, workout_type = %submission.workout_type, "workout saved");
    }
    Html(render_submission_result(&fragment, redirect).into_string())
}

/// Landing point for reminder e-mails.
pub async fn email_link(Query(params): Query<FormParams>) -> Redirect {
    let date = params.date.unwrap_or_default();
    Redirect::to(&format!("/form?date={}", urlencoding::encode(date.trim())))
}

pub async fn export(State(state): State<AppState>) -> Response {
    match state.backend.export().await {
        Ok(export) => {
            let mut response = (
                [(header::CONTENT_TYPE, export.content_type)],
                export.body,
            )
                .into_response();
            if let Some(disposition) = export
                .disposition
                .and_then(|value| value.parse().ok())
            {
                response
                    .headers_mut()
                    .insert(header::CONTENT_DISPOSITION, disposition);
            }
            response
        }
        Err(err) => {
            error!("error exporting data: {err}");
            Redirect::to("/").into_response()
        }
    }
}
