use crate::dates;
use crate::errors::AppError;
use crate::export;
use crate::models::{
    CalendarQuery, CalendarResponse, DayRequest, DayResponse, NoteRequest, PaceQuery,
    TargetRequest, TokenRequest, UnsubscribeRequest,
};
use crate::pace::{self, PaceSnapshot};
use crate::registry::{Subscription, SubscriptionStore};
use crate::reminder::{self, ReminderSummary};
use crate::push::NotificationSpec;
use crate::state::AppState;
use crate::storage;
use crate::store::{DayStatus, TrackerData};
use crate::{calendar, ui};
use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
};
use chrono::Datelike;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = dates::today();
    let data = state.tracker.lock().await;
    Html(ui::render_index(today, &data))
}

pub async fn manifest() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/manifest+json")],
        ui::MANIFEST,
    )
}

pub async fn icon() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], ui::ICON_SVG)
}

pub async fn get_state(State(state): State<AppState>) -> Json<TrackerData> {
    Json(state.tracker.lock().await.clone())
}

pub async fn set_day(
    State(state): State<AppState>,
    Json(payload): Json<DayRequest>,
) -> Result<Json<DayResponse>, AppError> {
    let iso = normalize_date(&payload.date)?;
    let status = match payload.status.as_deref() {
        None | Some("") => None,
        Some("in") => Some(DayStatus::In),
        Some("out") => Some(DayStatus::Out),
        Some(other) => {
            return Err(AppError::bad_request(format!(
                "status must be 'in', 'out' or empty, got '{other}'"
            )));
        }
    };

    let mut data = state.tracker.lock().await;
    data.set_status(&iso, status);
    storage::persist_tracker(&state.tracker_path, &data).await?;

    Ok(Json(day_response(&data, iso)))
}

pub async fn set_note(
    State(state): State<AppState>,
    Json(payload): Json<NoteRequest>,
) -> Result<Json<DayResponse>, AppError> {
    let iso = normalize_date(&payload.date)?;

    let mut data = state.tracker.lock().await;
    data.set_note(&iso, &payload.notes);
    storage::persist_tracker(&state.tracker_path, &data).await?;

    Ok(Json(day_response(&data, iso)))
}

pub async fn set_target(
    State(state): State<AppState>,
    Json(payload): Json<TargetRequest>,
) -> Result<Json<TrackerData>, AppError> {
    let target = u32::try_from(payload.target).unwrap_or(0);
    let mut data = state.tracker.lock().await;
    if !data.set_target(target) {
        return Err(AppError::bad_request("target must be at least 1"));
    }
    storage::persist_tracker(&state.tracker_path, &data).await?;

    Ok(Json(data.clone()))
}

pub async fn get_pace(
    State(state): State<AppState>,
    Query(query): Query<PaceQuery>,
) -> Result<Json<PaceSnapshot>, AppError> {
    let today = dates::today();
    let year = query.year.unwrap_or_else(|| today.year());
    let quarter = query.quarter.unwrap_or_else(|| dates::quarter_of(today));
    validate_year(year)?;
    if !(1..=4).contains(&quarter) {
        return Err(AppError::bad_request("quarter must be 1..=4"));
    }

    let data = state.tracker.lock().await;
    Ok(Json(pace::snapshot(&data, year, quarter, today)))
}

pub async fn get_calendar(
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let today = dates::today();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());
    validate_year(year)?;
    if !(1..=12).contains(&month) {
        return Err(AppError::bad_request("month must be 1..=12"));
    }

    let weeks = calendar::month_grid(year, month)
        .into_iter()
        .map(|week| week.into_iter().map(|cell| cell.map(dates::to_iso)).collect())
        .collect();

    Ok(Json(CalendarResponse { year, month, weeks }))
}

pub async fn export_quarter(
    State(state): State<AppState>,
    Query(query): Query<PaceQuery>,
) -> Result<impl IntoResponse, AppError> {
    let today = dates::today();
    let year = query.year.unwrap_or_else(|| today.year());
    let quarter = query.quarter.unwrap_or_else(|| dates::quarter_of(today));
    validate_year(year)?;
    if !(1..=4).contains(&quarter) {
        return Err(AppError::bad_request("quarter must be 1..=4"));
    }

    let data = state.tracker.lock().await;
    let csv = export::quarter_csv(&data, year, quarter)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export::csv_file_name(year, quarter)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

pub async fn save_subscription(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, AppError> {
    let endpoint_present = payload
        .get("endpoint")
        .and_then(|value| value.as_str())
        .is_some_and(|endpoint| !endpoint.is_empty());
    if !endpoint_present {
        return Err(AppError::bad_request("subscription endpoint is required"));
    }

    let sub: Subscription = serde_json::from_value(payload)
        .map_err(|err| AppError::bad_request(format!("invalid subscription: {err}")))?;
    state.subscriptions.set(sub).await?;

    Ok(Json(serde_json::json!({ "message": "Subscription saved successfully." })))
}

pub async fn delete_subscription(
    State(state): State<AppState>,
    Json(payload): Json<UnsubscribeRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if payload.endpoint.is_empty() {
        return Err(AppError::bad_request("subscription endpoint is required"));
    }
    state.subscriptions.delete(&payload.endpoint).await?;

    Ok(Json(serde_json::json!({ "message": "Subscription removed." })))
}

pub async fn save_token(
    State(state): State<AppState>,
    Json(payload): Json<TokenRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if payload.token.is_empty() {
        return Err(AppError::bad_request("token is required"));
    }
    state.tokens.set(payload.token).await?;

    Ok(Json(serde_json::json!({ "message": "Token saved." })))
}

pub async fn run_reminders(
    State(state): State<AppState>,
) -> Result<Json<ReminderSummary>, AppError> {
    let Some(gateway) = state.gateway.as_ref() else {
        return Err(AppError::service_unavailable(
            "push reminders are disabled: VAPID keys not configured",
        ));
    };

    let spec = NotificationSpec {
        url: state.reminder_click_url.clone(),
        ..NotificationSpec::default()
    };
    let summary = reminder::run(&state.subscriptions, gateway, &spec).await?;

    Ok(Json(summary))
}

fn normalize_date(raw: &str) -> Result<String, AppError> {
    let date = dates::from_iso(raw.trim())
        .ok_or_else(|| AppError::bad_request(format!("invalid date: '{raw}'")))?;
    Ok(dates::to_iso(date))
}

fn day_response(data: &TrackerData, iso: String) -> DayResponse {
    match data.days.get(&iso) {
        Some(entry) => DayResponse {
            date: iso,
            status: entry.status,
            notes: entry.notes.clone(),
        },
        None => DayResponse {
            date: iso,
            status: None,
            notes: String::new(),
        },
    }
}

fn validate_year(year: i32) -> Result<(), AppError> {
    if !(1970..=9999).contains(&year) {
        return Err(AppError::bad_request("year out of range"));
    }
    Ok(())
}
