//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use crate::{
    catalog::{Category, Region},
    error::BookingError,
    state::{AppState, Registration, UserAction},
    view::{
        chart_data, confirmation_summary, destinations, option_list, price_breakdown, ChartData,
        ConfirmationSummary, DestinationView, PriceBreakdown, RenderedOption, StateView,
    },
};
use super::responses::{ApiResponse, ErrorResponse, HealthResponse, StatusResponse};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(e: BookingError) -> ApiError {
    if e.is_user_facing() {
        info!("Action refused: {}", e);
        (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorResponse::new(e.to_string())))
    } else {
        error!("Request failed: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Internal error".to_string())),
        )
    }
}

/// Handle POST /actions - Apply a user action
pub async fn action_handler(
    State(state): State<Arc<AppState>>,
    Json(action): Json<UserAction>,
) -> Result<Json<ApiResponse>, ApiError> {
    let name = action.name();
    let booking = state.handle_user_action(action).map_err(api_error)?;
    debug!("Action {} applied, total={}", name, booking.total_price);
    Ok(Json(ApiResponse::ok(
        format!("{} applied", name),
        StateView::new(booking),
    )))
}

/// Handle GET /state - Return the current booking state
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let booking = state.get_booking_state().map_err(api_error)?;
    let registered = state.is_registered().map_err(api_error)?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        state: StateView::new(booking),
        registered,
        uptime: state.get_uptime(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /options/:category - Render one option list
pub async fn options_handler(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<Vec<RenderedOption>>, ApiError> {
    let category = category.parse::<Category>().map_err(|e| {
        warn!("{}", e);
        (StatusCode::NOT_FOUND, Json(ErrorResponse::new(e)))
    })?;
    let booking = state.get_booking_state().map_err(api_error)?;
    Ok(Json(option_list(&state.catalog, &booking, category).collect()))
}

#[derive(Debug, Deserialize)]
pub struct DestinationsQuery {
    region: Option<Region>,
}

/// Handle GET /destinations - Destination guide, optionally filtered by region
pub async fn destinations_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DestinationsQuery>,
) -> Result<Json<Vec<DestinationView>>, ApiError> {
    let booking = state.get_booking_state().map_err(api_error)?;
    Ok(Json(destinations(&state.catalog, &booking, query.region)))
}

/// Handle GET /breakdown - Itemised price list
pub async fn breakdown_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PriceBreakdown>, ApiError> {
    let booking = state.get_booking_state().map_err(api_error)?;
    Ok(Json(price_breakdown(&state.catalog, &booking)))
}

/// Handle GET /chart - Cost chart slices
pub async fn chart_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChartData>, ApiError> {
    let booking = state.get_booking_state().map_err(api_error)?;
    Ok(Json(chart_data(&state.catalog, &booking)))
}

/// Handle GET /confirmation - Confirmation page summary
pub async fn confirmation_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ConfirmationSummary>, ApiError> {
    let booking = state.get_booking_state().map_err(api_error)?;
    Ok(Json(confirmation_summary(&state.catalog, &booking)))
}

/// Handle GET /registration - Submitted registration details
pub async fn registration_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Registration>, ApiError> {
    match state.get_registration().map_err(api_error)? {
        Some(registration) => Ok(Json(registration)),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("No registration submitted".to_string())),
        )),
    }
}

/// Handle GET /events - Stream a `state` event after every change
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    info!("Event subscriber connected");
    let rx = state.subscribe();

    let events = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(booking) => {
                    let event = Event::default()
                        .event("state")
                        .json_data(StateView::new(booking));
                    return Some((event, rx));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event subscriber lagged, skipped {} updates", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
