use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::config::Config;
use crate::models::equipment::{InverterSpec, PanelSpec};
use crate::models::sizing::{
    ConsumptionRequest, ConsumptionResponse, LocationRequest, LocationResponse, ResourceResponse,
    SessionCreatedResponse, SizingQuery, SizingResult,
};
use crate::services::{catalog, geocoding_service, irradiance_service, sizing_engine};
use crate::shared_state::AppState;

/// POST /api/sessions
/// Open a new consulting session
///
/// Creates an empty session (no location, zero solar resource, empty
/// consumption log) and returns its id for the follow-up calls.
#[utoipa::path(
    post,
    path = "/api/sessions",
    responses(
        (status = 201, description = "Session created", body = SessionCreatedResponse)
    )
)]
pub async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let session_id = state.create_session();
    println!("[SESSION] created {}", session_id);
    (StatusCode::CREATED, Json(SessionCreatedResponse { session_id })).into_response()
}

/// PUT /api/sessions/{id}/location
/// Resolve an address and refresh the session's solar resource
///
/// Runs the full resource half of the pipeline: geocode the address, then
/// fetch and aggregate one reference year of daily irradiance. Both values
/// replace the session's previous ones wholesale. An address without a match
/// is a warning, not an error: the session keeps running with zero stats.
#[utoipa::path(
    put,
    path = "/api/sessions/{id}/location",
    params(
        ("id" = String, Path, description = "Session id")
    ),
    request_body = LocationRequest,
    responses(
        (status = 200, description = "Location and solar resource updated", body = LocationResponse),
        (status = 404, description = "Session not found"),
        (status = 502, description = "Geocoding or irradiance provider failure")
    )
)]
pub async fn set_location(
    Path(id): Path<String>,
    State(state): State<AppState>,
    State(config): State<Config>,
    Json(req): Json<LocationRequest>,
) -> impl IntoResponse {
    let location = match geocoding_service::resolve_address(&config.geocoding, &req.address).await {
        Ok(location) => location,
        Err(e) => {
            eprintln!("[GEOCODE] provider failure: {}", e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response();
        }
    };

    let hsp = match irradiance_service::fetch_hsp(&config.irradiance, &location).await {
        Ok(hsp) => hsp,
        Err(e) => {
            eprintln!("[POWER] provider failure: {}", e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response();
        }
    };

    if !state.set_resource(&id, location, hsp) {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Session not found"})),
        )
            .into_response();
    }

    let resolved = location.is_resolved();
    if let Some((lat, lon)) = location.coordinates() {
        println!(
            "[GEOCODE] {:?} -> ({:.4}, {:.4}) | HSP min {:.2} mean {:.2} max {:.2}",
            req.address, lat, lon, hsp.min, hsp.mean, hsp.max
        );
    } else {
        println!("[GEOCODE] no match for {:?}", req.address);
    }

    let warning = (!resolved).then(|| "Address not found; enter a location to review".to_string());
    Json(LocationResponse { location, hsp, resolved, warning }).into_response()
}

/// GET /api/sessions/{id}/resource
/// Current location and solar resource statistics
#[utoipa::path(
    get,
    path = "/api/sessions/{id}/resource",
    params(
        ("id" = String, Path, description = "Session id")
    ),
    responses(
        (status = 200, description = "Current location and HSP statistics", body = ResourceResponse),
        (status = 404, description = "Session not found")
    )
)]
pub async fn get_resource(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match state.get_session(&id) {
        Some(session) => {
            Json(ResourceResponse { location: session.location, hsp: session.hsp }).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Session not found"})),
        )
            .into_response(),
    }
}

/// POST /api/sessions/{id}/consumption
/// Append one consumption reading (kWh over the billing period)
///
/// A reading that does not parse as a non-negative number is rejected with
/// 422 and the previously appended readings are preserved.
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/consumption",
    params(
        ("id" = String, Path, description = "Session id")
    ),
    request_body = ConsumptionRequest,
    responses(
        (status = 200, description = "Reading appended", body = ConsumptionResponse),
        (status = 404, description = "Session not found"),
        (status = 422, description = "Reading is not a non-negative number")
    )
)]
pub async fn add_consumption(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<ConsumptionRequest>,
) -> impl IntoResponse {
    match state.append_consumption(&id, &req.reading) {
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Session not found"})),
        )
            .into_response(),
        Some(Err(e)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
        Some(Ok(value)) => {
            let session = state.get_session(&id).unwrap_or_default();
            println!(
                "[SESSION] {} | consumption += {} kWh | daily avg {:.2} kWh",
                id,
                value,
                session.consumption.daily_average()
            );
            Json(ConsumptionResponse {
                daily_average_kwh: session.consumption.daily_average(),
                readings: session.consumption.readings().to_vec(),
            })
            .into_response()
        }
    }
}

/// GET /api/sessions/{id}/consumption
/// Consumption history and daily average
#[utoipa::path(
    get,
    path = "/api/sessions/{id}/consumption",
    params(
        ("id" = String, Path, description = "Session id")
    ),
    responses(
        (status = 200, description = "Readings and daily average", body = ConsumptionResponse),
        (status = 404, description = "Session not found")
    )
)]
pub async fn list_consumption(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match state.get_session(&id) {
        Some(session) => Json(ConsumptionResponse {
            daily_average_kwh: session.consumption.daily_average(),
            readings: session.consumption.readings().to_vec(),
        })
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Session not found"})),
        )
            .into_response(),
    }
}

/// GET /api/sessions/{id}/sizing
/// Size the array for the session's current state
///
/// Combines the chosen HSP scenario, the consumption daily average and the
/// selected panel into the sizing result set. With no resolved location the
/// scenario is zero and every figure degenerates to zero; the call still
/// succeeds. The area layout block is present only when an area figure is
/// supplied and a latitude is known.
#[utoipa::path(
    get,
    path = "/api/sessions/{id}/sizing",
    params(
        ("id" = String, Path, description = "Session id"),
        SizingQuery
    ),
    responses(
        (status = 200, description = "Sizing result set", body = SizingResult),
        (status = 404, description = "Session or panel not found"),
        (status = 422, description = "Fraction or area parameter out of range")
    )
)]
pub async fn compute_sizing(
    Path(id): Path<String>,
    Query(query): Query<SizingQuery>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    if !(0.0..=1.0).contains(&query.injection) || !(0.0..=1.0).contains(&query.hsp_fraction) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({"error": "injection and hsp_fraction must be within [0, 1]"})),
        )
            .into_response();
    }
    if let Some(area) = query.area {
        if !area.is_finite() || area < 0.0 {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({"error": "area must be a non-negative number"})),
            )
                .into_response();
        }
    }

    let Some(session) = state.get_session(&id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Session not found"})),
        )
            .into_response();
    };

    let panels = catalog::panels();
    let Some(panel) = panels.get(&query.panel_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Unknown panel"})),
        )
            .into_response();
    };

    let escenario = query.scenario.pick(&session.hsp);
    let result = sizing_engine::size(
        escenario,
        session.consumption.daily_average(),
        query.injection,
        query.hsp_fraction,
        panel,
        query.area,
        session.location.lat,
    );
    Json(result).into_response()
}

/// GET /api/panels
/// Panel catalog
#[utoipa::path(
    get,
    path = "/api/panels",
    responses(
        (status = 200, description = "Panel datasheets by model id", body = HashMap<String, PanelSpec>)
    )
)]
pub async fn list_panels() -> impl IntoResponse {
    Json(catalog::panels()).into_response()
}

/// GET /api/inverters
/// Inverter catalog
#[utoipa::path(
    get,
    path = "/api/inverters",
    responses(
        (status = 200, description = "Inverter datasheets by model id", body = HashMap<String, InverterSpec>)
    )
)]
pub async fn list_inverters() -> impl IntoResponse {
    Json(catalog::inverters()).into_response()
}
