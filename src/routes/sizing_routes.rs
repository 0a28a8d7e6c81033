use axum::{
    routing::{get, post, put},
    Router,
};
use crate::controllers::sizing_controller::{
    // Sessions & pipeline
    create_session, set_location, get_resource,
    // Consumption ledger
    add_consumption, list_consumption,
    // Sizing & catalog
    compute_sizing, list_panels, list_inverters,
};
use crate::shared_state::SharedState;

/// Build the `/api/*` sub-router.
/// Handlers extract `State<AppState>` and/or `State<Config>` via
/// `FromRef<SharedState>` — a single `.with_state(shared)` covers both.
pub fn api_routes(shared: SharedState) -> Router {
    Router::new()
        .route("/sessions",                    post(create_session))
        .route("/sessions/{id}/location",      put(set_location))
        .route("/sessions/{id}/resource",      get(get_resource))
        .route("/sessions/{id}/consumption",   get(list_consumption).post(add_consumption))
        .route("/sessions/{id}/sizing",        get(compute_sizing))
        .route("/panels",                      get(list_panels))
        .route("/inverters",                   get(list_inverters))
        .with_state(shared)
}
