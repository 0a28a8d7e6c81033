mod routes;
mod controllers;
mod services;
mod models;
mod api_docs;
mod shared_state;
mod config;

use std::net::SocketAddr;
use axum::{Router, routing::get, response::Html};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::Scalar;

use crate::api_docs::ApiDoc;
use crate::config::Config;
use crate::routes::sizing_routes::api_routes;
use crate::shared_state::{AppState, SharedState};

#[tokio::main]
async fn main() {
    // 1. Load configuration
    let config = match Config::load("config.json") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config.json: {}", e);
            return;
        }
    };
    println!(
        "[CONFIG] geocoder: {} | irradiance: {} (reference year {})",
        config.geocoding.base_url, config.irradiance.base_url, config.irradiance.reference_year
    );

    // 2. Initialize shared session state
    let state = AppState::new();
    let shared = SharedState { app: state, config: config.clone() };

    // 3. Start Axum HTTP server
    // The hosting dashboard lives on another origin, hence the CORS layer.
    let app = Router::new()
        .nest("/api", api_routes(shared))
        .route("/scalar", get(|| async {
            Html(Scalar::new(ApiDoc::openapi()).to_html())
        }))
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    println!("API Server listening on http://{}", addr);
    println!("Scalar UI: http://{}/scalar", addr);

    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
