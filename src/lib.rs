// src/lib.rs

//! F&B manpower modeling: a pure staffing / revenue / labor-cost model and
//! the JSON HTTP service that exposes it.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod calc;
pub mod client;
pub mod config;
pub mod models;
pub mod routes;
pub mod store;

use store::ScenarioStore;

#[derive(Clone)]
pub struct AppState {
    pub store: ScenarioStore,
}

/// Full API router with middleware attached.
pub fn router(state: AppState) -> Router {
    // Very permissive CORS for the browser dashboard (tighten for prod)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // health
        .route("/health", get(routes::health::health))
        // scenarios (the dashboard calls the trailing-slash form)
        .route(
            "/scenarios",
            post(routes::scenarios::create_scenario).get(routes::scenarios::list_scenarios),
        )
        .route(
            "/scenarios/",
            post(routes::scenarios::create_scenario).get(routes::scenarios::list_scenarios),
        )
        .route(
            "/scenarios/:id",
            get(routes::scenarios::get_scenario)
                .put(routes::scenarios::update_scenario)
                .delete(routes::scenarios::delete_scenario),
        )
        // stateless calculations
        .route("/calculations/staffing", post(routes::calculations::staffing))
        .route("/calculations/revenue", post(routes::calculations::revenue))
        .route("/calculations/pl", post(routes::calculations::profit_loss))
        .route("/calculations/peak-hours", post(routes::calculations::peak_hours))
        .route("/calculations/evaluate", post(routes::calculations::evaluate))
        // calculations over stored scenarios
        .route("/calculations/optimize", post(routes::calculations::optimize))
        .route("/calculations/compare", post(routes::calculations::compare))
        .route("/calculations/what-if", post(routes::calculations::what_if))
        // state & middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
