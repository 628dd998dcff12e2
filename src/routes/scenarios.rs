// src/routes/scenarios.rs

use axum::{extract::{Path, State}, Json};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::{invalid_parameter, store_error, ApiResult};
use crate::calc::build_scenario;
use crate::models::{Scenario, ScenarioDraft};
use crate::AppState;

/// POST /scenarios/
pub async fn create_scenario(
    State(state): State<AppState>,
    Json(draft): Json<ScenarioDraft>,
) -> ApiResult<Json<Scenario>> {
    let scenario = build_scenario(Uuid::new_v4(), Utc::now(), draft).map_err(invalid_parameter)?;
    state.store.insert(&scenario).await.map_err(store_error)?;
    info!(id = %scenario.id, name = %scenario.name, "scenario created");
    Ok(Json(scenario))
}

/// GET /scenarios/
pub async fn list_scenarios(State(state): State<AppState>) -> ApiResult<Json<Vec<Scenario>>> {
    let rows = state.store.list().await.map_err(store_error)?;
    Ok(Json(rows))
}

/// GET /scenarios/:id
pub async fn get_scenario(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Scenario>> {
    let row = state.store.get(id).await.map_err(store_error)?;
    Ok(Json(row))
}

/// PUT /scenarios/:id replaces the whole record, keeping id and creation time.
pub async fn update_scenario(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<ScenarioDraft>,
) -> ApiResult<Json<Scenario>> {
    let existing = state.store.get(id).await.map_err(store_error)?;
    let scenario = build_scenario(id, existing.created_at, draft)
        .map_err(invalid_parameter)?
        .touched(Utc::now());
    state.store.replace(&scenario).await.map_err(store_error)?;
    info!(id = %id, "scenario replaced");
    Ok(Json(scenario))
}

/// DELETE /scenarios/:id
pub async fn delete_scenario(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    if !state.store.delete(id).await.map_err(store_error)? {
        return Err(store_error(crate::store::StoreError::NotFound(id)));
    }
    info!(id = %id, "scenario deleted");
    Ok(Json(serde_json::json!({"deleted": true})))
}
