mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::reference_draft;
use manpower_api::{router, store::ScenarioStore, AppState};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState { store: ScenarioStore::in_memory() })
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&b).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()));
    (status, value)
}

async fn create(app: &Router, name: &str) -> Value {
    let (status, body) = call(app, "POST", "/scenarios/", Some(serde_json::to_value(reference_draft(name)).unwrap())).await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn health_reports_store_backend() {
    let (status, body) = call(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn scenario_crud_lifecycle() {
    let app = app();
    let created = create(&app, "Baseline").await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["name"], "Baseline");
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let (status, fetched) = call(&app, "GET", &format!("/scenarios/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let mut draft = serde_json::to_value(reference_draft("Bigger room")).unwrap();
    draft["spaceParameters"]["totalAreaSqm"] = json!(400.0);
    let (status, updated) = call(&app, "PUT", &format!("/scenarios/{id}"), Some(draft)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["name"], "Bigger room");
    assert_eq!(updated["spaceParameters"]["totalAreaSqm"], 400.0);

    let (status, list) = call(&app, "GET", "/scenarios", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, body) = call(&app, "DELETE", &format!("/scenarios/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"deleted": true}));

    let (status, _) = call(&app, "GET", &format!("/scenarios/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, "DELETE", &format!("/scenarios/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_parameters_are_rejected_with_field_name() {
    let app = app();
    let mut draft = serde_json::to_value(reference_draft("Broken")).unwrap();
    draft["serviceParameters"]["coversPerWaiter"] = json!(0);
    let (status, body) = call(&app, "POST", "/scenarios/", Some(draft)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.as_str().unwrap().contains("coversPerWaiter"));

    let (_, list) = call(&app, "GET", "/scenarios/", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn update_of_unknown_scenario_is_not_found() {
    let draft = serde_json::to_value(reference_draft("Ghost")).unwrap();
    let uri = format!("/scenarios/{}", uuid::Uuid::new_v4());
    let (status, _) = call(&app(), "PUT", &uri, Some(draft)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn evaluate_is_stateless_and_deterministic() {
    let app = app();
    let payload = serde_json::to_value(reference_draft("x").parameters).unwrap();
    let (status, first) = call(&app, "POST", "/calculations/evaluate", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = call(&app, "POST", "/calculations/evaluate", Some(payload)).await;
    assert_eq!(first, second);
    assert_eq!(first["space"]["totalCapacity"], 117);
    assert_eq!(first["service"]["waitersRequired"], 8);
}

#[tokio::test]
async fn profit_and_loss_report() {
    let (status, body) = call(&app(), "POST", "/calculations/pl", Some(json!({"monthlyRevenue": 100000.0}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["statement"]["revenue"], 100000.0);
    assert_eq!(body["insights"].as_array().unwrap().len(), 5);
    assert_eq!(body["optimizationOpportunities"].as_array().unwrap().len(), 5);
    assert_eq!(body["history"]["labels"].as_array().unwrap().len(), 12);
    assert_eq!(body["history"]["revenue"][11], 100000.0);

    let (status, _) = call(&app(), "POST", "/calculations/pl", Some(json!({"monthlyRevenue": -1.0}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn peak_hours_defaults() {
    let (status, body) = call(&app(), "POST", "/calculations/peak-hours", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["heatmap"].as_array().unwrap().len(), 7);
    assert_eq!(body["view"]["rows"].as_array().unwrap().len(), 8);
    assert_eq!(body["optimizationOpportunities"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn peak_hours_view_filters() {
    let req = json!({"selectedDay": "Friday", "selectedStaffType": "foh"});
    let (status, body) = call(&app(), "POST", "/calculations/peak-hours", Some(req)).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["view"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["label"], "Friday");
    assert_eq!(rows[0]["peak"], 15);

    let (status, body) = call(&app(), "POST", "/calculations/peak-hours", Some(json!({"bohAtFullDemand": 5000}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.as_str().unwrap().contains("bohAtFullDemand"));
}

fn staffing_request() -> Value {
    let p = serde_json::to_value(reference_draft("x").parameters).unwrap();
    json!({
        "spaceParameters": p["spaceParameters"],
        "serviceParameters": p["serviceParameters"],
        "efficiencyDrivers": p["efficiencyDrivers"],
        "operationalHours": p["operationalHours"],
    })
}

#[tokio::test]
async fn staffing_uses_flattened_parameters_and_salary_override() {
    let app = app();
    let (status, plan) = call(&app, "POST", "/calculations/staffing", Some(staffing_request())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["space"]["totalCapacity"], 117);
    assert!(plan["dailyLaborHours"].as_f64().unwrap() > 0.0);

    let mut req = staffing_request();
    req["salaries"] = json!({"waiter": 5000.0});
    let (status, dearer) = call(&app, "POST", "/calculations/staffing", Some(req)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dearer["labor"]["totalStaff"], plan["labor"]["totalStaff"]);
    let base_cost = plan["labor"]["totalMonthlyLaborCost"].as_f64().unwrap();
    let override_cost = dearer["labor"]["totalMonthlyLaborCost"].as_f64().unwrap();
    assert!(override_cost > base_cost);

    let mut req = staffing_request();
    req.as_object_mut().unwrap().remove("operationalHours");
    let (status, _) = call(&app, "POST", "/calculations/staffing", Some(req)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

fn revenue_request(length: u32) -> Value {
    json!({
        "projectionPeriod": "monthly",
        "projectionLength": length,
        "avgCheck": 100.0,
        "dailyCovers": 100.0,
        "foodBevRatio": 70.0,
        "seasonalityFactor": 1.0,
        "growthRate": 5.0,
        "applyRamadan": false,
    })
}

#[tokio::test]
async fn revenue_projection_defaults_start_and_rejects_empty_length() {
    let app = app();
    let (status, body) = call(&app, "POST", "/calculations/revenue", Some(revenue_request(12))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["periods"].as_array().unwrap().len(), 12);
    assert_eq!(body["insights"].as_array().unwrap().len(), 5);

    let mut req = revenue_request(2);
    req["start"] = json!({"year": 2025, "month": 1});
    let (status, body) = call(&app, "POST", "/calculations/revenue", Some(req)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["periods"], json!(["1/2025", "2/2025"]));

    let (status, body) = call(&app, "POST", "/calculations/revenue", Some(revenue_request(0))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.as_str().unwrap().contains("projectionLength"));
}

#[tokio::test]
async fn compare_needs_two_scenarios() {
    let app = app();
    let a = create(&app, "A").await;
    let (status, _) = call(&app, "POST", "/calculations/compare", Some(json!({"scenario_ids": [a["id"]]}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(&app, "POST", "/calculations/compare", Some(json!({"scenario_ids": [a["id"], a["id"]]}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["baseName"], "A");
    assert_eq!(body["comparisons"][0]["diff"]["identicalInputs"], true);
    assert_eq!(body["comparisons"][0]["insights"], json!([]));
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn compare_explains_staffing_differences() {
    let app = app();
    let a = create(&app, "Base").await;
    let mut lean = reference_draft("Lean");
    lean.parameters.positions.retain(|p| p.id != "runner");
    let (status, b) = call(&app, "POST", "/scenarios/", Some(serde_json::to_value(lean).unwrap())).await;
    assert_eq!(status, StatusCode::OK);

    let req = json!({"scenario_ids": [a["id"], b["id"]]});
    let (status, body) = call(&app, "POST", "/calculations/compare", Some(req)).await;
    assert_eq!(status, StatusCode::OK);
    let insights = body["comparisons"][0]["insights"].as_array().unwrap();
    assert_eq!(insights.len(), 3);
    assert_eq!(insights[0], "Lean requires 4 fewer staff than Base (-20.0%)");
    assert!(insights[1].as_str().unwrap().starts_with("Lean reduces monthly labor cost by SAR 12000"));
}

#[tokio::test]
async fn compare_with_missing_scenario_is_not_found() {
    let app = app();
    let a = create(&app, "A").await;
    let ids = json!({"scenario_ids": [a["id"], uuid::Uuid::new_v4()]});
    let (status, _) = call(&app, "POST", "/calculations/compare", Some(ids)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn what_if_against_stored_base() {
    let app = app();
    let a = create(&app, "A").await;
    let req = json!({"baseScenarioId": a["id"], "changes": {"avgCheck": 132.0}});
    let (status, body) = call(&app, "POST", "/calculations/what-if", Some(req)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["modifiedParameters"]["revenueDrivers"]["avgCheck"], 132.0);
    assert_eq!(body["insights"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn optimize_stored_scenario() {
    let app = app();
    let a = create(&app, "A").await;
    let req = json!({"scenario_id": a["id"], "optimizationTarget": "labor_cost"});
    let (status, body) = call(&app, "POST", "/calculations/optimize", Some(req)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["target"], "labor_cost");
}
