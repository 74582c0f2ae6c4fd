use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use voyageflow::{
    create_router,
    storage::{FileStore, KeyValueStore, MemoryStore, STATE_KEY},
    AppState, Catalog,
};

fn make_app() -> Router {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    create_router(Arc::new(AppState::new(Catalog::standard(), store)))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn act(app: &Router, action: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::post("/actions")
            .header("content-type", "application/json")
            .body(Body::from(action.to_string()))
            .unwrap(),
    )
    .await
}

async fn register(app: &Router) {
    let (status, body) = act(
        app,
        json!({
            "type": "submit_registration",
            "fullName": "Asha Rao",
            "email": "asha@example.com",
            "phone": "9876543210",
            "pin": "560001"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
}

#[tokio::test]
async fn test_health() {
    let app = make_app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_booking_flow_over_http() {
    let app = make_app();
    register(&app).await;

    let (status, body) = act(&app, json!({ "type": "select_city", "city": "paris" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["currentPage"], "page-3");
    assert_eq!(body["state"]["currencySelectable"], true);

    let (_, options) = get(&app, "/options/travel").await;
    let economy = options
        .as_array()
        .unwrap()
        .iter()
        .find(|o| o["id"] == "travel:economy")
        .unwrap();
    assert_eq!(economy["price"], 24999);

    let (status, _) = act(
        &app,
        json!({ "type": "toggle_selection", "category": "travel", "price": "24999" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = act(&app, json!({ "type": "toggle_option", "id": "food:wine" })).await;
    assert_eq!(body["state"]["totalPrice"], 24999 + 34999);

    let (_, body) = act(&app, json!({ "type": "set_currency", "currency": "EUR" })).await;
    assert_eq!(body["state"]["currentCurrency"], "EUR");
    assert_eq!(body["state"]["totalPrice"], 24999 + 34999);

    let (_, breakdown) = get(&app, "/breakdown").await;
    assert_eq!(breakdown["items"].as_array().unwrap().len(), 2);
    assert_eq!(breakdown["items"][1]["name"], "Wine & Dine");
    assert!(breakdown["total"].as_str().unwrap().starts_with('€'));

    let (_, chart) = get(&app, "/chart").await;
    assert_eq!(chart["currencySymbol"], "€");
    assert_eq!(chart["slices"].as_array().unwrap().len(), 2);

    let (status, body) = act(&app, json!({ "type": "confirm_booking" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["currentPage"], "page-4");

    let (_, summary) = get(&app, "/confirmation").await;
    assert_eq!(summary["destination"], "Paris, France");
    assert_eq!(summary["travel"], "Economy Flight");
    assert_eq!(summary["food"], json!(["Wine & Dine"]));

    let (_, status_body) = get(&app, "/state").await;
    assert_eq!(status_body["registered"], true);
    assert_eq!(status_body["lastAction"], "confirm-booking");
}

#[tokio::test]
async fn test_confirm_without_travel_is_refused() {
    let app = make_app();
    register(&app).await;
    act(&app, json!({ "type": "select_city", "city": "goa" })).await;

    let (status, body) = act(&app, json!({ "type": "confirm_booking" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "error");
    assert_eq!(
        body["message"],
        "Please select a travel option before confirming."
    );

    let (_, state) = get(&app, "/state").await;
    assert_eq!(state["currentPage"], "page-3");
}

#[tokio::test]
async fn test_deselecting_travel_leaves_confirmation() {
    let app = make_app();
    register(&app).await;
    act(&app, json!({ "type": "select_city", "city": "paris" })).await;
    act(&app, json!({ "type": "toggle_option", "id": "travel:train" })).await;
    let (status, _) = act(&app, json!({ "type": "confirm_booking" })).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = act(&app, json!({ "type": "toggle_option", "id": "travel:train" })).await;
    assert_eq!(body["state"]["currentPage"], "page-3");
    assert_eq!(body["state"]["selectedOptions"]["travel"], Value::Null);
}

#[tokio::test]
async fn test_invalid_toggle_is_silently_ignored() {
    let app = make_app();
    let (status, body) = act(
        &app,
        json!({ "type": "toggle_selection", "category": "food", "price": "cheap" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["totalPrice"], 0);
    assert_eq!(body["state"]["selectedOptions"]["food"], json!([]));
}

#[tokio::test]
async fn test_destinations_endpoint() {
    let app = make_app();

    let (status, all) = get(&app, "/destinations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 11);

    let (_, india) = get(&app, "/destinations?region=india").await;
    let ids: Vec<&str> = india
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["jaipur", "kerala", "goa", "udaipur", "leh", "amritsar"]);

    register(&app).await;
    act(&app, json!({ "type": "select_city", "city": "tokyo" })).await;
    let (_, international) = get(&app, "/destinations?region=international").await;
    let tokyo = &international[1];
    assert_eq!(tokyo["title"], "Tokyo, Japan");
    assert_eq!(tokyo["selected"], true);
    assert_eq!(tokyo["bestTime"], "March to May & September to November");
    assert_eq!(tokyo["attractions"].as_array().unwrap().len(), 5);

    let (status, _) = get(&app, "/destinations?region=mars").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_category_is_not_found() {
    let app = make_app();
    let (status, _) = get(&app, "/options/hotels").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_registration_endpoint() {
    let app = make_app();
    let (status, _) = get(&app, "/registration").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    register(&app).await;
    let (status, body) = get(&app, "/registration").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fullName"], "Asha Rao");
    assert_eq!(body["pin"], "560001");
}

#[tokio::test]
async fn test_state_survives_restart_with_file_storage() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()).unwrap());
        let app = create_router(Arc::new(AppState::load(Catalog::standard(), store)));
        register(&app).await;
        act(&app, json!({ "type": "select_city", "city": "leh" })).await;
        act(&app, json!({ "type": "toggle_option", "id": "travel:road" })).await;
        act(&app, json!({ "type": "toggle_option", "id": "activities:water" })).await;
    }

    let store = Arc::new(FileStore::open(dir.path()).unwrap());
    assert!(store.get(STATE_KEY).unwrap().is_some());
    let app = create_router(Arc::new(AppState::load(Catalog::standard(), store)));

    let (_, state) = get(&app, "/state").await;
    assert_eq!(state["selectedCity"], "leh");
    assert_eq!(state["totalPrice"], 6999 + 7499);
    assert_eq!(state["registered"], true);

    let (_, body) = act(&app, json!({ "type": "reset" })).await;
    assert_eq!(body["state"]["totalPrice"], 0);
    assert!(!dir.path().join("voyageflow-state.json").exists());
}
