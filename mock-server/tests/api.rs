use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, SEED_EMAIL, SEED_LOGIN, SEED_PASSWORD, SEED_TOKEN};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn post(uri: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- regions ---

#[tokio::test]
async fn regions_are_listed_under_key() {
    let resp = app().oneshot(get("/api/v1/regions.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let regions = body["regions"].as_array().unwrap();
    assert_eq!(regions.len(), 2);
    assert_eq!(regions[0]["full_name"], "Portland");
}

#[tokio::test]
async fn closest_region_is_nested() {
    let resp = app()
        .oneshot(get("/api/v1/regions/closest_by_lat_lon.json?lat=47.6&lon=-122.3"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["region"]["name"], "seattle");
}

#[tokio::test]
async fn closest_region_requires_coordinates() {
    let resp = app()
        .oneshot(get("/api/v1/regions/closest_by_lat_lon.json?lat=north"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["errors"].is_string());
}

#[tokio::test]
async fn does_region_exist_known_and_unknown() {
    let resp = app()
        .oneshot(get("/api/v1/regions/does_region_exist.json?name=portland"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["region"]["id"], 1);

    let resp = app()
        .oneshot(get("/api/v1/regions/does_region_exist.json?name=atlantis"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- region scoped ---

#[tokio::test]
async fn locations_are_filtered_by_region() {
    let resp = app()
        .oneshot(get("/api/v1/region/seattle/locations.json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let locations = body["locations"].as_array().unwrap();
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0]["name"], "Add-a-Ball");
}

#[tokio::test]
async fn zones_events_and_submissions_use_their_own_keys() {
    let body = body_json(app().oneshot(get("/api/v1/region/portland/zones.json")).await.unwrap()).await;
    assert_eq!(body["zones"].as_array().unwrap().len(), 2);

    let body = body_json(app().oneshot(get("/api/v1/region/portland/events.json")).await.unwrap()).await;
    assert_eq!(body["events"][0]["name"], "Monthly Tournament");

    let body = body_json(
        app()
            .oneshot(get("/api/v1/region/portland/user_submissions.json"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["user_submissions"][0]["submission_type"], "new_lmx");
}

#[tokio::test]
async fn unknown_region_returns_404() {
    let resp = app()
        .oneshot(get("/api/v1/region/atlantis/locations.json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["errors"], "This is not a valid region.");
}

// --- users ---

#[tokio::test]
async fn auth_details_returns_nested_user() {
    let uri = format!("/api/v1/users/auth_details.json?login={SEED_LOGIN}&password={SEED_PASSWORD}");
    let resp = app().oneshot(get(&uri)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["user"]["email"], SEED_EMAIL);
    assert_eq!(body["user"]["authentication_token"], SEED_TOKEN);
}

#[tokio::test]
async fn auth_details_accepts_email_login() {
    let uri = format!("/api/v1/users/auth_details.json?login={SEED_EMAIL}&password={SEED_PASSWORD}");
    let resp = app().oneshot(get(&uri)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn auth_details_wrong_password_is_401() {
    let uri = format!("/api/v1/users/auth_details.json?login={SEED_LOGIN}&password=nope");
    let resp = app().oneshot(get(&uri)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn fave_locations_are_listed_with_nested_location() {
    let resp = app()
        .oneshot(get("/api/v1/users/1/list_fave_locations.json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let faves = body["user_fave_locations"].as_array().unwrap();
    assert_eq!(faves.len(), 1);
    assert_eq!(faves[0]["location"]["id"], 10);
}

#[tokio::test]
async fn add_fave_location_requires_token() {
    let resp = app()
        .oneshot(post("/api/v1/users/1/add_fave_location.json?location_id=11"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn add_fave_location_appends_and_is_listed() {
    let app = app();
    let uri = format!(
        "/api/v1/users/1/add_fave_location.json?location_id=11&user_email={SEED_EMAIL}&user_token={SEED_TOKEN}"
    );
    let resp = app.clone().oneshot(post(&uri)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let fave = body_json(resp).await;
    assert_eq!(fave["location_id"], 11);
    assert_eq!(fave["location"]["name"], "Avalon");

    let body = body_json(
        app.oneshot(get("/api/v1/users/1/list_fave_locations.json"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["user_fave_locations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn add_fave_location_unknown_location_is_404() {
    let uri = format!(
        "/api/v1/users/1/add_fave_location.json?location_id=999&user_email={SEED_EMAIL}&user_token={SEED_TOKEN}"
    );
    let resp = app().oneshot(post(&uri)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
