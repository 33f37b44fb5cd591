//! In-memory stand-in for the Pinball Map v1 API.
//!
//! Serves the read endpoints from a seeded fixture and supports adding
//! favourite locations for a user whose email and token match. Error
//! responses use the API's `{"errors": "..."}` shape.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

pub const SEED_LOGIN: &str = "pintist";
pub const SEED_EMAIL: &str = "pintist@example.com";
pub const SEED_PASSWORD: &str = "tilt-warning";
pub const SEED_TOKEN: &str = "seed-token-1";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Region {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub region_id: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Zone {
    pub id: i64,
    pub region_id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub region_id: i64,
    pub name: String,
    pub start_date: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserSubmission {
    pub id: i64,
    pub region_id: i64,
    pub submission_type: String,
    pub submission: String,
}

#[derive(Clone, Debug)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub authentication_token: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct FaveLocation {
    pub id: i64,
    pub user_id: i64,
    pub location_id: i64,
    pub location: Location,
}

#[derive(Debug, Default)]
pub struct Data {
    pub regions: Vec<Region>,
    pub locations: Vec<Location>,
    pub zones: Vec<Zone>,
    pub events: Vec<Event>,
    pub submissions: Vec<UserSubmission>,
    pub users: Vec<User>,
    pub faves: Vec<FaveLocation>,
}

impl Data {
    /// Two regions, a handful of locations and one user with one favourite.
    pub fn seeded() -> Self {
        let locations = vec![
            Location { id: 10, name: "Ground Kontrol".into(), region_id: 1 },
            Location { id: 11, name: "Avalon".into(), region_id: 1 },
            Location { id: 20, name: "Add-a-Ball".into(), region_id: 2 },
        ];
        Self {
            regions: vec![
                Region { id: 1, name: "portland".into(), full_name: "Portland".into(), lat: 45.52, lon: -122.68 },
                Region { id: 2, name: "seattle".into(), full_name: "Seattle".into(), lat: 47.61, lon: -122.33 },
            ],
            faves: vec![FaveLocation { id: 500, user_id: 1, location_id: 10, location: locations[0].clone() }],
            locations,
            zones: vec![
                Zone { id: 100, region_id: 1, name: "Downtown".into() },
                Zone { id: 101, region_id: 1, name: "Alberta".into() },
            ],
            events: vec![Event {
                id: 5,
                region_id: 1,
                name: "Monthly Tournament".into(),
                start_date: Some("2026-11-01".into()),
            }],
            submissions: vec![UserSubmission {
                id: 7,
                region_id: 1,
                submission_type: "new_lmx".into(),
                submission: "Attack from Mars was added to Ground Kontrol".into(),
            }],
            users: vec![User {
                id: 1,
                username: SEED_LOGIN.into(),
                email: SEED_EMAIL.into(),
                password: SEED_PASSWORD.into(),
                authentication_token: SEED_TOKEN.into(),
            }],
        }
    }

    fn region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }
}

pub type Db = Arc<RwLock<Data>>;

type Params = Query<HashMap<String, String>>;

pub fn app() -> Router {
    app_with(Data::seeded())
}

pub fn app_with(data: Data) -> Router {
    let db: Db = Arc::new(RwLock::new(data));
    Router::new()
        .route("/api/v1/regions.json", get(list_regions))
        .route("/api/v1/regions/closest_by_lat_lon.json", get(closest_region))
        .route("/api/v1/regions/does_region_exist.json", get(region_exists))
        .route("/api/v1/region/{name}/locations.json", get(region_locations))
        .route("/api/v1/region/{name}/zones.json", get(region_zones))
        .route("/api/v1/region/{name}/events.json", get(region_events))
        .route("/api/v1/region/{name}/user_submissions.json", get(region_submissions))
        .route("/api/v1/users/auth_details.json", get(auth_details))
        .route("/api/v1/users/{id}/list_fave_locations.json", get(list_faves))
        .route("/api/v1/users/{id}/add_fave_location.json", post(add_fave))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn errors(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "errors": msg }))).into_response()
}

fn unknown_region() -> Response {
    errors(StatusCode::NOT_FOUND, "This is not a valid region.")
}

async fn list_regions(State(db): State<Db>) -> Json<serde_json::Value> {
    let data = db.read().await;
    Json(json!({ "regions": data.regions }))
}

async fn closest_region(State(db): State<Db>, Query(params): Params) -> Response {
    let coord = |k: &str| params.get(k).and_then(|v| v.parse::<f64>().ok());
    let (Some(lat), Some(lon)) = (coord("lat"), coord("lon")) else {
        return errors(StatusCode::BAD_REQUEST, "lat and lon are required.");
    };
    let data = db.read().await;
    let distance = |r: &Region| (r.lat - lat).powi(2) + (r.lon - lon).powi(2);
    let closest = data
        .regions
        .iter()
        .min_by(|a, b| distance(*a).total_cmp(&distance(*b)));
    match closest {
        Some(region) => Json(json!({ "region": region })).into_response(),
        None => errors(StatusCode::NOT_FOUND, "No regions within 250 miles."),
    }
}

async fn region_exists(State(db): State<Db>, Query(params): Params) -> Response {
    let data = db.read().await;
    match params.get("name").and_then(|name| data.region(name)) {
        Some(region) => Json(json!({ "region": region })).into_response(),
        None => unknown_region(),
    }
}

async fn region_locations(State(db): State<Db>, Path(name): Path<String>) -> Response {
    let data = db.read().await;
    let Some(region) = data.region(&name) else {
        return unknown_region();
    };
    let locations: Vec<&Location> = data.locations.iter().filter(|l| l.region_id == region.id).collect();
    Json(json!({ "locations": locations })).into_response()
}

async fn region_zones(State(db): State<Db>, Path(name): Path<String>) -> Response {
    let data = db.read().await;
    let Some(region) = data.region(&name) else {
        return unknown_region();
    };
    let zones: Vec<&Zone> = data.zones.iter().filter(|z| z.region_id == region.id).collect();
    Json(json!({ "zones": zones })).into_response()
}

async fn region_events(State(db): State<Db>, Path(name): Path<String>) -> Response {
    let data = db.read().await;
    let Some(region) = data.region(&name) else {
        return unknown_region();
    };
    let events: Vec<&Event> = data.events.iter().filter(|e| e.region_id == region.id).collect();
    Json(json!({ "events": events })).into_response()
}

async fn region_submissions(State(db): State<Db>, Path(name): Path<String>) -> Response {
    let data = db.read().await;
    let Some(region) = data.region(&name) else {
        return unknown_region();
    };
    let submissions: Vec<&UserSubmission> =
        data.submissions.iter().filter(|s| s.region_id == region.id).collect();
    Json(json!({ "user_submissions": submissions })).into_response()
}

async fn auth_details(State(db): State<Db>, Query(params): Params) -> Response {
    let (Some(login), Some(password)) = (params.get("login"), params.get("password")) else {
        return errors(StatusCode::BAD_REQUEST, "login and password are required.");
    };
    let data = db.read().await;
    let Some(user) = data.users.iter().find(|u| &u.username == login || &u.email == login) else {
        return errors(StatusCode::NOT_FOUND, "Unknown user");
    };
    if &user.password != password {
        return errors(StatusCode::UNAUTHORIZED, "Incorrect password");
    }
    Json(json!({
        "user": {
            "id": user.id,
            "username": user.username,
            "email": user.email,
            "authentication_token": user.authentication_token,
        }
    }))
    .into_response()
}

async fn list_faves(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let data = db.read().await;
    let faves: Vec<&FaveLocation> = data.faves.iter().filter(|f| f.user_id == id).collect();
    Json(json!({ "user_fave_locations": faves })).into_response()
}

async fn add_fave(State(db): State<Db>, Path(id): Path<i64>, Query(params): Params) -> Response {
    let mut data = db.write().await;
    let authorized = data.users.iter().any(|u| {
        u.id == id
            && params.get("user_email") == Some(&u.email)
            && params.get("user_token") == Some(&u.authentication_token)
    });
    if !authorized {
        return errors(StatusCode::UNAUTHORIZED, "Authentication is required for this action.");
    }
    let Some(location_id) = params.get("location_id").and_then(|v| v.parse::<i64>().ok()) else {
        return errors(StatusCode::BAD_REQUEST, "location_id is required.");
    };
    let Some(location) = data.locations.iter().find(|l| l.id == location_id).cloned() else {
        return errors(StatusCode::NOT_FOUND, "Unknown location.");
    };
    if let Some(existing) = data.faves.iter().find(|f| f.user_id == id && f.location_id == location_id) {
        return Json(existing.clone()).into_response();
    }
    let fave = FaveLocation {
        id: data.faves.iter().map(|f| f.id).max().unwrap_or(0) + 1,
        user_id: id,
        location_id,
        location,
    };
    data.faves.push(fave.clone());
    Json(fave).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_user_has_one_favourite() {
        let data = Data::seeded();
        assert_eq!(data.users.len(), 1);
        let faves: Vec<_> = data.faves.iter().filter(|f| f.user_id == data.users[0].id).collect();
        assert_eq!(faves.len(), 1);
        assert_eq!(faves[0].location.name, "Ground Kontrol");
    }

    #[test]
    fn region_lookup_is_by_name() {
        let data = Data::seeded();
        assert_eq!(data.region("seattle").map(|r| r.id), Some(2));
        assert!(data.region("Seattle").is_none());
    }

    #[test]
    fn fave_location_serializes_nested_location() {
        let data = Data::seeded();
        let json = serde_json::to_value(&data.faves[0]).unwrap();
        assert_eq!(json["id"], 500);
        assert_eq!(json["location_id"], 10);
        assert_eq!(json["location"]["name"], "Ground Kontrol");
    }

    #[test]
    fn region_serializes_snake_case_keys() {
        let data = Data::seeded();
        let json = serde_json::to_value(&data.regions[0]).unwrap();
        assert_eq!(json["full_name"], "Portland");
    }
}
