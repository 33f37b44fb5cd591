//! Descriptor factories for the Pinball Map v1 endpoints.
//!
//! Paths are namespace-relative (`regions/does_region_exist`);
//! `PinballMapApi` adds the `/api/v1/` prefix and `.json` suffix.

use netkit_core::{HttpMethod, Parameters, RequestDescriptor};

use crate::models::User;

#[derive(Debug, Clone, Copy)]
enum Namespace {
    Region,
    Regions,
    Users,
}

impl Namespace {
    fn as_str(&self) -> &'static str {
        match self {
            Namespace::Region => "region",
            Namespace::Regions => "regions",
            Namespace::Users => "users",
        }
    }
}

fn namespaced(
    namespace: Namespace,
    path: Option<&str>,
    parameters: Option<Parameters>,
    method: HttpMethod,
) -> RequestDescriptor {
    let full = match path {
        Some(path) => format!("{}/{path}", namespace.as_str()),
        None => namespace.as_str().to_string(),
    };
    RequestDescriptor::new(full, parameters, method)
}

fn params<const N: usize>(pairs: [(&str, String); N]) -> Option<Parameters> {
    Some(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

// --- region scoped ---

pub fn events(region: &str) -> RequestDescriptor {
    namespaced(Namespace::Region, Some(&format!("{region}/events")), None, HttpMethod::Get)
}

pub fn locations(region: &str) -> RequestDescriptor {
    namespaced(Namespace::Region, Some(&format!("{region}/locations")), None, HttpMethod::Get)
}

pub fn user_submissions(region: &str) -> RequestDescriptor {
    namespaced(
        Namespace::Region,
        Some(&format!("{region}/user_submissions")),
        None,
        HttpMethod::Get,
    )
}

pub fn zones(region: &str) -> RequestDescriptor {
    namespaced(Namespace::Region, Some(&format!("{region}/zones")), None, HttpMethod::Get)
}

// --- regions ---

pub fn regions() -> RequestDescriptor {
    namespaced(Namespace::Regions, None, None, HttpMethod::Get)
}

pub fn closest_region_by(lat: &str, lon: &str) -> RequestDescriptor {
    namespaced(
        Namespace::Regions,
        Some("closest_by_lat_lon"),
        params([("lat", lat.to_string()), ("lon", lon.to_string())]),
        HttpMethod::Get,
    )
}

pub fn does_region_exist(name: &str) -> RequestDescriptor {
    namespaced(
        Namespace::Regions,
        Some("does_region_exist"),
        params([("name", name.to_string())]),
        HttpMethod::Get,
    )
}

// --- users ---

pub fn auth_details(login: &str, password: &str) -> RequestDescriptor {
    namespaced(
        Namespace::Users,
        Some("auth_details"),
        params([("login", login.to_string()), ("password", password.to_string())]),
        HttpMethod::Get,
    )
}

pub fn list_fave_locations(user_id: i64) -> RequestDescriptor {
    namespaced(
        Namespace::Users,
        Some(&format!("{user_id}/list_fave_locations")),
        None,
        HttpMethod::Get,
    )
}

pub fn add_fave_location(user: &User, location_id: i64) -> RequestDescriptor {
    let descriptor = namespaced(
        Namespace::Users,
        Some(&format!("{}/add_fave_location", user.id)),
        params([("location_id", location_id.to_string())]),
        HttpMethod::Post,
    );
    authenticated(&descriptor, user)
}

/// Attach `user_email` and `user_token` to `descriptor`. Keys the
/// descriptor already carries are kept as they are.
pub fn authenticated(descriptor: &RequestDescriptor, user: &User) -> RequestDescriptor {
    let auth = [
        ("user_email".to_string(), user.email.clone()),
        ("user_token".to_string(), user.authentication_token.clone()),
    ];
    let mut merged = descriptor.parameters().cloned().unwrap_or_default();
    for (key, value) in auth {
        merged.entry(key).or_insert(value);
    }
    RequestDescriptor::new(descriptor.path(), Some(merged), descriptor.method())
}
