//! Typed client for the Pinball Map v1 API.
//!
//! # Overview
//! `endpoints` produces namespace-relative `RequestDescriptor`s,
//! `PinballMapApi` versions them and drives a `netkit_core::Client`, and
//! `models` decodes the JSON responses. `AppStateContainer` sits on top and
//! keeps the latest result of each kind of call as `RemoteData`.
//!
//! # Design
//! - Host, scheme, API version and credentials come from `PinballMapConfig`
//!   and `Credentials`; nothing sensitive is compiled in.
//! - Only API version 1 exists. Other versions are rejected at construction.
//! - Authenticated calls carry `user_email` and `user_token` as query
//!   parameters, taken from the logged-in `User`.

pub mod api;
pub mod config;
pub mod endpoints;
pub mod models;
pub mod state;

pub use api::PinballMapApi;
pub use config::{ConfigError, Credentials, PinballMapConfig};
pub use models::{
    Event, EventList, Location, LocationList, Region, RegionList, SubmissionType, User,
    UserFaveLocation, UserSubmission, UserSubmissionList, Zone, ZoneList,
};
pub use state::{AppState, AppStateContainer, RemoteData, Slot, StateError, StateRequest, StateUpdate};
