//! Observable application state fed by API calls.
//!
//! # Design
//! Each `StateRequest` names the slot it fills. `AppStateContainer::request`
//! marks that slot `Loading`, dispatches the call, and the completion sends a
//! `StateUpdate` tagged with the same slot back over a channel. Updates are
//! only applied when the owner calls `pump` or `next_update`, so state is
//! mutated on the owner's thread and one completion touches exactly one slot.

use netkit_core::{NetworkingError, RequestDescriptor};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::api::PinballMapApi;
use crate::config::Credentials;
use crate::endpoints;
use crate::models::{Location, LocationList, Region, RegionList, User, UserFaveLocation};

/// The lifecycle of one remotely loaded value.
#[derive(Debug, Clone, Default)]
pub enum RemoteData<T> {
    #[default]
    Undefined,
    Loading,
    Loaded(T),
    Errored(NetworkingError),
}

impl<T> RemoteData<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            RemoteData::Loaded(value) => Some(value),
            RemoteData::Undefined | RemoteData::Loading | RemoteData::Errored(_) => None,
        }
    }

    pub fn error(&self) -> Option<&NetworkingError> {
        match self {
            RemoteData::Errored(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RemoteData::Loading)
    }
}

impl<T> From<Result<T, NetworkingError>> for RemoteData<T> {
    fn from(result: Result<T, NetworkingError>) -> Self {
        match result {
            Ok(value) => RemoteData::Loaded(value),
            Err(error) => RemoteData::Errored(error),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    CurrentUser,
    RegionList,
    LastCheckedRegion,
    LastCheckedLocations,
    UserFaveLocations,
    LastFavedLocation,
}

/// A call the container knows how to make, tagged with its target slot.
#[derive(Debug, Clone)]
pub enum StateRequest {
    Login(Credentials),
    FaveLocations,
    AddFaveLocation { location_id: i64 },
    LocationsForRegion { name: String },
    Regions,
    ClosestRegion { lat: f64, lon: f64 },
    DoesRegionExist { name: String },
}

impl StateRequest {
    pub fn slot(&self) -> Slot {
        match self {
            StateRequest::Login(_) => Slot::CurrentUser,
            StateRequest::FaveLocations => Slot::UserFaveLocations,
            StateRequest::AddFaveLocation { .. } => Slot::LastFavedLocation,
            StateRequest::LocationsForRegion { .. } => Slot::LastCheckedLocations,
            StateRequest::Regions => Slot::RegionList,
            StateRequest::ClosestRegion { .. } | StateRequest::DoesRegionExist { .. } => {
                Slot::LastCheckedRegion
            }
        }
    }
}

/// A new value for exactly one slot.
#[derive(Debug, Clone)]
pub enum StateUpdate {
    CurrentUser(RemoteData<User>),
    RegionList(RemoteData<RegionList>),
    LastCheckedRegion(RemoteData<Region>),
    LastCheckedLocations(RemoteData<LocationList>),
    UserFaveLocations(RemoteData<LocationList>),
    LastFavedLocation(RemoteData<UserFaveLocation>),
}

impl StateUpdate {
    pub fn loading(slot: Slot) -> Self {
        match slot {
            Slot::CurrentUser => StateUpdate::CurrentUser(RemoteData::Loading),
            Slot::RegionList => StateUpdate::RegionList(RemoteData::Loading),
            Slot::LastCheckedRegion => StateUpdate::LastCheckedRegion(RemoteData::Loading),
            Slot::LastCheckedLocations => StateUpdate::LastCheckedLocations(RemoteData::Loading),
            Slot::UserFaveLocations => StateUpdate::UserFaveLocations(RemoteData::Loading),
            Slot::LastFavedLocation => StateUpdate::LastFavedLocation(RemoteData::Loading),
        }
    }

    pub fn slot(&self) -> Slot {
        match self {
            StateUpdate::CurrentUser(_) => Slot::CurrentUser,
            StateUpdate::RegionList(_) => Slot::RegionList,
            StateUpdate::LastCheckedRegion(_) => Slot::LastCheckedRegion,
            StateUpdate::LastCheckedLocations(_) => Slot::LastCheckedLocations,
            StateUpdate::UserFaveLocations(_) => Slot::UserFaveLocations,
            StateUpdate::LastFavedLocation(_) => Slot::LastFavedLocation,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub current_user: RemoteData<User>,
    pub region_list: RemoteData<RegionList>,
    pub last_checked_region: RemoteData<Region>,
    pub last_checked_locations: RemoteData<LocationList>,
    pub user_fave_locations: RemoteData<LocationList>,
    pub last_faved_location: RemoteData<UserFaveLocation>,
}

impl AppState {
    pub fn apply(&mut self, update: StateUpdate) {
        match update {
            StateUpdate::CurrentUser(v) => self.current_user = v,
            StateUpdate::RegionList(v) => self.region_list = v,
            StateUpdate::LastCheckedRegion(v) => self.last_checked_region = v,
            StateUpdate::LastCheckedLocations(v) => self.last_checked_locations = v,
            StateUpdate::UserFaveLocations(v) => self.user_fave_locations = v,
            StateUpdate::LastFavedLocation(v) => self.last_faved_location = v,
        }
    }

    pub fn is_location_favorite(&self, location: &Location) -> bool {
        self.user_fave_locations
            .value()
            .is_some_and(|faves| faves.contains(location))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("no user is logged in")]
    NotAuthenticated,
}

pub struct AppStateContainer {
    api: PinballMapApi,
    state: AppState,
    tx: mpsc::UnboundedSender<StateUpdate>,
    rx: mpsc::UnboundedReceiver<StateUpdate>,
}

impl AppStateContainer {
    pub fn new(api: PinballMapApi) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            state: AppState::default(),
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn login(&mut self, credentials: &Credentials) {
        // Login needs no user, so it cannot fail to dispatch.
        let _ = self.request(StateRequest::Login(credentials.clone()));
    }

    pub fn logout(&mut self) {
        self.state.current_user = RemoteData::Undefined;
    }

    /// Mark the request's slot `Loading` and dispatch it on the API client's
    /// runtime.
    pub fn request(&mut self, request: StateRequest) -> Result<(), StateError> {
        let slot = request.slot();
        let user = self.state.current_user.value();
        let descriptor = match &request {
            StateRequest::Login(credentials) => {
                endpoints::auth_details(&credentials.login, credentials.password())
            }
            StateRequest::FaveLocations => {
                endpoints::list_fave_locations(user.ok_or(StateError::NotAuthenticated)?.id)
            }
            StateRequest::AddFaveLocation { location_id } => {
                endpoints::add_fave_location(user.ok_or(StateError::NotAuthenticated)?, *location_id)
            }
            StateRequest::LocationsForRegion { name } => endpoints::locations(name),
            StateRequest::Regions => endpoints::regions(),
            StateRequest::ClosestRegion { lat, lon } => {
                endpoints::closest_region_by(&lat.to_string(), &lon.to_string())
            }
            StateRequest::DoesRegionExist { name } => endpoints::does_region_exist(name),
        };

        tracing::debug!(?slot, path = descriptor.path(), "state request");
        self.state.apply(StateUpdate::loading(slot));
        match slot {
            Slot::CurrentUser => self.dispatch(&descriptor, StateUpdate::CurrentUser),
            Slot::RegionList => self.dispatch(&descriptor, StateUpdate::RegionList),
            Slot::LastCheckedRegion => self.dispatch(&descriptor, StateUpdate::LastCheckedRegion),
            Slot::LastCheckedLocations => {
                self.dispatch(&descriptor, StateUpdate::LastCheckedLocations)
            }
            Slot::UserFaveLocations => self.dispatch(&descriptor, StateUpdate::UserFaveLocations),
            Slot::LastFavedLocation => self.dispatch(&descriptor, StateUpdate::LastFavedLocation),
        }
        Ok(())
    }

    /// Apply every update that has already arrived. Returns how many.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(update) = self.rx.try_recv() {
            self.state.apply(update);
            applied += 1;
        }
        applied
    }

    /// Wait for the next update, apply it, and report which slot changed.
    pub async fn next_update(&mut self) -> Option<Slot> {
        let update = self.rx.recv().await?;
        let slot = update.slot();
        self.state.apply(update);
        Some(slot)
    }

    fn dispatch<T>(&self, descriptor: &RequestDescriptor, wrap: fn(RemoteData<T>) -> StateUpdate)
    where
        T: DeserializeOwned + Send + 'static,
    {
        let tx = self.tx.clone();
        self.api.get(descriptor, move |result: Result<T, NetworkingError>| {
            if tx.send(wrap(result.into())).is_err() {
                tracing::debug!("state container dropped before completion");
            }
        });
    }
}
