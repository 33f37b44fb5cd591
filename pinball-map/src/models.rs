//! Pinball Map response models.
//!
//! # Design
//! Several entities come back in more than one wire shape:
//! - A region is nested under `"region"` when returned alone and flat inside
//!   `"regions"` lists. `Region` tries the nested shape first.
//! - A user is always nested under `"user"`.
//! - A location list is either plain `"locations"` or
//!   `"user_fave_locations"`, whose entries wrap a location with favourite
//!   bookkeeping. `LocationList` is a tagged union over the two.
//!
//! Wire keys are snake_case and so are the fields, so the default key
//! strategy applies.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Regions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RegionShape")]
pub struct Region {
    pub id: i64,
    pub name: String,
    pub full_name: String,
}

#[derive(Deserialize)]
struct RegionFields {
    id: i64,
    name: String,
    full_name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RegionShape {
    Nested { region: RegionFields },
    Flat(RegionFields),
}

impl From<RegionShape> for Region {
    fn from(shape: RegionShape) -> Self {
        let (RegionShape::Nested { region: f } | RegionShape::Flat(f)) = shape;
        Region {
            id: f.id,
            name: f.name,
            full_name: f.full_name,
        }
    }
}

impl Ord for Region {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.id.cmp(&other.id))
            .then_with(|| self.full_name.cmp(&other.full_name))
    }
}

impl PartialOrd for Region {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegionList {
    pub regions: Vec<Region>,
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// A venue. Two locations are the same location when their ids match.
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A location on a user's favourites list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserFaveLocation {
    #[serde(rename = "id")]
    pub favorite_id: i64,
    pub user_id: i64,
    pub location_id: i64,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "LocationListShape")]
pub enum LocationList {
    Locations(Vec<Location>),
    Favorites(Vec<UserFaveLocation>),
}

#[derive(Deserialize)]
struct LocationListShape {
    locations: Option<Value>,
    user_fave_locations: Option<Value>,
}

#[derive(Debug)]
pub struct ShapeError(&'static str);

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not decode `{}`", self.0)
    }
}

/// The plain shape wins when it parses; a malformed `locations` falls back
/// to `user_fave_locations`.
impl TryFrom<LocationListShape> for LocationList {
    type Error = ShapeError;

    fn try_from(shape: LocationListShape) -> Result<Self, Self::Error> {
        if let Some(Ok(locations)) = shape.locations.map(serde_json::from_value) {
            return Ok(LocationList::Locations(locations));
        }
        if let Some(Ok(faves)) = shape.user_fave_locations.map(serde_json::from_value) {
            return Ok(LocationList::Favorites(faves));
        }
        Err(ShapeError("LocationList"))
    }
}

impl LocationList {
    pub fn locations(&self) -> Vec<&Location> {
        match self {
            LocationList::Locations(locations) => locations.iter().collect(),
            LocationList::Favorites(faves) => faves.iter().map(|f| &f.location).collect(),
        }
    }

    /// Locations ordered by name.
    pub fn sorted_by_name(&self) -> Vec<&Location> {
        let mut locations = self.locations();
        locations.sort_by(|a, b| a.name.cmp(&b.name));
        locations
    }

    pub fn contains(&self, location: &Location) -> bool {
        self.locations().into_iter().any(|l| l == location)
    }

    pub fn favorites(&self) -> Option<&[UserFaveLocation]> {
        match self {
            LocationList::Favorites(faves) => Some(faves),
            LocationList::Locations(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            LocationList::Locations(locations) => locations.len(),
            LocationList::Favorites(faves) => faves.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "UserEnvelope")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub authentication_token: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("authentication_token", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: UserFields,
}

#[derive(Deserialize)]
struct UserFields {
    id: i64,
    username: String,
    email: String,
    authentication_token: String,
}

impl From<UserEnvelope> for User {
    fn from(envelope: UserEnvelope) -> Self {
        let u = envelope.user;
        User {
            id: u.id,
            username: u.username,
            email: u.email,
            authentication_token: u.authentication_token,
        }
    }
}

// ---------------------------------------------------------------------------
// Region-scoped collections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionType {
    ConfirmLocation,
    ContactUs,
    DeleteLocation,
    LocationMetadata,
    NewCondition,
    NewLmx,
    NewMsx,
    RemoveMachine,
    SuggestLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserSubmission {
    pub id: i64,
    pub region_id: i64,
    pub submission_type: SubmissionType,
    pub submission: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserSubmissionList {
    pub user_submissions: Vec<UserSubmission>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
pub struct Zone {
    pub name: String,
    pub id: i64,
    pub region_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ZoneList {
    pub zones: Vec<Zone>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Event {
    pub id: i64,
    pub region_id: i64,
    pub name: String,
    pub start_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventList {
    pub events: Vec<Event>,
}
