//! In-memory doubles for the store and geocoder, used by unit tests

use crate::error::{Error, Result};
use crate::geo::GeoBackend;
use crate::location::{AddressCandidate, Location, LocationDraft};
use crate::store::LocationStore;
use std::sync::Mutex;

/// A store call, as observed by [`FakeStore`]
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    List,
    Create(LocationDraft),
    Update(String, LocationDraft),
    Delete(String),
}

/// Location store backed by a Vec
#[derive(Debug, Default)]
pub struct FakeStore {
    pub locations: Mutex<Vec<Location>>,
    pub calls: Mutex<Vec<StoreCall>>,
    pub fail: Mutex<bool>,
    next_id: Mutex<u32>,
}

impl FakeStore {
    pub fn with_locations(locations: Vec<Location>) -> Self {
        Self {
            locations: Mutex::new(locations),
            ..Default::default()
        }
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&StoreCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: StoreCall) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if *self.fail.lock().unwrap() {
            return Err(Error::Store("store unavailable".to_string()));
        }
        Ok(())
    }
}

impl LocationStore for FakeStore {
    async fn list(&self) -> Result<Vec<Location>> {
        self.record(StoreCall::List)?;
        Ok(self.locations.lock().unwrap().clone())
    }

    async fn create(&self, draft: &LocationDraft) -> Result<Option<Location>> {
        self.record(StoreCall::Create(draft.clone()))?;

        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            format!("new-{}", next)
        };
        let location = location(&id, &draft.nick_name, &draft.address);
        let location = Location {
            latitude: draft.latitude,
            longitude: draft.longitude,
            ..location
        };
        self.locations.lock().unwrap().push(location.clone());
        Ok(Some(location))
    }

    async fn update(&self, id: &str, draft: &LocationDraft) -> Result<Option<Location>> {
        self.record(StoreCall::Update(id.to_string(), draft.clone()))?;

        let mut locations = self.locations.lock().unwrap();
        let existing = locations
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        existing.nick_name = draft.nick_name.clone();
        existing.address = draft.address.clone();
        existing.latitude = draft.latitude;
        existing.longitude = draft.longitude;
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.record(StoreCall::Delete(id.to_string()))?;

        let mut locations = self.locations.lock().unwrap();
        let before = locations.len();
        locations.retain(|l| l.id != id);
        if locations.len() == before {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Geocoder with canned answers; `None` makes the call fail
#[derive(Debug, Default)]
pub struct FakeGeocoder {
    pub search: Mutex<Option<Vec<AddressCandidate>>>,
    pub reverse: Mutex<Option<Option<AddressCandidate>>>,
    pub queries: Mutex<Vec<String>>,
}

impl FakeGeocoder {
    pub fn with_search(candidates: Vec<AddressCandidate>) -> Self {
        Self {
            search: Mutex::new(Some(candidates)),
            ..Default::default()
        }
    }

    pub fn with_reverse(address: Option<&str>) -> Self {
        Self {
            reverse: Mutex::new(Some(address.map(|a| candidate(a, 0.0, 0.0)))),
            ..Default::default()
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl GeoBackend for FakeGeocoder {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn search_address(&self, text: &str) -> Result<Vec<AddressCandidate>> {
        self.queries.lock().unwrap().push(text.to_string());
        self.search
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::Geocoding("search unavailable".to_string()))
    }

    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<Option<AddressCandidate>> {
        self.queries.lock().unwrap().push(format!("{},{}", lat, lng));
        self.reverse
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::Geocoding("reverse unavailable".to_string()))
    }
}

/// A persisted location with default coordinates
pub fn location(id: &str, nick_name: &str, address: &str) -> Location {
    Location {
        id: id.to_string(),
        nick_name: nick_name.to_string(),
        address: address.to_string(),
        latitude: 0.0,
        longitude: 0.0,
        created_at: None,
        updated_at: None,
        extra: Default::default(),
    }
}

pub fn candidate(display_name: &str, lat: f64, lng: f64) -> AddressCandidate {
    AddressCandidate {
        display_name: display_name.to_string(),
        lat,
        lng,
    }
}
