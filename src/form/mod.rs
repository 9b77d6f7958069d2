//! Location form
//!
//! Holds the draft being created or edited and wires it to a geocoder and
//! a map picker chosen by the caller.
//!
//! Address search and reverse geocoding are asynchronous and may resolve
//! out of order. Every request is issued as a ticket carrying a generation
//! token; a response is applied only if its token is still the latest for
//! the field it writes, so the most recent request always wins.

use crate::geo::GeoBackend;
use crate::location::{AddressCandidate, Coordinates, Location, LocationDraft};
use crate::map::{MapEvent, MapPicker};
use crate::notify::Notifications;
use crate::store::LocationStore;
use serde::Serialize;
use tracing::{debug, warn};

/// Pending address search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    token: u64,
    pub query: String,
}

/// Pending reverse lookup for a map pick
#[derive(Debug, Clone, PartialEq)]
pub struct ReverseTicket {
    token: u64,
    pub coords: Coordinates,
}

/// Inline validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub nick_name: Option<String>,
    pub address: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.nick_name.is_none() && self.address.is_none()
    }
}

/// Result of submitting the form
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; the store was not called
    Invalid,
    /// The store accepted the draft (the saved record, if echoed back)
    Saved(Option<Location>),
    /// The store call failed; the draft is intact
    Failed,
}

/// Create/edit form
pub struct LocationForm<G> {
    geocoder: G,
    picker: Box<dyn MapPicker>,
    draft: LocationDraft,
    editing: Option<String>,
    errors: FieldErrors,
    candidates: Vec<AddressCandidate>,
    search_token: u64,
    address_token: u64,
}

impl<G: GeoBackend> LocationForm<G> {
    pub fn new(geocoder: G, picker: Box<dyn MapPicker>) -> Self {
        Self {
            geocoder,
            picker,
            draft: LocationDraft::default(),
            editing: None,
            errors: FieldErrors::default(),
            candidates: Vec::new(),
            search_token: 0,
            address_token: 0,
        }
    }

    /// Start editing a copy of `location`, or a blank draft
    pub fn open(&mut self, location: Option<&Location>) {
        self.reset();
        if let Some(location) = location {
            self.draft = LocationDraft::from(location);
            self.editing = Some(location.id.clone());
        }
        self.picker.render(Some(self.draft.coordinates()));
    }

    /// Discard the draft and the edit target
    pub fn close(&mut self) {
        self.reset();
    }

    /// Blank every field without closing; only while creating
    pub fn clear(&mut self) -> bool {
        if self.is_editing() {
            return false;
        }
        self.reset();
        self.picker.render(None);
        true
    }

    fn reset(&mut self) {
        self.draft = LocationDraft::default();
        self.editing = None;
        self.errors = FieldErrors::default();
        self.candidates.clear();
        self.search_token += 1;
        self.address_token += 1;
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Id of the location being edited
    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn draft(&self) -> &LocationDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn candidates(&self) -> &[AddressCandidate] {
        &self.candidates
    }

    pub fn picker(&self) -> &dyn MapPicker {
        self.picker.as_ref()
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub fn set_nick_name(&mut self, text: &str) {
        self.draft.nick_name = text.to_string();
    }

    /// Set both coordinates and move the map
    pub fn set_coordinates(&mut self, coords: Coordinates) {
        self.draft.set_coordinates(coords);
        self.picker.render(Some(coords));
    }

    /// Type into the address field
    ///
    /// Returns the search to run, or `None` for blank text (which also
    /// clears the candidates).
    pub fn set_address(&mut self, text: &str) -> Option<SearchTicket> {
        self.draft.address = text.to_string();
        self.address_token += 1;
        self.search_token += 1;

        if text.trim().is_empty() {
            self.candidates.clear();
            return None;
        }

        Some(SearchTicket {
            token: self.search_token,
            query: text.to_string(),
        })
    }

    /// Apply a finished search; returns false if the ticket was stale
    pub fn apply_search(
        &mut self,
        ticket: SearchTicket,
        result: crate::error::Result<Vec<AddressCandidate>>,
        notices: &mut Notifications,
    ) -> bool {
        if ticket.token != self.search_token {
            debug!(query = %ticket.query, "dropping stale address search");
            return false;
        }

        match result {
            Ok(candidates) => {
                if candidates.is_empty() {
                    warn!(query = %ticket.query, "no address candidates found");
                }
                self.candidates = candidates;
            }
            Err(e) => {
                self.candidates.clear();
                notices.warning("Address search failed", e.to_string());
            }
        }
        true
    }

    /// Type into the address field and run the search
    pub async fn change_address(&mut self, text: &str, notices: &mut Notifications) {
        if let Some(ticket) = self.set_address(text) {
            let result = self.geocoder.search_address(&ticket.query).await;
            self.apply_search(ticket, result, notices);
        }
    }

    /// Commit candidate `index` to the draft
    pub fn select_candidate(&mut self, index: usize) -> bool {
        let Some(candidate) = self.candidates.get(index).cloned() else {
            return false;
        };

        self.draft.address = candidate.display_name;
        self.draft.set_coordinates(Coordinates::new(candidate.lat, candidate.lng));
        self.candidates.clear();
        self.search_token += 1;
        self.address_token += 1;
        self.picker.render(Some(self.draft.coordinates()));
        true
    }

    /// Forward a map interaction; coordinates apply immediately
    ///
    /// Returns the reverse lookup to run for the new point.
    pub fn pick(&mut self, event: MapEvent) -> Option<ReverseTicket> {
        let coords = self.picker.handle(event)?;
        self.draft.set_coordinates(coords);
        self.address_token += 1;

        Some(ReverseTicket {
            token: self.address_token,
            coords,
        })
    }

    /// Apply a finished reverse lookup; returns false if the ticket was stale
    ///
    /// Failures leave the address as it was.
    pub fn apply_reverse(
        &mut self,
        ticket: ReverseTicket,
        result: crate::error::Result<Option<AddressCandidate>>,
        notices: &mut Notifications,
    ) -> bool {
        if ticket.token != self.address_token {
            debug!(coords = %ticket.coords, "dropping stale reverse lookup");
            return false;
        }

        match result {
            Ok(Some(found)) => {
                self.draft.address = found.display_name;
            }
            Ok(None) => {
                notices.warning(
                    "Address lookup failed",
                    format!("No address found for {}", ticket.coords),
                );
            }
            Err(e) => {
                notices.warning("Address lookup failed", e.to_string());
            }
        }
        true
    }

    /// Forward a map interaction and resolve its address
    pub async fn pick_and_resolve(&mut self, event: MapEvent, notices: &mut Notifications) {
        if let Some(ticket) = self.pick(event) {
            let result = self
                .geocoder
                .reverse_geocode(ticket.coords.lat, ticket.coords.lng)
                .await;
            self.apply_reverse(ticket, result, notices);
        }
    }

    /// Check required fields; both errors may be set at once
    pub fn validate(&mut self) -> bool {
        let mut errors = FieldErrors::default();

        if self.draft.nick_name.trim().is_empty() {
            errors.nick_name = Some("Nick name is required".to_string());
        }
        if self.draft.address.trim().is_empty() {
            errors.address = Some("Address is required".to_string());
        }

        self.errors = errors;
        self.errors.is_empty()
    }

    /// Validate, then create or update through the store
    pub async fn submit<S: LocationStore>(
        &mut self,
        store: &S,
        notices: &mut Notifications,
    ) -> SubmitOutcome {
        if !self.validate() {
            return SubmitOutcome::Invalid;
        }

        let result = match &self.editing {
            Some(id) => store.update(id, &self.draft).await,
            None => store.create(&self.draft).await,
        };

        match result {
            Ok(saved) => {
                self.reset();
                self.picker.render(None);
                SubmitOutcome::Saved(saved)
            }
            Err(e) => {
                tracing::error!(error = %e, editing = ?self.editing, "saving location failed");
                notices.error(
                    "Error!",
                    "Failed to save location. Please try again later.",
                );
                SubmitOutcome::Failed
            }
        }
    }
}
