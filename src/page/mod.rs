//! Locations page
//!
//! Composes the table and the form, owns the in-memory list and decides
//! which of the two is shown. The list mirrors the store: it is replaced
//! by a fresh fetch after every mutation, never patched locally.

use crate::form::{LocationForm, SubmitOutcome};
use crate::geo::GeoBackend;
use crate::location::Location;
use crate::notify::Notifications;
use crate::store::LocationStore;
use crate::table::{default_columns, ColumnSpec, Confirm, DeleteOutcome, LocationTable, TableView};
use tracing::{debug, info};

/// Which half of the page is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Form,
}

/// Page controller
pub struct LocationPage<S, G> {
    store: S,
    locations: Vec<Location>,
    table: LocationTable,
    columns: Vec<ColumnSpec>,
    form: LocationForm<G>,
    view: View,
    loading: bool,
    last_error: Option<String>,
    notices: Notifications,
}

impl<S: LocationStore, G: GeoBackend> LocationPage<S, G> {
    pub fn new(store: S, form: LocationForm<G>) -> Self {
        Self {
            store,
            locations: Vec::new(),
            table: LocationTable::new(),
            columns: default_columns(),
            form,
            view: View::List,
            loading: true,
            last_error: None,
            notices: Notifications::new(),
        }
    }

    /// Replace the table columns
    pub fn with_columns(mut self, columns: Vec<ColumnSpec>) -> Self {
        self.columns = columns;
        self
    }

    /// Initial fetch
    pub async fn mount(&mut self) {
        self.refresh().await;
    }

    /// Re-fetch the list from the store
    ///
    /// On failure the previous list stays in place.
    pub async fn refresh(&mut self) -> bool {
        match self.store.list().await {
            Ok(locations) => {
                debug!(count = locations.len(), "location list refreshed");
                self.locations = locations;
                self.table.clamp(&self.locations);
                self.loading = false;
                self.last_error = None;
                true
            }
            Err(e) => {
                self.loading = false;
                self.last_error = Some(e.to_string());
                self.notices.error("Error!", format!("Failed to fetch data: {}", e));
                false
            }
        }
    }

    /// Show a blank form
    pub fn add_new(&mut self) {
        self.form.open(None);
        self.view = View::Form;
    }

    /// Show the form for `id`; false if it is not in the list
    pub fn edit(&mut self, id: &str) -> bool {
        let Some(location) = self.locations.iter().find(|l| l.id == id) else {
            return false;
        };
        self.form.open(Some(location));
        self.view = View::Form;
        true
    }

    /// Leave the form without saving
    pub fn close_form(&mut self) {
        self.form.close();
        self.view = View::List;
    }

    pub fn clear_form(&mut self) -> bool {
        self.form.clear()
    }

    /// Submit the form; on success return to the list and re-fetch
    pub async fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.form.submit(&self.store, &mut self.notices).await;

        if let SubmitOutcome::Saved(_) = outcome {
            info!("location saved");
            self.view = View::List;
            self.refresh().await;
        }
        outcome
    }

    /// Delete a row after confirmation; re-fetch on success
    pub async fn delete<C: Confirm + ?Sized>(&mut self, id: &str, confirm: &C) -> DeleteOutcome {
        let outcome = self
            .table
            .delete(id, confirm, &self.store, &mut self.notices)
            .await;

        if outcome == DeleteOutcome::Deleted {
            self.refresh().await;
        }
        outcome
    }

    pub fn set_search(&mut self, term: &str) {
        self.table.set_search(term, &self.locations);
    }

    pub fn next_page(&mut self) {
        self.table.next_page(&self.locations);
    }

    pub fn prev_page(&mut self) {
        self.table.prev_page();
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.table.go_to_page(page, &self.locations);
    }

    /// The visible table page
    pub fn table_view(&self) -> TableView {
        self.table.view(&self.locations, &self.columns)
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn form(&self) -> &LocationForm<G> {
        &self.form
    }

    /// Form plus the notice sink, for driving field edits
    pub fn form_mut(&mut self) -> (&mut LocationForm<G>, &mut Notifications) {
        (&mut self.form, &mut self.notices)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn notices(&self) -> &Notifications {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notifications {
        &mut self.notices
    }
}
