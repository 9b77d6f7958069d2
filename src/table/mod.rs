//! Location table
//!
//! Client-side search and pagination over the already-fetched list, plus
//! the confirm-then-delete row action. The table never owns the list; the
//! page passes it in on every call.

pub mod render;

use crate::constants::table::PAGE_SIZE;
use crate::location::{format_timestamp, Location};
use crate::notify::Notifications;
use crate::store::LocationStore;
use serde::Serialize;

/// A displayable column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Id,
    NickName,
    Address,
    Latitude,
    Longitude,
    CreatedAt,
    UpdatedAt,
}

impl Column {
    /// Cell text for a location
    pub fn cell(&self, location: &Location) -> String {
        match self {
            Self::Id => location.id.clone(),
            Self::NickName => location.nick_name.clone(),
            Self::Address => location.address.clone(),
            Self::Latitude => location.latitude.to_string(),
            Self::Longitude => location.longitude.to_string(),
            Self::CreatedAt => location.created_at.as_ref().map(format_timestamp).unwrap_or_default(),
            Self::UpdatedAt => location.updated_at.as_ref().map(format_timestamp).unwrap_or_default(),
        }
    }
}

/// Column header plus the field it shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub header: String,
    pub column: Column,
}

impl ColumnSpec {
    pub fn new(header: impl Into<String>, column: Column) -> Self {
        Self {
            header: header.into(),
            column,
        }
    }
}

/// Columns shown on the locations page
pub fn default_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Location Name", Column::NickName),
        ColumnSpec::new("Address", Column::Address),
        ColumnSpec::new("Created At", Column::CreatedAt),
    ]
}

/// Locations with at least one field value containing `term`, ignoring case
///
/// An empty term matches everything.
pub fn filter_locations<'a>(locations: &'a [Location], term: &str) -> Vec<&'a Location> {
    let needle = term.to_lowercase();
    locations
        .iter()
        .filter(|location| {
            location
                .field_values()
                .iter()
                .any(|value| value.to_lowercase().contains(&needle))
        })
        .collect()
}

/// `ceil(count / PAGE_SIZE)`
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// Result of a delete request from a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined; nothing was sent
    Cancelled,
    /// The store deleted the record; the list needs a refresh
    Deleted,
    /// The store call failed; the list is unchanged
    Failed,
}

/// Blocking confirm/cancel prompt
pub trait Confirm {
    fn confirm(&self, title: &str, text: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str, &str) -> bool,
{
    fn confirm(&self, title: &str, text: &str) -> bool {
        self(title, text)
    }
}

/// One rendered page of the table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub headers: Vec<String>,
    /// Location ids of the visible rows, parallel to `rows`
    pub ids: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub search: String,
    pub current_page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub total_count: usize,
}

impl TableView {
    /// Page numbers to offer as buttons
    pub fn page_numbers(&self) -> Vec<usize> {
        (1..=self.total_pages).collect()
    }
}

/// Search and pagination state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationTable {
    search: String,
    current_page: usize,
}

impl Default for LocationTable {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationTable {
    pub fn new() -> Self {
        Self {
            search: String::new(),
            current_page: 1,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// 1-based page number
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Change the search term and keep the page in range
    pub fn set_search(&mut self, term: &str, locations: &[Location]) {
        self.search = term.to_string();
        self.clamp(locations);
    }

    /// Pull `current_page` back into `[1, max(1, total_pages)]`
    pub fn clamp(&mut self, locations: &[Location]) {
        let pages = self.page_count(locations).max(1);
        self.current_page = self.current_page.clamp(1, pages);
    }

    pub fn page_count(&self, locations: &[Location]) -> usize {
        total_pages(filter_locations(locations, &self.search).len())
    }

    pub fn next_page(&mut self, locations: &[Location]) {
        if self.current_page < self.page_count(locations) {
            self.current_page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    /// Jump to a page; out-of-range requests are clamped
    pub fn go_to_page(&mut self, page: usize, locations: &[Location]) {
        self.current_page = page;
        self.clamp(locations);
    }

    /// Build the visible page
    pub fn view(&self, locations: &[Location], columns: &[ColumnSpec]) -> TableView {
        let filtered = filter_locations(locations, &self.search);
        let start = (self.current_page - 1) * PAGE_SIZE;
        let visible: Vec<&Location> = filtered.iter().skip(start).take(PAGE_SIZE).copied().collect();

        TableView {
            headers: columns.iter().map(|c| c.header.clone()).collect(),
            ids: visible.iter().map(|l| l.id.clone()).collect(),
            rows: visible
                .iter()
                .map(|l| columns.iter().map(|c| c.column.cell(l)).collect())
                .collect(),
            search: self.search.clone(),
            current_page: self.current_page,
            total_pages: total_pages(filtered.len()),
            filtered_count: filtered.len(),
            total_count: locations.len(),
        }
    }

    /// Confirm, then delete `id` from the store
    ///
    /// Never touches the list; on `Deleted` the caller refreshes.
    pub async fn delete<S, C>(
        &self,
        id: &str,
        confirm: &C,
        store: &S,
        notices: &mut Notifications,
    ) -> DeleteOutcome
    where
        S: LocationStore,
        C: Confirm + ?Sized,
    {
        if !confirm.confirm(
            "Are you sure?",
            "You will not be able to recover this location!",
        ) {
            notices.info("Cancelled", "Your location is safe :)");
            return DeleteOutcome::Cancelled;
        }

        match store.delete(id).await {
            Ok(()) => {
                notices.success("Deleted!", "Your location has been deleted.");
                DeleteOutcome::Deleted
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "delete failed");
                notices.error(
                    "Error!",
                    "Failed to delete location. Please try again later.",
                );
                DeleteOutcome::Failed
            }
        }
    }
}
