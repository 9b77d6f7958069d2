//! loc-admin: Location management client
//!
//! A library and CLI for managing named geographic locations kept in a
//! remote store, with address autocomplete and map point picking.
//!
//! ## Features
//!
//! - Store client for `/api/v1/location` (list, create, update, delete)
//! - Geocoding backends (Nominatim, Google) behind one trait
//! - Interchangeable map pickers (Mapbox, Google, OpenLayers)
//! - Searchable, paginated location table
//! - Create/edit form where the latest geocoding request always wins
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use loc_admin::config::Config;
//! use loc_admin::form::LocationForm;
//! use loc_admin::geo::get_geocoder;
//! use loc_admin::map::get_picker;
//! use loc_admin::page::LocationPage;
//! use loc_admin::store::HttpLocationStore;
//!
//! # async fn demo() -> loc_admin::Result<()> {
//! let config = Config::default();
//! let form = LocationForm::new(get_geocoder(None, &config)?, get_picker("openlayers", &config));
//! let mut page = LocationPage::new(HttpLocationStore::from_config(&config), form);
//!
//! page.mount().await;
//! page.set_search("baker");
//! println!("{} matching rows", page.table_view().filtered_count);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod form;
pub mod geo;
pub mod location;
pub mod map;
pub mod notify;
pub mod page;
pub mod store;
pub mod table;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use location::{AddressCandidate, Coordinates, Location, LocationDraft};
