//! Location store client
//!
//! The store is the remote CRUD backend and the source of truth for
//! locations. This crate only consumes it.

pub mod http;

use crate::error::Result;
use crate::location::{Location, LocationDraft};

pub use http::HttpLocationStore;

/// Trait for location store backends
pub trait LocationStore: Send + Sync {
    /// Fetch every location
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Location>>> + Send;

    /// Create a location from a draft
    ///
    /// Returns the created record when the store echoes it back.
    fn create(
        &self,
        draft: &LocationDraft,
    ) -> impl std::future::Future<Output = Result<Option<Location>>> + Send;

    /// Replace the location `id` with the draft's fields
    fn update(
        &self,
        id: &str,
        draft: &LocationDraft,
    ) -> impl std::future::Future<Output = Result<Option<Location>>> + Send;

    /// Delete the location `id`
    fn delete(&self, id: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}
