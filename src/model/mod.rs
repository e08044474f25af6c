//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (songs, collection entries, UI state)
//! - `error`: Backend error type
//! - `api_client`: Catalog backend client
//! - `view_state`: Immutable songs view snapshot, filtering and membership
//! - `app_model`: Main application model with state management methods

mod types;
mod error;
mod api_client;
mod view_state;
mod app_model;

// Re-export all public types for convenient access
pub use types::{
    ActiveSection, Collection, CollectionEntry, ItemId, MutationOutcome, Song, UiState,
};

pub use error::ApiError;

pub use api_client::{CatalogApi, HttpCatalogClient};

pub use view_state::{image_source, EmptyState, SongsViewState};

pub use app_model::AppModel;

#[cfg(test)]
pub(crate) use view_state::fixtures;
