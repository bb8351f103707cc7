//! Music catalog adapter and AI-assisted track selection.

pub mod catalog;
pub mod classifier;
pub mod error;
pub mod selector;

pub use catalog::{CatalogClient, CatalogConfig};
pub use classifier::{build_selection_prompt, TrackClassifier};
pub use error::{CatalogError, CatalogResult};
pub use selector::{match_reply_to_track, MusicSelector};
