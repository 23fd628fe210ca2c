//! Hotel search result refinement.
//!
//! Normalizes raw upstream hotel payloads into [`models::HotelRecord`]s and
//! derives the filtered, sorted list to show for a user's filter settings.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod sources;

pub use error::{ParseError, SourceError};
pub use models::HotelRecord;
