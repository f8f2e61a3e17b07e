//! core/tags/mod.rs
//!
//! Read-only ID3 tag access.
//! Public API:
//! - [`read_metadata`] opens an extracted MP3 and returns its [`TrackMetadata`](super::types::TrackMetadata).

mod read;
mod util;

pub use read::read_metadata;
