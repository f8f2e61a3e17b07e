//! Takeout: pull the MP3s out of a Google Takeout music export and report
//! their tags.
//!
//! Everything lives in [`core`]; the binary in `main.rs` only parses the
//! command line, sets up logging and calls [`core::run`].

pub mod core;
