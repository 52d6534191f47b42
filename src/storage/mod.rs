//! File system storage
//!
//! Payload producers backed by the configured server root.

pub mod operations;

pub use operations::{list_directory, read_file_contents};
