//! Sandbox path handling.
//!
//! Zellij mounts the host filesystem under `/host`; everything the plugin
//! reads or writes on disk goes through these helpers.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
