//! Preference resolution engine.
//!
//! Computes effective preference values from a definition's default, an
//! optional global override, and optional per-user overrides, with
//! type-aware decoding and cache-aside reads. Persistence and caching are
//! injected collaborators; this crate holds the rules only.

pub mod codec;
pub mod config;
pub mod service;

pub use config::PrefConfig;
pub use service::{PrefEntry, PrefService};

// vim: ts=4
