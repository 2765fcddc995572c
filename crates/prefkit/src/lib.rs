//! Prefkit: a multi-tenant, multi-locale key/value preference store.
//!
//! Named settings carry a typed default value, optional per-user
//! overrides, and translated label/description text. This crate re-exports
//! the public API and provides [`PrefKitBuilder`] for wiring the
//! persistence and cache collaborators into a [`PrefService`].

pub use prefkit_core::codec;
pub use prefkit_core::config::PrefConfig;
pub use prefkit_core::service::{PrefEntry, PrefService};
pub use prefkit_types::cache_adapter::CacheAdapter;
pub use prefkit_types::error::{Error, PrefResult};
pub use prefkit_types::prelude;
pub use prefkit_types::store_adapter::{
	CreateDefinition, DefinitionFilter, PrefDefinition, SelectOption, StoreAdapter,
	TranslationContent, Translations,
};
pub use prefkit_types::types::{PrefType, PrefValue, UserId};

mod builder;
pub use builder::PrefKitBuilder;

// vim: ts=4
