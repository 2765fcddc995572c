//! Service builder - wires adapters and configuration into a PrefService

use std::sync::Arc;

use prefkit_core::config::PrefConfig;
use prefkit_core::service::PrefService;
use prefkit_types::cache_adapter::CacheAdapter;
use prefkit_types::prelude::*;
use prefkit_types::store_adapter::StoreAdapter;

/// Assembles a [`PrefService`] from explicit collaborators.
///
/// The store adapter is required. Without a cache adapter the service
/// reads straight from the store on every call.
pub struct PrefKitBuilder {
	config: PrefConfig,
	store: Option<Arc<dyn StoreAdapter>>,
	cache: Option<Arc<dyn CacheAdapter>>,
}

impl PrefKitBuilder {
	pub fn new() -> Self {
		PrefKitBuilder { config: PrefConfig::default(), store: None, cache: None }
	}

	pub fn config(mut self, config: PrefConfig) -> Self {
		self.config = config;
		self
	}

	pub fn store_adapter(mut self, store: Arc<dyn StoreAdapter>) -> Self {
		self.store = Some(store);
		self
	}

	pub fn cache_adapter(mut self, cache: Arc<dyn CacheAdapter>) -> Self {
		self.cache = Some(cache);
		self
	}

	pub fn build(self) -> PrefResult<PrefService> {
		let store =
			self.store.ok_or_else(|| Error::Config("store adapter is required".into()))?;
		if self.cache.is_none() && self.config.cache_enabled {
			debug!("no cache adapter configured, resolving straight from the store");
		}
		Ok(PrefService::new(store, self.cache, self.config))
	}
}

impl Default for PrefKitBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
