//! In-process cache adapter for Prefkit.
//!
//! LRU-bounded key-value cache with per-entry expiry. Suited for
//! single-process deployments and tests; a networked cache can implement
//! the same trait for multi-process setups.

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::RwLock;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use prefkit::cache_adapter::CacheAdapter;
use prefkit::prelude::*;

const DEFAULT_CAPACITY: usize = 1024;

struct Entry {
	value: Box<str>,
	expires_at: Instant,
}

pub struct CacheAdapterMemory {
	entries: RwLock<LruCache<Box<str>, Entry>>,
}

impl CacheAdapterMemory {
	/// Create a cache bounded to `capacity` entries. LRU eviction is a
	/// second bound next to per-entry expiry.
	pub fn new(capacity: usize) -> Self {
		let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
		Self { entries: RwLock::new(LruCache::new(capacity)) }
	}

	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}
}

impl Default for CacheAdapterMemory {
	fn default() -> Self {
		Self::new(DEFAULT_CAPACITY)
	}
}

impl std::fmt::Debug for CacheAdapterMemory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CacheAdapterMemory").field("len", &self.len()).finish()
	}
}

#[async_trait]
impl CacheAdapter for CacheAdapterMemory {
	async fn get(&self, key: &str) -> PrefResult<Option<Box<str>>> {
		let mut entries = self.entries.write();
		let expired = match entries.get(key) {
			Some(entry) if entry.expires_at > Instant::now() => {
				return Ok(Some(entry.value.clone()));
			}
			Some(_) => true,
			None => false,
		};
		if expired {
			entries.pop(key);
		}
		Ok(None)
	}

	async fn put(&self, key: &str, value: &str, ttl: Duration) -> PrefResult<()> {
		let entry = Entry { value: value.into(), expires_at: Instant::now() + ttl };
		self.entries.write().put(key.into(), entry);
		Ok(())
	}

	async fn forget(&self, key: &str) -> PrefResult<()> {
		self.entries.write().pop(key);
		Ok(())
	}

	async fn flush_prefix(&self, prefix: &str) -> PrefResult<()> {
		let mut entries = self.entries.write();
		let keys: Vec<Box<str>> = entries
			.iter()
			.filter(|(key, _)| key.starts_with(prefix))
			.map(|(key, _)| key.clone())
			.collect();
		for key in keys {
			entries.pop(&key);
		}
		Ok(())
	}
}

// vim: ts=4
