//! Adapter for the cache collaborator.
//!
//! The engine treats the cache as best-effort: adapter failures are logged
//! and swallowed by the caller, never surfaced to the request.

use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

use crate::error::PrefResult;

#[async_trait]
pub trait CacheAdapter: Debug + Send + Sync {
	async fn get(&self, key: &str) -> PrefResult<Option<Box<str>>>;
	async fn put(&self, key: &str, value: &str, ttl: Duration) -> PrefResult<()>;
	async fn forget(&self, key: &str) -> PrefResult<()>;
	/// Removes every entry whose key starts with `prefix`
	async fn flush_prefix(&self, prefix: &str) -> PrefResult<()>;
}

// vim: ts=4
