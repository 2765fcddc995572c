//! Preference service: override/default resolution and cache coordination.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_with::skip_serializing_none;

use prefkit_types::cache_adapter::CacheAdapter;
use prefkit_types::prelude::*;
use prefkit_types::store_adapter::{
	CreateDefinition, DefinitionFilter, PrefDefinition, SelectOption, StoreAdapter,
	TranslationContent, Translations,
};

use crate::codec;
use crate::config::PrefConfig;

/// One listed preference with its resolved value and localized texts
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct PrefEntry {
	pub value: PrefValue,
	#[serde(rename = "type")]
	pub typ: PrefType,
	pub category: Option<Box<str>>,
	pub required: bool,
	pub options: Option<Vec<SelectOption>>,
	pub label: Box<str>,
	pub description: Box<str>,
}

/// Preference resolution engine.
///
/// Computes effective values for (key, user) pairs. A per-user override
/// wins over everything; a user without an override sees the definition's
/// current default. The global scope consults the global override row
/// before the default. Results are cached cache-aside; the cache
/// collaborator is optional and strictly best-effort.
pub struct PrefService {
	store: Arc<dyn StoreAdapter>,
	cache: Option<Arc<dyn CacheAdapter>>,
	config: PrefConfig,
}

impl PrefService {
	pub fn new(
		store: Arc<dyn StoreAdapter>,
		cache: Option<Arc<dyn CacheAdapter>>,
		config: PrefConfig,
	) -> Self {
		Self { store, cache, config }
	}

	pub fn config(&self) -> &PrefConfig {
		&self.config
	}

	/// Get the effective value of a preference.
	///
	/// Fails with `Error::NotFound` when no definition exists for `key`.
	pub async fn get(&self, key: &str, user_id: Option<UserId>) -> PrefResult<PrefValue> {
		let cache_key = self.cache_key(key, user_id);
		if let Some(raw) = self.cache_get(&cache_key).await {
			if let Ok(value) = serde_json::from_str::<PrefValue>(&raw) {
				debug!("cache hit: {}", cache_key);
				return Ok(value);
			}
		}

		let value = self.resolve(key, user_id).await?;

		if let Ok(raw) = serde_json::to_string(&value) {
			self.cache_put(&cache_key, &raw).await;
		}
		Ok(value)
	}

	/// Set the effective value of a preference.
	///
	/// A global write (no user) goes into the definition's own default
	/// value, so every user without a personal override observes it
	/// immediately. A user write requires the definition to be user
	/// customizable and upserts the per-user override row.
	///
	/// With `auto_create`, a missing definition is created on the fly with
	/// a type inferred from the value's shape.
	pub async fn set(
		&self,
		key: &str,
		value: &PrefValue,
		user_id: Option<UserId>,
		auto_create: bool,
	) -> PrefResult<()> {
		let def = match self.store.read_definition(key).await? {
			Some(def) => def,
			None if auto_create => {
				let typ = value.infer_type();
				let data = CreateDefinition {
					typ,
					default_value: Some(codec::encode(value, typ).into()),
					role: None,
					category: Some("general".into()),
					required: false,
					options: None,
					user_customizable: user_id.is_some(),
				};
				let def = self.store.create_definition(key, &data).await?;
				info!("auto-created preference '{}' as {}", key, typ);
				def
			}
			None => return Err(Error::NotFound),
		};

		let raw = codec::encode(value, def.typ);
		match user_id {
			None => self.store.update_default(key, &raw).await?,
			Some(uid) => {
				if !def.user_customizable {
					return Err(Error::NotCustomizable(key.into()));
				}
				self.store.put_override(key, Some(uid), &raw).await?;
			}
		}

		self.invalidate(key, user_id).await;
		Ok(())
	}

	/// Set a value, creating the definition if it doesn't exist.
	pub async fn set_with_auto_create(
		&self,
		key: &str,
		value: &PrefValue,
		user_id: Option<UserId>,
	) -> PrefResult<()> {
		self.set(key, value, user_id, true).await
	}

	/// Remove a stored override, falling back to the definition's default.
	///
	/// With no user this removes the global override row; the definition's
	/// own default value is never touched. Forgetting a missing override is
	/// a no-op.
	pub async fn forget(&self, key: &str, user_id: Option<UserId>) -> PrefResult<()> {
		self.store.delete_override(key, user_id).await?;
		self.invalidate(key, user_id).await;
		Ok(())
	}

	/// Check whether a boolean-ish preference resolves truthy.
	pub async fn is_enabled(&self, key: &str, user_id: Option<UserId>) -> PrefResult<bool> {
		Ok(self.get(key, user_id).await?.truthy())
	}

	pub async fn exists(&self, key: &str) -> PrefResult<bool> {
		Ok(self.store.read_definition(key).await?.is_some())
	}

	/// Create a definition unless the key is already taken.
	/// Returns None when a definition with this key already exists.
	pub async fn create_if_not_exists(
		&self,
		key: &str,
		data: &CreateDefinition,
	) -> PrefResult<Option<PrefDefinition>> {
		if self.exists(key).await? {
			return Ok(None);
		}
		let def = self.store.create_definition(key, data).await?;
		info!("created preference '{}'", key);
		Ok(Some(def))
	}

	/// Create a definition together with its translations, unless the key
	/// is already taken.
	pub async fn create_with_translations(
		&self,
		key: &str,
		data: &CreateDefinition,
		translations: &Translations,
	) -> PrefResult<Option<PrefDefinition>> {
		let Some(def) = self.create_if_not_exists(key, data).await? else {
			return Ok(None);
		};
		for (locale, content) in translations {
			self.store.put_translation(key, locale, content).await?;
		}
		Ok(Some(def))
	}

	/// Add or update translations of an existing definition.
	pub async fn add_translations(
		&self,
		key: &str,
		translations: &Translations,
	) -> PrefResult<()> {
		if !self.exists(key).await? {
			return Err(Error::NotFound);
		}
		for (locale, content) in translations {
			self.store.put_translation(key, locale, content).await?;
		}
		Ok(())
	}

	/// Translated label of a preference.
	/// Degrades to the key itself when no translation exists; display
	/// lookups never fail over missing data.
	pub async fn label(&self, key: &str, locale: Option<&str>) -> PrefResult<Box<str>> {
		Ok(match self.translated(key, locale).await? {
			Some(content) => content.title,
			None => key.into(),
		})
	}

	/// Translated description of a preference.
	/// Degrades to an empty string when no translation exists.
	pub async fn description(&self, key: &str, locale: Option<&str>) -> PrefResult<Box<str>> {
		Ok(self.translated(key, locale).await?.map(|content| content.text).unwrap_or_default())
	}

	/// List preferences visible to a role, with values resolved for the
	/// given user. No role lists only role-less definitions; a role lists
	/// role-less definitions plus its own.
	pub async fn list_by_role(
		&self,
		role: Option<&str>,
		user_id: Option<UserId>,
	) -> PrefResult<HashMap<Box<str>, PrefEntry>> {
		self.collect_entries(&DefinitionFilter::Role(role.map(Into::into)), user_id, None).await
	}

	/// Same as [`list_by_role`](Self::list_by_role) with labels and
	/// descriptions localized to the requested locale.
	pub async fn list_with_locale(
		&self,
		locale: &str,
		role: Option<&str>,
		user_id: Option<UserId>,
	) -> PrefResult<HashMap<Box<str>, PrefEntry>> {
		self.collect_entries(&DefinitionFilter::Role(role.map(Into::into)), user_id, Some(locale))
			.await
	}

	pub async fn list_by_category(
		&self,
		category: &str,
		user_id: Option<UserId>,
	) -> PrefResult<HashMap<Box<str>, PrefEntry>> {
		self.collect_entries(&DefinitionFilter::Category(category.into()), user_id, None).await
	}

	pub async fn list_categories(&self) -> PrefResult<Vec<Box<str>>> {
		self.store.list_categories().await
	}

	/// # Typed getters

	pub async fn get_bool(&self, key: &str, user_id: Option<UserId>) -> PrefResult<bool> {
		match self.get(key, user_id).await? {
			PrefValue::Bool(b) => Ok(b),
			v => Err(Error::Decode(
				format!("'{}' is not a boolean, got {}", key, v.type_name()).into(),
			)),
		}
	}

	pub async fn get_int(&self, key: &str, user_id: Option<UserId>) -> PrefResult<i64> {
		match self.get(key, user_id).await? {
			PrefValue::Int(i) => Ok(i),
			v => Err(Error::Decode(
				format!("'{}' is not an integer, got {}", key, v.type_name()).into(),
			)),
		}
	}

	pub async fn get_string(&self, key: &str, user_id: Option<UserId>) -> PrefResult<String> {
		match self.get(key, user_id).await? {
			PrefValue::String(s) => Ok(s),
			v => Err(Error::Decode(
				format!("'{}' is not a string, got {}", key, v.type_name()).into(),
			)),
		}
	}

	pub async fn get_json(
		&self,
		key: &str,
		user_id: Option<UserId>,
	) -> PrefResult<serde_json::Value> {
		match self.get(key, user_id).await? {
			PrefValue::Json(j) => Ok(j),
			v => Err(Error::Decode(
				format!("'{}' is not JSON, got {}", key, v.type_name()).into(),
			)),
		}
	}

	/// Drop every cached value under the configured prefix.
	pub async fn clear_all_cache(&self) {
		if !self.cache_active() {
			return;
		}
		if let Some(cache) = &self.cache {
			if let Err(err) = cache.flush_prefix(&self.config.cache_prefix).await {
				warn!("cache flush failed: {}", err);
			}
		}
	}

	// Resolution //
	//************//

	/// Resolve from the store, bypassing the cache.
	///
	/// A user's override is terminal even when the definition is no longer
	/// customizable: customizability is enforced at write time only. A user
	/// without an override falls through to the definition's current
	/// default, not to the global override row.
	async fn resolve(&self, key: &str, user_id: Option<UserId>) -> PrefResult<PrefValue> {
		let def = self.store.read_definition(key).await?.ok_or(Error::NotFound)?;

		if let Some(uid) = user_id {
			if let Some(raw) = self.store.read_override(key, Some(uid)).await? {
				return codec::decode(Some(&raw), def.typ);
			}
			return codec::decode(def.default_value.as_deref(), def.typ);
		}

		if let Some(raw) = self.store.read_override(key, None).await? {
			return codec::decode(Some(&raw), def.typ);
		}
		codec::decode(def.default_value.as_deref(), def.typ)
	}

	/// Value shown in listings: per-user override when present, otherwise
	/// the raw default. Listings never consult the global override row.
	async fn entry_value(
		&self,
		def: &PrefDefinition,
		user_id: Option<UserId>,
	) -> PrefResult<PrefValue> {
		if let Some(uid) = user_id {
			if let Some(raw) = self.store.read_override(&def.key, Some(uid)).await? {
				return codec::decode(Some(&raw), def.typ);
			}
		}
		codec::decode(def.default_value.as_deref(), def.typ)
	}

	async fn collect_entries(
		&self,
		filter: &DefinitionFilter,
		user_id: Option<UserId>,
		locale: Option<&str>,
	) -> PrefResult<HashMap<Box<str>, PrefEntry>> {
		let defs = self.store.list_definitions(filter).await?;
		let mut entries = HashMap::with_capacity(defs.len());
		for def in defs {
			let value = self.entry_value(&def, user_id).await?;
			let translated = self.translated(&def.key, locale).await?;
			let (label, description) = match translated {
				Some(content) => (content.title, content.text),
				None => (def.key.clone(), "".into()),
			};
			entries.insert(
				def.key,
				PrefEntry {
					value,
					typ: def.typ,
					category: def.category,
					required: def.required,
					options: def.options,
					label,
					description,
				},
			);
		}
		Ok(entries)
	}

	/// Translation lookup: requested (or default) locale first, then the
	/// configured fallback locale.
	async fn translated(
		&self,
		key: &str,
		locale: Option<&str>,
	) -> PrefResult<Option<TranslationContent>> {
		let locale = locale.unwrap_or(&*self.config.default_locale);
		if let Some(content) = self.store.read_translation(key, locale).await? {
			return Ok(Some(content));
		}
		let fallback = &*self.config.fallback_locale;
		if locale != fallback {
			if let Some(content) = self.store.read_translation(key, fallback).await? {
				return Ok(Some(content));
			}
		}
		Ok(None)
	}

	// Cache coordination //
	//********************//

	fn cache_active(&self) -> bool {
		self.config.cache_enabled && self.cache.is_some()
	}

	fn cache_key(&self, key: &str, user_id: Option<UserId>) -> String {
		match user_id {
			Some(uid) => format!("{}:{}:user_{}", self.config.cache_prefix, key, uid),
			None => format!("{}:{}:global", self.config.cache_prefix, key),
		}
	}

	async fn cache_get(&self, cache_key: &str) -> Option<Box<str>> {
		if !self.config.cache_enabled {
			return None;
		}
		let cache = self.cache.as_ref()?;
		match cache.get(cache_key).await {
			Ok(hit) => hit,
			Err(err) => {
				warn!("cache read failed for '{}': {}", cache_key, err);
				None
			}
		}
	}

	async fn cache_put(&self, cache_key: &str, raw: &str) {
		if !self.cache_active() {
			return;
		}
		if let Some(cache) = &self.cache {
			let ttl = Duration::from_secs(self.config.cache_ttl);
			if let Err(err) = cache.put(cache_key, raw, ttl).await {
				warn!("cache write failed for '{}': {}", cache_key, err);
			}
		}
	}

	async fn cache_del(&self, cache_key: &str) {
		if let Some(cache) = &self.cache {
			if let Err(err) = cache.forget(cache_key).await {
				warn!("cache invalidation failed for '{}': {}", cache_key, err);
			}
		}
	}

	/// Invalidate the touched cache key. A global write also invalidates
	/// the key of every user holding an override on this definition: their
	/// cached fallbacks may be stale. Users without overrides age out of
	/// the cache through the TTL.
	async fn invalidate(&self, key: &str, user_id: Option<UserId>) {
		if !self.cache_active() {
			return;
		}
		self.cache_del(&self.cache_key(key, user_id)).await;
		if user_id.is_none() {
			match self.store.list_override_users(key).await {
				Ok(users) => {
					for uid in users {
						self.cache_del(&self.cache_key(key, Some(uid))).await;
					}
				}
				Err(err) => warn!("could not enumerate override holders of '{}': {}", key, err),
			}
		}
	}
}

impl std::fmt::Debug for PrefService {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PrefService")
			.field("store", &self.store)
			.field("cache", &self.cache.is_some())
			.field("config", &self.config)
			.finish()
	}
}

// vim: ts=4
