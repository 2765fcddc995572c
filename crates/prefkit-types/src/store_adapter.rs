//! Adapter that persists preference definitions, translations, and overrides.
//!
//! The engine only talks to storage through this trait. Implementations
//! must provide a unique-constraint-backed upsert for override rows so
//! concurrent writers to the same (definition, user) pair never race into
//! duplicate rows.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::HashMap;
use std::fmt::Debug;

use crate::prelude::*;

/// One selectable option of a `select` preference. Order is significant.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
	pub value: Box<str>,
	pub label: Box<str>,
}

/// A named preference definition: type, default, and metadata.
///
/// `key` is globally unique and immutable after creation. `default_value`
/// holds the raw text representation; it is typed on read via the codec.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefDefinition {
	pub key: Box<str>,
	#[serde(rename = "type")]
	pub typ: PrefType,
	#[serde(rename = "defaultValue")]
	pub default_value: Option<Box<str>>,
	/// None means the definition is global (no role restriction)
	pub role: Option<Box<str>>,
	pub category: Option<Box<str>>,
	#[serde(default)]
	pub required: bool,
	/// Ordered value/label pairs, only meaningful for `select` definitions
	pub options: Option<Vec<SelectOption>>,
	/// Whether per-user overrides may be written for this definition
	#[serde(rename = "userCustomizable", default)]
	pub user_customizable: bool,
}

/// Attributes of a definition to be created. The key is passed separately.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDefinition {
	#[serde(rename = "type", default)]
	pub typ: PrefType,
	#[serde(rename = "defaultValue")]
	pub default_value: Option<Box<str>>,
	pub role: Option<Box<str>>,
	pub category: Option<Box<str>>,
	#[serde(default)]
	pub required: bool,
	pub options: Option<Vec<SelectOption>>,
	#[serde(rename = "userCustomizable", default)]
	pub user_customizable: bool,
}

/// Translated title and description text for one locale
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TranslationContent {
	pub title: Box<str>,
	#[serde(default)]
	pub text: Box<str>,
}

/// Locale code to translated content
pub type Translations = HashMap<Box<str>, TranslationContent>;

/// Definition listing filter.
#[derive(Debug, Clone)]
pub enum DefinitionFilter {
	/// `Role(None)` selects only role-less definitions. `Role(Some(r))`
	/// selects role-less definitions plus those restricted to `r`.
	Role(Option<Box<str>>),
	Category(Box<str>),
}

#[async_trait]
pub trait StoreAdapter: Debug + Send + Sync {
	/// # Definitions
	async fn read_definition(&self, key: &str) -> PrefResult<Option<PrefDefinition>>;
	/// Fails with `Error::DuplicateKey` when the key is already taken
	async fn create_definition(
		&self,
		key: &str,
		data: &CreateDefinition,
	) -> PrefResult<PrefDefinition>;
	/// Overwrites the definition's own stored default value
	async fn update_default(&self, key: &str, raw: &str) -> PrefResult<()>;
	/// Removes the definition along with its translations and overrides
	async fn delete_definition(&self, key: &str) -> PrefResult<()>;
	async fn list_definitions(&self, filter: &DefinitionFilter)
	-> PrefResult<Vec<PrefDefinition>>;
	/// Distinct non-null categories
	async fn list_categories(&self) -> PrefResult<Vec<Box<str>>>;

	/// # Overrides
	/// A `None` user selects the global override row, which is distinct
	/// from the definition's own default value.
	async fn read_override(&self, key: &str, user_id: Option<UserId>)
	-> PrefResult<Option<Box<str>>>;
	/// Atomic upsert keyed by the unique (definition, user) pair
	async fn put_override(
		&self,
		key: &str,
		user_id: Option<UserId>,
		raw: &str,
	) -> PrefResult<()>;
	/// Idempotent; deleting a missing override is a no-op
	async fn delete_override(&self, key: &str, user_id: Option<UserId>) -> PrefResult<()>;
	/// Users currently holding a per-user override on this definition,
	/// used for targeted cache invalidation on global writes
	async fn list_override_users(&self, key: &str) -> PrefResult<Vec<UserId>>;

	/// # Translations
	async fn read_translation(
		&self,
		key: &str,
		locale: &str,
	) -> PrefResult<Option<TranslationContent>>;
	async fn put_translation(
		&self,
		key: &str,
		locale: &str,
		content: &TranslationContent,
	) -> PrefResult<()>;
}

// vim: ts=4
