//! SQLite-backed store adapter for Prefkit.
//!
//! Persists preference definitions, their translated texts, and override
//! values in a single SQLite database. The schema is initialized on
//! construction; referential cleanup of translations and overrides is
//! delegated to foreign key cascades.

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use prefkit::prelude::*;
use prefkit::store_adapter::{
	CreateDefinition, DefinitionFilter, PrefDefinition, StoreAdapter, TranslationContent,
};

mod definition;
mod schema;
mod translation;
mod user_value;
mod utils;

use schema::init_db;

#[derive(Debug)]
pub struct StoreAdapterSqlite {
	db: SqlitePool,
}

impl StoreAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> PrefResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.foreign_keys(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| warn!("DB: {:#?}", err))
			.or(Err(Error::DbError))?;

		init_db(&db)
			.await
			.inspect_err(|err| warn!("DB: {:#?}", err))
			.or(Err(Error::DbError))?;

		Ok(Self { db })
	}
}

#[async_trait]
impl StoreAdapter for StoreAdapterSqlite {
	// Definitions
	//*************
	async fn read_definition(&self, key: &str) -> PrefResult<Option<PrefDefinition>> {
		definition::read(&self.db, key).await
	}

	async fn create_definition(
		&self,
		key: &str,
		data: &CreateDefinition,
	) -> PrefResult<PrefDefinition> {
		definition::create(&self.db, key, data).await
	}

	async fn update_default(&self, key: &str, raw: &str) -> PrefResult<()> {
		definition::update_default(&self.db, key, raw).await
	}

	async fn delete_definition(&self, key: &str) -> PrefResult<()> {
		definition::delete(&self.db, key).await
	}

	async fn list_definitions(
		&self,
		filter: &DefinitionFilter,
	) -> PrefResult<Vec<PrefDefinition>> {
		definition::list(&self.db, filter).await
	}

	async fn list_categories(&self) -> PrefResult<Vec<Box<str>>> {
		definition::categories(&self.db).await
	}

	// Overrides
	//***********
	async fn read_override(
		&self,
		key: &str,
		user_id: Option<UserId>,
	) -> PrefResult<Option<Box<str>>> {
		user_value::read(&self.db, key, user_id).await
	}

	async fn put_override(
		&self,
		key: &str,
		user_id: Option<UserId>,
		raw: &str,
	) -> PrefResult<()> {
		user_value::put(&self.db, key, user_id, raw).await
	}

	async fn delete_override(&self, key: &str, user_id: Option<UserId>) -> PrefResult<()> {
		user_value::delete(&self.db, key, user_id).await
	}

	async fn list_override_users(&self, key: &str) -> PrefResult<Vec<UserId>> {
		user_value::list_users(&self.db, key).await
	}

	// Translations
	//**************
	async fn read_translation(
		&self,
		key: &str,
		locale: &str,
	) -> PrefResult<Option<TranslationContent>> {
		translation::read(&self.db, key, locale).await
	}

	async fn put_translation(
		&self,
		key: &str,
		locale: &str,
		content: &TranslationContent,
	) -> PrefResult<()> {
		translation::put(&self.db, key, locale, content).await
	}
}

// vim: ts=4
