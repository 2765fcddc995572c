//! Database schema initialization
//!
//! Creates tables and indexes on adapter construction.

use sqlx::SqlitePool;

/// Initialize the database schema with all required tables and indexes
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Preference definitions
	//************************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS preferences (
		pref_id integer PRIMARY KEY AUTOINCREMENT,
		key text NOT NULL UNIQUE,
		type text NOT NULL DEFAULT 'string',
		default_value text,
		role text,
		category text,
		required boolean NOT NULL DEFAULT 0,
		options json,
		user_customizable boolean NOT NULL DEFAULT 0,
		created_at datetime DEFAULT (unixepoch()),
		updated_at datetime DEFAULT (unixepoch())
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_preferences_role ON preferences(role)")
		.execute(&mut *tx)
		.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_preferences_category ON preferences(category)")
		.execute(&mut *tx)
		.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_preferences_role_category ON preferences(role, category)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_preferences_category_key ON preferences(category, key)",
	)
	.execute(&mut *tx)
	.await?;

	// Translated titles and descriptions
	//************************************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS preference_translations (
		pref_id integer NOT NULL REFERENCES preferences(pref_id) ON DELETE CASCADE,
		locale text NOT NULL,
		title text NOT NULL,
		text text NOT NULL DEFAULT '',
		created_at datetime DEFAULT (unixepoch()),
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(pref_id, locale)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_translations_locale ON preference_translations(locale, pref_id)",
	)
	.execute(&mut *tx)
	.await?;

	// Override values (user_id = 0 is the global override row)
	//***********************************************************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS user_preferences (
		pref_id integer NOT NULL REFERENCES preferences(pref_id) ON DELETE CASCADE,
		user_id integer NOT NULL DEFAULT 0,
		value text NOT NULL,
		created_at datetime DEFAULT (unixepoch()),
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(pref_id, user_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_user_preferences_user ON user_preferences(user_id, pref_id)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
