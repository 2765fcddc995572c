//! Translated title and description storage

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use prefkit::prelude::*;
use prefkit::store_adapter::TranslationContent;

/// Read the translation of a definition for one locale
pub(crate) async fn read(
	db: &SqlitePool,
	key: &str,
	locale: &str,
) -> PrefResult<Option<TranslationContent>> {
	let row = sqlx::query(
		"SELECT t.title, t.text FROM preference_translations t
		 JOIN preferences p ON p.pref_id = t.pref_id
		 WHERE p.key = ?1 AND t.locale = ?2",
	)
	.bind(key)
	.bind(locale)
	.fetch_optional(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	match row {
		Some(row) => {
			let title: String =
				row.try_get("title").inspect_err(inspect).map_err(|_| Error::DbError)?;
			let text: String =
				row.try_get("text").inspect_err(inspect).map_err(|_| Error::DbError)?;
			Ok(Some(TranslationContent { title: title.into(), text: text.into() }))
		}
		None => Ok(None),
	}
}

/// Write or update the translation of a definition for one locale.
/// Inserts nothing when no definition matches the key.
pub(crate) async fn put(
	db: &SqlitePool,
	key: &str,
	locale: &str,
	content: &TranslationContent,
) -> PrefResult<()> {
	let res = sqlx::query(
		"INSERT INTO preference_translations (pref_id, locale, title, text)
		 SELECT pref_id, ?2, ?3, ?4 FROM preferences WHERE key = ?1
		 ON CONFLICT (pref_id, locale) DO UPDATE SET
		 title = excluded.title,
		 text = excluded.text,
		 updated_at = unixepoch()",
	)
	.bind(key)
	.bind(locale)
	.bind(&*content.title)
	.bind(&*content.text)
	.execute(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

// vim: ts=4
