//! Override value storage
//!
//! Override rows are keyed by (pref_id, user_id); user_id 0 holds the
//! global override, distinct from the definition's own default value.

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use prefkit::prelude::*;

/// Read the override value for a (key, user) pair
pub(crate) async fn read(
	db: &SqlitePool,
	key: &str,
	user_id: Option<UserId>,
) -> PrefResult<Option<Box<str>>> {
	let row = sqlx::query(
		"SELECT up.value FROM user_preferences up
		 JOIN preferences p ON p.pref_id = up.pref_id
		 WHERE p.key = ?1 AND up.user_id = ?2",
	)
	.bind(key)
	.bind(user_key(user_id))
	.fetch_optional(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	match row {
		Some(row) => {
			let value: String =
				row.try_get("value").inspect_err(inspect).map_err(|_| Error::DbError)?;
			Ok(Some(value.into()))
		}
		None => Ok(None),
	}
}

/// Write or update the override for a (key, user) pair.
///
/// A single statement: concurrent writers race on the unique
/// (pref_id, user_id) key instead of a read-then-write window. Inserts
/// nothing when no definition matches the key.
pub(crate) async fn put(
	db: &SqlitePool,
	key: &str,
	user_id: Option<UserId>,
	raw: &str,
) -> PrefResult<()> {
	let res = sqlx::query(
		"INSERT INTO user_preferences (pref_id, user_id, value)
		 SELECT pref_id, ?2, ?3 FROM preferences WHERE key = ?1
		 ON CONFLICT (pref_id, user_id) DO UPDATE SET
		 value = excluded.value,
		 updated_at = unixepoch()",
	)
	.bind(key)
	.bind(user_key(user_id))
	.bind(raw)
	.execute(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

/// Delete the override for a (key, user) pair. No-op when absent.
pub(crate) async fn delete(
	db: &SqlitePool,
	key: &str,
	user_id: Option<UserId>,
) -> PrefResult<()> {
	sqlx::query(
		"DELETE FROM user_preferences WHERE user_id = ?2
		 AND pref_id IN (SELECT pref_id FROM preferences WHERE key = ?1)",
	)
	.bind(key)
	.bind(user_key(user_id))
	.execute(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;
	Ok(())
}

/// Users currently holding a per-user override on this definition
pub(crate) async fn list_users(db: &SqlitePool, key: &str) -> PrefResult<Vec<UserId>> {
	let rows = sqlx::query(
		"SELECT up.user_id FROM user_preferences up
		 JOIN preferences p ON p.pref_id = up.pref_id
		 WHERE p.key = ?1 AND up.user_id != ?2
		 ORDER BY up.user_id",
	)
	.bind(key)
	.bind(GLOBAL_USER)
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	let mut users = Vec::with_capacity(rows.len());
	for row in &rows {
		let user_id: i64 =
			row.try_get("user_id").inspect_err(inspect).map_err(|_| Error::DbError)?;
		users.push(UserId(u32::try_from(user_id).map_err(|_| Error::DbError)?));
	}
	Ok(users)
}

// vim: ts=4
