//! Preference definition storage

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::utils::*;
use prefkit::prelude::*;
use prefkit::store_adapter::{CreateDefinition, DefinitionFilter, PrefDefinition, SelectOption};

const DEFINITION_COLUMNS: &str =
	"key, type, default_value, role, category, required, options, user_customizable";

fn map_definition(row: &SqliteRow) -> Result<PrefDefinition, sqlx::Error> {
	let typ: String = row.try_get("type")?;
	let typ = PrefType::try_from(typ.as_str()).map_err(|err| sqlx::Error::ColumnDecode {
		index: "type".into(),
		source: err.to_string().into(),
	})?;
	let options: Option<String> = row.try_get("options")?;
	let options = options
		.map(|raw| serde_json::from_str::<Vec<SelectOption>>(&raw))
		.transpose()
		.map_err(|err| sqlx::Error::ColumnDecode {
			index: "options".into(),
			source: Box::new(err),
		})?;

	Ok(PrefDefinition {
		key: row.try_get::<String, _>("key")?.into(),
		typ,
		default_value: row.try_get::<Option<String>, _>("default_value")?.map(Into::into),
		role: row.try_get::<Option<String>, _>("role")?.map(Into::into),
		category: row.try_get::<Option<String>, _>("category")?.map(Into::into),
		required: row.try_get("required")?,
		options,
		user_customizable: row.try_get("user_customizable")?,
	})
}

/// Read a single definition by key
pub(crate) async fn read(db: &SqlitePool, key: &str) -> PrefResult<Option<PrefDefinition>> {
	let row = sqlx::query(&format!(
		"SELECT {} FROM preferences WHERE key = ?1",
		DEFINITION_COLUMNS
	))
	.bind(key)
	.fetch_optional(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	match row {
		Some(row) => {
			Ok(Some(map_definition(&row).inspect_err(inspect).map_err(|_| Error::DbError)?))
		}
		None => Ok(None),
	}
}

/// Create a new definition. The unique key constraint maps to DuplicateKey.
pub(crate) async fn create(
	db: &SqlitePool,
	key: &str,
	data: &CreateDefinition,
) -> PrefResult<PrefDefinition> {
	let options = data
		.options
		.as_ref()
		.map(serde_json::to_string)
		.transpose()
		.map_err(|err| Error::Decode(err.to_string().into()))?;

	sqlx::query(
		"INSERT INTO preferences (key, type, default_value, role, category, required, options, user_customizable)
		 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
	)
	.bind(key)
	.bind(data.typ.as_str())
	.bind(data.default_value.as_deref())
	.bind(data.role.as_deref())
	.bind(data.category.as_deref())
	.bind(data.required)
	.bind(options)
	.bind(data.user_customizable)
	.execute(db)
	.await
	.map_err(|err| {
		if err.as_database_error().is_some_and(|db_err| db_err.is_unique_violation()) {
			Error::DuplicateKey(key.into())
		} else {
			inspect(&err);
			Error::DbError
		}
	})?;

	Ok(PrefDefinition {
		key: key.into(),
		typ: data.typ,
		default_value: data.default_value.clone(),
		role: data.role.clone(),
		category: data.category.clone(),
		required: data.required,
		options: data.options.clone(),
		user_customizable: data.user_customizable,
	})
}

/// Overwrite the stored default value
pub(crate) async fn update_default(db: &SqlitePool, key: &str, raw: &str) -> PrefResult<()> {
	let res = sqlx::query(
		"UPDATE preferences SET default_value = ?2, updated_at = unixepoch() WHERE key = ?1",
	)
	.bind(key)
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

/// Delete a definition; translations and overrides cascade
pub(crate) async fn delete(db: &SqlitePool, key: &str) -> PrefResult<()> {
	sqlx::query("DELETE FROM preferences WHERE key = ?1")
		.bind(key)
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;
	Ok(())
}

/// List definitions by role or category
pub(crate) async fn list(
	db: &SqlitePool,
	filter: &DefinitionFilter,
) -> PrefResult<Vec<PrefDefinition>> {
	let rows = match filter {
		DefinitionFilter::Role(None) => {
			sqlx::query(&format!(
				"SELECT {} FROM preferences WHERE role IS NULL ORDER BY key",
				DEFINITION_COLUMNS
			))
			.fetch_all(db)
			.await
		}
		DefinitionFilter::Role(Some(role)) => {
			sqlx::query(&format!(
				"SELECT {} FROM preferences WHERE role IS NULL OR role = ?1 ORDER BY key",
				DEFINITION_COLUMNS
			))
			.bind(&**role)
			.fetch_all(db)
			.await
		}
		DefinitionFilter::Category(category) => {
			sqlx::query(&format!(
				"SELECT {} FROM preferences WHERE category = ?1 ORDER BY key",
				DEFINITION_COLUMNS
			))
			.bind(&**category)
			.fetch_all(db)
			.await
		}
	}
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	let mut defs = Vec::with_capacity(rows.len());
	for row in &rows {
		defs.push(map_definition(row).inspect_err(inspect).map_err(|_| Error::DbError)?);
	}
	Ok(defs)
}

/// Distinct non-null categories
pub(crate) async fn categories(db: &SqlitePool) -> PrefResult<Vec<Box<str>>> {
	let rows = sqlx::query(
		"SELECT DISTINCT category FROM preferences WHERE category IS NOT NULL ORDER BY category",
	)
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	let mut categories = Vec::with_capacity(rows.len());
	for row in &rows {
		let category: String =
			row.try_get("category").inspect_err(inspect).map_err(|_| Error::DbError)?;
		categories.push(category.into());
	}
	Ok(categories)
}

// vim: ts=4
