//! Override row storage tests
//!
//! The global override row and per-user rows share one table; the upsert
//! must be atomic on the (definition, user) pair.

use prefkit::error::Error;
use prefkit::store_adapter::{CreateDefinition, StoreAdapter};
use prefkit::types::{PrefType, UserId};
use prefkit_store_adapter_sqlite::StoreAdapterSqlite;
use tempfile::TempDir;

async fn adapter_with_definition(key: &str) -> (StoreAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = StoreAdapterSqlite::new(temp_dir.path().join("prefs.db"))
		.await
		.expect("Failed to create adapter");
	let data = CreateDefinition {
		typ: PrefType::String,
		default_value: Some("default".into()),
		user_customizable: true,
		..CreateDefinition::default()
	};
	adapter.create_definition(key, &data).await.expect("Should create definition");
	(adapter, temp_dir)
}

#[tokio::test]
async fn test_put_and_read_override() {
	let (adapter, _temp) = adapter_with_definition("theme").await;

	adapter.put_override("theme", Some(UserId(1)), "dark").await.expect("Should put override");

	let value = adapter.read_override("theme", Some(UserId(1))).await.expect("read");
	assert_eq!(value.as_deref(), Some("dark"));

	// Other users and the global row are unaffected
	assert!(adapter.read_override("theme", Some(UserId(2))).await.expect("read").is_none());
	assert!(adapter.read_override("theme", None).await.expect("read").is_none());
}

#[tokio::test]
async fn test_global_row_distinct_from_user_rows() {
	let (adapter, _temp) = adapter_with_definition("motd").await;

	adapter.put_override("motd", None, "global value").await.expect("Should put global row");
	adapter.put_override("motd", Some(UserId(7)), "user value").await.expect("Should put user row");

	assert_eq!(
		adapter.read_override("motd", None).await.expect("read").as_deref(),
		Some("global value")
	);
	assert_eq!(
		adapter.read_override("motd", Some(UserId(7))).await.expect("read").as_deref(),
		Some("user value")
	);
}

#[tokio::test]
async fn test_upsert_updates_in_place() {
	let (adapter, _temp) = adapter_with_definition("theme").await;

	adapter.put_override("theme", Some(UserId(1)), "dark").await.expect("put");
	adapter.put_override("theme", Some(UserId(1)), "solarized").await.expect("put again");

	assert_eq!(
		adapter.read_override("theme", Some(UserId(1))).await.expect("read").as_deref(),
		Some("solarized")
	);
	// Still a single row for this user
	let users = adapter.list_override_users("theme").await.expect("Should list users");
	assert_eq!(users, vec![UserId(1)]);
}

#[tokio::test]
async fn test_put_override_requires_definition() {
	let (adapter, _temp) = adapter_with_definition("theme").await;

	let err = adapter
		.put_override("missing", Some(UserId(1)), "x")
		.await
		.expect_err("Missing definition should fail");
	assert!(matches!(err, Error::NotFound));
}

#[tokio::test]
async fn test_delete_override_idempotent() {
	let (adapter, _temp) = adapter_with_definition("theme").await;

	adapter.put_override("theme", Some(UserId(1)), "dark").await.expect("put");
	adapter.delete_override("theme", Some(UserId(1))).await.expect("Should delete");
	assert!(adapter.read_override("theme", Some(UserId(1))).await.expect("read").is_none());

	// Deleting again is a no-op, as is deleting on a missing key
	adapter.delete_override("theme", Some(UserId(1))).await.expect("Should be a no-op");
	adapter.delete_override("missing", None).await.expect("Should be a no-op");
}

#[tokio::test]
async fn test_list_override_users_excludes_global_row() {
	let (adapter, _temp) = adapter_with_definition("theme").await;

	adapter.put_override("theme", None, "global").await.expect("put");
	adapter.put_override("theme", Some(UserId(3)), "a").await.expect("put");
	adapter.put_override("theme", Some(UserId(1)), "b").await.expect("put");

	let users = adapter.list_override_users("theme").await.expect("Should list users");
	assert_eq!(users, vec![UserId(1), UserId(3)]);
}

// vim: ts=4
