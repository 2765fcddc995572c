//! Translation storage tests

use prefkit::error::Error;
use prefkit::store_adapter::{CreateDefinition, StoreAdapter, TranslationContent};
use prefkit::types::PrefType;
use prefkit_store_adapter_sqlite::StoreAdapterSqlite;
use tempfile::TempDir;

async fn adapter_with_definition(key: &str) -> (StoreAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = StoreAdapterSqlite::new(temp_dir.path().join("prefs.db"))
		.await
		.expect("Failed to create adapter");
	let data = CreateDefinition {
		typ: PrefType::Boolean,
		default_value: Some("1".into()),
		..CreateDefinition::default()
	};
	adapter.create_definition(key, &data).await.expect("Should create definition");
	(adapter, temp_dir)
}

#[tokio::test]
async fn test_put_and_read_translation() {
	let (adapter, _temp) = adapter_with_definition("notifications").await;

	let content =
		TranslationContent { title: "Notifications".into(), text: "Email notifications".into() };
	adapter.put_translation("notifications", "en", &content).await.expect("Should put");

	let read = adapter
		.read_translation("notifications", "en")
		.await
		.expect("Should read")
		.expect("Translation should exist");
	assert_eq!(read, content);

	assert!(adapter.read_translation("notifications", "fr").await.expect("read").is_none());
}

#[tokio::test]
async fn test_put_translation_upserts() {
	let (adapter, _temp) = adapter_with_definition("notifications").await;

	let first = TranslationContent { title: "Old title".into(), text: "".into() };
	let second = TranslationContent { title: "New title".into(), text: "With text".into() };
	adapter.put_translation("notifications", "en", &first).await.expect("put");
	adapter.put_translation("notifications", "en", &second).await.expect("put again");

	let read = adapter
		.read_translation("notifications", "en")
		.await
		.expect("Should read")
		.expect("Translation should exist");
	assert_eq!(read, second);
}

#[tokio::test]
async fn test_put_translation_requires_definition() {
	let (adapter, _temp) = adapter_with_definition("notifications").await;

	let content = TranslationContent { title: "Ghost".into(), text: "".into() };
	let err = adapter
		.put_translation("missing", "en", &content)
		.await
		.expect_err("Missing definition should fail");
	assert!(matches!(err, Error::NotFound));
}

#[tokio::test]
async fn test_translations_isolated_per_locale() {
	let (adapter, _temp) = adapter_with_definition("notifications").await;

	let en = TranslationContent { title: "Notifications".into(), text: "".into() };
	let ca = TranslationContent { title: "Notificacions".into(), text: "".into() };
	adapter.put_translation("notifications", "en", &en).await.expect("put");
	adapter.put_translation("notifications", "ca", &ca).await.expect("put");

	assert_eq!(
		adapter.read_translation("notifications", "en").await.expect("read"),
		Some(en)
	);
	assert_eq!(
		adapter.read_translation("notifications", "ca").await.expect("read"),
		Some(ca)
	);
}

// vim: ts=4
