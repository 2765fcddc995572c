//! Definition CRUD and listing tests

use prefkit::error::Error;
use prefkit::store_adapter::{
	CreateDefinition, DefinitionFilter, SelectOption, StoreAdapter, TranslationContent,
};
use prefkit::types::{PrefType, UserId};
use prefkit_store_adapter_sqlite::StoreAdapterSqlite;
use tempfile::TempDir;

async fn create_test_adapter() -> (StoreAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = StoreAdapterSqlite::new(temp_dir.path().join("prefs.db"))
		.await
		.expect("Failed to create adapter");
	(adapter, temp_dir)
}

fn string_definition(default: &str) -> CreateDefinition {
	CreateDefinition {
		typ: PrefType::String,
		default_value: Some(default.into()),
		user_customizable: true,
		..CreateDefinition::default()
	}
}

#[tokio::test]
async fn test_create_and_read_definition() {
	let (adapter, _temp) = create_test_adapter().await;

	let data = CreateDefinition {
		typ: PrefType::Select,
		default_value: Some("light".into()),
		role: None,
		category: Some("appearance".into()),
		required: true,
		options: Some(vec![
			SelectOption { value: "light".into(), label: "Light".into() },
			SelectOption { value: "dark".into(), label: "Dark".into() },
		]),
		user_customizable: true,
	};
	adapter.create_definition("theme", &data).await.expect("Should create definition");

	let def = adapter
		.read_definition("theme")
		.await
		.expect("Should read definition")
		.expect("Definition should exist");
	assert_eq!(&*def.key, "theme");
	assert_eq!(def.typ, PrefType::Select);
	assert_eq!(def.default_value.as_deref(), Some("light"));
	assert_eq!(def.category.as_deref(), Some("appearance"));
	assert!(def.required);
	assert!(def.user_customizable);
	// Option order survives the JSON round trip
	let options = def.options.expect("Options should be present");
	assert_eq!(&*options[0].value, "light");
	assert_eq!(&*options[1].label, "Dark");
}

#[tokio::test]
async fn test_read_missing_definition() {
	let (adapter, _temp) = create_test_adapter().await;

	let result = adapter.read_definition("missing").await.expect("Read should not error");
	assert!(result.is_none());
}

#[tokio::test]
async fn test_duplicate_key_rejected() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.create_definition("theme", &string_definition("light"))
		.await
		.expect("First create should succeed");
	let err = adapter
		.create_definition("theme", &string_definition("dark"))
		.await
		.expect_err("Second create should fail");
	assert!(matches!(err, Error::DuplicateKey(_)));
}

#[tokio::test]
async fn test_update_default() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.create_definition("theme", &string_definition("light"))
		.await
		.expect("Should create definition");
	adapter.update_default("theme", "dark").await.expect("Should update default");

	let def = adapter.read_definition("theme").await.expect("read").expect("exists");
	assert_eq!(def.default_value.as_deref(), Some("dark"));

	let err = adapter.update_default("missing", "x").await.expect_err("Missing key should fail");
	assert!(matches!(err, Error::NotFound));
}

#[tokio::test]
async fn test_delete_cascades() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.create_definition("theme", &string_definition("light"))
		.await
		.expect("Should create definition");
	adapter.put_override("theme", Some(UserId(1)), "dark").await.expect("Should put override");
	adapter
		.put_translation(
			"theme",
			"en",
			&TranslationContent { title: "Theme".into(), text: "".into() },
		)
		.await
		.expect("Should put translation");

	adapter.delete_definition("theme").await.expect("Should delete definition");

	assert!(adapter.read_definition("theme").await.expect("read").is_none());
	assert!(adapter.read_override("theme", Some(UserId(1))).await.expect("read").is_none());
	assert!(adapter.read_translation("theme", "en").await.expect("read").is_none());
}

#[tokio::test]
async fn test_list_by_role() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.create_definition("site_name", &string_definition("My Site"))
		.await
		.expect("create");
	let admin_only = CreateDefinition {
		role: Some("admin".into()),
		..string_definition("x")
	};
	adapter.create_definition("admin_panel", &admin_only).await.expect("create");
	let editor_only = CreateDefinition {
		role: Some("editor".into()),
		..string_definition("x")
	};
	adapter.create_definition("editor_toolbar", &editor_only).await.expect("create");

	// No role: only role-less definitions
	let defs = adapter
		.list_definitions(&DefinitionFilter::Role(None))
		.await
		.expect("Should list definitions");
	assert_eq!(defs.len(), 1);
	assert_eq!(&*defs[0].key, "site_name");

	// A role sees role-less definitions plus its own
	let defs = adapter
		.list_definitions(&DefinitionFilter::Role(Some("admin".into())))
		.await
		.expect("Should list definitions");
	let keys: Vec<&str> = defs.iter().map(|def| &*def.key).collect();
	assert_eq!(keys, vec!["admin_panel", "site_name"]);
}

#[tokio::test]
async fn test_list_by_category() {
	let (adapter, _temp) = create_test_adapter().await;

	let general = CreateDefinition {
		category: Some("general".into()),
		..string_definition("x")
	};
	let mail = CreateDefinition {
		category: Some("mail".into()),
		..string_definition("x")
	};
	adapter.create_definition("site_name", &general).await.expect("create");
	adapter.create_definition("tagline", &general).await.expect("create");
	adapter.create_definition("smtp_host", &mail).await.expect("create");

	let defs = adapter
		.list_definitions(&DefinitionFilter::Category("general".into()))
		.await
		.expect("Should list definitions");
	assert_eq!(defs.len(), 2);
}

#[tokio::test]
async fn test_list_categories_distinct_sorted() {
	let (adapter, _temp) = create_test_adapter().await;

	let general = CreateDefinition {
		category: Some("general".into()),
		..string_definition("x")
	};
	let mail = CreateDefinition {
		category: Some("mail".into()),
		..string_definition("x")
	};
	adapter.create_definition("a", &mail).await.expect("create");
	adapter.create_definition("b", &general).await.expect("create");
	adapter.create_definition("c", &general).await.expect("create");
	adapter.create_definition("d", &string_definition("x")).await.expect("create");

	let categories = adapter.list_categories().await.expect("Should list categories");
	assert_eq!(categories, vec!["general".into(), "mail".into()]);
}

// vim: ts=4
