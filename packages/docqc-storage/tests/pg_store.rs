use serde_json::{Map, Value, json};

use docqc_storage::{db::Db, postgres::PgStore, predicate::Predicate, store::DocumentStore};
use docqc_testkit::TestDatabase;

fn body(value: Value) -> Map<String, Value> {
	match value {
		Value::Object(map) => map,
		_ => panic!("Test body must be an object."),
	}
}

async fn test_store() -> Option<(TestDatabase, PgStore)> {
	let Some(test_db) = TestDatabase::from_env().await.expect("Failed to create test database.")
	else {
		eprintln!("Skipping Postgres store tests; set DOCQC_PG_DSN to run this test.");

		return None;
	};
	let db = Db::connect(&test_db.postgres_config()).await.expect("Failed to connect to Postgres.");

	Some((test_db, PgStore::new(db)))
}

async fn documents_table_count(store: &PgStore) -> i64 {
	sqlx::query_scalar(
		"SELECT count(*) FROM information_schema.tables WHERE table_name = 'documents'",
	)
	.fetch_one(&store.db().pool)
	.await
	.expect("Failed to query schema tables.")
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set DOCQC_PG_DSN to run."]
async fn schema_bootstrap_is_idempotent() {
	let Some((test_db, store)) = test_store().await else {
		return;
	};

	store.ensure_ready().await.expect("Failed to ensure schema.");
	store.db().ensure_schema().await.expect("Failed to re-run schema.");

	assert_eq!(documents_table_count(&store).await, 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set DOCQC_PG_DSN to run."]
async fn schema_is_created_on_first_store_use() {
	let Some((test_db, store)) = test_store().await else {
		return;
	};

	assert_eq!(documents_table_count(&store).await, 0);

	store
		.insert("documentqc", body(json!({ "document_id": "late" })))
		.await
		.expect("Failed to insert after a deferred bootstrap.");

	assert_eq!(documents_table_count(&store).await, 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set DOCQC_PG_DSN to run."]
async fn predicates_filter_like_the_memory_store() {
	let Some((test_db, store)) = test_store().await else {
		return;
	};

	for item in [
		json!({ "document_id": "INV-100", "filename": "invoice.pdf", "missing_sections": ["totals"], "is_complete": false }),
		json!({ "document_id": "inv-200", "filename": null, "missing_sections": [], "is_complete": true }),
		json!({ "document_id": "rpt_1", "filename": "100%_report.pdf", "missing_sections": null, "is_complete": true }),
		json!({ "document_id": "num-1", "filename": 100, "missing_sections": [], "is_complete": false }),
	] {
		store.insert("documentqc", body(item)).await.expect("Failed to insert.");
	}

	let missing = store
		.find("documentqc", &Predicate::first_element_exists("missing_sections"), 10)
		.await
		.expect("Failed to query.");

	assert_eq!(missing.len(), 1);
	assert_eq!(missing[0].json("document_id"), Some(&json!("INV-100")));

	let search = Predicate::Or(vec![
		Predicate::contains_insensitive("document_id", "inv"),
		Predicate::contains_insensitive("filename", "inv"),
	]);
	let found = store.find("documentqc", &search, 10).await.expect("Failed to query.");

	assert_eq!(found.len(), 2);

	let literal = store
		.find("documentqc", &Predicate::contains_insensitive("filename", "100%_"), 10)
		.await
		.expect("Failed to query.");

	assert_eq!(literal.len(), 1);

	let textual = store
		.find("documentqc", &Predicate::contains_insensitive("filename", "10"), 10)
		.await
		.expect("Failed to query.");

	assert_eq!(textual.len(), 1);
	assert_eq!(textual[0].json("document_id"), Some(&json!("rpt_1")));

	let complete = store
		.find("documentqc", &Predicate::field_equals("is_complete", true), 10)
		.await
		.expect("Failed to query.");

	assert_eq!(complete.len(), 2);

	let limited = store.find("documentqc", &Predicate::All, 1).await.expect("Failed to query.");

	assert_eq!(limited[0].json("document_id"), Some(&json!("INV-100")));
	assert_eq!(
		store.list_collections().await.expect("Failed to list."),
		vec!["documentqc".to_string()]
	);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set DOCQC_PG_DSN to run."]
async fn find_one_by_id() {
	let Some((test_db, store)) = test_store().await else {
		return;
	};
	let id = store
		.insert("documentqc", body(json!({ "document_id": "d1" })))
		.await
		.expect("Failed to insert.");
	let doc = store
		.find_one("documentqc", &Predicate::IdEquals(id))
		.await
		.expect("Failed to query.")
		.expect("Expected the inserted document.");

	assert_eq!(doc.id(), Some(id));
	assert!(
		store
			.find_one("documentqc", &Predicate::IdEquals(uuid::Uuid::new_v4()))
			.await
			.expect("Failed to query.")
			.is_none()
	);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
