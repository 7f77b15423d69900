use std::sync::Arc;

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use docqc_api::{routes, state::AppState};
use docqc_config::{Backend, Config};
use docqc_storage::memory::MemoryStore;

fn test_config() -> Config {
	let mut cfg = Config::default();

	cfg.service.http_bind = "127.0.0.1:0".to_string();
	cfg.storage.backend = Backend::Memory;

	cfg
}

fn memory_app() -> Router {
	let state = AppState::with_store(test_config(), Some(Arc::new(MemoryStore::new())));

	routes::router(state)
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
	let response = app.clone().oneshot(request).await.expect("Failed to call router.");
	let status = response.status();
	let body = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json = if body.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&body).expect("Failed to parse response.")
	};

	(status, json)
}

fn get(uri: &str) -> Request<Body> {
	Request::builder().uri(uri).body(Body::empty()).expect("Failed to build request.")
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
	Request::builder()
		.method("POST")
		.uri(uri)
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(payload.to_string()))
		.expect("Failed to build request.")
}

async fn import(app: &Router, items: Value) -> Value {
	let (status, json) = call(app, post_json("/api/qc/bulk", &json!({ "items": items }))).await;

	assert_eq!(status, StatusCode::OK, "import failed: {json}");

	json
}

#[tokio::test]
async fn root_reports_liveness() {
	let app = memory_app();
	let (status, json) = call(&app, get("/")).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["message"], "Document QC API is running");
}

#[tokio::test]
async fn bulk_import_returns_ids_and_derives_completeness() {
	let app = memory_app();
	let json = import(
		&app,
		json!([
			{ "document_id": "d1", "missing_sections": ["intro"] },
			{ "document_id": "d2", "missing_sections": [] },
		]),
	)
	.await;

	assert_eq!(json["inserted"], 2);
	assert_eq!(json["ids"].as_array().map(Vec::len), Some(2));

	let (status, d1) = call(&app, get("/api/qc/d1")).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(d1["is_complete"], false);

	let (_, d2) = call(&app, get("/api/qc/d2")).await;

	assert_eq!(d2["is_complete"], true);
}

#[tokio::test]
async fn record_fetched_by_store_key() {
	let app = memory_app();
	let json = import(&app, json!([{ "document_id": "d1", "filename": "a.pdf" }])).await;
	let id = json["ids"][0].as_str().expect("Expected a string id.").to_string();
	let (status, record) = call(&app, get(&format!("/api/qc/{id}"))).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(record["_id"], id);
	assert_eq!(record["filename"], "a.pdf");
	assert!(record["created_at"].is_string());
}

#[tokio::test]
async fn unknown_record_is_not_found() {
	let app = memory_app();
	let (status, json) = call(&app, get(&format!("/api/qc/{}", uuid::Uuid::new_v4()))).await;

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(json["error_code"], "NOT_FOUND");

	let (status, _) = call(&app, get("/api/qc/no-such-document")).await;

	assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn record_named_bulk_is_fetched_by_document_id() {
	let app = memory_app();

	import(&app, json!([{ "document_id": "bulk", "filename": "bulk.pdf" }])).await;

	let (status, record) = call(&app, get("/api/qc/bulk")).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(record["document_id"], "bulk");
	assert_eq!(record["filename"], "bulk.pdf");
}

#[tokio::test]
async fn bulk_path_lookup_misses_like_any_other_id() {
	let app = memory_app();
	let (status, json) = call(&app, get("/api/qc/bulk")).await;

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(json["message"], "Document not found.");
}

#[tokio::test]
async fn unmatched_requests_get_json_errors() {
	let app = memory_app();
	let (status, json) = call(&app, get("/api/nothing-here")).await;

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(json["error_code"], "NOT_FOUND");

	let delete = Request::builder()
		.method("DELETE")
		.uri("/api/qc")
		.body(Body::empty())
		.expect("Failed to build request.");
	let (status, json) = call(&app, delete).await;

	assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
	assert_eq!(json["error_code"], "METHOD_NOT_ALLOWED");
	assert!(json["message"].is_string());
}

#[tokio::test]
async fn list_filters_by_query_parameters() {
	let app = memory_app();

	import(
		&app,
		json!([
			{ "document_id": "INV-1", "filename": "invoice.pdf", "missing_sections": ["totals"] },
			{ "document_id": "RPT-2", "filename": "report.pdf" },
			{ "document_id": "rpt-3", "filename": "Invoice-copy.pdf", "is_complete": false },
		]),
	)
	.await;

	let ids = |json: &Value| {
		json.as_array()
			.expect("Expected an array.")
			.iter()
			.map(|record| record["document_id"].as_str().unwrap_or_default().to_string())
			.collect::<Vec<_>>()
	};
	let (status, json) = call(&app, get("/api/qc?missing=true")).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(ids(&json), vec!["INV-1"]);

	let (_, json) = call(&app, get("/api/qc?search=INVOICE")).await;

	assert_eq!(ids(&json), vec!["INV-1", "rpt-3"]);

	let (_, json) = call(&app, get("/api/qc?search=rpt&complete=false")).await;

	assert_eq!(ids(&json), vec!["rpt-3"]);

	let (_, json) = call(&app, get("/api/qc?limit=2")).await;

	assert_eq!(ids(&json), vec!["INV-1", "RPT-2"]);

	let (_, json) = call(&app, get("/api/qc?search=")).await;

	assert_eq!(ids(&json).len(), 3);

	let (status, json) = call(&app, get("/api/qc?complete=0")).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(ids(&json), vec!["INV-1", "rpt-3"]);

	let (_, json) = call(&app, get("/api/qc?missing=yes&complete=off")).await;

	assert_eq!(ids(&json), vec!["INV-1"]);
}

#[tokio::test]
async fn list_rejects_out_of_range_limit() {
	let app = memory_app();
	let (status, json) = call(&app, get("/api/qc?limit=1001")).await;

	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(json["error_code"], "INVALID_REQUEST");
	assert_eq!(json["fields"][0], "limit");

	let (status, json) = call(&app, get("/api/qc?complete=perhaps")).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error_code"], "BAD_QUERY");
}

#[tokio::test]
async fn bulk_import_rejects_invalid_items() {
	let app = memory_app();
	let (status, json) = call(
		&app,
		post_json("/api/qc/bulk", &json!({ "items": [{ "document_id": "d1", "qc_score": 101 }] })),
	)
	.await;

	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(json["fields"][0], "items[0].qc_score");

	let (status, json) =
		call(&app, post_json("/api/qc/bulk", &json!({ "items": [{ "filename": "a.pdf" }] }))).await;

	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(json["error_code"], "BAD_REQUEST_BODY");

	let (_, listed) = call(&app, get("/api/qc")).await;

	assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn diagnostics_reports_store_state() {
	let app = memory_app();
	let (status, json) = call(&app, get("/test")).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["backend"], "running");
	assert_eq!(json["database"]["state"], "working");
	assert_eq!(json["connection_status"], "connected");
	assert!(json["database_url"] == "set" || json["database_url"] == "not_set");

	let unconfigured = routes::router(AppState::with_store(test_config(), None));
	let (status, json) = call(&unconfigured, get("/test")).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["database"]["state"], "not_configured");
	assert_eq!(json["connection_status"], "not_connected");

	let (status, json) = call(&unconfigured, get("/api/qc")).await;

	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
	assert_eq!(json["error_code"], "STORE_UNAVAILABLE");
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
	let app = memory_app();
	let response = app
		.oneshot(
			Request::builder()
				.uri("/")
				.header(header::ORIGIN, "https://viewer.example.com")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call router.");

	assert_eq!(
		response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).map(|value| value.as_bytes()),
		Some(b"*".as_slice())
	);
}
