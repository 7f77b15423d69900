use axum::{
	Json, Router,
	extract::{
		Path, Query, State,
		rejection::{JsonRejection, QueryRejection},
	},
	http::{HeaderValue, Method, StatusCode, header},
	response::{IntoResponse, Response},
	routing::get,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use docqc_service::{
	BulkImportRequest, BulkImportResponse, DiagnosticsReport, Error as ServiceError, ListRequest,
	SerializedRecord,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	let cors = cors_layer(&state.service.cfg.service.cors_allowed_origins);

	Router::new()
		.route("/", get(root))
		.route("/test", get(diagnostics))
		.route("/api/qc", get(list))
		.route("/api/qc/bulk", get(get_bulk_record).post(import_bulk))
		.route("/api/qc/{doc_id}", get(get_record))
		.fallback(route_not_found)
		.method_not_allowed_fallback(method_not_allowed)
		.layer(cors)
		.with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
	if origins.iter().any(|origin| origin.trim() == "*") {
		return CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
	}

	let mut parsed = Vec::new();

	for origin in origins {
		match HeaderValue::from_str(origin.trim()) {
			Ok(value) => parsed.push(value),
			Err(err) => tracing::warn!(%origin, error = %err, "Ignoring invalid CORS origin."),
		}
	}

	CorsLayer::new()
		.allow_origin(parsed)
		.allow_methods([Method::GET, Method::POST])
		.allow_headers([header::CONTENT_TYPE])
}

#[derive(Debug, Serialize)]
struct RootMessage {
	message: &'static str,
}

async fn root() -> Json<RootMessage> {
	Json(RootMessage { message: "Document QC API is running" })
}

async fn import_bulk(
	State(state): State<AppState>,
	payload: Result<Json<BulkImportRequest>, JsonRejection>,
) -> Result<Json<BulkImportResponse>, ApiError> {
	let Json(payload) = payload?;
	let response = state.service.import_bulk(payload).await?;

	Ok(Json(response))
}

async fn list(
	State(state): State<AppState>,
	query: Result<Query<ListRequest>, QueryRejection>,
) -> Result<Json<Vec<SerializedRecord>>, ApiError> {
	let Query(query) = query?;
	let response = state.service.list(query).await?;

	Ok(Json(response))
}

async fn get_record(
	State(state): State<AppState>,
	Path(doc_id): Path<String>,
) -> Result<Json<SerializedRecord>, ApiError> {
	let response = state.service.get(&doc_id).await?;

	Ok(Json(response))
}

// The static import route shadows `{doc_id}` for `GET`; a record whose `document_id` is "bulk"
// is still fetched here.
async fn get_bulk_record(
	State(state): State<AppState>,
) -> Result<Json<SerializedRecord>, ApiError> {
	let response = state.service.get("bulk").await?;

	Ok(Json(response))
}

async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsReport> {
	Json(state.service.diagnostics().await)
}

async fn route_not_found() -> ApiError {
	ApiError::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Route not found.", None)
}

async fn method_not_allowed() -> ApiError {
	ApiError::new(
		StatusCode::METHOD_NOT_ALLOWED,
		"METHOD_NOT_ALLOWED",
		"Method not allowed for this route.",
		None,
	)
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message, field } => ApiError::new(
				StatusCode::UNPROCESSABLE_ENTITY,
				"INVALID_REQUEST",
				message,
				field.map(|field| vec![field]),
			),
			ServiceError::NotFound { message } =>
				ApiError::new(StatusCode::NOT_FOUND, "NOT_FOUND", message, None),
			ServiceError::StoreUnavailable { message } =>
				ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE", message, None),
			ServiceError::Storage { message } => {
				tracing::error!(%message, "Document store request failed.");

				ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", message, None)
			},
		}
	}
}

impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		ApiError::new(rejection.status(), "BAD_REQUEST_BODY", rejection.body_text(), None)
	}
}

impl From<QueryRejection> for ApiError {
	fn from(rejection: QueryRejection) -> Self {
		ApiError::new(rejection.status(), "BAD_QUERY", rejection.body_text(), None)
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}
