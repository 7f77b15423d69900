use serde_json::{Map, Value};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::document::Document;

#[derive(Debug, sqlx::FromRow)]
pub struct DocumentRow {
	pub doc_key: Uuid,
	pub body: Value,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}
impl From<DocumentRow> for Document {
	fn from(row: DocumentRow) -> Self {
		let body = match row.body {
			Value::Object(body) => body,
			_ => Map::new(),
		};

		Document::from_stored(row.doc_key, row.created_at, row.updated_at, body)
	}
}
