use docqc_storage::document::{Document, FieldValue};
use serde_json::{Map, Value};

use crate::time_serde;

/// A stored record flattened to plain JSON.
pub type SerializedRecord = Map<String, Value>;

/// Store keys become their hyphenated string form and timestamps RFC 3339 strings. Everything
/// else passes through.
pub fn serialize_document(doc: Document) -> SerializedRecord {
	doc.into_iter().map(|(key, value)| (key, serialize_value(value))).collect()
}

fn serialize_value(value: FieldValue) -> Value {
	match value {
		FieldValue::Id(id) => Value::String(id.to_string()),
		FieldValue::Timestamp(ts) => Value::String(time_serde::format(&ts)),
		FieldValue::Json(value) => value,
	}
}
