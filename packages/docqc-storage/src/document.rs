use std::collections::{BTreeMap, btree_map};

use serde_json::{Map, Value};
use time::OffsetDateTime;
use uuid::Uuid;

pub const ID_FIELD: &str = "_id";
pub const CREATED_AT_FIELD: &str = "created_at";
pub const UPDATED_AT_FIELD: &str = "updated_at";

/// Field names the store stamps on every document. Callers may not supply them.
pub const RESERVED_FIELDS: [&str; 3] = [ID_FIELD, CREATED_AT_FIELD, UPDATED_AT_FIELD];

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
	Id(Uuid),
	Timestamp(OffsetDateTime),
	Json(Value),
}

/// A stored document as returned by a [`crate::store::DocumentStore`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
	fields: BTreeMap<String, FieldValue>,
}
impl Document {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_stored(
		id: Uuid,
		created_at: OffsetDateTime,
		updated_at: OffsetDateTime,
		body: Map<String, Value>,
	) -> Self {
		let mut doc = Self::new();

		for (key, value) in body {
			doc.insert(key, FieldValue::Json(value));
		}

		doc.insert(ID_FIELD, FieldValue::Id(id));
		doc.insert(CREATED_AT_FIELD, FieldValue::Timestamp(created_at));
		doc.insert(UPDATED_AT_FIELD, FieldValue::Timestamp(updated_at));

		doc
	}

	pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
		self.fields.insert(key.into(), value)
	}

	/// Returns a caller-supplied field, skipping store-managed values.
	pub fn json(&self, key: &str) -> Option<&Value> {
		match self.fields.get(key) {
			Some(FieldValue::Json(value)) => Some(value),
			_ => None,
		}
	}

	pub fn id(&self) -> Option<Uuid> {
		match self.fields.get(ID_FIELD) {
			Some(FieldValue::Id(id)) => Some(*id),
			_ => None,
		}
	}
}
impl IntoIterator for Document {
	type IntoIter = btree_map::IntoIter<String, FieldValue>;
	type Item = (String, FieldValue);

	fn into_iter(self) -> Self::IntoIter {
		self.fields.into_iter()
	}
}

pub(crate) fn check_reserved(body: &Map<String, Value>) -> crate::Result<()> {
	if let Some(key) = RESERVED_FIELDS.iter().find(|key| body.contains_key(**key)) {
		return Err(crate::Error::InvalidArgument(format!(
			"Field {key:?} is managed by the store."
		)));
	}

	Ok(())
}
