use serde_json::Value;
use uuid::Uuid;

use crate::document::Document;

/// Structured query condition understood by every [`crate::store::DocumentStore`].
///
/// Field names refer to caller-supplied body fields. Store-managed fields are reached through
/// dedicated variants such as [`Predicate::IdEquals`].
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
	All,
	IdEquals(Uuid),
	FieldEquals { field: String, value: Value },
	/// True when the field is an array holding an element at index 0. Absent, null, non-array
	/// and empty values all fail.
	FirstElementExists { field: String },
	/// Literal, case-insensitive substring match on string fields.
	ContainsInsensitive { field: String, needle: String },
	/// Empty conjunction matches everything.
	And(Vec<Predicate>),
	/// Empty disjunction matches nothing.
	Or(Vec<Predicate>),
}
impl Predicate {
	pub fn field_equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::FieldEquals { field: field.into(), value: value.into() }
	}

	pub fn first_element_exists(field: impl Into<String>) -> Self {
		Self::FirstElementExists { field: field.into() }
	}

	pub fn contains_insensitive(field: impl Into<String>, needle: impl Into<String>) -> Self {
		Self::ContainsInsensitive { field: field.into(), needle: needle.into() }
	}

	pub fn matches(&self, doc: &Document) -> bool {
		match self {
			Self::All => true,
			Self::IdEquals(id) => doc.id() == Some(*id),
			Self::FieldEquals { field, value } => doc.json(field) == Some(value),
			Self::FirstElementExists { field } =>
				matches!(doc.json(field), Some(Value::Array(items)) if !items.is_empty()),
			Self::ContainsInsensitive { field, needle } => match doc.json(field) {
				Some(Value::String(text)) =>
					text.to_lowercase().contains(needle.to_lowercase().as_str()),
				_ => false,
			},
			Self::And(parts) => parts.iter().all(|part| part.matches(doc)),
			Self::Or(parts) => parts.iter().any(|part| part.matches(doc)),
		}
	}
}
