use docqc_storage::predicate::Predicate;
use uuid::Uuid;

use crate::record::{DOCUMENT_ID, FILENAME, IS_COMPLETE, MISSING_SECTIONS};

/// Optional list filters. Each present filter narrows the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QcFilter {
	/// Case-insensitive substring of `document_id` or `filename`. Empty means no search.
	pub search: Option<String>,
	pub complete: Option<bool>,
	/// Only `Some(true)` filters; `Some(false)` adds no constraint.
	pub missing: Option<bool>,
}

pub fn build_predicate(filter: &QcFilter) -> Predicate {
	let mut clauses = Vec::new();

	if let Some(complete) = filter.complete {
		clauses.push(Predicate::field_equals(IS_COMPLETE, complete));
	}
	if filter.missing == Some(true) {
		clauses.push(Predicate::first_element_exists(MISSING_SECTIONS));
	}
	if let Some(search) = filter.search.as_deref().filter(|search| !search.is_empty()) {
		clauses.push(Predicate::Or(vec![
			Predicate::contains_insensitive(DOCUMENT_ID, search),
			Predicate::contains_insensitive(FILENAME, search),
		]));
	}

	if clauses.is_empty() { Predicate::All } else { Predicate::And(clauses) }
}

/// A string that parses as a store key looks up by key; anything else by `document_id`.
pub fn lookup_predicate(doc_id: &str) -> Predicate {
	match Uuid::parse_str(doc_id) {
		Ok(id) => Predicate::IdEquals(id),
		Err(_) => Predicate::field_equals(DOCUMENT_ID, doc_id),
	}
}
