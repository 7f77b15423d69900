use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

pub const DOCUMENT_ID: &str = "document_id";
pub const FILENAME: &str = "filename";
pub const MISSING_SECTIONS: &str = "missing_sections";
pub const IS_COMPLETE: &str = "is_complete";

pub const QC_SCORE_MIN: f64 = 0.0;
pub const QC_SCORE_MAX: f64 = 100.0;

/// One document quality-check result.
///
/// `document_id` is caller supplied and not unique; the store assigns its own key on insert.
/// Unknown input fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QcRecord {
	pub document_id: String,
	pub filename: Option<String>,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub sections_expected: Vec<String>,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub sections_found: Vec<String>,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub missing_sections: Vec<String>,
	pub is_complete: Option<bool>,
	pub qc_score: Option<f64>,
	pub notes: Option<String>,
}
impl QcRecord {
	/// Checks the constraints serde cannot express. `field_prefix` locates the record in the
	/// request, e.g. `items[3]`.
	pub fn validate(&self, field_prefix: &str) -> Result<()> {
		if let Some(score) = self.qc_score
			&& !(score.is_finite() && (QC_SCORE_MIN..=QC_SCORE_MAX).contains(&score))
		{
			return Err(Error::InvalidRequest {
				message: format!("qc_score must be in the range {QC_SCORE_MIN}-{QC_SCORE_MAX}."),
				field: Some(format!("{field_prefix}.qc_score")),
			});
		}

		Ok(())
	}

	/// Body stored for this record. Absent optional scalars are kept as `null`.
	pub fn into_body(self) -> Result<Map<String, Value>> {
		match serde_json::to_value(self) {
			Ok(Value::Object(body)) => Ok(body),
			Ok(_) => Err(Error::InvalidRequest {
				message: "QC record did not encode to an object.".to_string(),
				field: None,
			}),
			Err(err) => Err(Error::InvalidRequest {
				message: format!("QC record could not be encoded: {err}."),
				field: None,
			}),
		}
	}
}

/// Fills `is_complete` from `missing_sections` when the caller left it out. An explicit value is
/// kept as given, even when it disagrees with `missing_sections`.
pub fn resolve_completeness(record: &mut QcRecord) {
	if record.is_complete.is_none() {
		record.is_complete = Some(record.missing_sections.is_empty());
	}
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
