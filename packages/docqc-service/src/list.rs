use serde::{
	Deserialize, Deserializer, Serialize,
	de::{self, Unexpected},
};

use crate::{
	Error, QcService, Result,
	filter::{self, QcFilter},
	serialize::{self, SerializedRecord},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRequest {
	pub search: Option<String>,
	#[serde(default, deserialize_with = "lenient_flag")]
	pub complete: Option<bool>,
	#[serde(default, deserialize_with = "lenient_flag")]
	pub missing: Option<bool>,
	/// Defaults to `api.default_limit`.
	pub limit: Option<u32>,
}
impl ListRequest {
	pub fn filter(&self) -> QcFilter {
		QcFilter { search: self.search.clone(), complete: self.complete, missing: self.missing }
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagInput {
	Bool(bool),
	Text(String),
}

/// Query flags arrive as text; accept the usual spellings of a boolean, not just `true`/`false`.
fn lenient_flag<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = match Option::<FlagInput>::deserialize(deserializer)? {
		None => return Ok(None),
		Some(FlagInput::Bool(value)) => return Ok(Some(value)),
		Some(FlagInput::Text(raw)) => raw,
	};

	match raw.trim().to_ascii_lowercase().as_str() {
		"true" | "1" | "yes" | "on" | "t" | "y" => Ok(Some(true)),
		"false" | "0" | "no" | "off" | "f" | "n" => Ok(Some(false)),
		_ => Err(de::Error::invalid_value(Unexpected::Str(&raw), &"a boolean")),
	}
}

impl QcService {
	pub async fn list(&self, req: ListRequest) -> Result<Vec<SerializedRecord>> {
		let max_limit = self.cfg.api.max_limit;
		let limit = req.limit.unwrap_or(self.cfg.api.default_limit);

		if !(1..=max_limit).contains(&limit) {
			return Err(Error::InvalidRequest {
				message: format!("limit must be in the range 1-{max_limit}."),
				field: Some("limit".to_string()),
			});
		}

		let predicate = filter::build_predicate(&req.filter());
		let docs = self.store()?.find(self.collection(), &predicate, limit).await?;

		tracing::debug!(?predicate, limit, returned = docs.len(), "Listed QC records.");

		Ok(docs.into_iter().map(serialize::serialize_document).collect())
	}
}
