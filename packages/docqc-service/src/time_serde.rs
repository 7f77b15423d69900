use serde::Serializer;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// RFC 3339 rendering, falling back to `Display` for values RFC 3339 cannot express.
pub fn format(value: &OffsetDateTime) -> String {
	value.format(&Rfc3339).unwrap_or_else(|_| value.to_string())
}

pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	serializer.serialize_str(&format(value))
}
