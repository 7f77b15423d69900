use crate::{
	Error, QcService, Result, filter,
	serialize::{self, SerializedRecord},
};

impl QcService {
	/// Looks a record up by store key when `doc_id` parses as one, otherwise by `document_id`.
	/// When several records share a `document_id` the earliest inserted wins.
	pub async fn get(&self, doc_id: &str) -> Result<SerializedRecord> {
		let predicate = filter::lookup_predicate(doc_id);
		let doc = self
			.store()?
			.find_one(self.collection(), &predicate)
			.await?
			.ok_or_else(|| Error::NotFound { message: "Document not found.".to_string() })?;

		Ok(serialize::serialize_document(doc))
	}
}
