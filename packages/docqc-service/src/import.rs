use crate::{
	QcService, Result,
	record::{self, QcRecord},
};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BulkImportRequest {
	pub items: Vec<QcRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BulkImportResponse {
	pub inserted: usize,
	pub ids: Vec<String>,
}

impl QcService {
	/// Validates every item up front, then inserts them one by one. Inserts are not transactional:
	/// a store failure leaves earlier items committed.
	pub async fn import_bulk(&self, req: BulkImportRequest) -> Result<BulkImportResponse> {
		for (idx, item) in req.items.iter().enumerate() {
			item.validate(&format!("items[{idx}]"))?;
		}

		let store = self.store()?;
		let collection = self.collection();
		let mut ids = Vec::with_capacity(req.items.len());

		for mut item in req.items {
			record::resolve_completeness(&mut item);

			let id = match store.insert(collection, item.into_body()?).await {
				Ok(id) => id,
				Err(err) => {
					tracing::error!(
						collection,
						committed = ids.len(),
						error = %err,
						"Bulk import stopped on store failure."
					);

					return Err(err.into());
				},
			};

			ids.push(id.to_string());
		}

		tracing::info!(collection, inserted = ids.len(), "Bulk import completed.");

		Ok(BulkImportResponse { inserted: ids.len(), ids })
	}
}
