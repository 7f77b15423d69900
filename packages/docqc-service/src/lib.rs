//! Document QC records: bulk import, filtered listing and lookup over a [`DocumentStore`].

pub mod diagnostics;
pub mod filter;
pub mod get;
pub mod import;
pub mod list;
pub mod record;
pub mod serialize;
pub mod time_serde;

mod error;

pub use diagnostics::{
	BackendStatus, ConnectionStatus, DatabaseStatus, DiagnosticsReport, EnvStatus,
};
pub use error::{Error, Result};
pub use filter::{QcFilter, build_predicate, lookup_predicate};
pub use import::{BulkImportRequest, BulkImportResponse};
pub use list::ListRequest;
pub use record::{QcRecord, resolve_completeness};
pub use serialize::{SerializedRecord, serialize_document};

use std::sync::Arc;

use docqc_config::Config;
use docqc_storage::store::DocumentStore;

pub struct QcService {
	pub cfg: Config,
	/// `None` when no database is configured. Data operations then fail with
	/// [`Error::StoreUnavailable`].
	pub store: Option<Arc<dyn DocumentStore>>,
}
impl QcService {
	pub fn new(cfg: Config, store: Option<Arc<dyn DocumentStore>>) -> Self {
		Self { cfg, store }
	}

	pub(crate) fn store(&self) -> Result<&dyn DocumentStore> {
		self.store.as_deref().ok_or_else(|| Error::StoreUnavailable {
			message: "No document store is configured.".to_string(),
		})
	}

	pub(crate) fn collection(&self) -> &str {
		self.cfg.storage.collections.qc.as_str()
	}
}
