use std::sync::Arc;

use docqc_config::{Backend, Config};
use docqc_service::QcService;
use docqc_storage::{db::Db, memory::MemoryStore, postgres::PgStore, store::DocumentStore};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<QcService>,
}
impl AppState {
	/// Builds the configured store. An unconfigured or unreachable database does not fail
	/// startup; `/test` reports it instead.
	pub async fn new(config: Config) -> color_eyre::Result<Self> {
		let store: Option<Arc<dyn DocumentStore>> = match config.storage.backend {
			Backend::Memory => {
				tracing::info!("Using the in-memory document store.");

				Some(Arc::new(MemoryStore::new()))
			},
			Backend::Postgres if config.storage.postgres.dsn.is_none() => {
				tracing::warn!("No database configured; QC endpoints will return 503.");

				None
			},
			Backend::Postgres => {
				let store = PgStore::new(Db::connect_lazy(&config.storage.postgres)?);

				if let Err(err) = store.ensure_ready().await {
					tracing::warn!(
						error = %err,
						"Schema bootstrap failed; retrying on the next store request."
					);
				}

				Some(Arc::new(store))
			},
		};

		Ok(Self::with_store(config, store))
	}

	pub fn with_store(config: Config, store: Option<Arc<dyn DocumentStore>>) -> Self {
		Self { service: Arc::new(QcService::new(config, store)) }
	}
}
