use std::{env, ffi::OsString};

use serde::Serialize;
use time::OffsetDateTime;

use crate::QcService;

const MAX_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendStatus {
	Running,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DatabaseStatus {
	NotConfigured,
	Working,
	Error { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
	Connected,
	NotConnected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvStatus {
	Set,
	NotSet,
}
impl EnvStatus {
	/// Empty values count as unset.
	pub fn of(value: Option<OsString>) -> Self {
		match value {
			Some(value) if !value.is_empty() => Self::Set,
			_ => Self::NotSet,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticsReport {
	pub backend: BackendStatus,
	pub database: DatabaseStatus,
	pub connection_status: ConnectionStatus,
	pub database_url: EnvStatus,
	pub database_name: EnvStatus,
	/// First few collection names reported by the store.
	pub collections: Vec<String>,
	#[serde(with = "crate::time_serde")]
	pub checked_at: OffsetDateTime,
}

impl QcService {
	/// Reports store reachability and database environment. Never fails; problems show up in the
	/// report.
	pub async fn diagnostics(&self) -> DiagnosticsReport {
		let (database, connection_status, collections) = match self.store.as_deref() {
			None => (DatabaseStatus::NotConfigured, ConnectionStatus::NotConnected, Vec::new()),
			Some(store) => match store.list_collections().await {
				Ok(mut names) => {
					names.truncate(MAX_COLLECTIONS);

					(DatabaseStatus::Working, ConnectionStatus::Connected, names)
				},
				Err(err) => {
					tracing::warn!(error = %err, "Document store check failed.");

					let message = err.to_string().chars().take(MAX_ERROR_CHARS).collect();

					(DatabaseStatus::Error { message }, ConnectionStatus::NotConnected, Vec::new())
				},
			},
		};

		DiagnosticsReport {
			backend: BackendStatus::Running,
			database,
			connection_status,
			database_url: EnvStatus::of(env::var_os(docqc_config::ENV_DATABASE_URL)),
			database_name: EnvStatus::of(env::var_os(docqc_config::ENV_DATABASE_NAME)),
			collections,
			checked_at: OffsetDateTime::now_utc(),
		}
	}
}
