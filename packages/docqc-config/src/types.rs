use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub api: Api,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
	/// `"*"` allows any origin.
	pub cors_allowed_origins: Vec<String>,
}
impl Default for Service {
	fn default() -> Self {
		Self {
			http_bind: "0.0.0.0:8000".to_string(),
			log_level: "info".to_string(),
			cors_allowed_origins: vec!["*".to_string()],
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
	#[default]
	Postgres,
	Memory,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Storage {
	pub backend: Backend,
	pub postgres: Postgres,
	pub collections: Collections,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Postgres {
	/// Unset means no database is configured; the service still starts.
	pub dsn: Option<String>,
	/// Overrides the database named in the DSN.
	pub database: Option<String>,
	pub pool_max_conns: u32,
	pub acquire_timeout_ms: u64,
}
impl Default for Postgres {
	fn default() -> Self {
		Self { dsn: None, database: None, pool_max_conns: 4, acquire_timeout_ms: 5_000 }
	}
}

/// Maps each record type to the collection that holds it.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Collections {
	pub qc: String,
}
impl Default for Collections {
	fn default() -> Self {
		Self { qc: "documentqc".to_string() }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Api {
	pub default_limit: u32,
	pub max_limit: u32,
}
impl Default for Api {
	fn default() -> Self {
		Self { default_limit: 200, max_limit: 1_000 }
	}
}
