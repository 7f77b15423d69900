mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Api, Backend, Collections, Config, Postgres, Service, Storage};

use std::{env, fs, net::SocketAddr, path::Path};

pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_DATABASE_NAME: &str = "DATABASE_NAME";
pub const ENV_PORT: &str = "PORT";

/// Loads the config file when one is given, then layers the process environment on top.
pub fn load(path: Option<&Path>) -> Result<Config> {
	let mut cfg = match path {
		Some(path) => parse_file(path)?,
		None => Config::default(),
	};

	apply_env(&mut cfg, |key| env::var(key).ok())?;
	normalize(&mut cfg);
	validate(&cfg)?;

	Ok(cfg)
}

pub fn parse_file(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	toml::from_str(&raw).map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })
}

pub fn apply_env<F>(cfg: &mut Config, lookup: F) -> Result<()>
where
	F: Fn(&str) -> Option<String>,
{
	if let Some(dsn) = lookup(ENV_DATABASE_URL) {
		cfg.storage.postgres.dsn = Some(dsn);
	}
	if let Some(database) = lookup(ENV_DATABASE_NAME) {
		cfg.storage.postgres.database = Some(database);
	}
	if let Some(port) = lookup(ENV_PORT) {
		let port: u16 = port.trim().parse().map_err(|_| Error::Validation {
			message: format!("{ENV_PORT} must be a port number, got {port:?}."),
		})?;
		let mut addr: SocketAddr = cfg.service.http_bind.parse().map_err(|_| Error::Validation {
			message: "service.http_bind must be a socket address.".to_string(),
		})?;

		addr.set_port(port);

		cfg.service.http_bind = addr.to_string();
	}

	Ok(())
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.parse::<SocketAddr>().is_err() {
		return Err(Error::Validation {
			message: "service.http_bind must be a socket address.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.collections.qc.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.collections.qc must be non-empty.".to_string(),
		});
	}
	if cfg.api.max_limit == 0 {
		return Err(Error::Validation {
			message: "api.max_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.api.default_limit == 0 || cfg.api.default_limit > cfg.api.max_limit {
		return Err(Error::Validation {
			message: "api.default_limit must be in the range 1-api.max_limit.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.storage.postgres.dsn.as_deref().map(|dsn| dsn.trim().is_empty()).unwrap_or(false) {
		cfg.storage.postgres.dsn = None;
	}
	if cfg
		.storage
		.postgres
		.database
		.as_deref()
		.map(|database| database.trim().is_empty())
		.unwrap_or(false)
	{
		cfg.storage.postgres.database = None;
	}

	cfg.service.cors_allowed_origins.retain(|origin| !origin.trim().is_empty());
}
