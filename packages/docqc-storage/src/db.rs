use std::{str::FromStr, time::Duration};

use sqlx::{
	PgPool,
	postgres::{PgConnectOptions, PgPoolOptions},
};

use crate::{Error, Result, schema};

pub struct Db {
	pub pool: PgPool,
}
impl Db {
	/// Connects eagerly; fails when the database is unreachable.
	pub async fn connect(cfg: &docqc_config::Postgres) -> Result<Self> {
		let pool = pool_options(cfg).connect_with(connect_options(cfg)?).await?;

		Ok(Self { pool })
	}

	/// Builds the pool without opening a connection, so an unreachable database only surfaces on
	/// first use.
	pub fn connect_lazy(cfg: &docqc_config::Postgres) -> Result<Self> {
		let pool = pool_options(cfg).connect_lazy_with(connect_options(cfg)?);

		Ok(Self { pool })
	}

	pub async fn ensure_schema(&self) -> Result<()> {
		let sql = schema::render_schema();
		let lock_id: i64 = 4_311_907;
		// The advisory lock is transaction scoped, so concurrent bootstraps serialize and the lock
		// is released on commit.
		let mut tx = self.pool.begin().await?;

		sqlx::query("SELECT pg_advisory_xact_lock($1)").bind(lock_id).execute(&mut *tx).await?;

		for statement in sql.split(';') {
			let trimmed = statement.trim();

			if trimmed.is_empty() {
				continue;
			}

			sqlx::query(trimmed).execute(&mut *tx).await?;
		}

		tx.commit().await?;

		Ok(())
	}
}

fn pool_options(cfg: &docqc_config::Postgres) -> PgPoolOptions {
	PgPoolOptions::new()
		.max_connections(cfg.pool_max_conns)
		.acquire_timeout(Duration::from_millis(cfg.acquire_timeout_ms))
}

fn connect_options(cfg: &docqc_config::Postgres) -> Result<PgConnectOptions> {
	let dsn = cfg
		.dsn
		.as_deref()
		.ok_or_else(|| Error::InvalidArgument("storage.postgres.dsn is not set.".to_string()))?;
	let options = PgConnectOptions::from_str(dsn)?;

	Ok(match cfg.database.as_deref() {
		Some(database) => options.database(database),
		None => options,
	})
}
