use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::{Map, Value};
use sqlx::{Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
	Result,
	db::Db,
	document::{self, Document},
	models::DocumentRow,
	predicate::Predicate,
	store::{BoxFuture, DocumentStore},
};

const SELECT_DOCUMENTS: &str = "\
SELECT doc_key, body, created_at, updated_at
FROM documents
WHERE collection = ";

/// Keeps every collection in the `documents` table, one JSONB body per row.
///
/// The schema is bootstrapped on first use and retried on every call until it succeeds, so a
/// database that comes up after the service still gets its table.
pub struct PgStore {
	db: Db,
	schema_ready: AtomicBool,
}
impl PgStore {
	pub fn new(db: Db) -> Self {
		Self { db, schema_ready: AtomicBool::new(false) }
	}

	pub fn db(&self) -> &Db {
		&self.db
	}

	pub async fn ensure_ready(&self) -> Result<()> {
		if self.schema_ready.load(Ordering::Acquire) {
			return Ok(());
		}

		self.db.ensure_schema().await?;
		self.schema_ready.store(true, Ordering::Release);

		Ok(())
	}

	async fn insert_row(&self, collection: &str, body: Map<String, Value>) -> Result<Uuid> {
		document::check_reserved(&body)?;
		self.ensure_ready().await?;

		let doc_key = Uuid::new_v4();
		let now = OffsetDateTime::now_utc();

		sqlx::query(
			"\
INSERT INTO documents (doc_key, collection, body, created_at, updated_at)
VALUES ($1, $2, $3, $4, $5)",
		)
		.bind(doc_key)
		.bind(collection)
		.bind(Value::Object(body))
		.bind(now)
		.bind(now)
		.execute(&self.db.pool)
		.await?;

		Ok(doc_key)
	}

	async fn select_rows(
		&self,
		collection: &str,
		predicate: &Predicate,
		limit: u32,
	) -> Result<Vec<DocumentRow>> {
		self.ensure_ready().await?;

		let mut builder = QueryBuilder::<Postgres>::new(SELECT_DOCUMENTS);

		builder.push_bind(collection.to_string());
		builder.push(" AND ");
		push_predicate(&mut builder, predicate);
		builder.push(" ORDER BY seq LIMIT ");
		builder.push_bind(i64::from(limit));

		let rows = builder.build_query_as::<DocumentRow>().fetch_all(&self.db.pool).await?;

		Ok(rows)
	}
}
impl DocumentStore for PgStore {
	fn insert<'a>(
		&'a self,
		collection: &'a str,
		document: Map<String, Value>,
	) -> BoxFuture<'a, Result<Uuid>> {
		Box::pin(self.insert_row(collection, document))
	}

	fn find<'a>(
		&'a self,
		collection: &'a str,
		predicate: &'a Predicate,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<Document>>> {
		Box::pin(async move {
			let rows = self.select_rows(collection, predicate, limit).await?;

			Ok(rows.into_iter().map(Document::from).collect())
		})
	}

	fn find_one<'a>(
		&'a self,
		collection: &'a str,
		predicate: &'a Predicate,
	) -> BoxFuture<'a, Result<Option<Document>>> {
		Box::pin(async move {
			let rows = self.select_rows(collection, predicate, 1).await?;

			Ok(rows.into_iter().next().map(Document::from))
		})
	}

	fn list_collections<'a>(&'a self) -> BoxFuture<'a, Result<Vec<String>>> {
		Box::pin(async move {
			self.ensure_ready().await?;

			let names: Vec<String> = sqlx::query_scalar(
				"SELECT DISTINCT collection FROM documents ORDER BY collection",
			)
			.fetch_all(&self.db.pool)
			.await?;

			Ok(names)
		})
	}
}

/// Renders `predicate` as a boolean SQL expression over the `body` and `doc_key` columns.
pub fn push_predicate(builder: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
	match predicate {
		Predicate::All => {
			builder.push("TRUE");
		},
		Predicate::IdEquals(id) => {
			builder.push("doc_key = ");
			builder.push_bind(*id);
		},
		Predicate::FieldEquals { field, value } => {
			builder.push("(body -> ");
			builder.push_bind(field.clone());
			builder.push(") = ");
			builder.push_bind(value.clone());
		},
		Predicate::FirstElementExists { field } => {
			builder.push("(body -> ");
			builder.push_bind(field.clone());
			builder.push(" -> 0) IS NOT NULL");
		},
		Predicate::ContainsInsensitive { field, needle } => {
			// `->>` renders numbers and booleans as text; only string values may match.
			builder.push("(jsonb_typeof(body -> ");
			builder.push_bind(field.clone());
			builder.push(") = 'string' AND (body ->> ");
			builder.push_bind(field.clone());
			builder.push(") ILIKE ");
			builder.push_bind(format!("%{}%", escape_like(needle)));
			builder.push(" ESCAPE '\\')");
		},
		Predicate::And(parts) => push_group(builder, parts, " AND ", "TRUE"),
		Predicate::Or(parts) => push_group(builder, parts, " OR ", "FALSE"),
	}
}

fn push_group(
	builder: &mut QueryBuilder<'_, Postgres>,
	parts: &[Predicate],
	separator: &str,
	empty: &str,
) {
	if parts.is_empty() {
		builder.push(empty);

		return;
	}

	builder.push("(");

	for (idx, part) in parts.iter().enumerate() {
		if idx > 0 {
			builder.push(separator);
		}

		push_predicate(builder, part);
	}

	builder.push(")");
}

fn escape_like(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());

	for ch in raw.chars() {
		if matches!(ch, '\\' | '%' | '_') {
			out.push('\\');
		}

		out.push(ch);
	}

	out
}
