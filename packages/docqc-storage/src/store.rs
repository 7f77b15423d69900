use std::{future::Future, pin::Pin};

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{Result, document::Document, predicate::Predicate};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Collaborator contract between the QC service and whatever persists its documents.
pub trait DocumentStore
where
	Self: Send + Sync,
{
	/// Stores `document` under a fresh identifier and returns that identifier.
	fn insert<'a>(
		&'a self,
		collection: &'a str,
		document: Map<String, Value>,
	) -> BoxFuture<'a, Result<Uuid>>;

	/// Matching documents in insertion order, at most `limit` of them.
	fn find<'a>(
		&'a self,
		collection: &'a str,
		predicate: &'a Predicate,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<Document>>>;

	fn find_one<'a>(
		&'a self,
		collection: &'a str,
		predicate: &'a Predicate,
	) -> BoxFuture<'a, Result<Option<Document>>>;

	/// Sorted names of collections that hold at least one document.
	fn list_collections<'a>(&'a self) -> BoxFuture<'a, Result<Vec<String>>>;
}
