use std::{collections::BTreeMap, sync::Mutex};

use serde_json::{Map, Value};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
	Result,
	document::{self, Document},
	predicate::Predicate,
	store::{BoxFuture, DocumentStore},
};

/// In-process store. Documents live as long as the value does.
#[derive(Default)]
pub struct MemoryStore {
	collections: Mutex<BTreeMap<String, Vec<Document>>>,
}
impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	fn insert_now(&self, collection: &str, body: Map<String, Value>) -> Result<Uuid> {
		document::check_reserved(&body)?;

		let id = Uuid::new_v4();
		let now = OffsetDateTime::now_utc();
		let doc = Document::from_stored(id, now, now, body);
		let mut collections = self.collections.lock().unwrap_or_else(|err| err.into_inner());

		collections.entry(collection.to_string()).or_default().push(doc);

		Ok(id)
	}

	fn find_now(&self, collection: &str, predicate: &Predicate, limit: usize) -> Vec<Document> {
		let collections = self.collections.lock().unwrap_or_else(|err| err.into_inner());

		collections
			.get(collection)
			.map(|docs| {
				docs.iter().filter(|doc| predicate.matches(doc)).take(limit).cloned().collect()
			})
			.unwrap_or_default()
	}
}
impl DocumentStore for MemoryStore {
	fn insert<'a>(
		&'a self,
		collection: &'a str,
		document: Map<String, Value>,
	) -> BoxFuture<'a, Result<Uuid>> {
		let result = self.insert_now(collection, document);

		Box::pin(async move { result })
	}

	fn find<'a>(
		&'a self,
		collection: &'a str,
		predicate: &'a Predicate,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<Document>>> {
		let docs = self.find_now(collection, predicate, limit as usize);

		Box::pin(async move { Ok(docs) })
	}

	fn find_one<'a>(
		&'a self,
		collection: &'a str,
		predicate: &'a Predicate,
	) -> BoxFuture<'a, Result<Option<Document>>> {
		let doc = self.find_now(collection, predicate, 1).into_iter().next();

		Box::pin(async move { Ok(doc) })
	}

	fn list_collections<'a>(&'a self) -> BoxFuture<'a, Result<Vec<String>>> {
		let names = self
			.collections
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.iter()
			.filter(|(_, docs)| !docs.is_empty())
			.map(|(name, _)| name.clone())
			.collect::<Vec<_>>();

		Box::pin(async move { Ok(names) })
	}
}
