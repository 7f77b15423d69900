//! Document store used by the QC service.
//!
//! [`store::DocumentStore`] is the seam the service talks to. Two backends implement it:
//! [`postgres::PgStore`] keeps every collection in one JSONB table, and
//! [`memory::MemoryStore`] keeps documents in process.

pub mod db;
pub mod document;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod predicate;
pub mod schema;
pub mod store;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
