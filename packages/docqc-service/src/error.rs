pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String, field: Option<String> },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Store unavailable: {message}")]
	StoreUnavailable { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<docqc_storage::Error> for Error {
	fn from(err: docqc_storage::Error) -> Self {
		match err {
			docqc_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			docqc_storage::Error::InvalidArgument(message) =>
				Self::InvalidRequest { message, field: None },
		}
	}
}
