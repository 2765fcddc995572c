//! Error types shared by the preference engine and its adapters.

use axum::{Json, http::StatusCode, response::IntoResponse};

pub type PrefResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// No preference definition exists for the requested key
	NotFound,
	/// A definition with this key already exists
	DuplicateKey(Box<str>),
	/// Per-user write attempted on a definition that is not user customizable
	NotCustomizable(Box<str>),
	/// A stored value could not be decoded as the definition's type
	Decode(Box<str>),
	/// Invalid service wiring or configuration
	Config(Box<str>),
	DbError,
	CacheError,

	// externals
	Io(std::io::Error),
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "preference not found"),
			Error::DuplicateKey(key) => write!(f, "preference '{}' already exists", key),
			Error::NotCustomizable(key) => {
				write!(f, "preference '{}' is not user customizable", key)
			}
			Error::Decode(msg) => write!(f, "decode error: {}", msg),
			Error::Config(msg) => write!(f, "configuration error: {}", msg),
			Error::DbError => write!(f, "database error"),
			Error::CacheError => write!(f, "cache error"),
			Error::Io(err) => write!(f, "I/O error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Decode(err.to_string().into())
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let (status, error) = match &self {
			Error::NotFound => (StatusCode::NOT_FOUND, "not-found"),
			Error::DuplicateKey(_) => (StatusCode::CONFLICT, "duplicate-key"),
			Error::NotCustomizable(_) => (StatusCode::FORBIDDEN, "not-customizable"),
			Error::Decode(_) => (StatusCode::UNPROCESSABLE_ENTITY, "decode"),
			_ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
		};
		(status, Json(serde_json::json!({ "error": error, "message": self.to_string() })))
			.into_response()
	}
}

// vim: ts=4
