use serde_json::Value;
use std::sync::Arc;

/// The broad category of a failed GitHub operation.
/// Callers should match on this instead of the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// The access token is invalid or expired (401).
	Unauthorized,
	/// The quota is exhausted, either reported by GitHub (403) or refused locally (429).
	RateLimited,
	/// The token lacks the permission required for the repository (403).
	Forbidden,
	/// The repository, directory, or file does not exist (404).
	NotFound,
	/// GitHub rejected the payload (422).
	InvalidRequest,
	/// The arguments were rejected before any request was sent.
	InvalidInput,
	/// Anything else, including transport failures.
	Unknown,
}

#[derive(thiserror::Error, Debug, Clone)]
#[error("{message}")]
pub struct Error {
	pub kind: ErrorKind,
	/// HTTP-equivalent status code.
	pub status: u16,
	pub message: String,
	/// The decoded body of the failed response, if one was received.
	pub response: Option<Arc<Value>>,
}

static RATE_LIMIT_MARKER: &str = "rate limit";

impl Error {
	pub(crate) fn new(kind: ErrorKind, status: u16, message: impl Into<String>) -> Self {
		Self {
			kind,
			status,
			message: message.into(),
			response: None,
		}
	}

	/// Translates a non-success response from GitHub into the fixed status/message table.
	pub fn from_response(status: u16, data: Value) -> Self {
		let remote_message = data
			.get("message")
			.and_then(Value::as_str)
			.map(str::to_owned)
			.unwrap_or_else(|| "Unknown GitHub API error".to_owned());
		let (kind, message) = match status {
			401 => (
				ErrorKind::Unauthorized,
				"GitHub authentication failed. Please reconnect your account.".to_owned(),
			),
			403 if remote_message.contains(RATE_LIMIT_MARKER) => (
				ErrorKind::RateLimited,
				"GitHub API rate limit exceeded. Please wait before trying again.".to_owned(),
			),
			403 => (
				ErrorKind::Forbidden,
				"Access denied. Please check repository permissions.".to_owned(),
			),
			404 => (ErrorKind::NotFound, "Repository or file not found.".to_owned()),
			422 => (
				ErrorKind::InvalidRequest,
				"Invalid request data. Please check your input.".to_owned(),
			),
			429 => (ErrorKind::RateLimited, format!("GitHub API error: {remote_message}")),
			_ => (ErrorKind::Unknown, format!("GitHub API error: {remote_message}")),
		};
		Self {
			kind,
			status,
			message,
			response: Some(Arc::new(data)),
		}
	}

	/// The error produced when the local rate budget refuses a call.
	pub(crate) fn rate_gated(wait_seconds: u64) -> Self {
		Self::new(
			ErrorKind::RateLimited,
			429,
			format!("Rate limit exceeded. Please wait {wait_seconds} seconds."),
		)
	}

	pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
		Self::new(ErrorKind::InvalidInput, 400, message)
	}

	fn unknown(err: impl std::fmt::Display) -> Self {
		Self::new(ErrorKind::Unknown, 500, format!("GitHub API error: {err}"))
	}

	pub fn is_not_found(&self) -> bool {
		self.kind == ErrorKind::NotFound
	}
}

impl From<reqwest::Error> for Error {
	fn from(value: reqwest::Error) -> Self {
		Self::unknown(value)
	}
}
impl From<serde_json::Error> for Error {
	fn from(value: serde_json::Error) -> Self {
		Self::unknown(value)
	}
}
impl From<base64ct::Error> for Error {
	fn from(value: base64ct::Error) -> Self {
		Self::unknown(value)
	}
}
impl From<crate::InvalidCoordinate> for Error {
	fn from(value: crate::InvalidCoordinate) -> Self {
		Self::invalid_input(value.to_string())
	}
}
