use axum::{
	http::StatusCode,
	response::{IntoResponse, Json, Response},
};

/// A failed api request, rendered as `{"error": message}` with the given status.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ApiError {
	pub status: StatusCode,
	pub message: String,
}

impl ApiError {
	pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
		Self {
			status,
			message: message.into(),
		}
	}

	pub fn unauthorized() -> Self {
		Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
	}

	pub fn bad_request(message: impl Into<String>) -> Self {
		Self::new(StatusCode::BAD_REQUEST, message)
	}
}

impl From<github::Error> for ApiError {
	fn from(err: github::Error) -> Self {
		let status = StatusCode::from_u16(err.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
		if status.is_server_error() {
			log::error!(target: "api", "github request failed: {err} ({:?})", err.response);
		}
		Self::new(status, err.message)
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = serde_json::json!({ "error": self.message });
		(self.status, Json(body)).into_response()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn from_github_error() {
		let err = github::Error::from_response(404, serde_json::json!({ "message": "Not Found" }));
		let err = ApiError::from(err);
		assert_eq!(err.status, StatusCode::NOT_FOUND);
		assert_eq!(err.message, "Repository or file not found.");
	}

	#[test]
	fn unusual_status_is_kept() {
		let err = github::Error::from_response(409, serde_json::json!({ "message": "conflict" }));
		let err = ApiError::from(err);
		assert_eq!(err.status, StatusCode::CONFLICT);
		assert_eq!(err.message, "GitHub API error: conflict");
	}
}
