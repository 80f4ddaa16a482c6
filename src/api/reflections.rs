use super::{ApiError, AppState, RepositoryQuery};
use axum::{
	extract::{rejection::JsonRejection, Path, Query, State},
	http::{HeaderMap, StatusCode},
	response::Json,
};
use github::{is_reflection_file_name, ErrorKind, REFLECTIONS_DIR};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReflectionRequest {
	#[serde(default)]
	pub content: String,
	#[serde(default)]
	pub file_name: String,
	/// `owner/repo`, falls back to the default repository when absent.
	#[serde(default)]
	pub repository: Option<String>,
}

/// GET /api/github/reflections
pub(super) async fn handle_list(
	State(state): State<AppState>,
	headers: HeaderMap,
	Query(query): Query<RepositoryQuery>,
) -> Result<Json<Value>, ApiError> {
	let client = state.client(&headers)?;
	let repo = state.resolve_repository(query.repository.as_deref())?.to_string();
	let files = match client.list_reflection_files(&repo).await {
		Ok(files) => files,
		// a repository nobody has written to yet has no reflections directory
		Err(err) if err.kind == ErrorKind::NotFound => Vec::new(),
		Err(err) => return Err(err.into()),
	};
	Ok(Json(json!({
		"total": files.len(),
		"files": files,
		"repository": repo,
	})))
}

/// GET /api/github/reflections/{filename}
pub(super) async fn handle_get(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(filename): Path<String>,
	Query(query): Query<RepositoryQuery>,
) -> Result<Json<Value>, ApiError> {
	let client = state.client(&headers)?;
	if !is_reflection_file_name(&filename) {
		return Err(ApiError::bad_request("Invalid filename. Must be a .md file."));
	}
	let repo = state.resolve_repository(query.repository.as_deref())?.to_string();
	let content = client.get_reflection_file(&repo, &filename).await?;
	log::debug!(target: "api", "read {repo}/{REFLECTIONS_DIR}/{filename} ({} bytes)", content.len());
	Ok(Json(json!({
		"content": content,
		"filename": filename,
		"repository": repo,
	})))
}

/// DELETE /api/github/reflections/{filename}
pub(super) async fn handle_delete(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(filename): Path<String>,
	Query(query): Query<RepositoryQuery>,
) -> Result<Json<Value>, ApiError> {
	let client = state.client(&headers)?;
	if !is_reflection_file_name(&filename) {
		return Err(ApiError::bad_request("Invalid filename"));
	}
	let repo = state.resolve_repository(query.repository.as_deref())?.to_string();
	client.delete_reflection(&filename, &repo).await?;
	Ok(Json(json!({
		"success": true,
		"message": "Reflection deleted successfully",
		"data": {
			"filename": filename,
			"repository": repo,
		},
	})))
}

/// POST /api/github/save-reflection
pub(super) async fn handle_save(
	State(state): State<AppState>,
	headers: HeaderMap,
	body: Result<Json<SaveReflectionRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
	let client = state.client(&headers)?;
	let Json(request) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
	if request.content.is_empty() || request.file_name.is_empty() {
		return Err(ApiError::bad_request("Missing required fields: content or fileName"));
	}
	if !is_reflection_file_name(&request.file_name) {
		return Err(ApiError::bad_request("File name must end with .md extension"));
	}
	if request.repository.is_none() && state.default_repository.is_none() {
		return Err(ApiError::bad_request(
			"No repository specified and no default repository set. Please set a default repository.",
		));
	}
	let repo = state.resolve_repository(request.repository.as_deref())?.to_string();

	// fail early with a specific message instead of a generic write failure
	if !client.check_repository_permissions(&repo).await? {
		return Err(ApiError::new(
			StatusCode::FORBIDDEN,
			"You do not have write permissions to this repository",
		));
	}
	client.save_reflection(&request.content, &request.file_name, &repo).await?;
	log::info!(target: "api", "saved reflection {} to {repo}", request.file_name);

	Ok(Json(json!({
		"success": true,
		"message": "Reflection saved successfully",
		"data": {
			"url": format!("https://github.com/{repo}/blob/main/{REFLECTIONS_DIR}/{}", request.file_name),
			"fileName": request.file_name,
			"repository": repo,
		},
	})))
}
