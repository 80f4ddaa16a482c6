use super::{ApiError, AppState};
use axum::{extract::State, http::HeaderMap, response::Json};
use github::RateBudget;
use serde_json::{json, Value};

/// GET /api/github/repos
///
/// Only repositories the token may push to are listed, repositories without
/// permission information are kept since GitHub may simply have omitted it.
pub(super) async fn handle_list_repositories(
	State(state): State<AppState>,
	headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
	let client = state.client(&headers)?;
	let repositories = client
		.list_repositories()
		.await?
		.into_iter()
		.filter(|repo| repo.permissions.map(|perms| perms.push) != Some(false))
		.collect::<Vec<_>>();
	Ok(Json(json!({
		"total": repositories.len(),
		"repositories": repositories,
	})))
}

/// GET /api/github/rate-limit
pub(super) async fn handle_rate_limit(
	State(state): State<AppState>,
	headers: HeaderMap,
) -> Result<Json<RateBudget>, ApiError> {
	let client = state.client(&headers)?;
	Ok(Json(client.get_rate_limit_status().await?))
}
