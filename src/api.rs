//! JSON api over the reflections of a GitHub repository.
//!
//! Every `/api` route takes the caller's GitHub token as `Authorization: Bearer <token>`
//! and builds a fresh [`GithubClient`] from it for the duration of the request.

mod error;
pub use error::*;
mod reflections;
mod repos;

use crate::config::Config;
use anyhow::{Context, Result};
use axum::{
	http::{header, HeaderMap, StatusCode},
	response::Json,
	routing::{get, post},
	Router,
};
use github::{GithubClient, RepositoryCoordinate};
use serde::Deserialize;
use std::{sync::Arc, time::Duration};
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer};

/// Reflections are plain text, a megabyte is plenty.
pub const MAX_BODY_SIZE: usize = 1024 * 1024;
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub static USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct AppState {
	pub github_api: Arc<str>,
	pub default_repository: Option<Arc<RepositoryCoordinate>>,
}

/// Query string accepted by routes that operate on a repository.
#[derive(Debug, Default, Deserialize)]
pub struct RepositoryQuery {
	pub repository: Option<String>,
}

impl AppState {
	pub fn new(config: &Config) -> Self {
		Self {
			github_api: Arc::from(config.github_api.as_str()),
			default_repository: config.default_repository.clone().map(Arc::new),
		}
	}

	/// Builds a client from the bearer token of the request.
	pub(crate) fn client(&self, headers: &HeaderMap) -> Result<GithubClient, ApiError> {
		let token = bearer_token(headers).ok_or_else(ApiError::unauthorized)?;
		let client = GithubClient::new(token, USER_AGENT)?;
		Ok(client.with_api_base(&*self.github_api))
	}

	/// The repository named by the request, or the configured default.
	pub(crate) fn resolve_repository(&self, requested: Option<&str>) -> Result<RepositoryCoordinate, ApiError> {
		match requested.map(str::trim).filter(|repo| !repo.is_empty()) {
			Some(repo) => Ok(repo
				.parse::<RepositoryCoordinate>()
				.map_err(|err| ApiError::bad_request(err.to_string()))?),
			None => match &self.default_repository {
				Some(repo) => Ok((**repo).clone()),
				None => Err(ApiError::bad_request(
					"Default repository not set. Please configure your default repository.",
				)),
			},
		}
	}
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
	let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
	let token = value
		.strip_prefix("Bearer ")
		.or_else(|| value.strip_prefix("bearer "))?
		.trim();
	(!token.is_empty()).then_some(token)
}

async fn handle_health() -> Json<serde_json::Value> {
	Json(serde_json::json!({ "status": "ok" }))
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(handle_health))
		.route("/api/github/repos", get(repos::handle_list_repositories))
		.route("/api/github/rate-limit", get(repos::handle_rate_limit))
		.route("/api/github/reflections", get(reflections::handle_list))
		.route(
			"/api/github/reflections/{filename}",
			get(reflections::handle_get).delete(reflections::handle_delete),
		)
		.route("/api/github/save-reflection", post(reflections::handle_save))
		.with_state(state)
		.layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
		.layer(TimeoutLayer::with_status_code(
			StatusCode::REQUEST_TIMEOUT,
			Duration::from_secs(REQUEST_TIMEOUT_SECS),
		))
}

/// Binds the configured address and serves until interrupted.
pub async fn serve(config: Config) -> Result<()> {
	let listener = tokio::net::TcpListener::bind(config.bind)
		.await
		.with_context(|| format!("failed to bind {}", config.bind))?;
	log::info!(target: "api", "listening on http://{}", listener.local_addr()?);
	match &config.default_repository {
		Some(repo) => log::info!(target: "api", "default repository is {repo}"),
		None => log::info!(target: "api", "no default repository, requests must name one"),
	}
	let app = router(AppState::new(&config));
	axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
	log::info!(target: "api", "server stopped");
	Ok(())
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		log::error!(target: "api", "failed to listen for ctrl-c: {err}");
		std::future::pending::<()>().await;
	}
	log::info!(target: "api", "shutting down");
}
