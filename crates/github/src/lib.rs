//! REST client for the GitHub contents api, scoped to the markdown reflections of a journal repository.
//! Also inspired by https://github.com/XAMPPRocky/octocrab.

mod content;
pub use content::*;
mod error;
pub use error::*;
mod rate_limit;
pub use rate_limit::*;
mod reflections;
pub use reflections::*;
mod repository;
pub use repository::*;
mod requests;
pub use requests::*;

use futures_util::future::BoxFuture;
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub const GITHUB_API: &str = "https://api.github.com";

/// A client bound to a single access token.
///
/// Construct one per inbound request. Clones share the same [`RateBudget`].
#[derive(Clone)]
pub struct GithubClient {
	pub(crate) client: reqwest::Client,
	pub(crate) auth_header: String,
	pub(crate) api_base: Arc<str>,
	pub(crate) rate_budget: Arc<Mutex<RateBudget>>,
}

impl GithubClient {
	pub fn new(token: &str, user_agent: &str) -> Result<Self, Error> {
		use reqwest::header::{HeaderValue, AUTHORIZATION, USER_AGENT};
		if token.trim().is_empty() {
			return Err(Error::invalid_input("GitHub access token is required."));
		}
		let auth_header = format!("Bearer {token}");
		let client = reqwest::Client::builder().default_headers({
			let mut auth = HeaderValue::from_str(&auth_header)
				.map_err(|_| Error::invalid_input("GitHub access token contains invalid characters."))?;
			auth.set_sensitive(true);
			let agent = HeaderValue::from_str(user_agent)
				.map_err(|_| Error::invalid_input("User agent contains invalid characters."))?;
			[(USER_AGENT, agent), (AUTHORIZATION, auth)].into_iter().collect()
		});
		let client = client.build()?;
		Ok(Self {
			client,
			auth_header,
			api_base: Arc::from(GITHUB_API),
			rate_budget: Arc::new(Mutex::new(RateBudget::default())),
		})
	}

	/// Points the client at a different api root, e.g. a GitHub Enterprise host.
	pub fn with_api_base(mut self, api_base: impl AsRef<str>) -> Self {
		self.api_base = Arc::from(api_base.as_ref().trim_end_matches('/'));
		self
	}

	pub fn api_base(&self) -> &str {
		&self.api_base
	}

	/// The locally tracked quota, as of the last response.
	pub fn rate_budget(&self) -> RateBudget {
		match self.rate_budget.lock() {
			Ok(budget) => *budget,
			Err(poisoned) => *poisoned.into_inner(),
		}
	}

	pub(crate) fn set_rate_budget(&self, budget: RateBudget) {
		match self.rate_budget.lock() {
			Ok(mut guard) => *guard = budget,
			Err(poisoned) => *poisoned.into_inner() = budget,
		}
	}

	/// Refuses the call locally if the quota is known to be exhausted.
	pub(crate) fn check_rate_limit(&self) -> Result<(), Error> {
		self.rate_budget().check(now_epoch_seconds())
	}

	pub(crate) fn url(&self, path: impl AsRef<str>) -> String {
		format!("{}/{}", self.api_base, path.as_ref().trim_start_matches('/'))
	}

	pub(crate) fn insert_rest_headers(
		&self,
		builder: reqwest::RequestBuilder,
		media_type: Option<&'static str>,
	) -> reqwest::RequestBuilder {
		use reqwest::header::*;
		let accept = match media_type {
			None => format!("application/vnd.github+json"),
			Some(media) => format!("application/vnd.github.{media}+json"),
		};
		let builder = builder.header(ACCEPT, accept);
		let builder = builder.header(AUTHORIZATION, self.auth_header.clone());
		let builder = builder.header("X-Github-Api-Version", "2022-11-28");
		builder
	}

	/// Sends the request, records the quota headers, and decodes the json body.
	/// Non-success statuses are translated into an [`Error`].
	pub(crate) fn dispatch(&self, builder: reqwest::RequestBuilder) -> BoxFuture<'static, Result<Value, Error>> {
		let response = self.dispatch_raw(builder);
		Box::pin(async move {
			let body = response.await?;
			if body.is_empty() {
				return Ok(Value::Null);
			}
			Ok(serde_json::from_slice::<Value>(&body)?)
		})
	}

	/// Like [`dispatch`](Self::dispatch), but hands back the undecoded body of a successful response.
	pub(crate) fn dispatch_raw(&self, builder: reqwest::RequestBuilder) -> BoxFuture<'static, Result<Vec<u8>, Error>> {
		let rate_budget = self.rate_budget.clone();
		Box::pin(async move {
			let response = builder.send().await?;
			match rate_budget.lock() {
				Ok(mut budget) => budget.update_from_headers(response.headers()),
				Err(poisoned) => poisoned.into_inner().update_from_headers(response.headers()),
			}
			let status = response.status();
			let body = response.bytes().await?;
			if status.is_success() {
				return Ok(body.to_vec());
			}
			let data = serde_json::from_slice::<Value>(&body)
				.unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));
			log::warn!(target: "github", "request failed with status {}: {data:?}", status.as_u16());
			Err(Error::from_response(status.as_u16(), data))
		})
	}
}
