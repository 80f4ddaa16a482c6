use crate::Error;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

/// Gated calls are refused while the remaining quota is at or below this amount.
pub const RATE_LIMIT_FLOOR: u64 = 10;

/// The last known request quota of a credential.
/// This is a local estimate refreshed from response headers, it may be stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBudget {
	#[serde(default)]
	pub limit: u64,
	pub remaining: u64,
	/// Unix timestamp (seconds) at which the quota resets.
	#[serde(rename = "reset")]
	pub reset_epoch_seconds: u64,
	#[serde(default)]
	pub used: u64,
}

impl Default for RateBudget {
	fn default() -> Self {
		Self {
			limit: 5000,
			remaining: 5000,
			reset_epoch_seconds: 0,
			used: 0,
		}
	}
}

impl RateBudget {
	/// Fails fast if the budget is exhausted and has not reset yet.
	pub fn check(&self, now: u64) -> Result<(), Error> {
		if self.remaining <= RATE_LIMIT_FLOOR && now < self.reset_epoch_seconds {
			return Err(Error::rate_gated(self.reset_epoch_seconds - now));
		}
		Ok(())
	}

	/// Refreshes the budget from the `x-ratelimit-*` headers of a response.
	/// Headers that are missing or unparsable leave the current value untouched.
	pub fn update_from_headers(&mut self, headers: &HeaderMap) {
		if let Some(remaining) = header_u64(headers, "x-ratelimit-remaining") {
			self.remaining = remaining;
		}
		if let Some(reset) = header_u64(headers, "x-ratelimit-reset") {
			self.reset_epoch_seconds = reset;
		}
		if let Some(limit) = header_u64(headers, "x-ratelimit-limit") {
			self.limit = limit;
		}
		if let Some(used) = header_u64(headers, "x-ratelimit-used") {
			self.used = used;
		}
	}
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
	headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

impl crate::GithubClient {
	/// Queries the quota of the credential and replaces the local budget with it.
	/// This call is never gated, and does not count against the quota.
	pub async fn get_rate_limit_status(&self) -> Result<RateBudget, Error> {
		// https://docs.github.com/en/rest/rate-limit/rate-limit?apiVersion=2022-11-28#get-rate-limit-status-for-the-authenticated-user
		#[derive(Deserialize)]
		struct Response {
			rate: RateBudget,
		}
		let builder = self.insert_rest_headers(self.client.get(self.url("rate_limit")), None);
		let data = self.dispatch(builder).await?;
		let budget = serde_json::from_value::<Response>(data)?.rate;
		self.set_rate_budget(budget);
		Ok(budget)
	}
}

pub(crate) fn now_epoch_seconds() -> u64 {
	std::time::SystemTime::now()
		.duration_since(std::time::UNIX_EPOCH)
		.map(|elapsed| elapsed.as_secs())
		.unwrap_or_default()
}
