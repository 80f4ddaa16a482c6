use crate::{Error, Repository};
use futures_util::future::BoxFuture;

pub struct Args<'a> {
	/// `all`, `owner`, or `member`.
	pub affiliation: &'a str,
	/// `created`, `updated`, `pushed`, or `full_name`.
	pub sort: &'a str,
	pub page_size: usize,
}

impl Default for Args<'_> {
	fn default() -> Self {
		Self {
			affiliation: "owner",
			sort: "updated",
			page_size: 100,
		}
	}
}

impl crate::GithubClient {
	/// Lists the repositories of the authenticated user (first page only).
	pub fn list_user_repositories(&self, request: Args<'_>) -> BoxFuture<'static, Result<Vec<Repository>, Error>> {
		// https://docs.github.com/en/rest/repos/repos?apiVersion=2022-11-28#list-repositories-for-the-authenticated-user
		let page_size = request.page_size.to_string();
		let builder = self.client.get(self.url("user/repos")).query(&[
			("type", request.affiliation),
			("sort", request.sort),
			("per_page", page_size.as_str()),
		]);
		let builder = self.insert_rest_headers(builder, None);
		let response = self.dispatch(builder);
		Box::pin(async move {
			let data = response.await?;
			let repositories = serde_json::from_value::<Vec<Repository>>(data)?;
			log::debug!(target: "github", "found {} repositories", repositories.len());
			Ok(repositories)
		})
	}
}
