use crate::{Error, Repository};
use futures_util::future::BoxFuture;

pub struct Args<'a> {
	pub owner: &'a str,
	pub repo: &'a str,
}

impl crate::GithubClient {
	/// Fetches repository metadata, including the permissions of the authenticated user.
	pub fn get_repository(&self, request: Args<'_>) -> BoxFuture<'static, Result<Repository, Error>> {
		// https://docs.github.com/en/rest/repos/repos?apiVersion=2022-11-28#get-a-repository
		let url = self.url(format!("repos/{}/{}", request.owner, request.repo));
		let builder = self.insert_rest_headers(self.client.get(url), None);
		let response = self.dispatch(builder);
		Box::pin(async move {
			let data = response.await?;
			Ok(serde_json::from_value::<Repository>(data)?)
		})
	}
}
