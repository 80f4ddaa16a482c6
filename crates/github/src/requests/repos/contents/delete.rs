use super::get::url_path;
use crate::Error;
use futures_util::future::BoxFuture;
use serde::Deserialize;
use serde_json::json;
use std::path::Path;

#[derive(Debug)]
pub struct Args<'a> {
	pub repo_org: &'a str,
	pub repo_name: &'a str,
	pub path_in_repo: &'a Path,
	pub commit_message: &'a str,
	pub file_id: &'a str,
}

impl crate::GithubClient {
	/// Deletes a file, returning the sha of the commit that removed it.
	pub fn delete_file(&self, args: Args<'_>) -> BoxFuture<'static, Result<String, Error>> {
		// https://docs.github.com/en/rest/repos/contents?apiVersion=2022-11-28#delete-a-file
		let Args {
			repo_org,
			repo_name,
			path_in_repo,
			commit_message,
			file_id,
		} = args;

		let url = self.url(format!(
			"repos/{repo_org}/{repo_name}/contents/{}",
			url_path(path_in_repo)
		));
		let body = json!({
			"message": commit_message,
			"sha": file_id,
		});
		let builder = self.insert_rest_headers(self.client.delete(url), None).json(&body);
		let response = self.dispatch(builder);
		Box::pin(async move {
			#[derive(Deserialize)]
			struct Commit {
				sha: String,
			}
			#[derive(Deserialize)]
			struct Response {
				commit: Commit,
			}

			let data = response.await?;
			let response = serde_json::from_value::<Response>(data)?;
			Ok(response.commit.sha)
		})
	}
}
