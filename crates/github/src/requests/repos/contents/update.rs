use super::get::url_path;
use crate::Error;
use futures_util::future::BoxFuture;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug)]
pub struct Args<'a> {
	pub repo_org: &'a str,
	pub repo_name: &'a str,
	pub path_in_repo: &'a Path,
	pub commit_message: &'a str,
	/// The raw content to be uploaded.
	/// Will be base64 encoded before transmitting.
	pub content: &'a str,
	/// If updating a file, this must be the sha of the blob being replaced.
	pub file_id: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
	pub file_id: String,
	pub version: String,
}

impl crate::GithubClient {
	pub fn create_or_update_file(&self, args: Args<'_>) -> BoxFuture<'static, Result<Response, Error>> {
		use serde_json::{Map, Value};

		// https://docs.github.com/en/rest/repos/contents?apiVersion=2022-11-28#create-or-update-file-contents
		let Args {
			repo_org,
			repo_name,
			path_in_repo,
			commit_message,
			content,
			file_id,
		} = args;

		let url = self.url(format!(
			"repos/{repo_org}/{repo_name}/contents/{}",
			url_path(path_in_repo)
		));

		let body = {
			let mut entries = vec![
				("message".into(), commit_message.to_owned().into()),
				("content".into(), crate::encode_content(content).into()),
			];
			if let Some(sha) = file_id {
				entries.push(("sha".into(), sha.to_owned().into()));
			}
			Value::Object(entries.into_iter().collect::<Map<String, Value>>())
		};
		log::debug!(target: "github", "create_or_update_file {url} (sha: {file_id:?})");
		let builder = self.insert_rest_headers(self.client.put(url), None).json(&body);
		let response = self.dispatch(builder);
		Box::pin(async move {
			#[derive(Deserialize)]
			struct Content {
				sha: String,
			}
			#[derive(Deserialize)]
			struct Commit {
				sha: String,
			}
			#[derive(Deserialize)]
			struct ResponseData {
				content: Content,
				commit: Commit,
			}

			// 200: file was updated
			// 201: file was created
			let data = response.await?;
			let response = serde_json::from_value::<ResponseData>(data)?;
			Ok(Response {
				file_id: response.content.sha,
				version: response.commit.sha,
			})
		})
	}
}
