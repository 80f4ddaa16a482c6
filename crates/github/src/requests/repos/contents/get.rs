use crate::Error;
use futures_util::future::BoxFuture;
use serde::Deserialize;
use std::path::Path;

#[derive(Clone, Copy)]
pub struct Args<'a> {
	pub owner: &'a str,
	pub repo: &'a str,
	/// The path to the file or directory in the repository.
	pub path: &'a Path,
}

/// One entry of the contents api.
/// `content` and `encoding` are only populated when a single file is requested.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ContentEntry {
	#[serde(rename = "type")]
	pub type_: String,
	pub name: String,
	pub path: String,
	/// The blob sha, required to update or delete the file.
	pub sha: String,
	#[serde(default)]
	pub size: u64,
	#[serde(default)]
	pub download_url: Option<String>,
	#[serde(default)]
	pub content: Option<String>,
	#[serde(default)]
	pub encoding: Option<String>,
}

impl ContentEntry {
	pub fn is_file(&self) -> bool {
		self.type_ == "file"
	}

	/// Whether `content` holds the whole file. GitHub stops inlining files above 1 MB
	/// and reports them with an encoding of `none` and empty content.
	pub fn has_inline_content(&self) -> bool {
		match (self.encoding.as_deref(), self.content.as_deref()) {
			(Some("base64"), Some(content)) => !content.is_empty() || self.size == 0,
			_ => false,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Contents {
	Directory(Vec<ContentEntry>),
	File(ContentEntry),
}

/// Formats a repository path for use in a url, escaping each segment.
pub(crate) fn url_path(path: &Path) -> String {
	let path_str = path.to_string_lossy().replace("\\", "/");
	path_str
		.split('/')
		.filter(|segment| !segment.is_empty())
		.map(|segment| urlencoding::encode(segment).into_owned())
		.collect::<Vec<_>>()
		.join("/")
}

impl crate::GithubClient {
	/// Fetches the metadata of a file (including its base64 content) or the listing of a directory.
	pub fn get_contents(&self, request: Args<'_>) -> BoxFuture<'static, Result<Contents, Error>> {
		// https://docs.github.com/en/rest/repos/contents?apiVersion=2022-11-28#get-repository-content
		let url = self.url(format!(
			"repos/{}/{}/contents/{}",
			request.owner,
			request.repo,
			url_path(request.path)
		));
		let builder = self.insert_rest_headers(self.client.get(url), None);
		let response = self.dispatch(builder);
		Box::pin(async move {
			let data = response.await?;
			Ok(serde_json::from_value::<Contents>(data)?)
		})
	}

	/// Fetches the bytes of a file as text, for files too large to be inlined in [`get_contents`](Self::get_contents).
	pub fn get_file_content(&self, request: Args<'_>) -> BoxFuture<'static, Result<String, Error>> {
		// https://docs.github.com/en/rest/overview/media-types?apiVersion=2022-11-28
		let url = self.url(format!(
			"repos/{}/{}/contents/{}",
			request.owner,
			request.repo,
			url_path(request.path)
		));
		let builder = self.insert_rest_headers(self.client.get(url), Some("raw"));
		let response = self.dispatch_raw(builder);
		Box::pin(async move { Ok(crate::decode_utf8_or_fallback(response.await?)) })
	}
}
