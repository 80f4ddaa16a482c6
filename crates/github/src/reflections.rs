//! Markdown reflections stored as flat files under the `reflections/` directory of a repository.

use crate::{
	repos::{self, contents::get::Contents},
	Error, GithubClient, Repository, RepositoryCoordinate,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub static REFLECTIONS_DIR: &str = "reflections";
pub static REFLECTION_EXTENSION: &str = ".md";

/// One reflection file in the remote repository.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReflectionFileRef {
	pub name: String,
	pub path: String,
	/// The blob sha, which GitHub requires to match before the file can be overwritten.
	#[serde(rename = "sha")]
	pub revision_id: String,
	#[serde(rename = "size")]
	pub size_bytes: u64,
	pub download_url: String,
}

pub fn is_reflection_file_name(file_name: &str) -> bool {
	file_name.len() > REFLECTION_EXTENSION.len()
		&& file_name.ends_with(REFLECTION_EXTENSION)
		&& !file_name.contains(['/', '\\'])
}

pub fn commit_message(file_name: &str) -> String {
	format!("Add reflection: {file_name}")
}

fn reflection_path(file_name: &str) -> Result<PathBuf, Error> {
	if !is_reflection_file_name(file_name) {
		return Err(Error::invalid_input(format!(
			"Invalid file name {file_name:?}, reflections must be {REFLECTION_EXTENSION} files."
		)));
	}
	Ok(Path::new(REFLECTIONS_DIR).join(file_name))
}

impl GithubClient {
	/// Lists the markdown files in the reflections directory, newest (by name) first.
	///
	/// A repository without a reflections directory produces a [`NotFound`](crate::ErrorKind::NotFound) error,
	/// callers that want an empty list must translate it themselves.
	pub async fn list_reflection_files(&self, repo_path: &str) -> Result<Vec<ReflectionFileRef>, Error> {
		let coord = repo_path.parse::<RepositoryCoordinate>()?;
		self.check_rate_limit()?;
		let contents = self
			.get_contents(repos::contents::get::Args {
				owner: &coord.owner,
				repo: &coord.repo_name,
				path: Path::new(REFLECTIONS_DIR),
			})
			.await?;
		let Contents::Directory(entries) = contents else {
			log::warn!(target: "github", "{coord}/{REFLECTIONS_DIR} is a file, not a directory");
			return Ok(Vec::new());
		};
		let mut files = entries
			.into_iter()
			.filter(|entry| entry.is_file() && entry.name.ends_with(REFLECTION_EXTENSION))
			.map(|entry| ReflectionFileRef {
				name: entry.name,
				path: entry.path,
				revision_id: entry.sha,
				size_bytes: entry.size,
				download_url: entry.download_url.unwrap_or_default(),
			})
			.collect::<Vec<_>>();
		files.sort_by(|a, b| b.name.cmp(&a.name));
		Ok(files)
	}

	/// Reads the text of a single reflection.
	pub async fn get_reflection_file(&self, repo_path: &str, file_name: &str) -> Result<String, Error> {
		let coord = repo_path.parse::<RepositoryCoordinate>()?;
		let path = reflection_path(file_name)?;
		self.check_rate_limit()?;
		let request = repos::contents::get::Args {
			owner: &coord.owner,
			repo: &coord.repo_name,
			path: &path,
		};
		let Contents::File(entry) = self.get_contents(request).await? else {
			return Err(Error::from_response(
				404,
				serde_json::json!({ "message": format!("{} is a directory", path.display()) }),
			));
		};
		if entry.has_inline_content() {
			return crate::decode_content(entry.content.as_deref().unwrap_or_default());
		}
		log::debug!(
			target: "github",
			"{coord}/{} is not inlined ({} bytes), fetching it raw",
			path.display(),
			entry.size
		);
		self.get_file_content(request).await
	}

	/// Creates the reflection, or overwrites it if it already exists.
	///
	/// The current sha of the file is read first and sent with the write, so GitHub rejects
	/// the write if the file changed in between. No locking or retrying happens here.
	pub async fn save_reflection(&self, content: &str, file_name: &str, repo_path: &str) -> Result<(), Error> {
		let coord = repo_path.parse::<RepositoryCoordinate>()?;
		let path = reflection_path(file_name)?;
		self.check_rate_limit()?;

		let file_id = self.find_file_id(&coord, &path).await?;
		let message = commit_message(file_name);
		let response = self
			.create_or_update_file(repos::contents::update::Args {
				repo_org: &coord.owner,
				repo_name: &coord.repo_name,
				path_in_repo: &path,
				commit_message: &message,
				content,
				file_id: file_id.as_deref(),
			})
			.await?;
		log::info!(
			target: "github",
			"saved {coord}/{} as commit {}",
			path.display(),
			response.version
		);
		Ok(())
	}

	/// Deletes a reflection. Unlike saving, a missing file is an error.
	pub async fn delete_reflection(&self, file_name: &str, repo_path: &str) -> Result<(), Error> {
		let coord = repo_path.parse::<RepositoryCoordinate>()?;
		let path = reflection_path(file_name)?;
		self.check_rate_limit()?;

		let Some(file_id) = self.find_file_id(&coord, &path).await? else {
			return Err(Error::from_response(
				404,
				serde_json::json!({ "message": "Not Found" }),
			));
		};
		let message = format!("Delete reflection: {file_name}");
		let version = self
			.delete_file(repos::contents::delete::Args {
				repo_org: &coord.owner,
				repo_name: &coord.repo_name,
				path_in_repo: &path,
				commit_message: &message,
				file_id: &file_id,
			})
			.await?;
		log::info!(target: "github", "deleted {coord}/{} in commit {version}", path.display());
		Ok(())
	}

	/// Whether the credential may push to the repository.
	pub async fn check_repository_permissions(&self, repo_path: &str) -> Result<bool, Error> {
		let coord = repo_path.parse::<RepositoryCoordinate>()?;
		self.check_rate_limit()?;
		let repository = self
			.get_repository(repos::get::Args {
				owner: &coord.owner,
				repo: &coord.repo_name,
			})
			.await?;
		Ok(repository.can_push())
	}

	/// The repositories owned by the credential, most recently updated first.
	pub async fn list_repositories(&self) -> Result<Vec<Repository>, Error> {
		self.check_rate_limit()?;
		self.list_user_repositories(crate::user::repos::Args::default()).await
	}

	/// Reads the sha of a file, `None` if it does not exist.
	async fn find_file_id(&self, coord: &RepositoryCoordinate, path: &Path) -> Result<Option<String>, Error> {
		let request = repos::contents::get::Args {
			owner: &coord.owner,
			repo: &coord.repo_name,
			path,
		};
		match self.get_contents(request).await {
			Ok(Contents::File(entry)) => Ok(Some(entry.sha)),
			Ok(Contents::Directory(_)) => Err(Error::invalid_input(format!(
				"{} is a directory.",
				path.display()
			))),
			Err(err) if err.is_not_found() => Ok(None),
			Err(err) => Err(err),
		}
	}
}
