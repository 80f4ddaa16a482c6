use serde::{Deserialize, Serialize};

/// Identifies a repository by its owner and name, written as `owner/repo`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RepositoryCoordinate {
	pub owner: String,
	pub repo_name: String,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("Invalid repository {0:?}, expected \"owner/repo\".")]
pub struct InvalidCoordinate(pub String);

impl std::str::FromStr for RepositoryCoordinate {
	type Err = InvalidCoordinate;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let Some((owner, repo_name)) = s.split_once('/') else {
			return Err(InvalidCoordinate(s.to_owned()));
		};
		// repository names never contain a slash, so anything after a second one is malformed
		if owner.is_empty() || repo_name.is_empty() || repo_name.contains('/') {
			return Err(InvalidCoordinate(s.to_owned()));
		}
		Ok(Self {
			owner: owner.to_owned(),
			repo_name: repo_name.to_owned(),
		})
	}
}

impl std::fmt::Display for RepositoryCoordinate {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}/{}", self.owner, self.repo_name)
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepositoryOwner {
	pub login: String,
	#[serde(default)]
	pub avatar_url: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryPermissions {
	#[serde(default)]
	pub admin: bool,
	#[serde(default)]
	pub push: bool,
	#[serde(default)]
	pub pull: bool,
}

/// Repository metadata as returned by the REST api.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Repository {
	pub id: u64,
	pub name: String,
	pub full_name: String,
	#[serde(default)]
	pub description: Option<String>,
	pub private: bool,
	pub owner: RepositoryOwner,
	pub html_url: String,
	#[serde(default)]
	pub default_branch: Option<String>,
	#[serde(default)]
	pub updated_at: Option<String>,
	/// Only present when the request was authenticated.
	#[serde(default)]
	pub permissions: Option<RepositoryPermissions>,
}

impl Repository {
	pub fn can_push(&self) -> bool {
		self.permissions.map(|perms| perms.push).unwrap_or(false)
	}
}
