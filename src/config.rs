use clap::Parser;
use github::RepositoryCoordinate;
use std::{net::SocketAddr, path::PathBuf};

/// Runtime configuration, read from the command line with environment variable fallbacks.
#[derive(Parser, Debug, Clone)]
#[command(name = "reflect-hub", version, about)]
pub struct Config {
	/// Address the api server listens on.
	#[arg(long, env = "REFLECT_HUB_BIND", default_value = "127.0.0.1:8080")]
	pub bind: SocketAddr,

	/// Root of the GitHub REST api.
	#[arg(long, env = "REFLECT_HUB_GITHUB_API", default_value = github::GITHUB_API)]
	pub github_api: String,

	/// Repository (`owner/repo`) used when a request does not name one.
	#[arg(long, env = "REFLECT_HUB_DEFAULT_REPOSITORY")]
	pub default_repository: Option<RepositoryCoordinate>,

	/// Most verbose level written to the terminal and the log file.
	#[arg(long, env = "REFLECT_HUB_LOG", default_value = "info")]
	pub log_level: log::LevelFilter,

	/// Directory the `reflect-hub.log` file is written to. Defaults to the working directory.
	#[arg(long, env = "REFLECT_HUB_LOG_DIR")]
	pub log_dir: Option<PathBuf>,
}

impl Config {
	/// Configuration for tests and embedders, pointing at the given api root.
	pub fn with_github_api(github_api: impl Into<String>) -> Self {
		Self {
			bind: SocketAddr::from(([127, 0, 0, 1], 0)),
			github_api: github_api.into(),
			default_repository: None,
			log_level: log::LevelFilter::Info,
			log_dir: None,
		}
	}
}
