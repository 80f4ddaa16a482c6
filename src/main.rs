use clap::Parser;
use reflect_hub::{api, config::Config, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let config = Config::parse();
	logging::console::init(
		env!("CARGO_PKG_NAME"),
		config.log_dir.as_deref(),
		config.log_level,
		logging::console::NOISY_TARGETS,
	)?;
	log::debug!("{config:?}");
	api::serve(config).await
}
