use anyhow::Result;
use std::path::Path;

/// Log targets that are too chatty to be useful at debug level.
pub static NOISY_TARGETS: &[&str] = &["hyper", "reqwest", "mio", "want", "tower_http"];

/// Installs a logger writing to both the terminal and `<dir>/<name>.log`.
/// The log file is truncated on every start.
pub fn init(name: &str, directory: Option<&Path>, level: log::LevelFilter, ignore: &[&'static str]) -> Result<()> {
	use simplelog::*;
	let log_path = {
		let mut path = match directory {
			Some(dir) => dir.to_owned(),
			None => std::env::current_dir()?,
		};
		path.push(format!("{}.log", name));
		path
	};
	if let Some(parent) = log_path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	let file = std::fs::OpenOptions::new()
		.create(true)
		.write(true)
		.truncate(true)
		.open(&log_path)?;
	let cfg = {
		let mut builder = ConfigBuilder::new();
		builder
			.set_max_level(log::LevelFilter::Error)
			.set_time_format_custom(format_description!(
				"[year].[month].[day]-[hour].[minute].[second]"
			))
			// [ERROR]
			// [ WARN]
			// [ INFO]
			.set_level_padding(LevelPadding::Left)
			.set_thread_level(log::LevelFilter::Error)
			.set_thread_mode(ThreadLogMode::Names)
			.set_thread_padding(ThreadPadding::Left(5))
			// the target says which component logged the line (github, api)
			.set_target_level(log::LevelFilter::Error)
			.set_location_level(log::LevelFilter::Off);
		for str in ignore.iter() {
			builder.add_filter_ignore_str(*str);
		}
		builder.build()
	};
	CombinedLogger::init(vec![
		TermLogger::new(level, cfg.clone(), TerminalMode::Mixed, ColorChoice::Auto),
		WriteLogger::new(level, cfg, file),
	])?;
	log::info!("Writing log to {}", log_path.display());
	Ok(())
}
