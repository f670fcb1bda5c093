use crate::config::LogFormat;

pub mod gke;

/// Sets up `env_logger` with `info` as the default filter; `RUST_LOG`
/// overrides it.
pub fn init(format: LogFormat) {
	let mut builder = env_logger::from_env(
		env_logger::Env::default().default_filter_or("info"),
	);
	if format == LogFormat::Json {
		builder.format(gke::format);
	}
	builder.init();
}
