// GKE stands for Google Kubernetes Engine. Its log agent picks `severity`
// and `message` out of JSON lines written to stdout.

use std::io::{self, Write};

use env_logger::fmt::Formatter;
use log::Record;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "UPPERCASE")]
enum Severity {
	Error,
	Warning,
	Info,
	Debug,
}

impl From<log::Level> for Severity {
	fn from(level: log::Level) -> Self {
		match level {
			log::Level::Error => Severity::Error,
			log::Level::Warn => Severity::Warning,
			log::Level::Info => Severity::Info,
			log::Level::Debug | log::Level::Trace => Severity::Debug,
		}
	}
}

#[derive(Serialize)]
struct Log<'a> {
	pub severity: Severity,
	pub message: String,
	pub target: &'a str,
	pub timestamp: chrono::DateTime<chrono::Utc>,
}

pub fn format(fmt: &mut Formatter, record: &Record) -> io::Result<()> {
	writeln!(
		fmt,
		"{}",
		serde_json::to_string(&Log {
			severity: record.level().into(),
			message: format!("{}", record.args()),
			target: record.target(),
			timestamp: chrono::Utc::now(),
		})
		.unwrap_or_else(|_| format!(
			"ERROR: Unable to serialize {}",
			record.args()
		))
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn serialize(level: log::Level) -> serde_json::Value {
		let line = serde_json::to_string(&Log {
			severity: level.into(),
			message: "commented".to_string(),
			target: "pr_joke_bot::runner",
			timestamp: chrono::Utc::now(),
		})
		.unwrap();
		assert!(!line.contains('\n'));
		serde_json::from_str(&line).unwrap()
	}

	#[test]
	fn test_log_line() {
		let log = serialize(log::Level::Info);
		assert_eq!(log["severity"], "INFO");
		assert_eq!(log["message"], "commented");
		assert_eq!(log["target"], "pr_joke_bot::runner");
		assert!(log["timestamp"].is_string());
	}

	#[test]
	fn test_severity() {
		assert_eq!(serialize(log::Level::Error)["severity"], "ERROR");
		assert_eq!(serialize(log::Level::Warn)["severity"], "WARNING");
		assert_eq!(serialize(log::Level::Debug)["severity"], "DEBUG");
		assert_eq!(serialize(log::Level::Trace)["severity"], "DEBUG");
	}
}
