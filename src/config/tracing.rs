use std::num::NonZero;
use std::path::Path;

use tracing_subscriber::EnvFilter;

/// The filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "steam_gateway=info,tower_http=info,warn";

/// Tracing configuration.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TracingConfig {
	/// Whether to enable tracing.
	#[serde(default = "TracingConfig::default_enable")]
	pub enable: bool,

	/// Whether to include HTTP headers in request lifecycle traces.
	#[serde(default)]
	pub include_http_headers: bool,

	#[serde(default)]
	pub stderr: StderrConfig,

	#[serde(default)]
	pub files: FilesConfig,
}

/// Logging to stderr.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct StderrConfig {
	#[serde(default = "TracingConfig::default_enable")]
	pub enable: bool,

	/// Whether to emit ANSI color codes.
	#[serde(default = "TracingConfig::default_enable")]
	pub ansi: bool,

	#[serde(default)]
	pub span_events: SpanEvents,
}

/// Logging to daily-rotated JSON files.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FilesConfig {
	#[serde(default)]
	pub enable: bool,

	/// The directory the log files are stored in.
	#[serde(default = "FilesConfig::default_directory")]
	pub directory: Box<Path>,

	/// Log files are named `<prefix>.<date>.json`.
	#[serde(default = "FilesConfig::default_filename_prefix")]
	pub filename_prefix: Box<str>,

	/// How many daily files to keep around. Older ones are deleted on rotation.
	///
	/// All files are kept if this is not set.
	#[serde(default)]
	pub max_files: Option<NonZero<usize>>,

	#[serde(default)]
	pub span_events: SpanEvents,
}

/// Which span lifecycle events are logged.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpanEvents {
	/// Only events, no spans.
	None,

	/// When a span closes, with its busy & idle time. For request spans this is the request
	/// latency.
	#[default]
	Close,

	/// Every span transition.
	Full,
}

impl TracingConfig {
	/// Builds the filter for all log layers.
	///
	/// `RUST_LOG` takes precedence over the built-in default.
	pub fn env_filter(&self) -> EnvFilter {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
	}

	fn default_enable() -> bool {
		true
	}
}

impl Default for TracingConfig {
	fn default() -> Self {
		Self {
			enable: Self::default_enable(),
			include_http_headers: false,
			stderr: StderrConfig::default(),
			files: FilesConfig::default(),
		}
	}
}

impl Default for StderrConfig {
	fn default() -> Self {
		Self {
			enable: true,
			ansi: true,
			span_events: SpanEvents::default(),
		}
	}
}

impl FilesConfig {
	fn default_directory() -> Box<Path> {
		Box::from(Path::new("./logs"))
	}

	fn default_filename_prefix() -> Box<str> {
		Box::from(env!("CARGO_PKG_NAME"))
	}
}

impl Default for FilesConfig {
	fn default() -> Self {
		Self {
			enable: false,
			directory: Self::default_directory(),
			filename_prefix: Self::default_filename_prefix(),
			max_files: None,
			span_events: SpanEvents::default(),
		}
	}
}
