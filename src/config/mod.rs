//! Gateway configuration.
//!
//! Everything except [`Credentials`] is loaded from an optional TOML file on startup. Credentials
//! are only ever read from the environment, so they never end up in a checked-in file.

use std::path::Path;
use std::{fs, io};

use thiserror::Error;

pub mod credentials;
pub use credentials::Credentials;

pub mod http;
pub use http::HttpConfig;

pub mod steam;
pub use steam::SteamConfig;

pub mod tracing;
pub use tracing::{SpanEvents, TracingConfig};

/// The global configuration for the gateway.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	/// Where and how to serve HTTP.
	#[serde(default)]
	pub http: HttpConfig,

	/// Logging configuration.
	#[serde(default)]
	pub tracing: TracingConfig,

	/// Upstream endpoints and request behavior.
	#[serde(default)]
	pub steam: SteamConfig,

	/// Upstream secrets.
	#[serde(skip_deserializing, default = "Credentials::from_env")]
	pub credentials: Credentials,
}

/// Errors that can occur when loading the [`Config`] from a file.
#[derive(Debug, Error)]
pub enum LoadConfigError {
	#[error("failed to read configuration file: {0}")]
	ReadFile(#[source] io::Error),

	#[error("failed to parse configuration file: {0}")]
	Deserialize(#[source] toml::de::Error),
}

impl Config {
	/// Loads a file into memory and parses it into a [`Config`] object.
	pub fn load_from_file(path: &Path) -> Result<Self, LoadConfigError> {
		fs::read_to_string(path)
			.map_err(LoadConfigError::ReadFile)
			.and_then(|text| Self::parse(&text))
	}

	/// Parses a TOML document into a [`Config`] object.
	pub fn parse(text: &str) -> Result<Self, LoadConfigError> {
		toml::from_str(text).map_err(LoadConfigError::Deserialize)
	}

	/// Creates a [`Config`] with all defaults, reading credentials from the environment.
	pub fn from_env() -> Self {
		Self {
			credentials: Credentials::from_env(),
			..Default::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use std::net::Ipv4Addr;
	use std::num::NonZero;
	use std::time::Duration;

	use super::*;

	#[test]
	fn empty_file_uses_defaults() -> crate::testing::Result {
		let config = Config::parse("")?;

		assert_eq!(config.http.port, 8000);
		assert_eq!(config.http.ip, Ipv4Addr::UNSPECIFIED);
		assert!(config.tracing.enable);
		assert_eq!(&*config.tracing.files.filename_prefix, "steam-gateway");
		assert_eq!(config.tracing.files.max_files, None);
		assert_eq!(config.tracing.stderr.span_events, SpanEvents::Close);
		assert_eq!(config.steam.request_timeout, Duration::from_secs(10));
		assert_eq!(&*config.steam.default_language, "portuguese");
		assert_eq!(config.steam.api_url.as_str(), "https://api.steampowered.com/");

		Ok(())
	}

	#[test]
	fn sections_are_kebab_case() -> crate::testing::Result {
		let config = Config::parse(
			r#"
			[http]
			port = 3000
			public-url = "https://gateway.example.com"

			[tracing]
			include-http-headers = true

			[tracing.stderr]
			span-events = "none"

			[tracing.files]
			enable = true
			directory = "/var/log/steam-gateway"
			filename-prefix = "gateway"
			max-files = 14
			span-events = "full"

			[steam]
			request-timeout = 3
			default-language = "english"
			charts-url = "http://127.0.0.1:9999"
			"#,
		)?;

		assert_eq!(config.http.port, 3000);
		assert_eq!(
			config.http.public_url.as_ref().map(url::Url::as_str),
			Some("https://gateway.example.com/"),
		);
		assert!(config.tracing.include_http_headers);
		assert_eq!(config.tracing.stderr.span_events, SpanEvents::None);
		assert!(config.tracing.files.enable);
		assert_eq!(&*config.tracing.files.filename_prefix, "gateway");
		assert_eq!(config.tracing.files.max_files.map(NonZero::get), Some(14));
		assert_eq!(config.tracing.files.span_events, SpanEvents::Full);
		assert_eq!(config.steam.request_timeout, Duration::from_secs(3));
		assert_eq!(&*config.steam.default_language, "english");
		assert_eq!(config.steam.charts_url.as_str(), "http://127.0.0.1:9999/");

		Ok(())
	}

	#[test]
	fn unknown_span_events_are_rejected() {
		let result = Config::parse("[tracing.stderr]\nspan-events = \"enter\"\n");

		assert!(matches!(result, Err(LoadConfigError::Deserialize(_))));
	}

	#[test]
	fn unknown_fields_are_rejected() {
		let result = Config::parse("[http]\nhost = \"localhost\"\n");

		assert!(matches!(result, Err(LoadConfigError::Deserialize(_))));
	}

	#[test]
	fn credentials_cannot_come_from_the_file() {
		let result = Config::parse("[credentials]\nsteam-api-key = \"hunter2\"\n");

		assert!(matches!(result, Err(LoadConfigError::Deserialize(_))));
	}
}
