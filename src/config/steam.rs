use std::time::Duration;

use url::Url;

/// Upstream configuration.
///
/// The base URLs only exist so the gateway can be pointed at a mirror or a local fake; in
/// production the defaults are what you want.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SteamConfig {
	/// Base URL of the Steam Web API.
	#[serde(default = "SteamConfig::default_api_url")]
	pub api_url: Url,

	/// Base URL of the Steam Store (app details & reviews).
	#[serde(default = "SteamConfig::default_store_url")]
	pub store_url: Url,

	/// Base URL of SteamCharts.
	#[serde(default = "SteamConfig::default_charts_url")]
	pub charts_url: Url,

	/// Timeout for every outbound request, in seconds.
	#[serde(
		default = "SteamConfig::default_request_timeout",
		deserialize_with = "SteamConfig::deserialize_request_timeout"
	)]
	pub request_timeout: Duration,

	/// Review language used when a request does not specify one.
	#[serde(default = "SteamConfig::default_language")]
	pub default_language: Box<str>,
}

impl SteamConfig {
	fn default_api_url() -> Url {
		static_url("https://api.steampowered.com")
	}

	fn default_store_url() -> Url {
		static_url("https://store.steampowered.com")
	}

	fn default_charts_url() -> Url {
		static_url("https://steamcharts.com")
	}

	fn default_request_timeout() -> Duration {
		Duration::from_secs(10)
	}

	fn deserialize_request_timeout<'de, D>(deserializer: D) -> Result<Duration, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		use serde::de;

		match <u64 as serde::Deserialize<'de>>::deserialize(deserializer)? {
			0 => Err(de::Error::custom("`request-timeout` must be at least 1 second")),
			secs => Ok(Duration::from_secs(secs)),
		}
	}

	fn default_language() -> Box<str> {
		Box::from("portuguese")
	}
}

impl Default for SteamConfig {
	fn default() -> Self {
		Self {
			api_url: Self::default_api_url(),
			store_url: Self::default_store_url(),
			charts_url: Self::default_charts_url(),
			request_timeout: Self::default_request_timeout(),
			default_language: Self::default_language(),
		}
	}
}

#[expect(clippy::expect_used)]
fn static_url(url: &'static str) -> Url {
	url.parse::<Url>().expect("hard-coded URL should be valid")
}
