use std::{env, fmt};

/// Secrets for the upstream platforms.
///
/// These are read once on startup and never change afterwards. The [`Debug`] implementation only
/// reports which of them are present.
#[derive(Default, Clone)]
pub struct Credentials {
	/// Steam WebAPI key (`STEAM_API_KEY`).
	///
	/// Get yours here: <https://steamcommunity.com/dev/apikey>
	pub steam_api_key: Option<Box<str>>,

	/// Twitch application credentials (`TWITCH_CLIENT_ID`, `TWITCH_CLIENT_SECRET`).
	pub twitch: Option<OAuthClient>,

	/// Battle.net application credentials (`WOW_CLIENT_ID`, `WOW_CLIENT_SECRET`).
	pub battle_net: Option<OAuthClient>,

	/// OAuth refresh token (`OAUTH_REFRESH_TOKEN`).
	pub refresh_token: Option<Box<str>>,
}

/// An OAuth client-credentials pair.
#[derive(Clone)]
pub struct OAuthClient {
	pub client_id: Box<str>,
	pub client_secret: Box<str>,
}

impl Credentials {
	/// Reads all credentials from the environment.
	///
	/// Variables that are unset, empty, or not valid UTF-8 are treated as missing. OAuth clients
	/// are only considered configured if both halves are present.
	pub fn from_env() -> Self {
		Self::from_lookup(|name| env::var(name).ok())
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
		let var = |name: &str| {
			lookup(name)
				.map(|value| value.trim().to_owned())
				.filter(|value| !value.is_empty())
				.map(String::into_boxed_str)
		};

		let oauth_client = |id: &str, secret: &str| {
			Option::zip(var(id), var(secret)).map(|(client_id, client_secret)| OAuthClient {
				client_id,
				client_secret,
			})
		};

		Self {
			steam_api_key: var("STEAM_API_KEY"),
			twitch: oauth_client("TWITCH_CLIENT_ID", "TWITCH_CLIENT_SECRET"),
			battle_net: oauth_client("WOW_CLIENT_ID", "WOW_CLIENT_SECRET"),
			refresh_token: var("OAUTH_REFRESH_TOKEN"),
		}
	}
}

impl fmt::Debug for Credentials {
	fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt.debug_struct("Credentials")
			.field("steam_api_key", &self.steam_api_key.is_some())
			.field("twitch", &self.twitch.is_some())
			.field("battle_net", &self.battle_net.is_some())
			.field("refresh_token", &self.refresh_token.is_some())
			.finish()
	}
}

impl fmt::Debug for OAuthClient {
	fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt.debug_struct("OAuthClient").finish_non_exhaustive()
	}
}
