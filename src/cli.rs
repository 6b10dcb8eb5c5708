//! CLI argument handling.

use std::net::IpAddr;
use std::path::Path;

use clap::{Parser, Subcommand};
use steam_gateway::Config;

/// Parses the process arguments.
pub(crate) fn args() -> Args {
	Args::parse()
}

/// A JSON gateway over Steam's web APIs and SteamCharts.
///
/// Upstream credentials are read from the environment (`STEAM_API_KEY`, ...). A `.env` file in the
/// working directory is loaded first, if present.
#[derive(Debug, Parser)]
#[command(version)]
pub(crate) struct Args {
	/// What to do. Defaults to `serve`.
	#[command(subcommand)]
	pub action: Option<Action>,

	/// Path to the configuration file.
	///
	/// Defaults to `./steam-gateway.toml` if that file exists.
	#[arg(long = "config", global = true)]
	pub config_path: Option<Box<Path>>,

	/// The IP address to listen on.
	///
	/// This option takes precedence over the configuration file.
	#[arg(long, global = true)]
	pub ip: Option<IpAddr>,

	/// The port to listen on.
	///
	/// This option takes precedence over the configuration file.
	#[arg(long, env = "PORT", global = true)]
	pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Subcommand)]
pub(crate) enum Action {
	/// Run the HTTP server.
	#[default]
	Serve,

	/// Print the OpenAPI document as JSON.
	Openapi,
}

impl Args {
	/// Applies any relevant config overrides specified as CLI flags in the
	/// given `config` object.
	pub(crate) fn apply_to_config(&self, config: &mut Config) {
		if let Some(ip) = self.ip {
			config.http.ip = ip;
		}

		if let Some(port) = self.port {
			config.http.port = port;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn serve_is_the_default() {
		let args = Args::parse_from(["steam-gateway", "--port", "3000"]);

		assert_eq!(args.action.unwrap_or_default(), Action::Serve);
		assert_eq!(args.port, Some(3000));
	}

	#[test]
	fn flags_override_the_config() {
		let args = Args::parse_from(["steam-gateway", "serve", "--ip", "127.0.0.1", "--port", "9000"]);
		let mut config = Config::default();

		args.apply_to_config(&mut config);

		assert_eq!(config.http.socket_addr().to_string(), "127.0.0.1:9000");
	}

	#[test]
	fn openapi() {
		let args = Args::parse_from(["steam-gateway", "openapi"]);

		assert_eq!(args.action, Some(Action::Openapi));
	}
}
