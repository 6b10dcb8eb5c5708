use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use url::Url;

/// HTTP server configuration.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct HttpConfig {
	/// The IP address the server should listen on.
	#[serde(default = "HttpConfig::default_ip")]
	pub ip: IpAddr,

	/// The port the server should listen on.
	#[serde(default = "HttpConfig::default_port")]
	pub port: u16,

	/// The URL clients use to reach the gateway.
	///
	/// If set, it is advertised in the `servers` section of the OpenAPI document, which some tool
	/// integrations require.
	#[serde(default)]
	pub public_url: Option<Url>,
}

impl HttpConfig {
	/// Returns the [`SocketAddr`] that the HTTP server should listen on.
	pub fn socket_addr(&self) -> SocketAddr {
		SocketAddr::new(self.ip, self.port)
	}

	fn default_ip() -> IpAddr {
		IpAddr::V4(Ipv4Addr::UNSPECIFIED)
	}

	fn default_port() -> u16 {
		8000
	}
}

impl Default for HttpConfig {
	fn default() -> Self {
		Self {
			ip: Self::default_ip(),
			port: Self::default_port(),
			public_url: None,
		}
	}
}
