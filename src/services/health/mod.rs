//! Status endpoints.
//!
//! These never touch an upstream, so they keep answering while Steam is down.

pub(crate) mod http;

/// Serves `GET /` and `GET /health`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HealthService;

impl HealthService {
	pub fn new() -> Self {
		Self
	}
}
