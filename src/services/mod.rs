//! Gateway services.
//!
//! Every service that maps to HTTP routes has an `http` module and implements
//! `Into<axum::Router>`.

pub mod health;
pub use health::HealthService;

pub mod steam;
pub use steam::SteamService;
