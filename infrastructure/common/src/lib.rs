pub mod config;
#[cfg(feature = "sea-orm-db")]
pub mod data;
#[cfg(feature = "actix-middleware")]
pub mod middleware;
#[cfg(feature = "telemetry")]
pub mod telemetry;
