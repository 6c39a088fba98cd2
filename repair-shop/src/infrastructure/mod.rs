mod config;
mod database;
mod repository;
mod service_provider;

#[rustfmt::skip]
pub use {
    config::{ReportConfig, ShopConfig},
    database::{create_schema, OrmRepo},
    service_provider::ServiceProvider,
};
