use std::sync::Arc;

use actix_web::web;
use colored::Colorize;
use infrastructure_common::{config::build_config, middleware::SessionGuard, telemetry};
use tracing::{error, info};

use crate::{
    api,
    infrastructure::{ServiceProvider, ShopConfig},
};

pub fn run() {
    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(x) => x,
        Err(e) => return eprintln!("{}: {}", "Cannot build runtime".red(), e),
    };
    runtime.block_on(async_run());
}

pub async fn async_run() {
    let config = match build_config() {
        Ok(x) => x,
        Err(e) => {
            return eprintln!("{}: {}", "Cannot build config".red(), e);
        }
    };
    let shop_config = match config.clone().try_deserialize::<ShopConfig>() {
        Ok(x) => x,
        Err(e) => {
            return eprintln!("{}: {}", "Cannot read config".red(), e);
        }
    };
    if let Err(e) = telemetry::initialize_telemetry(shop_config.common.telemetry()) {
        return eprintln!("{}: {}", "Cannot build logger".red(), e);
    };
    let service_provider = match ServiceProvider::build(config).await {
        Ok(x) => Arc::new(x),
        Err(e) => {
            return eprintln!("{}: {}", "Cannot build Service Provider".red(), e);
        }
    };
    tokio::select! {
        _ = initialize_web_host(service_provider) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Stopping services (ctrl-c handling).");
        }
    }
}

/// Application state, extractor configuration and routes shared by the server and tests.
pub fn configure_app(sp: Arc<ServiceProvider>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::from(sp))
            .app_data(api::json_config())
            .app_data(api::query_config())
            .app_data(api::path_config())
            .configure(api::configure);
    }
}

pub async fn initialize_web_host(sp: Arc<ServiceProvider>) {
    let host = sp.config.common.host().clone();
    let session_config = sp.config.common.session().clone();
    let server = actix_web::HttpServer::new(move || {
        let cors = actix_cors::Cors::default()
            .allow_any_origin()
            .allow_any_header()
            .allow_any_method()
            .max_age(86400);

        actix_web::App::new()
            .wrap(SessionGuard::new(sp.session_keys.clone(), session_config.clone()))
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(configure_app(sp.clone()))
    });
    let server = match server.bind((host.bind_address().to_owned(), *host.bind_port())) {
        Ok(x) => x,
        Err(e) => return error!("Cannot bind {}:{}: {}", host.bind_address(), host.bind_port(), e),
    };
    info!("Listening on {}:{}", host.bind_address(), host.bind_port());
    match server.disable_signals().run().await {
        Ok(_) => info!("Web server stopped successfully."),
        Err(e) => error!("Web server into error: {}", e),
    }
}
