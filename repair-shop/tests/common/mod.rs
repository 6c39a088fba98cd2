#![allow(dead_code)]

use std::sync::Arc;

use actix_web::http::header;
use architecture::UserInfo;
use domain_repair::command::RegisterUserCommand;
use infrastructure_common::data::Database;
use repair_shop::infrastructure::{ServiceProvider, ShopConfig};
use sea_orm::ConnectOptions;

/// Services over a fresh in-memory SQLite database with the tables in place.
pub async fn service_provider() -> Arc<ServiceProvider> {
    let config: ShopConfig = serde_json::from_value(serde_json::json!({
        "db": { "url": "sqlite::memory:" },
        "session": { "secret": "integration-secret" },
        "report": { "utc_offset_minutes": 0 }
    }))
    .unwrap();
    // One connection, otherwise every pooled connection opens its own empty database.
    let mut options = ConnectOptions::new(config.common.db().url().to_owned());
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let connection = sea_orm::Database::connect(options).await.unwrap();
    let database = Database::from_connection(connection);
    Arc::new(ServiceProvider::from_database(config, database).await.unwrap())
}

/// Registers a staff account and returns it with a session token.
pub async fn staff(sp: &ServiceProvider, email: &str, name: &str) -> (UserInfo, String) {
    let user = sp
        .auth_service
        .register(RegisterUserCommand {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            password: Some("pw123456".to_string()),
        })
        .await
        .unwrap();
    let info = UserInfo {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
    };
    let token = sp.session_keys.issue(&info).unwrap().token;
    (info, token)
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

/// The actix app as the server builds it, session guard included.
macro_rules! test_app {
    ($sp:expr) => {{
        let sp: std::sync::Arc<repair_shop::infrastructure::ServiceProvider> = $sp;
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(infrastructure_common::middleware::SessionGuard::new(
                    sp.session_keys.clone(),
                    sp.config.common.session().clone(),
                ))
                .configure(repair_shop::server::configure_app(sp.clone())),
        )
        .await
    }};
}
