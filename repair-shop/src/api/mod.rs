use std::{fmt, str::FromStr};

use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    http::StatusCode,
    web, HttpRequest, HttpResponse, ResponseError,
};
use domain_repair::{exception::RepairException, model::entity::User, service::AuthService};
use infrastructure_common::middleware::SessionUser;
use serde::Serialize;
use uuid::Uuid;

pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod reports;
pub mod work_orders;

/// Error body of every failed API call.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps domain failures onto HTTP statuses.
#[derive(Debug)]
pub struct ApiError(pub RepairException);

pub type ApiResult<T> = Result<T, ApiError>;

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<RepairException> for ApiError {
    fn from(e: RepairException) -> Self {
        Self(e)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self(e.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            RepairException::InvalidCredentials | RepairException::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            RepairException::AccountNotFound | RepairException::NotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            RepairException::EmailTaken => StatusCode::BAD_REQUEST,
            RepairException::ConstraintViolation { .. } => StatusCode::CONFLICT,
            RepairException::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            e if e.is_validation() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("{:?}", self.0);
            "Something went wrong.".to_string()
        } else {
            self.0.to_string()
        };
        HttpResponse::build(status).json(ErrorBody { error })
    }
}

fn invalid_request(reason: String) -> actix_web::Error {
    ApiError(RepairException::InvalidRequest { reason }).into()
}

/// Malformed JSON bodies, queries and paths answer like validation failures.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|e: JsonPayloadError, _: &HttpRequest| invalid_request(e.to_string()))
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|e: QueryPayloadError, _: &HttpRequest| invalid_request(e.to_string()))
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|e: PathError, _: &HttpRequest| invalid_request(e.to_string()))
}

fn extract_uuid(s: &str) -> ApiResult<Uuid> {
    Uuid::from_str(s).map_err(|e| {
        ApiError(RepairException::InvalidRequest {
            reason: format!(r#"error when parse uuid from "{s}": {e}"#),
        })
    })
}

/// The stored account behind the session; a session may outlive its account.
async fn current_account(auth: &dyn AuthService, user: &SessionUser) -> ApiResult<User> {
    Ok(auth.resolve_account(&user.0).await?)
}

/// Registers every API route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::register)
        .service(auth::sign_in)
        .service(auth::sign_out)
        .service(auth::me)
        .service(customers::list)
        .service(customers::create)
        .service(customers::detail)
        .service(customers::update)
        .service(work_orders::list)
        .service(work_orders::create)
        .service(work_orders::detail)
        .service(work_orders::update)
        .service(reports::summary)
        .service(reports::aggregate)
        .service(dashboard::dashboard);
}
