use actix_web::{get, post, web, HttpResponse};
use architecture::UserInfo;
use chrono::{DateTime, Utc};
use domain_repair::{
    command::{RegisterUserCommand, SignInCommand},
    model::entity::UserSummary,
};
use infrastructure_common::middleware::SessionUser;
use serde::Serialize;

use super::{current_account, ApiResult};
use crate::infrastructure::ServiceProvider;

#[derive(Serialize)]
struct RegisterResponse {
    message: &'static str,
    user: UserSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    user: UserInfo,
    token: String,
    expires_at: DateTime<Utc>,
}

#[post("/api/auth/register")]
pub async fn register(
    sp: web::Data<ServiceProvider>,
    command: web::Json<RegisterUserCommand>,
) -> ApiResult<HttpResponse> {
    let user = sp.auth_service.register(command.into_inner()).await?;
    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully",
        user,
    }))
}

#[post("/api/auth/sign-in")]
pub async fn sign_in(
    sp: web::Data<ServiceProvider>,
    command: web::Json<SignInCommand>,
) -> ApiResult<HttpResponse> {
    let user = sp.auth_service.verify_credentials(command.into_inner()).await?;
    let issued = sp.session_keys.issue(&user)?;
    Ok(HttpResponse::Ok().cookie(sp.session_keys.cookie(&issued)).json(SignInResponse {
        user,
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}

/// Drops the cookie. The token itself stays valid until it expires.
#[post("/api/auth/sign-out")]
pub async fn sign_out(sp: web::Data<ServiceProvider>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(sp.session_keys.removal_cookie())
        .json(serde_json::json!({ "success": true }))
}

#[get("/api/auth/me")]
pub async fn me(
    sp: web::Data<ServiceProvider>,
    user: SessionUser,
) -> ApiResult<web::Json<UserSummary>> {
    let account = current_account(sp.auth_service.as_ref(), &user).await?;
    Ok(web::Json(account.summary()))
}
