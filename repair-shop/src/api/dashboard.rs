use actix_web::{get, web};
use domain_repair::model::vo::DashboardSummary;
use infrastructure_common::middleware::SessionUser;

use super::{current_account, ApiResult};
use crate::infrastructure::ServiceProvider;

#[get("/api/dashboard")]
pub async fn dashboard(
    sp: web::Data<ServiceProvider>,
    user: SessionUser,
) -> ApiResult<web::Json<DashboardSummary>> {
    let account = current_account(sp.auth_service.as_ref(), &user).await?;
    Ok(web::Json(sp.report_service.dashboard(account.id).await?))
}
