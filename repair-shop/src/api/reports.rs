use actix_web::{get, web};
use domain_repair::model::vo::{Period, ReportPoint, ReportSummary};
use infrastructure_common::middleware::SessionUser;
use serde::Deserialize;

use super::{current_account, ApiResult};
use crate::infrastructure::ServiceProvider;

#[derive(Deserialize)]
pub struct ReportQuery {
    /// `daily` or `yearly`; monthly otherwise.
    #[serde(default)]
    period: Option<String>,
}

/// Income series of the caller's own work orders.
#[get("/api/reports")]
pub async fn aggregate(
    sp: web::Data<ServiceProvider>,
    user: SessionUser,
    query: web::Query<ReportQuery>,
) -> ApiResult<web::Json<Vec<ReportPoint>>> {
    let account = current_account(sp.auth_service.as_ref(), &user).await?;
    let period = query.period.as_deref().map(Period::from_query).unwrap_or_default();
    Ok(web::Json(sp.report_service.aggregate(account.id, period).await?))
}

#[get("/api/reports/summary")]
pub async fn summary(
    sp: web::Data<ServiceProvider>,
    user: SessionUser,
) -> ApiResult<web::Json<ReportSummary>> {
    let account = current_account(sp.auth_service.as_ref(), &user).await?;
    Ok(web::Json(sp.report_service.summary(account.id).await?))
}
