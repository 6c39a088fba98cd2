use actix_web::{get, patch, post, web};
use domain_repair::{
    command::{CreateWorkOrderCommand, UpdateWorkOrderCommand},
    model::entity::WorkOrderDetail,
};
use infrastructure_common::middleware::SessionUser;

use super::{current_account, extract_uuid, ApiResult};
use crate::infrastructure::ServiceProvider;

/// Work orders the caller created or is assigned to.
#[get("/api/work-orders")]
pub async fn list(
    sp: web::Data<ServiceProvider>,
    user: SessionUser,
) -> ApiResult<web::Json<Vec<WorkOrderDetail>>> {
    let account = current_account(sp.auth_service.as_ref(), &user).await?;
    Ok(web::Json(sp.work_order_service.list_work_orders(account.id).await?))
}

#[post("/api/work-orders")]
pub async fn create(
    sp: web::Data<ServiceProvider>,
    user: SessionUser,
    command: web::Json<CreateWorkOrderCommand>,
) -> ApiResult<web::Json<WorkOrderDetail>> {
    let account = current_account(sp.auth_service.as_ref(), &user).await?;
    let work_order = sp
        .work_order_service
        .create_work_order(account.id, command.into_inner())
        .await?;
    Ok(web::Json(work_order))
}

#[get("/api/work-orders/{id}")]
pub async fn detail(
    sp: web::Data<ServiceProvider>,
    _user: SessionUser,
    id: web::Path<String>,
) -> ApiResult<web::Json<WorkOrderDetail>> {
    let id = extract_uuid(&id)?;
    Ok(web::Json(sp.work_order_service.get_work_order(id).await?))
}

#[patch("/api/work-orders/{id}")]
pub async fn update(
    sp: web::Data<ServiceProvider>,
    _user: SessionUser,
    id: web::Path<String>,
    command: web::Json<UpdateWorkOrderCommand>,
) -> ApiResult<web::Json<WorkOrderDetail>> {
    let id = extract_uuid(&id)?;
    let work_order = sp.work_order_service.update_work_order(id, command.into_inner()).await?;
    Ok(web::Json(work_order))
}
