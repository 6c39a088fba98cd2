use actix_web::{get, patch, post, web};
use domain_repair::{
    command::{CreateCustomerCommand, UpdateCustomerCommand},
    model::entity::{Customer, CustomerWithWorkOrders},
};
use infrastructure_common::middleware::SessionUser;

use super::{extract_uuid, ApiResult};
use crate::infrastructure::ServiceProvider;

#[get("/api/customers")]
pub async fn list(
    sp: web::Data<ServiceProvider>,
    _user: SessionUser,
) -> ApiResult<web::Json<Vec<CustomerWithWorkOrders>>> {
    Ok(web::Json(sp.customer_service.list_customers().await?))
}

#[post("/api/customers")]
pub async fn create(
    sp: web::Data<ServiceProvider>,
    _user: SessionUser,
    command: web::Json<CreateCustomerCommand>,
) -> ApiResult<web::Json<Customer>> {
    Ok(web::Json(sp.customer_service.create_customer(command.into_inner()).await?))
}

/// Reachable without a session.
#[get("/api/customers/{id}")]
pub async fn detail(
    sp: web::Data<ServiceProvider>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Customer>> {
    let id = extract_uuid(&id)?;
    Ok(web::Json(sp.customer_service.get_customer(id).await?))
}

#[patch("/api/customers/{id}")]
pub async fn update(
    sp: web::Data<ServiceProvider>,
    _user: SessionUser,
    id: web::Path<String>,
    command: web::Json<UpdateCustomerCommand>,
) -> ApiResult<web::Json<Customer>> {
    let id = extract_uuid(&id)?;
    Ok(web::Json(sp.customer_service.update_customer(id, command.into_inner()).await?))
}
