use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use domain_repair::{
    command::{CreateWorkOrderCommand, UpdateWorkOrderCommand},
    exception::{RepairException, RepairResult},
    model::entity::{WorkOrder, WorkOrderDetail},
    repository::{CustomerRepo, UserRepo, WorkOrderRepo},
    service::WorkOrderService,
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

#[derive(TypedBuilder)]
pub struct WorkOrderServiceImpl {
    work_order_repository: Arc<dyn WorkOrderRepo>,
    customer_repository: Arc<dyn CustomerRepo>,
    user_repository: Arc<dyn UserRepo>,
}

impl WorkOrderServiceImpl {
    async fn ensure_customer(&self, id: Uuid) -> RepairResult<()> {
        match self.customer_repository.get_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(RepairException::not_found("Customer", id)),
        }
    }

    async fn ensure_user(&self, id: Uuid) -> RepairResult<()> {
        match self.user_repository.get_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(RepairException::not_found("User", id)),
        }
    }
}

#[async_trait]
impl WorkOrderService for WorkOrderServiceImpl {
    async fn list_work_orders(&self, user_id: Uuid) -> RepairResult<Vec<WorkOrderDetail>> {
        Ok(self.work_order_repository.get_visible_to(user_id, None).await?)
    }

    async fn get_work_order(&self, id: Uuid) -> RepairResult<WorkOrderDetail> {
        self.work_order_repository
            .get_detail(id)
            .await?
            .ok_or(RepairException::not_found("WorkOrder", id))
    }

    async fn create_work_order(
        &self,
        user_id: Uuid,
        command: CreateWorkOrderCommand,
    ) -> RepairResult<WorkOrderDetail> {
        let new = command.validate()?;
        self.ensure_customer(new.customer_id).await?;
        if let Some(assignee) = new.assigned_to_id {
            self.ensure_user(assignee).await?;
        }
        let now = Utc::now();
        let work_order = WorkOrder {
            id: Uuid::new_v4(),
            customer_id: new.customer_id,
            created_by_id: user_id,
            assigned_to_id: new.assigned_to_id,
            title: new.title,
            description: new.description,
            device_type: new.device_type,
            brand: new.brand,
            model: new.model,
            serial_number: new.serial_number,
            problem: new.problem,
            priority: new.priority,
            status: new.status,
            start_date: new.start_date,
            end_date: new.end_date,
            amount: Some(new.amount),
            created_at: now,
            updated_at: now,
        };
        let id = self.work_order_repository.insert(&work_order).await?;
        tracing::info!("User {user_id} created work order {id}");
        self.get_work_order(id).await
    }

    async fn update_work_order(
        &self,
        id: Uuid,
        command: UpdateWorkOrderCommand,
    ) -> RepairResult<WorkOrderDetail> {
        command.validate()?;
        if command.is_empty() {
            return self.get_work_order(id).await;
        }
        if let Some(customer_id) = command.customer_id {
            self.ensure_customer(customer_id).await?;
        }
        if let Some(Some(assignee)) = command.assigned_to_id {
            self.ensure_user(assignee).await?;
        }
        if !self.work_order_repository.update_fields(id, &command, Utc::now()).await? {
            return Err(RepairException::not_found("WorkOrder", id));
        }
        tracing::debug!("Updated work order {id}");
        self.get_work_order(id).await
    }
}
