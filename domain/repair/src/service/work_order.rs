use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    command::{CreateWorkOrderCommand, UpdateWorkOrderCommand},
    exception::RepairResult,
    model::entity::WorkOrderDetail,
};

#[async_trait]
pub trait WorkOrderService: Send + Sync {
    /// Work orders the user created or is assigned to, newest first.
    async fn list_work_orders(&self, user_id: Uuid) -> RepairResult<Vec<WorkOrderDetail>>;
    /// Any work order by id, regardless of who owns it.
    async fn get_work_order(&self, id: Uuid) -> RepairResult<WorkOrderDetail>;
    async fn create_work_order(
        &self,
        user_id: Uuid,
        command: CreateWorkOrderCommand,
    ) -> RepairResult<WorkOrderDetail>;
    /// Any work order by id, regardless of who owns it.
    async fn update_work_order(
        &self,
        id: Uuid,
        command: UpdateWorkOrderCommand,
    ) -> RepairResult<WorkOrderDetail>;
}
