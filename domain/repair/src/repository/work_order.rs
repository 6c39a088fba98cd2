use architecture::repository::DBRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    command::UpdateWorkOrderCommand,
    model::{
        entity::{WorkOrder, WorkOrderDetail},
        vo::IncomeRecord,
    },
};

#[async_trait]
pub trait WorkOrderRepo: DBRepository<WorkOrder> + Send + Sync {
    /// Work order with creator, assignee and customer summaries.
    async fn get_detail(&self, id: Uuid) -> anyhow::Result<Option<WorkOrderDetail>>;
    /// Work orders created by or assigned to `user_id`, newest first.
    async fn get_visible_to(
        &self,
        user_id: Uuid,
        limit: Option<u64>,
    ) -> anyhow::Result<Vec<WorkOrderDetail>>;
    /// Sum of COMPLETED amounts visible to `user_id`, created in `[from, to)`.
    async fn sum_completed_income(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<f64>;
    /// Creation time and amount of every work order created by `created_by_id` in `[from, to)`.
    async fn get_income_records(
        &self,
        created_by_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<IncomeRecord>>;
    /// Writes only the fields present in `command`. Returns `false` when no row has `id`.
    async fn update_fields(
        &self,
        id: Uuid,
        command: &UpdateWorkOrderCommand,
        updated_at: DateTime<Utc>,
    ) -> anyhow::Result<bool>;
}
