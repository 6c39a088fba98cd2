use architecture::repository::DBRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    command::UpdateCustomerCommand,
    model::entity::{Customer, CustomerWithWorkOrders},
};

#[async_trait]
pub trait CustomerRepo: DBRepository<Customer> + Send + Sync {
    /// All customers, newest first, each with its work orders.
    async fn get_all_with_work_orders(&self) -> anyhow::Result<Vec<CustomerWithWorkOrders>>;
    /// Writes only the fields present in `command`. Returns `false` when no row has `id`.
    async fn update_fields(
        &self,
        id: Uuid,
        command: &UpdateCustomerCommand,
        updated_at: DateTime<Utc>,
    ) -> anyhow::Result<bool>;
}
