use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    command::{CreateCustomerCommand, UpdateCustomerCommand},
    exception::RepairResult,
    model::entity::{Customer, CustomerWithWorkOrders},
};

/// Customers are shop-wide, none of these operations filter by owner.
#[async_trait]
pub trait CustomerService: Send + Sync {
    async fn list_customers(&self) -> RepairResult<Vec<CustomerWithWorkOrders>>;
    async fn get_customer(&self, id: Uuid) -> RepairResult<Customer>;
    async fn create_customer(&self, command: CreateCustomerCommand) -> RepairResult<Customer>;
    async fn update_customer(
        &self,
        id: Uuid,
        command: UpdateCustomerCommand,
    ) -> RepairResult<Customer>;
}
