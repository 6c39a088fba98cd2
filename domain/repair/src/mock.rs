use architecture::repository::{DBRepository, MutableRepository, ReadOnlyRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::{
    command::{UpdateCustomerCommand, UpdateWorkOrderCommand},
    model::{
        entity::{Customer, CustomerWithWorkOrders, User, WorkOrder, WorkOrderDetail},
        vo::IncomeRecord,
    },
    repository::{CustomerRepo, UserRepo, WorkOrderRepo},
};

mock! {
    pub UserRepo {}
    #[async_trait]
    impl UserRepo for UserRepo {
        async fn get_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    }
    impl DBRepository<User> for UserRepo {}
    #[async_trait]
    impl ReadOnlyRepository<User> for UserRepo {
        async fn get_by_id(&self, uuid: Uuid) -> anyhow::Result<Option<User>>;
    }
    #[async_trait]
    impl MutableRepository<User> for UserRepo {
        async fn insert(&self, entity: &User) -> anyhow::Result<Uuid>;
    }
}

mock! {
    pub CustomerRepo {}
    #[async_trait]
    impl CustomerRepo for CustomerRepo {
        async fn get_all_with_work_orders(&self) -> anyhow::Result<Vec<CustomerWithWorkOrders>>;
        async fn update_fields(
            &self,
            id: Uuid,
            command: &UpdateCustomerCommand,
            updated_at: DateTime<Utc>,
        ) -> anyhow::Result<bool>;
    }
    impl DBRepository<Customer> for CustomerRepo {}
    #[async_trait]
    impl ReadOnlyRepository<Customer> for CustomerRepo {
        async fn get_by_id(&self, uuid: Uuid) -> anyhow::Result<Option<Customer>>;
    }
    #[async_trait]
    impl MutableRepository<Customer> for CustomerRepo {
        async fn insert(&self, entity: &Customer) -> anyhow::Result<Uuid>;
    }
}

mock! {
    pub WorkOrderRepo {}
    #[async_trait]
    impl WorkOrderRepo for WorkOrderRepo {
        async fn get_detail(&self, id: Uuid) -> anyhow::Result<Option<WorkOrderDetail>>;
        async fn get_visible_to(
            &self,
            user_id: Uuid,
            limit: Option<u64>,
        ) -> anyhow::Result<Vec<WorkOrderDetail>>;
        async fn sum_completed_income(
            &self,
            user_id: Uuid,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> anyhow::Result<f64>;
        async fn get_income_records(
            &self,
            created_by_id: Uuid,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> anyhow::Result<Vec<IncomeRecord>>;
        async fn update_fields(
            &self,
            id: Uuid,
            command: &UpdateWorkOrderCommand,
            updated_at: DateTime<Utc>,
        ) -> anyhow::Result<bool>;
    }
    impl DBRepository<WorkOrder> for WorkOrderRepo {}
    #[async_trait]
    impl ReadOnlyRepository<WorkOrder> for WorkOrderRepo {
        async fn get_by_id(&self, uuid: Uuid) -> anyhow::Result<Option<WorkOrder>>;
    }
    #[async_trait]
    impl MutableRepository<WorkOrder> for WorkOrderRepo {
        async fn insert(&self, entity: &WorkOrder) -> anyhow::Result<Uuid>;
    }
}
