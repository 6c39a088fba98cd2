use architecture::repository::{DBRepository, MutableRepository, ReadOnlyRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database_model::repair::prelude::*;
use domain_repair::{
    command::UpdateCustomerCommand,
    model::entity::{Customer, CustomerWithWorkOrders, WorkOrder},
    repository::CustomerRepo,
};
use sea_orm::{prelude::*, IntoActiveModel, QueryOrder, Set};

use crate::infrastructure::database::{map_db_err, OrmRepo};

#[async_trait]
impl CustomerRepo for OrmRepo {
    async fn get_all_with_work_orders(&self) -> anyhow::Result<Vec<CustomerWithWorkOrders>> {
        let rows = CustomerEntity::find()
            .order_by_desc(CustomerColumn::CreatedAt)
            .find_with_related(WorkOrderEntity)
            .all(self.connection())
            .await?;
        rows.into_iter()
            .map(|(customer, mut work_orders)| {
                work_orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                let work_orders = work_orders
                    .into_iter()
                    .map(WorkOrder::try_from)
                    .collect::<anyhow::Result<Vec<_>>>()?;
                Ok(CustomerWithWorkOrders::new(customer.into(), work_orders))
            })
            .collect()
    }

    async fn update_fields(
        &self,
        id: Uuid,
        command: &UpdateCustomerCommand,
        updated_at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let mut active_model = CustomerActiveModel {
            updated_at: Set(updated_at),
            ..Default::default()
        };
        if let Some(name) = &command.name {
            active_model.name = Set(name.trim().to_string());
        }
        if let Some(email) = &command.email {
            active_model.email = Set(email.clone());
        }
        if let Some(phone) = &command.phone {
            active_model.phone = Set(phone.clone());
        }
        if let Some(address) = &command.address {
            active_model.address = Set(address.clone());
        }
        let result = CustomerEntity::update_many()
            .set(active_model)
            .filter(CustomerColumn::Id.eq(id))
            .exec(self.connection())
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl ReadOnlyRepository<Customer> for OrmRepo {
    async fn get_by_id(&self, uuid: Uuid) -> anyhow::Result<Option<Customer>> {
        Ok(CustomerEntity::find_by_id(uuid)
            .one(self.connection())
            .await?
            .map(Customer::from))
    }
}

#[async_trait]
impl MutableRepository<Customer> for OrmRepo {
    async fn insert(&self, entity: &Customer) -> anyhow::Result<Uuid> {
        let active_model = CustomerModel::from(entity).into_active_model();
        CustomerEntity::insert(active_model)
            .exec_without_returning(self.connection())
            .await
            .map_err(map_db_err)?;
        Ok(entity.id)
    }
}

impl DBRepository<Customer> for OrmRepo {}
