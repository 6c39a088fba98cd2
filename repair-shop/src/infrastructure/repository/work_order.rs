use std::collections::HashMap;

use architecture::repository::{DBRepository, MutableRepository, ReadOnlyRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database_model::repair::prelude::*;
use domain_repair::{
    command::UpdateWorkOrderCommand,
    model::{
        entity::{Customer, User, WorkOrder, WorkOrderDetail},
        vo::{IncomeRecord, WorkOrderStatus},
    },
    repository::WorkOrderRepo,
};
use sea_orm::{
    prelude::*, sea_query::Expr, Condition, QueryOrder, QuerySelect, Select, Set,
};

use crate::infrastructure::database::{map_db_err, OrmRepo};

fn visible_to(user_id: Uuid) -> Condition {
    Condition::any()
        .add(WorkOrderColumn::CreatedById.eq(user_id))
        .add(WorkOrderColumn::AssignedToId.eq(user_id))
}

fn created_between(
    select: Select<WorkOrderEntity>,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Select<WorkOrderEntity> {
    select
        .filter(WorkOrderColumn::CreatedAt.gte(from))
        .filter(WorkOrderColumn::CreatedAt.lt(to))
}

impl OrmRepo {
    /// Joins creator, assignee and customer summaries with one query per table.
    async fn with_details(&self, models: Vec<WorkOrderModel>) -> anyhow::Result<Vec<WorkOrderDetail>> {
        if models.is_empty() {
            return Ok(vec![]);
        }
        let mut user_ids = models.iter().map(|m| m.created_by_id).collect::<Vec<_>>();
        user_ids.extend(models.iter().filter_map(|m| m.assigned_to_id));
        user_ids.sort();
        user_ids.dedup();
        let mut customer_ids = models.iter().map(|m| m.customer_id).collect::<Vec<_>>();
        customer_ids.sort();
        customer_ids.dedup();

        let users = UserEntity::find()
            .filter(UserColumn::Id.is_in(user_ids))
            .all(self.connection())
            .await?
            .into_iter()
            .map(|m| (m.id, User::from(m).summary()))
            .collect::<HashMap<_, _>>();
        let customers = CustomerEntity::find()
            .filter(CustomerColumn::Id.is_in(customer_ids))
            .all(self.connection())
            .await?
            .into_iter()
            .map(|m| (m.id, Customer::from(m).summary()))
            .collect::<HashMap<_, _>>();

        models
            .into_iter()
            .map(|model| {
                let work_order = WorkOrder::try_from(model)?;
                Ok(WorkOrderDetail {
                    created_by: users.get(&work_order.created_by_id).cloned(),
                    assigned_to: work_order.assigned_to_id.and_then(|id| users.get(&id).cloned()),
                    customer: customers.get(&work_order.customer_id).cloned(),
                    work_order,
                })
            })
            .collect()
    }
}

#[async_trait]
impl WorkOrderRepo for OrmRepo {
    async fn get_detail(&self, id: Uuid) -> anyhow::Result<Option<WorkOrderDetail>> {
        let Some(model) = WorkOrderEntity::find_by_id(id).one(self.connection()).await? else {
            return Ok(None);
        };
        Ok(self.with_details(vec![model]).await?.pop())
    }

    async fn get_visible_to(
        &self,
        user_id: Uuid,
        limit: Option<u64>,
    ) -> anyhow::Result<Vec<WorkOrderDetail>> {
        let mut select = WorkOrderEntity::find()
            .filter(visible_to(user_id))
            .order_by_desc(WorkOrderColumn::CreatedAt);
        if let Some(limit) = limit {
            select = select.limit(limit);
        }
        let models = select.all(self.connection()).await?;
        self.with_details(models).await
    }

    async fn sum_completed_income(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<f64> {
        let total = created_between(WorkOrderEntity::find(), from, to)
            .select_only()
            .column_as(Expr::col(WorkOrderColumn::Amount).sum(), "total")
            .filter(visible_to(user_id))
            .filter(WorkOrderColumn::Status.eq(WorkOrderStatus::Completed as i32))
            .into_tuple::<Option<f64>>()
            .one(self.connection())
            .await?;
        Ok(total.flatten().unwrap_or_default())
    }

    async fn get_income_records(
        &self,
        created_by_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<IncomeRecord>> {
        let rows = created_between(WorkOrderEntity::find(), from, to)
            .select_only()
            .column(WorkOrderColumn::CreatedAt)
            .column(WorkOrderColumn::Amount)
            .filter(WorkOrderColumn::CreatedById.eq(created_by_id))
            .into_tuple::<(DateTimeUtc, Option<f64>)>()
            .all(self.connection())
            .await?;
        Ok(rows
            .into_iter()
            .map(|(created_at, amount)| IncomeRecord { created_at, amount })
            .collect())
    }

    async fn update_fields(
        &self,
        id: Uuid,
        command: &UpdateWorkOrderCommand,
        updated_at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let mut active_model = WorkOrderActiveModel {
            updated_at: Set(updated_at),
            ..Default::default()
        };
        if let Some(customer_id) = command.customer_id {
            active_model.customer_id = Set(customer_id);
        }
        if let Some(title) = &command.title {
            active_model.title = Set(title.clone());
        }
        if let Some(description) = &command.description {
            active_model.description = Set(description.clone());
        }
        if let Some(device_type) = &command.device_type {
            active_model.device_type = Set(device_type.clone());
        }
        if let Some(brand) = &command.brand {
            active_model.brand = Set(brand.clone());
        }
        if let Some(model) = &command.model {
            active_model.model = Set(model.clone());
        }
        if let Some(serial_number) = &command.serial_number {
            active_model.serial_number = Set(serial_number.clone());
        }
        if let Some(problem) = &command.problem {
            active_model.problem = Set(problem.clone());
        }
        if let Some(priority) = command.priority {
            active_model.priority = Set(priority as i32);
        }
        if let Some(status) = command.status {
            active_model.status = Set(status as i32);
        }
        if let Some(assigned_to_id) = command.assigned_to_id {
            active_model.assigned_to_id = Set(assigned_to_id);
        }
        if let Some(start_date) = command.start_date {
            active_model.start_date = Set(start_date);
        }
        if let Some(end_date) = command.end_date {
            active_model.end_date = Set(end_date);
        }
        if let Some(amount) = command.amount {
            active_model.amount = Set(amount);
        }
        let result = WorkOrderEntity::update_many()
            .set(active_model)
            .filter(WorkOrderColumn::Id.eq(id))
            .exec(self.connection())
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl ReadOnlyRepository<WorkOrder> for OrmRepo {
    async fn get_by_id(&self, uuid: Uuid) -> anyhow::Result<Option<WorkOrder>> {
        WorkOrderEntity::find_by_id(uuid)
            .one(self.connection())
            .await?
            .map(WorkOrder::try_from)
            .transpose()
    }
}

#[async_trait]
impl MutableRepository<WorkOrder> for OrmRepo {
    async fn insert(&self, entity: &WorkOrder) -> anyhow::Result<Uuid> {
        let active_model: WorkOrderActiveModel = WorkOrderModel::try_from(entity)?.into();
        WorkOrderEntity::insert(active_model)
            .exec_without_returning(self.connection())
            .await
            .map_err(map_db_err)?;
        Ok(entity.id)
    }
}

impl DBRepository<WorkOrder> for OrmRepo {}
