//! Repair jobs
use crate::repair::prelude::*;
use domain_repair::model::entity::WorkOrder;
use num_traits::{FromPrimitive, ToPrimitive};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "work_order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    pub created_by_id: Uuid,
    pub assigned_to_id: Option<Uuid>,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    #[sea_orm(column_type = "Text")]
    pub problem: String,
    pub priority: i32,
    pub status: i32,
    pub start_date: Option<DateTimeUtc>,
    pub end_date: Option<DateTimeUtc>,
    pub amount: Option<f64>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "CustomerEntity",
        from = "Column::CustomerId",
        to = "CustomerColumn::Id",
        fk_name = "fk-work_order-customer"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "UserEntity",
        from = "Column::CreatedById",
        to = "UserColumn::Id",
        fk_name = "fk-work_order-created_by"
    )]
    CreatedBy,
    #[sea_orm(
        belongs_to = "UserEntity",
        from = "Column::AssignedToId",
        to = "UserColumn::Id",
        fk_name = "fk-work_order-assigned_to"
    )]
    AssignedTo,
}

impl Related<CustomerEntity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for WorkOrder {
    type Error = anyhow::Error;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            customer_id: model.customer_id,
            created_by_id: model.created_by_id,
            assigned_to_id: model.assigned_to_id,
            title: model.title,
            description: model.description,
            device_type: model.device_type,
            brand: model.brand,
            model: model.model,
            serial_number: model.serial_number,
            problem: model.problem,
            priority: FromPrimitive::from_i32(model.priority)
                .ok_or(anyhow::anyhow!("Priority {} is invalid.", model.priority))?,
            status: FromPrimitive::from_i32(model.status)
                .ok_or(anyhow::anyhow!("Status {} is invalid.", model.status))?,
            start_date: model.start_date,
            end_date: model.end_date,
            amount: model.amount,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<&WorkOrder> for Model {
    type Error = anyhow::Error;

    fn try_from(work_order: &WorkOrder) -> Result<Self, Self::Error> {
        Ok(Self {
            id: work_order.id,
            customer_id: work_order.customer_id,
            created_by_id: work_order.created_by_id,
            assigned_to_id: work_order.assigned_to_id,
            title: work_order.title.clone(),
            description: work_order.description.clone(),
            device_type: work_order.device_type.clone(),
            brand: work_order.brand.clone(),
            model: work_order.model.clone(),
            serial_number: work_order.serial_number.clone(),
            problem: work_order.problem.clone(),
            priority: work_order
                .priority
                .to_i32()
                .ok_or(anyhow::anyhow!("Priority can't be stored."))?,
            status: work_order
                .status
                .to_i32()
                .ok_or(anyhow::anyhow!("Status can't be stored."))?,
            start_date: work_order.start_date,
            end_date: work_order.end_date,
            amount: work_order.amount,
            created_at: work_order.created_at,
            updated_at: work_order.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain_repair::model::vo::{Priority, WorkOrderStatus};

    fn model(status: i32) -> Model {
        let now = Utc::now();
        Model {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            created_by_id: Uuid::new_v4(),
            assigned_to_id: None,
            title: "Fan noise".to_string(),
            description: "Loud fan".to_string(),
            device_type: "Laptop".to_string(),
            brand: "Dell".to_string(),
            model: "XPS 13".to_string(),
            serial_number: "SN1".to_string(),
            problem: "Noise".to_string(),
            priority: 2,
            status,
            start_date: None,
            end_date: None,
            amount: Some(120.0),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn stored_integers_map_to_enums() {
        let stored = model(2);
        let work_order = WorkOrder::try_from(stored.clone()).unwrap();
        assert_eq!(work_order.priority, Priority::High);
        assert_eq!(work_order.status, WorkOrderStatus::Completed);
        assert_eq!(Model::try_from(&work_order).unwrap(), stored);
    }

    #[test]
    fn unknown_status_is_an_error() {
        assert!(WorkOrder::try_from(model(9)).is_err());
    }
}
