use architecture::AggregateRoot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CustomerSummary, UserSummary};
use crate::model::vo::{Priority, WorkOrderStatus};

/// A repair job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub created_by_id: Uuid,
    pub assigned_to_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub problem: String,
    pub priority: Priority,
    pub status: WorkOrderStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub amount: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AggregateRoot for WorkOrder {}

impl WorkOrder {
    /// Creator or assignee.
    pub fn is_visible_to(&self, user_id: Uuid) -> bool {
        self.created_by_id == user_id || self.assigned_to_id == Some(user_id)
    }

    /// Amount that counts towards completed income, zero unless COMPLETED.
    pub fn completed_income(&self) -> f64 {
        match self.status {
            WorkOrderStatus::Completed => self.amount.unwrap_or_default(),
            _ => 0.0,
        }
    }
}

/// A work order joined with creator, assignee and customer summaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderDetail {
    #[serde(flatten)]
    pub work_order: WorkOrder,
    pub created_by: Option<UserSummary>,
    pub assigned_to: Option<UserSummary>,
    pub customer: Option<CustomerSummary>,
}

impl WorkOrderDetail {
    pub fn bare(work_order: WorkOrder) -> Self {
        Self {
            work_order,
            created_by: None,
            assigned_to: None,
            customer: None,
        }
    }
}
