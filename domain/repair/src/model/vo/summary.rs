use serde::Serialize;

use crate::model::entity::WorkOrderDetail;

/// Income cards on the dashboard. Both incomes count COMPLETED work orders only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub monthly_income: f64,
    pub yearly_income: f64,
    pub recent_work_orders: Vec<WorkOrderDetail>,
    /// Counted among `recent_work_orders` only.
    pub completed_work_orders_count: usize,
}

/// Totals over every work order the user created or is assigned to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_work_orders: usize,
    pub in_progress_work_orders: usize,
    /// COMPLETED work orders only.
    pub total_income: f64,
    /// Distinct customers among the user's work orders.
    pub total_customers: usize,
    pub recent_work_orders: Vec<WorkOrderDetail>,
}
