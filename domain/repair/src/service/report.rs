use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    exception::RepairResult,
    model::vo::{DashboardSummary, Period, ReportPoint, ReportSummary},
};

#[async_trait]
pub trait ReportService: Send + Sync {
    /// Zero-filled income series of the work orders `user_id` created, one point per
    /// calendar unit of `period`. Amounts count whatever the status.
    async fn aggregate(&self, user_id: Uuid, period: Period) -> RepairResult<Vec<ReportPoint>>;
    /// Completed income of the current month and year plus the newest work orders.
    async fn dashboard(&self, user_id: Uuid) -> RepairResult<DashboardSummary>;
    async fn summary(&self, user_id: Uuid) -> RepairResult<ReportSummary>;
}
