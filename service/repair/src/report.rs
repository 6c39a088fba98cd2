use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Local, Utc};
use domain_repair::{
    exception::RepairResult,
    model::vo::{
        DashboardSummary, Period, PeriodWindow, ReportPoint, ReportSummary, WorkOrderStatus,
    },
    repository::WorkOrderRepo,
    service::ReportService,
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

const DASHBOARD_RECENT: u64 = 5;
const SUMMARY_RECENT: usize = 10;

fn local_offset() -> FixedOffset {
    *Local::now().offset()
}

/// Income reports over the local calendar given by `offset`.
#[derive(TypedBuilder)]
pub struct ReportServiceImpl {
    work_order_repository: Arc<dyn WorkOrderRepo>,
    #[builder(default = Utc::now)]
    now: fn() -> DateTime<Utc>,
    #[builder(default = local_offset())]
    offset: FixedOffset,
}

impl ReportServiceImpl {
    fn today(&self) -> chrono::NaiveDate {
        (self.now)().with_timezone(&self.offset).date_naive()
    }

    async fn completed_income_in(&self, user_id: Uuid, window: PeriodWindow) -> RepairResult<f64> {
        let (from, to) = window.to_utc(&self.offset);
        Ok(self.work_order_repository.sum_completed_income(user_id, from, to).await?)
    }
}

#[async_trait]
impl ReportService for ReportServiceImpl {
    async fn aggregate(&self, user_id: Uuid, period: Period) -> RepairResult<Vec<ReportPoint>> {
        let window = PeriodWindow::ending_on(period, self.today())?;
        let (from, to) = window.to_utc(&self.offset);
        let records = self.work_order_repository.get_income_records(user_id, from, to).await?;
        tracing::debug!(
            "Aggregating {} work orders of {user_id} from {} to {}",
            records.len(),
            window.start,
            window.end
        );
        Ok(window.aggregate(&records, &self.offset))
    }

    async fn dashboard(&self, user_id: Uuid) -> RepairResult<DashboardSummary> {
        let today = self.today();
        let monthly_income = self
            .completed_income_in(user_id, PeriodWindow::current(Period::Monthly, today)?)
            .await?;
        let yearly_income = self
            .completed_income_in(user_id, PeriodWindow::current(Period::Yearly, today)?)
            .await?;
        let recent_work_orders = self
            .work_order_repository
            .get_visible_to(user_id, Some(DASHBOARD_RECENT))
            .await?;
        let completed_work_orders_count = recent_work_orders
            .iter()
            .filter(|detail| detail.work_order.status == WorkOrderStatus::Completed)
            .count();
        Ok(DashboardSummary {
            monthly_income,
            yearly_income,
            recent_work_orders,
            completed_work_orders_count,
        })
    }

    async fn summary(&self, user_id: Uuid) -> RepairResult<ReportSummary> {
        let mut work_orders = self.work_order_repository.get_visible_to(user_id, None).await?;
        let in_progress_work_orders = work_orders
            .iter()
            .filter(|detail| detail.work_order.status == WorkOrderStatus::InProgress)
            .count();
        let total_income = work_orders
            .iter()
            .map(|detail| detail.work_order.completed_income())
            .sum();
        let total_customers = work_orders
            .iter()
            .map(|detail| detail.work_order.customer_id)
            .collect::<HashSet<_>>()
            .len();
        let total_work_orders = work_orders.len();
        work_orders.truncate(SUMMARY_RECENT);
        Ok(ReportSummary {
            total_work_orders,
            in_progress_work_orders,
            total_income,
            total_customers,
            recent_work_orders: work_orders,
        })
    }
}
