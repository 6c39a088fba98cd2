pub mod report;
pub mod serde_helper;
mod status;
mod summary;

#[rustfmt::skip]
pub use {
    report::{IncomeRecord, Period, PeriodWindow, ReportPoint},
    status::{Priority, WorkOrderStatus},
    summary::{DashboardSummary, ReportSummary},
};
