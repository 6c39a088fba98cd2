mod auth;
mod customer;
mod report;
mod work_order;

#[rustfmt::skip]
pub use {
    auth::AuthServiceImpl,
    customer::CustomerServiceImpl,
    report::ReportServiceImpl,
    work_order::WorkOrderServiceImpl,
};
