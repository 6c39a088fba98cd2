mod auth;
mod customer;
mod report;
mod work_order;

#[rustfmt::skip]
pub use {
    auth::AuthService,
    customer::CustomerService,
    report::ReportService,
    work_order::WorkOrderService,
};
