mod customer;
mod user;
mod work_order;

#[rustfmt::skip]
pub use {
    customer::{Customer, CustomerSummary, CustomerWithWorkOrders},
    user::{User, UserSummary},
    work_order::{WorkOrder, WorkOrderDetail},
};
