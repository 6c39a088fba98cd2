mod customer;
mod user;
mod work_order;

#[rustfmt::skip]
pub use {
    customer::CustomerRepo,
    user::UserRepo,
    work_order::WorkOrderRepo,
};
