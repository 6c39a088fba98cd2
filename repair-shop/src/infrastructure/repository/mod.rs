mod customer;
mod user;
mod work_order;
