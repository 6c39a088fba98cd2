mod customer;
mod user;
mod work_order;

pub mod prelude {
    pub use super::{
        customer::{
            ActiveModel as CustomerActiveModel, Column as CustomerColumn,
            Entity as CustomerEntity, Model as CustomerModel, PrimaryKey as CustomerPrimaryKey,
            Relation as CustomerRelation,
        },
        user::{
            ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity,
            Model as UserModel, PrimaryKey as UserPrimaryKey, Relation as UserRelation,
        },
        work_order::{
            ActiveModel as WorkOrderActiveModel, Column as WorkOrderColumn,
            Entity as WorkOrderEntity, Model as WorkOrderModel,
            PrimaryKey as WorkOrderPrimaryKey, Relation as WorkOrderRelation,
        },
    };
}
