use std::sync::Arc;

use domain_repair::exception::RepairException;
use infrastructure_common::data::Database;
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct OrmRepo {
    pub db: Arc<Database>,
}

impl OrmRepo {
    pub fn connection(&self) -> &DatabaseConnection {
        self.db.get_connection()
    }
}

/// Unique-key clashes travel as [`RepairException::ConstraintViolation`] so services can
/// tell them apart from other storage failures.
pub fn map_db_err(e: DbErr) -> anyhow::Error {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(constraint)) => {
            RepairException::ConstraintViolation { constraint }.into()
        }
        _ => e.into(),
    }
}
