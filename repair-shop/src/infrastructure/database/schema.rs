use database_model::repair::prelude::*;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema};

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> anyhow::Result<()> {
    let builder = db.get_database_backend();
    let mut statement = Schema::new(builder).create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates the user, customer and work order tables when they are absent.
pub async fn create_schema(db: &DatabaseConnection) -> anyhow::Result<()> {
    create_table(db, UserEntity).await?;
    create_table(db, CustomerEntity).await?;
    create_table(db, WorkOrderEntity).await?;
    tracing::debug!("Database schema is in place");
    Ok(())
}
