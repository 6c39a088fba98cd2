use sea_orm::{ConnectOptions, DatabaseConnection};

#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    pub async fn new(dburl: &str) -> anyhow::Result<Self> {
        let mut options = ConnectOptions::new(dburl.to_owned());
        options.sqlx_logging(false);
        let connection = sea_orm::Database::connect(options).await?;
        Ok(Database { connection })
    }

    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Database { connection }
    }

    pub fn get_connection(&self) -> &DatabaseConnection {
        &self.connection
    }
}
