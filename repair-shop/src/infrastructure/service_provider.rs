use std::sync::Arc;

use domain_repair::service::{AuthService, CustomerService, ReportService, WorkOrderService};
use infrastructure_common::{data::Database, middleware::SessionKeys};
use service_repair::*;

use super::{config::ShopConfig, database::create_schema, OrmRepo};

/// Every long-lived service of the application, built once at startup.
pub struct ServiceProvider {
    pub config: ShopConfig,
    pub database: Arc<Database>,
    pub session_keys: Arc<SessionKeys>,
    pub auth_service: Arc<dyn AuthService>,
    pub customer_service: Arc<dyn CustomerService>,
    pub work_order_service: Arc<dyn WorkOrderService>,
    pub report_service: Arc<dyn ReportService>,
}

impl ServiceProvider {
    pub async fn build(config: config::Config) -> anyhow::Result<Self> {
        let shop_config = config.try_deserialize::<ShopConfig>()?;
        let database = Database::new(shop_config.common.db().url()).await?;
        Self::from_database(shop_config, database).await
    }

    /// Wires the services over an open database, creating missing tables first.
    pub async fn from_database(config: ShopConfig, database: Database) -> anyhow::Result<Self> {
        create_schema(database.get_connection()).await?;
        let database = Arc::new(database);
        let repo = Arc::new(OrmRepo::builder().db(database.clone()).build());
        let offset = config.report.offset()?;
        let session_keys = Arc::new(SessionKeys::new(config.common.session()));

        let auth_service = Arc::new(AuthServiceImpl::builder().user_repository(repo.clone()).build());
        let customer_service =
            Arc::new(CustomerServiceImpl::builder().customer_repository(repo.clone()).build());
        let work_order_service = Arc::new(
            WorkOrderServiceImpl::builder()
                .work_order_repository(repo.clone())
                .customer_repository(repo.clone())
                .user_repository(repo.clone())
                .build(),
        );
        let report_service = Arc::new(
            ReportServiceImpl::builder().work_order_repository(repo).offset(offset).build(),
        );
        Ok(Self {
            config,
            database,
            session_keys,
            auth_service,
            customer_service,
            work_order_service,
            report_service,
        })
    }
}
