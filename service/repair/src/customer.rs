use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use domain_repair::{
    command::{CreateCustomerCommand, UpdateCustomerCommand},
    exception::{RepairException, RepairResult},
    model::entity::{Customer, CustomerWithWorkOrders},
    repository::CustomerRepo,
    service::CustomerService,
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

fn optional_text(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[derive(TypedBuilder)]
pub struct CustomerServiceImpl {
    customer_repository: Arc<dyn CustomerRepo>,
}

#[async_trait]
impl CustomerService for CustomerServiceImpl {
    async fn list_customers(&self) -> RepairResult<Vec<CustomerWithWorkOrders>> {
        Ok(self.customer_repository.get_all_with_work_orders().await?)
    }

    async fn get_customer(&self, id: Uuid) -> RepairResult<Customer> {
        self.customer_repository
            .get_by_id(id)
            .await?
            .ok_or(RepairException::not_found("Customer", id))
    }

    async fn create_customer(&self, command: CreateCustomerCommand) -> RepairResult<Customer> {
        command.validate()?;
        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4(),
            name: command.name.unwrap_or_default().trim().to_string(),
            phone: optional_text(command.phone),
            email: optional_text(command.email),
            address: optional_text(command.address),
            created_at: now,
            updated_at: now,
        };
        self.customer_repository.insert(&customer).await?;
        tracing::info!("Created customer {}", customer.id);
        Ok(customer)
    }

    async fn update_customer(
        &self,
        id: Uuid,
        command: UpdateCustomerCommand,
    ) -> RepairResult<Customer> {
        command.validate()?;
        if !command.is_empty()
            && !self.customer_repository.update_fields(id, &command, Utc::now()).await?
        {
            return Err(RepairException::not_found("Customer", id));
        }
        self.get_customer(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_repair::mock::MockCustomerRepo;

    fn bob() -> Customer {
        let now = Utc::now();
        Customer {
            id: Uuid::new_v4(),
            name: "Bob".to_string(),
            phone: None,
            email: None,
            address: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn create_requires_name() {
        let mut repo = MockCustomerRepo::new();
        repo.expect_insert().never();
        let service = CustomerServiceImpl::builder().customer_repository(Arc::new(repo)).build();
        let err = service
            .create_customer(CreateCustomerCommand {
                phone: Some("0800000000".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        match err {
            RepairException::MissingFields { fields } => assert_eq!(fields, vec!["name"]),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_blanks_empty_optionals() {
        let mut repo = MockCustomerRepo::new();
        repo.expect_insert()
            .withf(|c: &Customer| c.name == "Bob" && c.phone.is_none() && c.email.is_some())
            .times(1)
            .returning(|c| Ok(c.id));
        let service = CustomerServiceImpl::builder().customer_repository(Arc::new(repo)).build();
        let customer = service
            .create_customer(CreateCustomerCommand {
                name: Some(" Bob ".to_string()),
                phone: Some(String::new()),
                email: Some("bob@example.com".to_string()),
                address: None,
            })
            .await
            .unwrap();
        assert_eq!(customer.email.as_deref(), Some("bob@example.com"));
    }

    #[tokio::test]
    async fn update_of_missing_customer_is_not_found() {
        let mut repo = MockCustomerRepo::new();
        repo.expect_update_fields().returning(|_, _, _| Ok(false));
        let service = CustomerServiceImpl::builder().customer_repository(Arc::new(repo)).build();
        let err = service
            .update_customer(
                Uuid::new_v4(),
                UpdateCustomerCommand {
                    phone: Some(Some("1234".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepairException::NotFound { entity: "Customer", .. }));
    }

    #[tokio::test]
    async fn update_returns_stored_record() {
        let stored = bob();
        let id = stored.id;
        let mut repo = MockCustomerRepo::new();
        repo.expect_update_fields()
            .withf(move |target, command, _| {
                *target == id && command.address == Some(None) && command.name.is_none()
            })
            .times(1)
            .returning(|_, _, _| Ok(true));
        repo.expect_get_by_id().returning(move |_| Ok(Some(stored.clone())));
        let service = CustomerServiceImpl::builder().customer_repository(Arc::new(repo)).build();
        let customer = service
            .update_customer(
                id,
                UpdateCustomerCommand {
                    address: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(customer.id, id);
    }

    #[tokio::test]
    async fn unique_clash_surfaces_as_constraint_violation() {
        let mut repo = MockCustomerRepo::new();
        repo.expect_update_fields().returning(|_, _, _| {
            Err(RepairException::ConstraintViolation {
                constraint: "customer_email_key".to_string(),
            }
            .into())
        });
        let service = CustomerServiceImpl::builder().customer_repository(Arc::new(repo)).build();
        let err = service
            .update_customer(
                Uuid::new_v4(),
                UpdateCustomerCommand {
                    email: Some(Some("taken@example.com".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepairException::ConstraintViolation { .. }));
    }
}
