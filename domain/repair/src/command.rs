//! Request payloads accepted by the services.
//!
//! Create commands keep every field optional so validation can report all missing
//! fields at once. Update commands are allow-lists: keys that are not declared here
//! (`createdById`, `id`, timestamps) are dropped during deserialization.
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    exception::{RepairException, RepairResult},
    model::vo::{
        serde_helper::{double_option, flexible_date, nullable_flexible_date},
        Priority, WorkOrderStatus,
    },
};

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserCommand {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SignInCommand {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerCommand {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerCommand {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub address: Option<Option<String>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkOrderCommand {
    pub customer_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub device_type: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub problem: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<WorkOrderStatus>,
    pub assigned_to_id: Option<Uuid>,
    #[serde(default, deserialize_with = "flexible_date")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flexible_date")]
    pub end_date: Option<DateTime<Utc>>,
    pub amount: Option<f64>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkOrderCommand {
    pub customer_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub device_type: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub problem: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<WorkOrderStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_to_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "nullable_flexible_date")]
    pub start_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "nullable_flexible_date")]
    pub end_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub amount: Option<Option<f64>>,
}

/// Validated registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Validated work order input, defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkOrder {
    pub customer_id: Uuid,
    pub assigned_to_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub problem: String,
    pub priority: Priority,
    pub status: WorkOrderStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub amount: f64,
}

/// Collects required text fields, remembering every one that is absent or blank.
#[derive(Default)]
struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    fn take(&mut self, name: &'static str, value: Option<String>) -> String {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(v) => v,
            None => {
                self.missing.push(name);
                String::new()
            }
        }
    }

    fn finish(self) -> RepairResult<()> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(RepairException::MissingFields {
                fields: self.missing,
            })
        }
    }
}

fn non_blank(field: &'static str, value: &Option<String>) -> RepairResult<()> {
    match value {
        Some(v) if v.trim().is_empty() => Err(RepairException::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        }),
        _ => Ok(()),
    }
}

fn non_negative(amount: Option<f64>) -> RepairResult<()> {
    match amount {
        Some(a) if !a.is_finite() || a < 0.0 => Err(RepairException::InvalidField {
            field: "amount",
            reason: format!("must be a non-negative number, got {a}"),
        }),
        _ => Ok(()),
    }
}

impl RegisterUserCommand {
    pub fn validate(self) -> RepairResult<NewUser> {
        let mut required = Required::default();
        let full_name = required.take("name", self.name);
        let email = required.take("email", self.email);
        let password = required.take("password", self.password);
        required.finish()?;
        Ok(NewUser {
            full_name: full_name.trim().to_string(),
            email: email.trim().to_string(),
            password,
        })
    }
}

impl SignInCommand {
    /// Returns `(email, password)`.
    pub fn validate(self) -> RepairResult<(String, String)> {
        let mut required = Required::default();
        let email = required.take("email", self.email);
        let password = required.take("password", self.password);
        required.finish()?;
        Ok((email, password))
    }
}

impl CreateCustomerCommand {
    pub fn validate(&self) -> RepairResult<()> {
        let mut required = Required::default();
        required.take("name", self.name.clone());
        required.finish()
    }
}

impl UpdateCustomerCommand {
    pub fn validate(&self) -> RepairResult<()> {
        non_blank("name", &self.name)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl CreateWorkOrderCommand {
    pub fn validate(self) -> RepairResult<NewWorkOrder> {
        let mut required = Required::default();
        let customer_id = required.take("customerId", self.customer_id);
        let title = required.take("title", self.title);
        let description = required.take("description", self.description);
        let device_type = required.take("deviceType", self.device_type);
        let brand = required.take("brand", self.brand);
        let model = required.take("model", self.model);
        let serial_number = required.take("serialNumber", self.serial_number);
        let problem = required.take("problem", self.problem);
        required.finish()?;
        non_negative(self.amount)?;
        let customer_id =
            customer_id.trim().parse::<Uuid>().map_err(|e| RepairException::InvalidField {
                field: "customerId",
                reason: e.to_string(),
            })?;
        Ok(NewWorkOrder {
            customer_id,
            assigned_to_id: self.assigned_to_id,
            title,
            description,
            device_type,
            brand,
            model,
            serial_number,
            problem,
            priority: self.priority.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            start_date: self.start_date,
            end_date: self.end_date,
            amount: self.amount.unwrap_or_default(),
        })
    }
}

impl UpdateWorkOrderCommand {
    pub fn validate(&self) -> RepairResult<()> {
        non_blank("title", &self.title)?;
        non_blank("deviceType", &self.device_type)?;
        non_blank("brand", &self.brand)?;
        non_blank("model", &self.model)?;
        non_blank("serialNumber", &self.serial_number)?;
        non_blank("problem", &self.problem)?;
        non_negative(self.amount.flatten())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_work_order() -> CreateWorkOrderCommand {
        CreateWorkOrderCommand {
            customer_id: Some(Uuid::new_v4().to_string()),
            title: Some("Screen replacement".to_string()),
            description: Some("Cracked screen".to_string()),
            device_type: Some("Phone".to_string()),
            brand: Some("Samsung".to_string()),
            model: Some("A52".to_string()),
            serial_number: Some("R58R".to_string()),
            problem: Some("Display broken".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn create_work_order_applies_defaults() {
        let new = full_work_order().validate().unwrap();
        assert_eq!(new.priority, Priority::Medium);
        assert_eq!(new.status, WorkOrderStatus::Pending);
        assert_eq!(new.amount, 0.0);
        assert_eq!(new.assigned_to_id, None);
    }

    #[test]
    fn create_work_order_names_every_missing_field() {
        let command = CreateWorkOrderCommand {
            brand: None,
            model: Some("  ".to_string()),
            problem: None,
            ..full_work_order()
        };
        match command.validate() {
            Err(RepairException::MissingFields { fields }) => {
                assert_eq!(fields, vec!["brand", "model", "problem"])
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn create_work_order_rejects_malformed_customer_and_amount() {
        let command = CreateWorkOrderCommand {
            customer_id: Some("not-a-uuid".to_string()),
            ..full_work_order()
        };
        assert!(matches!(
            command.validate(),
            Err(RepairException::InvalidField { field: "customerId", .. })
        ));
        let command = CreateWorkOrderCommand {
            amount: Some(-1.0),
            ..full_work_order()
        };
        assert!(matches!(
            command.validate(),
            Err(RepairException::InvalidField { field: "amount", .. })
        ));
    }

    #[test]
    fn update_work_order_ignores_foreign_keys() {
        let json = format!(
            r#"{{"status":"COMPLETED","amount":1000,"createdById":"{}","id":"{}"}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let command: UpdateWorkOrderCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(command.status, Some(WorkOrderStatus::Completed));
        assert_eq!(command.amount, Some(Some(1000.0)));
        assert!(command.validate().is_ok());
        assert!(!command.is_empty());
        assert!(UpdateWorkOrderCommand::default().is_empty());
    }

    #[test]
    fn update_rejects_blank_required_text() {
        let command = UpdateWorkOrderCommand {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(command.validate().is_err());
        let command = UpdateCustomerCommand {
            name: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(command.validate().is_err());
    }

    #[test]
    fn customer_name_required() {
        assert!(CreateCustomerCommand::default().validate().is_err());
        let command = CreateCustomerCommand {
            name: Some("Bob".to_string()),
            ..Default::default()
        };
        assert!(command.validate().is_ok());
    }

    #[test]
    fn registration_reports_all_missing() {
        match RegisterUserCommand::default().validate() {
            Err(RepairException::MissingFields { fields }) => {
                assert_eq!(fields, vec!["name", "email", "password"])
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
