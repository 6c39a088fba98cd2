use thiserror::Error;
use uuid::Uuid;

pub type RepairResult<T> = Result<T, RepairException>;

#[derive(Error, Debug)]
pub enum RepairException {
    /// Same error for an unknown email and a wrong password.
    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("You must be logged in to access this resource.")]
    Unauthorized,

    #[error("User account not found.")]
    AccountNotFound,

    #[error("Missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    #[error("Invalid value for field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("This email is already registered.")]
    EmailTaken,

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("A unique constraint violation occurred: {constraint}")]
    ConstraintViolation { constraint: String },

    #[error("Internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl RepairException {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// True for every variant the HTTP surface reports as a validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingFields { .. } | Self::InvalidField { .. } | Self::InvalidRequest { .. }
        )
    }
}

/// Repositories tunnel typed failures (such as unique-key clashes) through `anyhow`;
/// anything else becomes an internal error.
impl From<anyhow::Error> for RepairException {
    fn from(e: anyhow::Error) -> Self {
        match e.downcast::<RepairException>() {
            Ok(exception) => exception,
            Err(source) => RepairException::InternalError { source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_lists_every_field() {
        let e = RepairException::MissingFields {
            fields: vec!["brand", "model"],
        };
        assert_eq!(e.to_string(), "Missing required fields: brand, model");
        assert!(e.is_validation());
    }

    #[test]
    fn tunnelled_exception_survives_anyhow() {
        let tunnelled = anyhow::Error::new(RepairException::ConstraintViolation {
            constraint: "customer_email_key".to_string(),
        });
        assert!(matches!(
            RepairException::from(tunnelled),
            RepairException::ConstraintViolation { .. }
        ));
        let other = RepairException::from(anyhow::anyhow!("connection reset"));
        assert!(matches!(other, RepairException::InternalError { .. }));
    }
}
