use std::sync::{Arc, OnceLock};

use architecture::UserInfo;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::Utc;
use domain_repair::{
    command::{RegisterUserCommand, SignInCommand},
    exception::{RepairException, RepairResult},
    model::entity::{User, UserSummary},
    repository::UserRepo,
    service::AuthService,
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

/// Argon2id PHC string with a fresh random salt.
fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow::anyhow!("Unable to hash password: {e}"))
}

fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

/// Hash checked against when the email is unknown, so both failures cost the same.
fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| hash_password("repair-shop").unwrap_or_default())
}

async fn blocking<T, F>(f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await?)
}

#[derive(TypedBuilder)]
pub struct AuthServiceImpl {
    user_repository: Arc<dyn UserRepo>,
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn register(&self, command: RegisterUserCommand) -> RepairResult<UserSummary> {
        let new_user = command.validate()?;
        if self.user_repository.get_by_email(&new_user.email).await?.is_some() {
            return Err(RepairException::EmailTaken);
        }
        let password = new_user.password;
        let password_hash = blocking(move || hash_password(&password)).await??;
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            password_hash,
            full_name: new_user.full_name,
            created_at: Utc::now(),
        };
        match self.user_repository.insert(&user).await.map_err(RepairException::from) {
            Ok(_) => {}
            // Lost a race with a concurrent registration of the same email.
            Err(RepairException::ConstraintViolation { .. }) => {
                return Err(RepairException::EmailTaken)
            }
            Err(e) => return Err(e),
        }
        tracing::info!("Registered user {}", user.id);
        Ok(user.summary())
    }

    async fn verify_credentials(&self, command: SignInCommand) -> RepairResult<UserInfo> {
        let (email, password) =
            command.validate().map_err(|_| RepairException::InvalidCredentials)?;
        let user = self.user_repository.get_by_email(&email).await?;
        let hash = user.as_ref().map(|user| user.password_hash.clone());
        let matched = blocking(move || {
            verify_password(&password, hash.as_deref().unwrap_or_else(|| dummy_hash()))
        })
        .await?;
        match user {
            Some(user) if matched => {
                tracing::debug!("User {} signed in", user.id);
                Ok(user.user_info())
            }
            _ => Err(RepairException::InvalidCredentials),
        }
    }

    async fn resolve_account(&self, user_info: &UserInfo) -> RepairResult<User> {
        self.user_repository
            .get_by_email(&user_info.email)
            .await?
            .ok_or(RepairException::AccountNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_repair::mock::MockUserRepo;

    fn alice(password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
            password_hash: hash_password(password).unwrap(),
            full_name: "Alice".to_string(),
            created_at: Utc::now(),
        }
    }

    fn sign_in(email: &str, password: &str) -> SignInCommand {
        SignInCommand {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    fn service_with(user: User) -> AuthServiceImpl {
        let mut repo = MockUserRepo::new();
        repo.expect_get_by_email().returning(move |email| {
            Ok((email == user.email).then(|| user.clone()))
        });
        AuthServiceImpl::builder().user_repository(Arc::new(repo)).build()
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("pw123456").unwrap();
        let b = hash_password("pw123456").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("$argon2id$"));
        assert!(verify_password("pw123456", &a));
        assert!(!verify_password("pw1234567", &a));
        assert!(!verify_password("pw123456", "not-a-phc-string"));
    }

    #[test]
    fn unknown_emails_are_checked_against_a_real_hash() {
        assert!(dummy_hash().starts_with("$argon2id$"));
        assert!(verify_password("repair-shop", dummy_hash()));
    }

    #[tokio::test]
    async fn correct_password_yields_identity() {
        let user = alice("pw123456");
        let id = user.id;
        let service = service_with(user);
        let info = service.verify_credentials(sign_in("alice@example.com", "pw123456")).await.unwrap();
        assert_eq!(info.id, id);
        assert_eq!(info.full_name, "Alice");
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_fail_alike() {
        let service = service_with(alice("pw123456"));
        let wrong_password = service
            .verify_credentials(sign_in("alice@example.com", "nope"))
            .await
            .unwrap_err();
        let unknown_email = service
            .verify_credentials(sign_in("bob@example.com", "pw123456"))
            .await
            .unwrap_err();
        assert!(matches!(wrong_password, RepairException::InvalidCredentials));
        assert!(matches!(unknown_email, RepairException::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        // Lookup is exact.
        let other_case = service
            .verify_credentials(sign_in("Alice@example.com", "pw123456"))
            .await
            .unwrap_err();
        assert!(matches!(other_case, RepairException::InvalidCredentials));
    }

    #[tokio::test]
    async fn register_stores_hash_not_password() {
        let mut repo = MockUserRepo::new();
        repo.expect_get_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|user: &User| {
                user.email == "alice@example.com"
                    && user.full_name == "Alice"
                    && user.password_hash != "pw123456"
                    && verify_password("pw123456", &user.password_hash)
            })
            .times(1)
            .returning(|user| Ok(user.id));
        let service = AuthServiceImpl::builder().user_repository(Arc::new(repo)).build();
        let summary = service
            .register(RegisterUserCommand {
                name: Some("Alice".to_string()),
                email: Some("alice@example.com".to_string()),
                password: Some("pw123456".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(summary.email, "alice@example.com");
    }

    #[tokio::test]
    async fn register_rejects_taken_email() {
        let service = service_with(alice("pw123456"));
        let err = service
            .register(RegisterUserCommand {
                name: Some("Alice again".to_string()),
                email: Some("alice@example.com".to_string()),
                password: Some("other".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepairException::EmailTaken));
    }

    #[tokio::test]
    async fn racing_registration_maps_to_email_taken() {
        let mut repo = MockUserRepo::new();
        repo.expect_get_by_email().returning(|_| Ok(None));
        repo.expect_insert().returning(|_| {
            Err(RepairException::ConstraintViolation {
                constraint: "user_email_key".to_string(),
            }
            .into())
        });
        let service = AuthServiceImpl::builder().user_repository(Arc::new(repo)).build();
        let err = service
            .register(RegisterUserCommand {
                name: Some("Alice".to_string()),
                email: Some("alice@example.com".to_string()),
                password: Some("pw123456".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepairException::EmailTaken));
    }

    #[tokio::test]
    async fn stale_session_has_no_account() {
        let mut repo = MockUserRepo::new();
        repo.expect_get_by_email().returning(|_| Ok(None));
        let service = AuthServiceImpl::builder().user_repository(Arc::new(repo)).build();
        let ghost = UserInfo {
            id: Uuid::new_v4(),
            email: "ghost@example.com".to_string(),
            full_name: "Ghost".to_string(),
        };
        assert!(matches!(
            service.resolve_account(&ghost).await,
            Err(RepairException::AccountNotFound)
        ));
    }
}
