use architecture::UserInfo;
use async_trait::async_trait;

use crate::{
    command::{RegisterUserCommand, SignInCommand},
    exception::RepairResult,
    model::entity::{User, UserSummary},
};

/// Credential verification and account provisioning.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account with a salted password hash. Fails with `EmailTaken` when the
    /// email is already registered.
    async fn register(&self, command: RegisterUserCommand) -> RepairResult<UserSummary>;
    /// Checks an email and password pair. Unknown email and wrong password both fail with
    /// the same `InvalidCredentials`.
    async fn verify_credentials(&self, command: SignInCommand) -> RepairResult<UserInfo>;
    /// Looks up the account behind a resolved session, `AccountNotFound` when it is gone.
    async fn resolve_account(&self, user_info: &UserInfo) -> RepairResult<User>;
}
