use architecture::repository::DBRepository;
use async_trait::async_trait;

use crate::model::entity::User;

#[async_trait]
pub trait UserRepo: DBRepository<User> + Send + Sync {
    /// Exact match on the stored email.
    async fn get_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
}
