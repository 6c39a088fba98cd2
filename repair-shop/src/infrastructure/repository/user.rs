use architecture::repository::{DBRepository, MutableRepository, ReadOnlyRepository};
use async_trait::async_trait;
use database_model::repair::prelude::*;
use domain_repair::{model::entity::User, repository::UserRepo};
use sea_orm::{prelude::*, IntoActiveModel};

use crate::infrastructure::database::{map_db_err, OrmRepo};

#[async_trait]
impl UserRepo for OrmRepo {
    async fn get_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(UserEntity::find()
            .filter(UserColumn::Email.eq(email))
            .one(self.connection())
            .await?
            .map(User::from))
    }
}

#[async_trait]
impl ReadOnlyRepository<User> for OrmRepo {
    async fn get_by_id(&self, uuid: Uuid) -> anyhow::Result<Option<User>> {
        Ok(UserEntity::find_by_id(uuid).one(self.connection()).await?.map(User::from))
    }
}

#[async_trait]
impl MutableRepository<User> for OrmRepo {
    async fn insert(&self, entity: &User) -> anyhow::Result<Uuid> {
        let active_model = UserModel::from(entity).into_active_model();
        UserEntity::insert(active_model)
            .exec_without_returning(self.connection())
            .await
            .map_err(map_db_err)?;
        Ok(entity.id)
    }
}

impl DBRepository<User> for OrmRepo {}
