use uuid::Uuid;

/// 可变仓储，对修改数据的仓储进行抽象
///
/// 每次调用都是一条独立语句，立即生效，不存在待提交的变更。
#[async_trait::async_trait]
pub trait MutableRepository<T>
where
    T: std::marker::Send + crate::model::AggregateRoot,
{
    /// 插入数据，返回主键
    async fn insert(&self, entity: &T) -> anyhow::Result<Uuid>;
}
