use uuid::Uuid;

/// 只读仓储，对仅限读取的仓储进行抽象
#[async_trait::async_trait]
pub trait ReadOnlyRepository<T>
where
    T: std::marker::Send + crate::model::AggregateRoot,
{
    /// 根据 uuid 获取唯一对象，不存在时返回 `None`
    async fn get_by_id(&self, uuid: Uuid) -> anyhow::Result<Option<T>>;
}
