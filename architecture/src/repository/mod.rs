//! 对仓储层的抽象
make_re_export!(mutable_repository, read_only_repository);

/// 对使用数据库仓储的抽象，带有可读仓储和可写仓储
pub trait DBRepository<T>: ReadOnlyRepository<T> + MutableRepository<T>
where
    T: std::marker::Send + crate::model::AggregateRoot,
{
}
