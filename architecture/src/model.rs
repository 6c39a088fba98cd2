/// 聚合根标记特性
pub trait AggregateRoot {}
