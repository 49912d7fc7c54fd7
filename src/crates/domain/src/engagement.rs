use crate::event::DomainEvent;
use crate::value::{ProfileId, RelationId};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::{fmt, str::FromStr};
use thiserror::Error;

/// 关系存储的底层错误，区分唯一约束冲突和普通数据库失败
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("唯一约束冲突: {0}")]
    Conflict(String),
    #[error("记录不存在: {0}")]
    NotFound(String),
    #[error("数据库错误: {0}")]
    Db(String),
}

// 互动领域错误：前向写入错误按失败的那一侧分类，
// 补偿失败单独成类（见 DualWriteCoordinator 的上报策略）
#[derive(Debug, Error)]
pub enum EngagementError {
    #[error("关系写入失败: {0}")]
    RelationWrite(#[source] StoreError),
    #[error("计数器写入失败: {0}")]
    CounterWrite(#[source] StoreError),
    #[error("补偿写入失败: {0}")]
    Compensation(#[source] StoreError),
    #[error("验证错误: {0}")]
    ValidationErr(String),
    #[error("未知关系类型: {0}")]
    UnknownKind(String),
}

/// 关系类型：每种关系对应一张关系表和父实体上的一个计数列
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum RelationKind {
    /// 用户点赞推荐（liked 表，places.likes 计数）
    Liked,
    /// 用户收藏推荐（favorite_place 表，places.favorites 计数）
    FavoritePlace,
    /// 用户收藏其他用户（favorite_user 表，profiles.favorites 计数）
    FavoriteUser,
}

/// 计数器所在的父实体表
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ParentKind {
    Place,
    Profile,
}

impl RelationKind {
    pub fn table(&self) -> &'static str {
        match self {
            RelationKind::Liked => "liked",
            RelationKind::FavoritePlace => "favorite_place",
            RelationKind::FavoriteUser => "favorite_user",
        }
    }

    pub fn counter_column(&self) -> &'static str {
        match self {
            RelationKind::Liked => "likes",
            RelationKind::FavoritePlace => "favorites",
            RelationKind::FavoriteUser => "favorites",
        }
    }

    pub fn parent(&self) -> ParentKind {
        match self {
            RelationKind::Liked | RelationKind::FavoritePlace => ParentKind::Place,
            RelationKind::FavoriteUser => ParentKind::Profile,
        }
    }
}

impl FromStr for RelationKind {
    type Err = EngagementError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "liked" => Ok(RelationKind::Liked),
            "favorite_place" => Ok(RelationKind::FavoritePlace),
            "favorite_user" => Ok(RelationKind::FavoriteUser),
            _ => Err(EngagementError::UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}

/// 关系行：一条有向的「actor 点赞/收藏 target」记录
#[derive(Debug, Clone)]
pub struct RelationRow {
    pub id: RelationId,
    pub kind: RelationKind,
    pub owner_id: ProfileId,
    pub target_id: i64,
    pub created_at: NaiveDateTime,
}

// 互动事件：目前只有计数器漂移一种，
// 由补偿重试耗尽后的双写协调器发布，对账处理器消费
#[derive(Debug, Clone)]
pub enum EngagementEvent {
    CounterDrift {
        kind: RelationKind,
        target_id: i64,
    },
}

impl DomainEvent for EngagementEvent {
    fn aggregate_id(&self) -> i64 {
        match self {
            EngagementEvent::CounterDrift { target_id, .. } => *target_id,
        }
    }

    // 漂移事件不属于任何聚合版本流
    fn version(&self) -> i64 {
        0
    }
}

/// 关系存储能力接口。关系行的增删和父实体计数列的更新是
/// 两个互相独立的写入，接口本身不提供跨表事务；
/// 一致性由上层的双写协调器负责。
#[async_trait]
pub trait RelationStore: Send + Sync {
    /// 插入一条关系行；(owner, target) 已存在时返回 Conflict
    async fn insert_relation_row(
        &self,
        kind: RelationKind,
        owner_id: ProfileId,
        target_id: i64,
    ) -> Result<RelationRow, StoreError>;

    /// 删除一条关系行
    async fn delete_relation_row(
        &self,
        kind: RelationKind,
        owner_id: ProfileId,
        target_id: i64,
    ) -> Result<(), StoreError>;

    /// 把父实体的计数列整体写为 new_value（不是原子自增）
    async fn update_counter(
        &self,
        kind: RelationKind,
        target_id: i64,
        new_value: i32,
    ) -> Result<(), StoreError>;

    /// 统计指向 target 的关系行数，对账时作为基准真值
    async fn count_relation_rows(
        &self,
        kind: RelationKind,
        target_id: i64,
    ) -> Result<i64, StoreError>;

    /// 读取父实体当前的计数值
    async fn read_counter(
        &self,
        kind: RelationKind,
        target_id: i64,
    ) -> Result<Option<i32>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_table_mapping() {
        assert_eq!(RelationKind::Liked.table(), "liked");
        assert_eq!(RelationKind::Liked.counter_column(), "likes");
        assert_eq!(RelationKind::Liked.parent(), ParentKind::Place);

        assert_eq!(RelationKind::FavoritePlace.table(), "favorite_place");
        assert_eq!(RelationKind::FavoritePlace.counter_column(), "favorites");
        assert_eq!(RelationKind::FavoritePlace.parent(), ParentKind::Place);

        assert_eq!(RelationKind::FavoriteUser.table(), "favorite_user");
        assert_eq!(RelationKind::FavoriteUser.counter_column(), "favorites");
        assert_eq!(RelationKind::FavoriteUser.parent(), ParentKind::Profile);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(
            RelationKind::from_str("liked").unwrap(),
            RelationKind::Liked
        );
        assert!(RelationKind::from_str("starred").is_err());
    }
}
