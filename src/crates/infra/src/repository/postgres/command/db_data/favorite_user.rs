use super::profile;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "favorite_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[sea_orm(column_type = "BigInteger")]
    pub id: i64,
    #[sea_orm(column_type = "BigInteger")]
    pub owner_id: i64,
    /// 被收藏的用户
    #[sea_orm(column_type = "BigInteger")]
    pub user_id: i64,
    pub favorited_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Owner,
    Target,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Owner => Entity::belongs_to(profile::Entity)
                .from(Column::OwnerId)
                .to(profile::Column::Id)
                .into(),
            Self::Target => Entity::belongs_to(profile::Entity)
                .from(Column::UserId)
                .to(profile::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
