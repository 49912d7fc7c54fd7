use super::{place, profile};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "liked")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[sea_orm(column_type = "BigInteger")]
    pub id: i64,
    #[sea_orm(column_type = "BigInteger")]
    pub owner_id: i64,
    #[sea_orm(column_type = "BigInteger")]
    pub place_id: i64,
    pub liked_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Owner,
    Place,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Owner => Entity::belongs_to(profile::Entity)
                .from(Column::OwnerId)
                .to(profile::Column::Id)
                .into(),
            Self::Place => Entity::belongs_to(place::Entity)
                .from(Column::PlaceId)
                .to(place::Column::Id)
                .into(),
        }
    }
}

impl Related<place::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Place.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
