use super::{category, profile};
use domain::place::Place;
use domain::value::{CategoryId, PlaceId, ProfileId};
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{NotSet, Set},
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "places")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[sea_orm(column_type = "BigInteger")]
    pub id: i64,
    pub name: String,
    pub comment: String,
    #[sea_orm(column_type = "BigInteger", nullable)]
    pub category_id: Option<i64>,
    #[sea_orm(column_type = "BigInteger")]
    pub created_by: i64,
    pub online: bool,
    pub city: Option<String>,
    pub contact: Option<String>,
    pub link: Option<String>,
    pub tags: Vec<String>,
    pub likes: i32,
    pub favorites: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Category,
    Author,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
            Self::Author => Entity::belongs_to(profile::Entity)
                .from(Column::CreatedBy)
                .to(profile::Column::Id)
                .into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Place> for ActiveModel {
    fn from(value: Place) -> Self {
        Self {
            id: Set(value.id.as_i64()),
            name: Set(value.name),
            comment: Set(value.comment),
            category_id: Set(value.category_id.map(|c| c.as_i64())),
            created_by: Set(value.created_by.as_i64()),
            online: Set(value.online),
            city: Set(value.city),
            contact: Set(value.contact),
            link: Set(value.link),
            tags: Set(value.tags),
            // 计数列只通过关系存储写入
            likes: NotSet,
            favorites: NotSet,
            created_at: Set(value.created_at),
            updated_at: Set(value.updated_at),
        }
    }
}

impl From<Model> for Place {
    fn from(model: Model) -> Self {
        Self {
            id: PlaceId::from(model.id),
            name: model.name,
            comment: model.comment,
            category_id: model.category_id.map(CategoryId::from),
            created_by: ProfileId::from(model.created_by),
            online: model.online,
            city: model.city,
            contact: model.contact,
            link: model.link,
            tags: model.tags,
            likes: model.likes,
            favorites: model.favorites,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
