use domain::category::Category;
use domain::value::{CategoryId, ProfileId};
use sea_orm::{entity::prelude::*, ActiveValue::Set};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[sea_orm(column_type = "BigInteger")]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "BigInteger", nullable)]
    pub parent_id: Option<i64>,
    pub is_child: bool,
    #[sea_orm(column_type = "BigInteger", nullable)]
    pub creator_id: Option<i64>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Parent,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Parent => Entity::belongs_to(Entity)
                .from(Column::ParentId)
                .to(Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Category> for ActiveModel {
    fn from(value: Category) -> Self {
        Self {
            id: Set(value.id.as_i64()),
            name: Set(value.name),
            slug: Set(value.slug),
            parent_id: Set(value.parent_id.map(|p| p.as_i64())),
            is_child: Set(value.is_child),
            creator_id: Set(value.creator_id.map(|c| c.as_i64())),
            created_at: Set(value.created_at),
        }
    }
}

impl From<Model> for Category {
    fn from(model: Model) -> Self {
        Self {
            id: CategoryId::from(model.id),
            name: model.name,
            slug: model.slug,
            parent_id: model.parent_id.map(CategoryId::from),
            is_child: model.is_child,
            creator_id: model.creator_id.map(ProfileId::from),
            created_at: model.created_at,
        }
    }
}
