use domain::profile::{Gender, Profile};
use domain::value::{GeoPoint, ProfileId};
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{NotSet, Set},
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    // id 来自托管认证方，不自增
    #[sea_orm(primary_key, auto_increment = false)]
    #[sea_orm(column_type = "BigInteger")]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub full_name: Option<String>,
    pub short_description: Option<String>,
    pub avatar_url: Option<String>,
    pub website: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub profession: Option<String>,
    pub education: Option<String>,
    pub hobbies: Option<String>,
    pub belief: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<Date>,
    #[sea_orm(column_type = "Double", nullable)]
    pub latitude: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub longitude: Option<f64>,
    pub favorites: i32,
    pub last_active: DateTime,
    pub last_signal: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Profile> for ActiveModel {
    fn from(value: Profile) -> Self {
        Self {
            id: Set(value.id.as_i64()),
            username: Set(value.username),
            full_name: Set(value.full_name),
            short_description: Set(value.short_description),
            avatar_url: Set(value.avatar_url),
            website: Set(value.website),
            city: Set(value.city),
            country: Set(value.country),
            address: Set(value.address),
            profession: Set(value.profession),
            education: Set(value.education),
            hobbies: Set(value.hobbies),
            belief: Set(value.belief),
            gender: Set(value.gender.map(|g| g.as_str().to_string())),
            dob: Set(value.dob),
            latitude: Set(value.location.map(|p| p.latitude)),
            longitude: Set(value.location.map(|p| p.longitude)),
            // 计数列只通过关系存储写入
            favorites: NotSet,
            last_active: Set(value.last_active),
            last_signal: Set(value.last_signal),
            created_at: Set(value.created_at),
            updated_at: Set(value.updated_at),
        }
    }
}

impl From<Model> for Profile {
    fn from(model: Model) -> Self {
        let location = match (model.latitude, model.longitude) {
            (Some(lat), Some(lng)) => GeoPoint::new(lat, lng),
            _ => None,
        };
        Self {
            id: ProfileId::from(model.id),
            username: model.username,
            full_name: model.full_name,
            short_description: model.short_description,
            avatar_url: model.avatar_url,
            website: model.website,
            city: model.city,
            country: model.country,
            address: model.address,
            profession: model.profession,
            education: model.education,
            hobbies: model.hobbies,
            belief: model.belief,
            gender: model.gender.as_deref().and_then(Gender::parse),
            dob: model.dob,
            location,
            favorites: model.favorites,
            last_active: model.last_active,
            last_signal: model.last_signal,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
