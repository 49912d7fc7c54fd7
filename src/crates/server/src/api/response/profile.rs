use application::query::dto::profile_card::{NearbyUser, ProfileCard};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub short_description: Option<String>,
    pub avatar_url: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub favorites: i32,
    pub last_active: NaiveDateTime,
}

impl From<ProfileCard> for ProfileResponse {
    fn from(card: ProfileCard) -> Self {
        Self {
            id: card.id.to_string(),
            username: card.username,
            full_name: card.full_name,
            short_description: card.short_description,
            avatar_url: card.avatar_url,
            city: card.city,
            country: card.country,
            favorites: card.favorites,
            last_active: card.last_active,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyUserResponse {
    #[serde(flatten)]
    pub profile: ProfileResponse,
    pub distance_km: f64,
}

impl From<NearbyUser> for NearbyUserResponse {
    fn from(nearby: NearbyUser) -> Self {
        Self {
            profile: nearby.profile.into(),
            distance_km: nearby.distance_km,
        }
    }
}
