use application::query::dto::place_card::PlaceCard;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceResponse {
    pub id: String,
    pub name: String,
    pub comment: String,
    pub category_id: Option<String>,
    pub category_name: Option<String>,
    pub created_by: String,
    pub author_username: Option<String>,
    pub online: bool,
    pub city: Option<String>,
    pub contact: Option<String>,
    pub link: Option<String>,
    pub tags: Vec<String>,
    pub likes: i32,
    pub favorites: i32,
    pub created_at: NaiveDateTime,
}

impl From<PlaceCard> for PlaceResponse {
    fn from(card: PlaceCard) -> Self {
        Self {
            // id 用字符串下发，避免 JS 侧丢精度
            id: card.id.to_string(),
            name: card.name,
            comment: card.comment,
            category_id: card.category_id.map(|id| id.to_string()),
            category_name: card.category_name,
            created_by: card.created_by.to_string(),
            author_username: card.author_username,
            online: card.online,
            city: card.city,
            contact: card.contact,
            link: card.link,
            tags: card.tags,
            likes: card.likes,
            favorites: card.favorites,
            created_at: card.created_at,
        }
    }
}
