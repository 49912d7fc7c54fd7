use chrono::NaiveDateTime;

/// 列表/搜索中展示的推荐摘要，带反规范化计数
#[derive(Debug, Clone)]
pub struct PlaceCard {
    pub id: i64,
    pub name: String,
    pub comment: String,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub created_by: i64,
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
