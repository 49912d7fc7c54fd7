use chrono::NaiveDateTime;

/// 列表/搜索中展示的用户资料摘要
#[derive(Debug, Clone)]
pub struct ProfileCard {
    pub id: i64,
    pub username: String,
    pub full_name: Option<String>,
    pub short_description: Option<String>,
    pub avatar_url: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub favorites: i32,
    pub last_active: NaiveDateTime,
}

/// 附近用户：资料摘要加上与查看者的球面距离
#[derive(Debug, Clone)]
pub struct NearbyUser {
    pub profile: ProfileCard,
    pub distance_km: f64,
}
