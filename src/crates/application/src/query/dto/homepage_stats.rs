use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub struct HomepageStats {
    pub places_count: i64,
    pub profiles_count: i64,
    /// 查看者自己的上次活跃时间
    pub last_login: Option<NaiveDateTime>,
}
