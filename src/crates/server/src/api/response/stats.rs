use application::query::dto::homepage_stats::HomepageStats;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageStatsResponse {
    pub places_count: i64,
    pub profiles_count: i64,
    pub last_login: Option<NaiveDateTime>,
}

impl From<HomepageStats> for HomepageStatsResponse {
    fn from(stats: HomepageStats) -> Self {
        Self {
            places_count: stats.places_count,
            profiles_count: stats.profiles_count,
            last_login: stats.last_login,
        }
    }
}
