use application::query::dto::engagement_status::EngagementStatus;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementStatusResponse {
    pub favorite: bool,
    pub liked: bool,
    pub likes: i32,
    pub follows: i32,
}

impl From<EngagementStatus> for EngagementStatusResponse {
    fn from(status: EngagementStatus) -> Self {
        Self {
            favorite: status.favorite,
            liked: status.liked,
            likes: status.likes,
            follows: status.follows,
        }
    }
}
