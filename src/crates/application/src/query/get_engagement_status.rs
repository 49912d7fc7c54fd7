use crate::query::dao::EngagementDao;
use crate::query::dto::engagement_status::EngagementStatus;
use crate::query::QueryError;
use std::sync::Arc;

/// 打开推荐详情时一次拿到：查看者是否已赞/已收藏，
/// 以及当前的点赞数和收藏人数
pub async fn get_engagement_status(
    engagement_dao: Arc<dyn EngagementDao>,
    viewer_id: i64,
    place_id: i64,
) -> Result<EngagementStatus, QueryError> {
    engagement_dao.get_place_status(viewer_id, place_id).await
}
