use crate::query::dao::ProfileDao;
use crate::query::dto::profile_card::NearbyUser;
use crate::query::QueryError;
use std::sync::Arc;

/// 附近用户按距离升序；查看者自己从未上报过位置时返回空列表
pub async fn get_nearby_users(
    profile_dao: Arc<dyn ProfileDao>,
    viewer_id: i64,
    limit: i32,
) -> Result<Vec<NearbyUser>, QueryError> {
    if limit <= 0 {
        return Err(QueryError::InvalidInput(format!(
            "limit 必须为正数: {}",
            limit
        )));
    }
    profile_dao.get_nearby(viewer_id, limit).await
}
