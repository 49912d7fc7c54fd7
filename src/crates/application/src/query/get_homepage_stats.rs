use crate::query::dao::{PlaceDao, ProfileDao};
use crate::query::dto::homepage_stats::HomepageStats;
use crate::query::QueryError;
use std::sync::Arc;

/// 首页统计：推荐总数、用户总数、查看者自己的上次活跃时间
pub async fn get_homepage_stats(
    place_dao: Arc<dyn PlaceDao>,
    profile_dao: Arc<dyn ProfileDao>,
    viewer_id: i64,
) -> Result<HomepageStats, QueryError> {
    let (places_count, profiles_count, last_login) = futures::join!(
        place_dao.count_all(),
        profile_dao.count_all(),
        profile_dao.last_active_of(viewer_id),
    );

    Ok(HomepageStats {
        places_count: places_count?,
        profiles_count: profiles_count?,
        last_login: last_login?,
    })
}
