use crate::query::dao::{PlaceDao, ProfileDao};
use crate::query::dto::place_card::PlaceCard;
use crate::query::dto::profile_card::ProfileCard;
use crate::query::QueryError;
use std::sync::Arc;

/// 收藏页数据：查看者收藏的用户和收藏的推荐
#[derive(Debug, Clone, Default)]
pub struct FavoriteLists {
    pub users: Vec<ProfileCard>,
    pub places: Vec<PlaceCard>,
}

pub async fn get_favorites(
    profile_dao: Arc<dyn ProfileDao>,
    place_dao: Arc<dyn PlaceDao>,
    viewer_id: i64,
) -> Result<FavoriteLists, QueryError> {
    let (users, places) = futures::join!(
        profile_dao.get_favorited_by(viewer_id),
        place_dao.get_favorited_by(viewer_id),
    );

    Ok(FavoriteLists {
        users: users?,
        places: places?,
    })
}
