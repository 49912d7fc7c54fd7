use crate::api::current_user;
use crate::api::error::ApiError;
use crate::api::response::place::PlaceResponse;
use crate::api::response::profile::ProfileResponse;
use crate::AppState;
use actix_web::{web, HttpRequest};
use application::query::get_favorites::get_favorites;
use infra::repository::postgres::query::place_dao::PlaceDaoImpl;
use infra::repository::postgres::query::profile_dao::ProfileDaoImpl;
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesResponse {
    pub favorite_users: Vec<ProfileResponse>,
    pub favorite_places: Vec<PlaceResponse>,
}

/// 收藏页：查看者收藏的用户和推荐
pub async fn list_favorites(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<web::Json<FavoritesResponse>, ApiError> {
    let user = current_user(&req)?;
    let lists = get_favorites(
        Arc::new(ProfileDaoImpl::new(state.db.clone())),
        Arc::new(PlaceDaoImpl::new(state.db.clone())),
        user.user_id,
    )
    .await?;
    Ok(web::Json(FavoritesResponse {
        favorite_users: lists.users.into_iter().map(Into::into).collect(),
        favorite_places: lists.places.into_iter().map(Into::into).collect(),
    }))
}
