use crate::api::current_user;
use crate::api::error::ApiError;
use crate::api::response::place::PlaceResponse;
use crate::api::response::profile::NearbyUserResponse;
use crate::api::response::stats::HomepageStatsResponse;
use crate::AppState;
use actix_web::{web, HttpRequest};
use application::query::dao::PlaceDao;
use application::query::get_homepage_stats::get_homepage_stats;
use application::query::get_nearby_users::get_nearby_users;
use infra::repository::postgres::query::place_dao::PlaceDaoImpl;
use infra::repository::postgres::query::profile_dao::ProfileDaoImpl;
use std::sync::Arc;

/// 附近用户：以查看者最近上报的位置为原点，按距离升序
pub async fn nearby_users(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<web::Json<Vec<NearbyUserResponse>>, ApiError> {
    let user = current_user(&req)?;
    let limit = state.app_cfg.feed().nearby_limit;
    let dao = Arc::new(ProfileDaoImpl::new(state.db.clone()));
    let users = get_nearby_users(dao, user.user_id, limit).await?;
    Ok(web::Json(
        users.into_iter().map(NearbyUserResponse::from).collect(),
    ))
}

pub async fn homepage_stats(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<web::Json<HomepageStatsResponse>, ApiError> {
    let user = current_user(&req)?;
    let stats = get_homepage_stats(
        Arc::new(PlaceDaoImpl::new(state.db.clone())),
        Arc::new(ProfileDaoImpl::new(state.db.clone())),
        user.user_id,
    )
    .await?;
    Ok(web::Json(stats.into()))
}

pub async fn recent_places(
    state: web::Data<AppState>,
) -> Result<web::Json<Vec<PlaceResponse>>, ApiError> {
    let limit = state.app_cfg.feed().recent_limit;
    let dao = PlaceDaoImpl::new(state.db.clone());
    let cards = dao.get_recent(limit).await?;
    Ok(web::Json(
        cards.into_iter().map(PlaceResponse::from).collect(),
    ))
}
