use crate::api::current_user;
use crate::api::error::ApiError;
use crate::api::response::place::PlaceResponse;
use crate::api::response::profile::ProfileResponse;
use crate::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use application::command::profile::{ProfileService, RecordSignalCmd, UpdateProfileCmd};
use application::query::dao::{PlaceDao, ProfileDao};
use domain::value::ProfileId;
use infra::repository::postgres::command::profile::ProfileRepositoryImpl;
use infra::repository::postgres::query::place_dao::PlaceDaoImpl;
use infra::repository::postgres::query::profile_dao::ProfileDaoImpl;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBody {
    pub full_name: Option<String>,
    pub short_description: Option<String>,
    pub avatar_url: Option<String>,
    pub website: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub profession: Option<String>,
    pub education: Option<String>,
    pub hobbies: Option<String>,
    pub belief: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<chrono::NaiveDate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalBody {
    pub latitude: f64,
    pub longitude: f64,
}

/// 用户主页：资料摘要加上该用户发布的推荐
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePageResponse {
    #[serde(flatten)]
    pub profile: ProfileResponse,
    pub places: Vec<PlaceResponse>,
}

fn profile_service(state: &AppState) -> ProfileService {
    ProfileService::new(Arc::new(ProfileRepositoryImpl::new(state.db.clone())))
}

pub async fn update_profile(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<ProfileBody>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req)?;
    let body = body.into_inner();
    let svc = profile_service(&state);
    // 首次请求时资料行可能还不存在
    svc.ensure_profile(ProfileId::from(user.user_id), &user.username)
        .await?;
    svc.update_profile(
        ProfileId::from(user.user_id),
        UpdateProfileCmd {
            full_name: body.full_name,
            short_description: body.short_description,
            avatar_url: body.avatar_url,
            website: body.website,
            city: body.city,
            country: body.country,
            address: body.address,
            profession: body.profession,
            education: body.education,
            hobbies: body.hobbies,
            belief: body.belief,
            gender: body.gender,
            dob: body.dob,
        },
    )
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn record_signal(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<SignalBody>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req)?;
    let svc = profile_service(&state);
    svc.ensure_profile(ProfileId::from(user.user_id), &user.username)
        .await?;
    svc.record_signal(
        ProfileId::from(user.user_id),
        RecordSignalCmd {
            latitude: body.latitude,
            longitude: body.longitude,
        },
    )
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn get_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<web::Json<ProfilePageResponse>, ApiError> {
    let username = path.into_inner();
    let profile_dao = ProfileDaoImpl::new(state.db.clone());
    let card = profile_dao
        .get_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("profile {}", username)))?;

    let place_dao = PlaceDaoImpl::new(state.db.clone());
    let places = place_dao.get_created_by(card.id).await?;

    Ok(web::Json(ProfilePageResponse {
        profile: card.into(),
        places: places.into_iter().map(PlaceResponse::from).collect(),
    }))
}
