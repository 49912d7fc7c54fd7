use crate::api::current_user;
use crate::api::error::ApiError;
use crate::api::response::place::PlaceResponse;
use crate::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use application::command::place::{ClonePlaceCmd, CreatePlaceCmd, EditPlaceCmd, PlaceService};
use application::query::dao::PlaceDao;
use domain::value::{PlaceId, ProfileId};
use infra::repository::postgres::command::category::CategoryRepositoryImpl;
use infra::repository::postgres::command::place::PlaceRepositoryImpl;
use infra::repository::postgres::query::place_dao::PlaceDaoImpl;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBody {
    pub name: String,
    pub comment: String,
    pub category_id: Option<i64>,
    #[serde(default)]
    pub online: bool,
    pub city: Option<String>,
    pub contact: Option<String>,
    pub link: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn place_service(state: &AppState) -> PlaceService {
    PlaceService::new(
        state.id_generator.clone(),
        Arc::new(PlaceRepositoryImpl::new(state.db.clone())),
        Arc::new(CategoryRepositoryImpl::new(state.db.clone())),
    )
}

pub async fn create_place(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<PlaceBody>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req)?;
    let body = body.into_inner();
    let svc = place_service(&state);
    let place = svc
        .create_place(
            ProfileId::from(user.user_id),
            CreatePlaceCmd {
                name: body.name,
                comment: body.comment,
                category_id: body.category_id,
                online: body.online,
                city: body.city,
                contact: body.contact,
                link: body.link,
                tags: body.tags,
            },
        )
        .await?;
    Ok(HttpResponse::Created().json(serde_json::json!({ "id": place.id.to_string() })))
}

pub async fn edit_place(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<PlaceBody>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req)?;
    let body = body.into_inner();
    let svc = place_service(&state);
    svc.edit_place(
        ProfileId::from(user.user_id),
        EditPlaceCmd {
            place_id: PlaceId::from(path.into_inner()),
            name: body.name,
            comment: body.comment,
            category_id: body.category_id,
            online: body.online,
            city: body.city,
            contact: body.contact,
            link: body.link,
            tags: body.tags,
        },
    )
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn clone_place(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req)?;
    let svc = place_service(&state);
    let cloned = svc
        .clone_place(
            ProfileId::from(user.user_id),
            ClonePlaceCmd {
                source_place_id: PlaceId::from(path.into_inner()),
            },
        )
        .await?;
    Ok(HttpResponse::Created().json(serde_json::json!({ "id": cloned.id.to_string() })))
}

pub async fn delete_place(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req)?;
    let svc = place_service(&state);
    svc.delete_place(ProfileId::from(user.user_id), PlaceId::from(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn get_place(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<web::Json<PlaceResponse>, ApiError> {
    let dao = PlaceDaoImpl::new(state.db.clone());
    let card = dao
        .get_by_id(path.into_inner())
        .await?
        .ok_or_else(|| ApiError::NotFound("place".to_string()))?;
    Ok(web::Json(card.into()))
}

pub async fn list_by_category(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<web::Json<Vec<PlaceResponse>>, ApiError> {
    let dao = PlaceDaoImpl::new(state.db.clone());
    let cards = dao.get_by_category(path.into_inner()).await?;
    Ok(web::Json(
        cards.into_iter().map(PlaceResponse::from).collect(),
    ))
}
