use crate::api::error::ApiError;
use crate::api::response::category::CategoryResponse;
use crate::api::response::place::PlaceResponse;
use crate::api::response::profile::ProfileResponse;
use crate::AppState;
use actix_web::web;
use application::query::search::SearchService;
use infra::repository::postgres::query::category_dao::CategoryDaoImpl;
use infra::repository::postgres::query::place_dao::PlaceDaoImpl;
use infra::repository::postgres::query::profile_dao::ProfileDaoImpl;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub users: Vec<ProfileResponse>,
    pub categories: Vec<CategoryResponse>,
    pub places: Vec<PlaceResponse>,
}

pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<web::Json<SearchResponse>, ApiError> {
    let svc = SearchService::new(
        Arc::new(ProfileDaoImpl::new(state.db.clone())),
        Arc::new(CategoryDaoImpl::new(state.db.clone())),
        Arc::new(PlaceDaoImpl::new(state.db.clone())),
    );
    let results = svc.execute(&query.q).await?;
    Ok(web::Json(SearchResponse {
        users: results.users.into_iter().map(Into::into).collect(),
        categories: results.categories.into_iter().map(Into::into).collect(),
        places: results.places.into_iter().map(Into::into).collect(),
    }))
}
