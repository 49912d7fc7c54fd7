use crate::api::current_user;
use crate::api::error::ApiError;
use crate::api::response::category::CategoryResponse;
use crate::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use application::command::category::{CategoryService, CreateCategoryCmd, EditCategoryCmd};
use application::query::dao::CategoryDao;
use domain::value::{CategoryId, ProfileId};
use infra::repository::postgres::command::category::CategoryRepositoryImpl;
use infra::repository::postgres::query::category_dao::CategoryDaoImpl;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBody {
    pub name: String,
    #[serde(default)]
    pub child: bool,
    pub parent: Option<i64>,
}

fn category_service(state: &AppState) -> CategoryService {
    CategoryService::new(
        state.id_generator.clone(),
        Arc::new(CategoryRepositoryImpl::new(state.db.clone())),
    )
}

pub async fn create_category(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CategoryBody>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req)?;
    let body = body.into_inner();
    let svc = category_service(&state);
    let category = svc
        .create_category(
            ProfileId::from(user.user_id),
            CreateCategoryCmd {
                name: body.name,
                child: body.child,
                parent: body.parent,
            },
        )
        .await?;
    Ok(HttpResponse::Created().json(serde_json::json!({
        "id": category.id.to_string(),
        "slug": category.slug,
    })))
}

pub async fn edit_category(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<CategoryBody>,
) -> Result<HttpResponse, ApiError> {
    current_user(&req)?;
    let body = body.into_inner();
    let svc = category_service(&state);
    svc.edit_category(EditCategoryCmd {
        category_id: CategoryId::from(path.into_inner()),
        name: body.name,
        child: body.child,
        parent: body.parent,
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn list_categories(
    state: web::Data<AppState>,
) -> Result<web::Json<Vec<CategoryResponse>>, ApiError> {
    let dao = CategoryDaoImpl::new(state.db.clone());
    let items = dao.get_all().await?;
    Ok(web::Json(
        items.into_iter().map(CategoryResponse::from).collect(),
    ))
}

pub async fn list_parent_categories(
    state: web::Data<AppState>,
) -> Result<web::Json<Vec<CategoryResponse>>, ApiError> {
    let dao = CategoryDaoImpl::new(state.db.clone());
    let items = dao.get_parents().await?;
    Ok(web::Json(
        items.into_iter().map(CategoryResponse::from).collect(),
    ))
}
