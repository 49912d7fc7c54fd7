pub mod categories;
pub mod engagement;
pub mod error;
pub mod favorites;
pub mod feed;
pub mod places;
pub mod profiles;
pub mod response;
pub mod search;

use crate::api::error::ApiError;
use actix_web::{web, HttpMessage, HttpRequest};
use application::auth::UserClaims;

pub fn configure_service(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/engagement")
            .route("/places/{id}/like", web::post().to(engagement::like_place))
            .route(
                "/places/{id}/like",
                web::delete().to(engagement::unlike_place),
            )
            .route(
                "/places/{id}/favorite",
                web::post().to(engagement::favorite_place),
            )
            .route(
                "/places/{id}/favorite",
                web::delete().to(engagement::unfavorite_place),
            )
            .route(
                "/users/{id}/favorite",
                web::post().to(engagement::favorite_user),
            )
            .route(
                "/users/{id}/favorite",
                web::delete().to(engagement::unfavorite_user),
            ),
    )
    .service(
        web::scope("/places")
            .route("", web::post().to(places::create_place))
            .route("/{id}", web::get().to(places::get_place))
            .route("/{id}", web::put().to(places::edit_place))
            .route("/{id}", web::delete().to(places::delete_place))
            .route("/{id}/clone", web::post().to(places::clone_place))
            .route(
                "/{id}/engagement",
                web::get().to(engagement::place_status),
            ),
    )
    .service(
        web::scope("/categories")
            .route("", web::get().to(categories::list_categories))
            .route("", web::post().to(categories::create_category))
            .route("/parents", web::get().to(categories::list_parent_categories))
            .route("/{id}", web::put().to(categories::edit_category))
            .route("/{id}/places", web::get().to(places::list_by_category)),
    )
    .service(
        web::scope("/feed")
            .route("/nearby", web::get().to(feed::nearby_users))
            .route("/stats", web::get().to(feed::homepage_stats))
            .route("/recent", web::get().to(feed::recent_places)),
    )
    .service(
        web::scope("/profile")
            .route("", web::put().to(profiles::update_profile))
            .route("/signal", web::post().to(profiles::record_signal)),
    )
    .route("/search", web::get().to(search::search))
    .route("/favorites", web::get().to(favorites::list_favorites))
    .route("/profiles/{username}", web::get().to(profiles::get_profile));
}

/// 从 request extensions 中取出 JWT 中间件放入的用户声明
pub(crate) fn current_user(req: &HttpRequest) -> Result<UserClaims, ApiError> {
    req.extensions()
        .get::<UserClaims>()
        .cloned()
        .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))
}
