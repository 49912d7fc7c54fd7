pub mod category_dao;
pub mod engagement_dao;
pub mod place_dao;
pub mod profile_dao;
