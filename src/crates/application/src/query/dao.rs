use crate::query::dto::category_item::CategoryItem;
use crate::query::dto::engagement_status::EngagementStatus;
use crate::query::dto::place_card::PlaceCard;
use crate::query::dto::profile_card::{NearbyUser, ProfileCard};
use crate::query::QueryError;
use async_trait::async_trait;
use chrono::NaiveDateTime;

#[async_trait]
pub trait ProfileDao: Send + Sync {
    async fn get_by_username(&self, username: &str) -> Result<Option<ProfileCard>, QueryError>;
    /// 按用户名模糊搜索（大小写不敏感）
    async fn search_by_username(
        &self,
        query: &str,
        limit: i32,
    ) -> Result<Vec<ProfileCard>, QueryError>;
    /// 按与查看者最近上报位置的距离升序返回其他用户
    async fn get_nearby(&self, viewer_id: i64, limit: i32)
        -> Result<Vec<NearbyUser>, QueryError>;
    async fn count_all(&self) -> Result<i64, QueryError>;
    async fn last_active_of(&self, user_id: i64) -> Result<Option<NaiveDateTime>, QueryError>;
    /// owner 收藏的用户列表
    async fn get_favorited_by(&self, owner_id: i64) -> Result<Vec<ProfileCard>, QueryError>;
}

#[async_trait]
pub trait PlaceDao: Send + Sync {
    async fn get_by_id(&self, id: i64) -> Result<Option<PlaceCard>, QueryError>;
    /// 按名称模糊搜索（大小写不敏感）
    async fn search_by_name(&self, query: &str, limit: i32) -> Result<Vec<PlaceCard>, QueryError>;
    /// 最近发布的推荐（按创建时间降序）
    async fn get_recent(&self, limit: i32) -> Result<Vec<PlaceCard>, QueryError>;
    async fn get_by_category(&self, category_id: i64) -> Result<Vec<PlaceCard>, QueryError>;
    async fn get_created_by(&self, owner_id: i64) -> Result<Vec<PlaceCard>, QueryError>;
    async fn count_all(&self) -> Result<i64, QueryError>;
    /// owner 收藏的推荐列表
    async fn get_favorited_by(&self, owner_id: i64) -> Result<Vec<PlaceCard>, QueryError>;
}

#[async_trait]
pub trait CategoryDao: Send + Sync {
    async fn get_all(&self) -> Result<Vec<CategoryItem>, QueryError>;
    /// 顶级分类（parent_id 为空）
    async fn get_parents(&self) -> Result<Vec<CategoryItem>, QueryError>;
    async fn search_by_name(&self, query: &str) -> Result<Vec<CategoryItem>, QueryError>;
}

#[async_trait]
pub trait EngagementDao: Send + Sync {
    /// 单个推荐相对查看者的互动状态（是否已赞/已收藏 + 两个计数）
    async fn get_place_status(
        &self,
        viewer_id: i64,
        place_id: i64,
    ) -> Result<EngagementStatus, QueryError>;
}
