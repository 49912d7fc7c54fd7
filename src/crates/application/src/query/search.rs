use crate::query::dao::{CategoryDao, PlaceDao, ProfileDao};
use crate::query::dto::search_results::SearchResults;
use crate::query::QueryError;
use log::warn;
use std::sync::Arc;

const SEARCH_LIMIT: i32 = 50;

/// 跨实体搜索：一个查询串同时打到用户、分类、推荐三张表。
/// 某一类查询失败只记日志并返回空段，不拖垮整个搜索。
pub struct SearchService {
    profile_dao: Arc<dyn ProfileDao>,
    category_dao: Arc<dyn CategoryDao>,
    place_dao: Arc<dyn PlaceDao>,
}

impl SearchService {
    pub fn new(
        profile_dao: Arc<dyn ProfileDao>,
        category_dao: Arc<dyn CategoryDao>,
        place_dao: Arc<dyn PlaceDao>,
    ) -> Self {
        Self {
            profile_dao,
            category_dao,
            place_dao,
        }
    }

    pub async fn execute(&self, query: &str) -> Result<SearchResults, QueryError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(QueryError::InvalidInput("搜索词不能为空".to_string()));
        }

        let (users, categories, places) = futures::join!(
            self.profile_dao.search_by_username(query, SEARCH_LIMIT),
            self.category_dao.search_by_name(query),
            self.place_dao.search_by_name(query, SEARCH_LIMIT),
        );

        let users = users.unwrap_or_else(|e| {
            warn!("用户搜索失败: {}", e);
            Vec::new()
        });
        let categories = categories.unwrap_or_else(|e| {
            warn!("分类搜索失败: {}", e);
            Vec::new()
        });
        let places = places.unwrap_or_else(|e| {
            warn!("推荐搜索失败: {}", e);
            Vec::new()
        });

        Ok(SearchResults {
            users,
            categories,
            places,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::dto::category_item::CategoryItem;
    use crate::query::dto::place_card::PlaceCard;
    use crate::query::dto::profile_card::{NearbyUser, ProfileCard};
    use async_trait::async_trait;
    use chrono::NaiveDateTime;

    struct StubProfileDao {
        fail: bool,
    }

    #[async_trait]
    impl ProfileDao for StubProfileDao {
        async fn get_by_username(
            &self,
            _username: &str,
        ) -> Result<Option<ProfileCard>, QueryError> {
            Ok(None)
        }
        async fn search_by_username(
            &self,
            query: &str,
            _limit: i32,
        ) -> Result<Vec<ProfileCard>, QueryError> {
            if self.fail {
                return Err(QueryError::DbError("connection reset".to_string()));
            }
            Ok(vec![ProfileCard {
                id: 1,
                username: query.to_string(),
                full_name: None,
                short_description: None,
                avatar_url: None,
                city: None,
                country: None,
                favorites: 0,
                last_active: NaiveDateTime::default(),
            }])
        }
        async fn get_nearby(
            &self,
            _viewer_id: i64,
            _limit: i32,
        ) -> Result<Vec<NearbyUser>, QueryError> {
            Ok(Vec::new())
        }
        async fn count_all(&self) -> Result<i64, QueryError> {
            Ok(0)
        }
        async fn last_active_of(
            &self,
            _user_id: i64,
        ) -> Result<Option<NaiveDateTime>, QueryError> {
            Ok(None)
        }
        async fn get_favorited_by(&self, _owner_id: i64) -> Result<Vec<ProfileCard>, QueryError> {
            Ok(Vec::new())
        }
    }

    struct StubCategoryDao;

    #[async_trait]
    impl CategoryDao for StubCategoryDao {
        async fn get_all(&self) -> Result<Vec<CategoryItem>, QueryError> {
            Ok(Vec::new())
        }
        async fn get_parents(&self) -> Result<Vec<CategoryItem>, QueryError> {
            Ok(Vec::new())
        }
        async fn search_by_name(&self, query: &str) -> Result<Vec<CategoryItem>, QueryError> {
            Ok(vec![CategoryItem {
                id: 10,
                name: query.to_string(),
                slug: query.to_string(),
                parent_id: None,
                is_child: false,
            }])
        }
    }

    struct StubPlaceDao;

    #[async_trait]
    impl PlaceDao for StubPlaceDao {
        async fn get_by_id(&self, _id: i64) -> Result<Option<PlaceCard>, QueryError> {
            Ok(None)
        }
        async fn search_by_name(
            &self,
            _query: &str,
            _limit: i32,
        ) -> Result<Vec<PlaceCard>, QueryError> {
            Ok(Vec::new())
        }
        async fn get_recent(&self, _limit: i32) -> Result<Vec<PlaceCard>, QueryError> {
            Ok(Vec::new())
        }
        async fn get_by_category(&self, _category_id: i64) -> Result<Vec<PlaceCard>, QueryError> {
            Ok(Vec::new())
        }
        async fn get_created_by(&self, _owner_id: i64) -> Result<Vec<PlaceCard>, QueryError> {
            Ok(Vec::new())
        }
        async fn count_all(&self) -> Result<i64, QueryError> {
            Ok(0)
        }
        async fn get_favorited_by(&self, _owner_id: i64) -> Result<Vec<PlaceCard>, QueryError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_blank_query_rejected() {
        let svc = SearchService::new(
            Arc::new(StubProfileDao { fail: false }),
            Arc::new(StubCategoryDao),
            Arc::new(StubPlaceDao),
        );
        assert!(svc.execute("   ").await.is_err());
    }

    #[tokio::test]
    async fn test_partial_failure_returns_empty_section() {
        // 用户搜索挂了，分类搜索的结果照常返回
        let svc = SearchService::new(
            Arc::new(StubProfileDao { fail: true }),
            Arc::new(StubCategoryDao),
            Arc::new(StubPlaceDao),
        );
        let results = svc.execute("coffee").await.unwrap();
        assert!(results.users.is_empty());
        assert_eq!(results.categories.len(), 1);
    }
}
