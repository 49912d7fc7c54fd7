use crate::value::{CategoryId, PlaceId, ProfileId};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use thiserror::Error;

// 领域错误定义
#[derive(Debug, Error)]
pub enum PlaceError {
    #[error("数据库错误: {0}")]
    DbErr(String),
    #[error("实体不存在: {0}")]
    NotFoundErr(String),
    #[error("验证错误: {0}")]
    ValidationErr(String),
    #[error("无权限操作: {0}")]
    Forbidden(String),
}

/// 推荐（地点/商品/服务）。likes 与 favorites 是反规范化计数，
/// 理论上等于 liked / favorite_place 表中指向本行的行数，
/// 但只在每次双写完成或补偿完成后的边界上成立。
#[derive(Debug, Clone)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub comment: String,
    pub category_id: Option<CategoryId>,
    pub created_by: ProfileId,
    pub online: bool,
    pub city: Option<String>,
    pub contact: Option<String>,
    pub link: Option<String>,
    pub tags: Vec<String>,
    pub likes: i32,
    pub favorites: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Place {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: PlaceId,
        name: String,
        comment: String,
        category_id: Option<CategoryId>,
        created_by: ProfileId,
        online: bool,
        city: Option<String>,
        contact: Option<String>,
        link: Option<String>,
        tags: Vec<String>,
    ) -> Result<Self, PlaceError> {
        if name.trim().is_empty() {
            return Err(PlaceError::ValidationErr("推荐名称不能为空".to_string()));
        }
        if comment.trim().is_empty() {
            return Err(PlaceError::ValidationErr("推荐说明不能为空".to_string()));
        }
        // 线下推荐必须带城市
        if !online && city.as_deref().map_or(true, |c| c.trim().is_empty()) {
            return Err(PlaceError::ValidationErr(
                "线下推荐必须填写城市".to_string(),
            ));
        }
        let now = Utc::now().naive_utc();
        Ok(Self {
            id,
            name,
            comment,
            category_id,
            created_by,
            online,
            city,
            contact,
            link,
            tags,
            likes: 0,
            favorites: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// 编辑推荐内容，计数列不在此处变动
    #[allow(clippy::too_many_arguments)]
    pub fn edit(
        &mut self,
        name: String,
        comment: String,
        category_id: Option<CategoryId>,
        online: bool,
        city: Option<String>,
        contact: Option<String>,
        link: Option<String>,
        tags: Vec<String>,
    ) -> Result<(), PlaceError> {
        if name.trim().is_empty() {
            return Err(PlaceError::ValidationErr("推荐名称不能为空".to_string()));
        }
        if comment.trim().is_empty() {
            return Err(PlaceError::ValidationErr("推荐说明不能为空".to_string()));
        }
        self.name = name;
        self.comment = comment;
        self.category_id = category_id;
        self.online = online;
        self.city = city;
        self.contact = contact;
        self.link = link;
        self.tags = tags;
        self.updated_at = Utc::now().naive_utc();
        Ok(())
    }

    /// 克隆到另一个用户的主页：新 id、新作者，计数清零
    pub fn clone_for(&self, new_id: PlaceId, new_owner: ProfileId) -> Place {
        let now = Utc::now().naive_utc();
        Place {
            id: new_id,
            name: self.name.clone(),
            comment: self.comment.clone(),
            category_id: self.category_id.clone(),
            created_by: new_owner,
            online: self.online,
            city: self.city.clone(),
            contact: self.contact.clone(),
            link: self.link.clone(),
            tags: self.tags.clone(),
            likes: 0,
            favorites: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

// 仓储接口
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    async fn find_by_id(&self, id: PlaceId) -> Result<Option<Place>, PlaceError>;
    async fn save(&self, place: Place) -> Result<Place, PlaceError>;
    async fn delete(&self, id: PlaceId) -> Result<(), PlaceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_place() -> Place {
        Place::new(
            PlaceId::from(1),
            "好吃的面馆".to_string(),
            "牛肉面非常好".to_string(),
            Some(CategoryId::from(7)),
            ProfileId::from(100),
            false,
            Some("上海".to_string()),
            None,
            None,
            vec!["面食".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_new_place_starts_with_zero_counters() {
        let place = sample_place();
        assert_eq!(place.likes, 0);
        assert_eq!(place.favorites, 0);
    }

    #[test]
    fn test_offline_place_requires_city() {
        let result = Place::new(
            PlaceId::from(2),
            "无名店".to_string(),
            "不错".to_string(),
            None,
            ProfileId::from(100),
            false,
            None,
            None,
            None,
            vec![],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_clone_for_resets_counters_and_owner() {
        let mut place = sample_place();
        place.likes = 5;
        place.favorites = 3;
        let cloned = place.clone_for(PlaceId::from(9), ProfileId::from(200));
        assert_eq!(cloned.id.as_i64(), 9);
        assert_eq!(cloned.created_by.as_i64(), 200);
        assert_eq!(cloned.likes, 0);
        assert_eq!(cloned.favorites, 0);
        assert_eq!(cloned.name, place.name);
    }
}
