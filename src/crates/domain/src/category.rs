use crate::value::{CategoryId, ProfileId};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use thiserror::Error;

// 领域错误定义
#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("数据库错误: {0}")]
    DbErr(String),
    #[error("实体不存在: {0}")]
    NotFoundErr(String),
    #[error("验证错误: {0}")]
    ValidationErr(String),
}

/// 从分类名称派生 URL slug：先小写并把空白折叠为 '-'，
/// 再去掉其余非 [a-z0-9-] 字符
pub fn derive_slug(name: &str) -> String {
    let mut dashed = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for ch in name.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                dashed.push('-');
                in_whitespace = true;
            }
        } else {
            dashed.push(ch);
            in_whitespace = false;
        }
    }
    dashed.retain(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    dashed
}

/// 分类：两级层次，父分类的 parent_id 为空
#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<CategoryId>,
    pub is_child: bool,
    pub creator_id: Option<ProfileId>,
    pub created_at: NaiveDateTime,
}

impl Category {
    pub fn new(
        id: CategoryId,
        name: String,
        parent_id: Option<CategoryId>,
        creator_id: Option<ProfileId>,
    ) -> Result<Self, CategoryError> {
        if name.trim().is_empty() {
            return Err(CategoryError::ValidationErr(
                "分类名称不能为空".to_string(),
            ));
        }
        let slug = derive_slug(&name);
        if slug.is_empty() {
            return Err(CategoryError::ValidationErr(
                "分类名称无法生成有效的 slug".to_string(),
            ));
        }
        let is_child = parent_id.is_some();
        Ok(Self {
            id,
            name,
            slug,
            parent_id,
            is_child,
            creator_id,
            created_at: Utc::now().naive_utc(),
        })
    }

    /// 编辑分类。slug 是对外的 URL 标识，改名不重新派生
    pub fn rename(&mut self, name: String, parent_id: Option<CategoryId>) -> Result<(), CategoryError> {
        if name.trim().is_empty() {
            return Err(CategoryError::ValidationErr(
                "分类名称不能为空".to_string(),
            ));
        }
        self.name = name;
        self.is_child = parent_id.is_some();
        self.parent_id = parent_id;
        Ok(())
    }
}

// 仓储接口
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, CategoryError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, CategoryError>;
    async fn save(&self, category: Category) -> Result<Category, CategoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_slug_lowercases_and_dashes() {
        assert_eq!(derive_slug("Coffee Shops"), "coffee-shops");
        assert_eq!(derive_slug("  Vegan   Food "), "-vegan-food-");
        // '&' 在空白折叠之后才被去掉，所以会留下两个连字符
        assert_eq!(derive_slug("Books & Comics"), "books--comics");
        assert_eq!(derive_slug("第2章 Food"), "2-food");
    }

    #[test]
    fn test_child_flag_follows_parent() {
        let parent = Category::new(CategoryId::from(1), "Food".to_string(), None, None).unwrap();
        assert!(!parent.is_child);
        let child = Category::new(
            CategoryId::from(2),
            "Ramen".to_string(),
            Some(CategoryId::from(1)),
            None,
        )
        .unwrap();
        assert!(child.is_child);
        assert_eq!(child.slug, "ramen");
    }

    #[test]
    fn test_name_without_slug_material_rejected() {
        assert!(Category::new(CategoryId::from(3), "咖啡".to_string(), None, None).is_err());
    }
}
