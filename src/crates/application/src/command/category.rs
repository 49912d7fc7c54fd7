use crate::command::shared::IdGenerator;
use crate::error::AppError;
use domain::category::{derive_slug, Category, CategoryError, CategoryRepository};
use domain::value::{CategoryId, ProfileId};
use std::sync::Arc;

#[derive(Debug)]
pub struct CreateCategoryCmd {
    pub name: String,
    /// 是否为子分类；为 false 时忽略 parent
    pub child: bool,
    pub parent: Option<i64>,
}

#[derive(Debug)]
pub struct EditCategoryCmd {
    pub category_id: CategoryId,
    pub name: String,
    pub child: bool,
    pub parent: Option<i64>,
}

pub struct CategoryService {
    id_generator: Arc<dyn IdGenerator>,
    category_repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(
        id_generator: Arc<dyn IdGenerator>,
        category_repository: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            id_generator,
            category_repository,
        }
    }

    async fn resolve_parent(
        &self,
        child: bool,
        parent: Option<i64>,
    ) -> Result<Option<CategoryId>, AppError> {
        // 非子分类一律没有父分类
        if !child {
            return Ok(None);
        }
        let Some(raw_id) = parent else {
            return Ok(None);
        };
        let parent_id = CategoryId::from(raw_id);
        let parent = self
            .category_repository
            .find_by_id(parent_id.clone())
            .await?
            .ok_or_else(|| {
                AppError::AggregateNotFound("Category".to_string(), raw_id.to_string())
            })?;
        // 只允许两级层次
        if parent.is_child {
            return Err(AppError::CategoryError(CategoryError::ValidationErr(
                "子分类不能再作为父分类".to_string(),
            )));
        }
        Ok(Some(parent_id))
    }

    pub async fn create_category(
        &self,
        actor: ProfileId,
        cmd: CreateCategoryCmd,
    ) -> Result<Category, AppError> {
        let slug = derive_slug(&cmd.name);
        if let Some(existing) = self.category_repository.find_by_slug(&slug).await? {
            return Err(AppError::CategoryError(CategoryError::ValidationErr(
                format!("分类已存在: {}", existing.name),
            )));
        }
        let parent_id = self.resolve_parent(cmd.child, cmd.parent).await?;
        let id = self.id_generator.next_id().await?;
        let category = Category::new(CategoryId::from(id), cmd.name, parent_id, Some(actor))?;
        let category = self.category_repository.save(category).await?;
        Ok(category)
    }

    pub async fn edit_category(&self, cmd: EditCategoryCmd) -> Result<Category, AppError> {
        let mut category = self
            .category_repository
            .find_by_id(cmd.category_id.clone())
            .await?
            .ok_or_else(|| {
                AppError::AggregateNotFound("Category".to_string(), cmd.category_id.to_string())
            })?;
        let parent_id = self.resolve_parent(cmd.child, cmd.parent).await?;
        category.rename(cmd.name, parent_id)?;
        let category = self.category_repository.save(category).await?;
        Ok(category)
    }
}
