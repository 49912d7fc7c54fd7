use crate::command::shared::IdGenerator;
use crate::error::AppError;
use domain::category::CategoryRepository;
use domain::place::{Place, PlaceError, PlaceRepository};
use domain::value::{CategoryId, PlaceId, ProfileId};
use std::sync::Arc;

#[derive(Debug)]
pub struct CreatePlaceCmd {
    pub name: String,
    pub comment: String,
    pub category_id: Option<i64>,
    pub online: bool,
    pub city: Option<String>,
    pub contact: Option<String>,
    pub link: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug)]
pub struct EditPlaceCmd {
    pub place_id: PlaceId,
    pub name: String,
    pub comment: String,
    pub category_id: Option<i64>,
    pub online: bool,
    pub city: Option<String>,
    pub contact: Option<String>,
    pub link: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug)]
pub struct ClonePlaceCmd {
    pub source_place_id: PlaceId,
}

pub struct PlaceService {
    id_generator: Arc<dyn IdGenerator>,
    place_repository: Arc<dyn PlaceRepository>,
    category_repository: Arc<dyn CategoryRepository>,
}

impl PlaceService {
    pub fn new(
        id_generator: Arc<dyn IdGenerator>,
        place_repository: Arc<dyn PlaceRepository>,
        category_repository: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            id_generator,
            place_repository,
            category_repository,
        }
    }

    async fn resolve_category(
        &self,
        category_id: Option<i64>,
    ) -> Result<Option<CategoryId>, AppError> {
        let Some(raw_id) = category_id else {
            return Ok(None);
        };
        let category_id = CategoryId::from(raw_id);
        self.category_repository
            .find_by_id(category_id.clone())
            .await?
            .ok_or_else(|| {
                AppError::AggregateNotFound("Category".to_string(), raw_id.to_string())
            })?;
        Ok(Some(category_id))
    }

    pub async fn create_place(
        &self,
        actor: ProfileId,
        cmd: CreatePlaceCmd,
    ) -> Result<Place, AppError> {
        let category_id = self.resolve_category(cmd.category_id).await?;
        let id = self.id_generator.next_id().await?;
        let place = Place::new(
            PlaceId::from(id),
            cmd.name,
            cmd.comment,
            category_id,
            actor,
            cmd.online,
            cmd.city,
            cmd.contact,
            cmd.link,
            cmd.tags,
        )?;
        let place = self.place_repository.save(place).await?;
        Ok(place)
    }

    pub async fn edit_place(&self, actor: ProfileId, cmd: EditPlaceCmd) -> Result<Place, AppError> {
        let mut place = self
            .place_repository
            .find_by_id(cmd.place_id.clone())
            .await?
            .ok_or_else(|| {
                AppError::AggregateNotFound("Place".to_string(), cmd.place_id.to_string())
            })?;
        // 只有作者本人可以编辑
        if place.created_by != actor {
            return Err(AppError::PlaceError(PlaceError::Forbidden(format!(
                "user {} is not the author of place {}",
                actor, place.id
            ))));
        }
        let category_id = self.resolve_category(cmd.category_id).await?;
        place.edit(
            cmd.name,
            cmd.comment,
            category_id,
            cmd.online,
            cmd.city,
            cmd.contact,
            cmd.link,
            cmd.tags,
        )?;
        let place = self.place_repository.save(place).await?;
        Ok(place)
    }

    /// 把别人的推荐克隆到自己的主页：新 id、新作者，计数清零
    pub async fn clone_place(
        &self,
        actor: ProfileId,
        cmd: ClonePlaceCmd,
    ) -> Result<Place, AppError> {
        let source = self
            .place_repository
            .find_by_id(cmd.source_place_id.clone())
            .await?
            .ok_or_else(|| {
                AppError::AggregateNotFound("Place".to_string(), cmd.source_place_id.to_string())
            })?;
        let id = self.id_generator.next_id().await?;
        let cloned = source.clone_for(PlaceId::from(id), actor);
        let cloned = self.place_repository.save(cloned).await?;
        Ok(cloned)
    }

    pub async fn delete_place(&self, actor: ProfileId, place_id: PlaceId) -> Result<(), AppError> {
        let place = self
            .place_repository
            .find_by_id(place_id.clone())
            .await?
            .ok_or_else(|| {
                AppError::AggregateNotFound("Place".to_string(), place_id.to_string())
            })?;
        if place.created_by != actor {
            return Err(AppError::PlaceError(PlaceError::Forbidden(format!(
                "user {} is not the author of place {}",
                actor, place.id
            ))));
        }
        self.place_repository.delete(place_id).await?;
        Ok(())
    }
}
