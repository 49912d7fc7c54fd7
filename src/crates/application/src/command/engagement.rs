use crate::command::dual_write::{
    DualWriteCoordinator, DualWritePlan, RelationDirection,
};
use crate::context::AppContext;
use crate::error::AppError;
use crate::event::event_bus::EventBus;
use domain::engagement::{RelationKind, RelationStore};
use domain::value::{PlaceId, ProfileId};
use std::sync::Arc;

#[derive(Debug)]
pub struct AddLikeCmd {
    pub place_id: PlaceId,
    /// 调用方最近一次读到的点赞数
    pub current_likes: i32,
}

#[derive(Debug)]
pub struct RemoveLikeCmd {
    pub place_id: PlaceId,
    pub current_likes: i32,
}

#[derive(Debug)]
pub struct AddFavoritePlaceCmd {
    pub place_id: PlaceId,
    pub current_favorites: i32,
}

#[derive(Debug)]
pub struct RemoveFavoritePlaceCmd {
    pub place_id: PlaceId,
    pub current_favorites: i32,
}

#[derive(Debug)]
pub struct AddFavoriteUserCmd {
    pub user_id: ProfileId,
    pub current_favorites: i32,
}

#[derive(Debug)]
pub struct RemoveFavoriteUserCmd {
    pub user_id: ProfileId,
    pub current_favorites: i32,
}

/// 互动服务：点赞/收藏推荐、收藏用户，共六个操作。
///
/// 每个操作都接受调用方上一次读到的计数值，按 ±1 算出新值后
/// 交给双写协调器落库；这里不会在写前重读计数器，
/// 两个并发调用可能互相覆盖对方的计数（调用方在下次整页
/// 加载时拿到权威值）。操作不幂等：重复 add 会撞上关系表的
/// 唯一约束，关系写入失败、计数器被补偿回去，错误原样上报。
pub struct EngagementService<B: EventBus> {
    coordinator: DualWriteCoordinator<B>,
}

impl<B: EventBus> EngagementService<B> {
    pub fn new(relation_store: Arc<dyn RelationStore>, event_bus: Arc<B>) -> Self {
        Self {
            coordinator: DualWriteCoordinator::new(relation_store, event_bus),
        }
    }

    pub fn with_coordinator(coordinator: DualWriteCoordinator<B>) -> Self {
        Self { coordinator }
    }

    pub async fn add_like(
        &self,
        ctx: &AppContext,
        actor: ProfileId,
        cmd: AddLikeCmd,
    ) -> Result<(), AppError> {
        self.mutate(
            ctx,
            RelationKind::Liked,
            RelationDirection::Attach,
            actor,
            cmd.place_id.as_i64(),
            cmd.current_likes,
        )
        .await
    }

    pub async fn remove_like(
        &self,
        ctx: &AppContext,
        actor: ProfileId,
        cmd: RemoveLikeCmd,
    ) -> Result<(), AppError> {
        self.mutate(
            ctx,
            RelationKind::Liked,
            RelationDirection::Detach,
            actor,
            cmd.place_id.as_i64(),
            cmd.current_likes,
        )
        .await
    }

    pub async fn add_favorite_place(
        &self,
        ctx: &AppContext,
        actor: ProfileId,
        cmd: AddFavoritePlaceCmd,
    ) -> Result<(), AppError> {
        self.mutate(
            ctx,
            RelationKind::FavoritePlace,
            RelationDirection::Attach,
            actor,
            cmd.place_id.as_i64(),
            cmd.current_favorites,
        )
        .await
    }

    pub async fn remove_favorite_place(
        &self,
        ctx: &AppContext,
        actor: ProfileId,
        cmd: RemoveFavoritePlaceCmd,
    ) -> Result<(), AppError> {
        self.mutate(
            ctx,
            RelationKind::FavoritePlace,
            RelationDirection::Detach,
            actor,
            cmd.place_id.as_i64(),
            cmd.current_favorites,
        )
        .await
    }

    pub async fn add_favorite_user(
        &self,
        ctx: &AppContext,
        actor: ProfileId,
        cmd: AddFavoriteUserCmd,
    ) -> Result<(), AppError> {
        self.mutate(
            ctx,
            RelationKind::FavoriteUser,
            RelationDirection::Attach,
            actor,
            cmd.user_id.as_i64(),
            cmd.current_favorites,
        )
        .await
    }

    pub async fn remove_favorite_user(
        &self,
        ctx: &AppContext,
        actor: ProfileId,
        cmd: RemoveFavoriteUserCmd,
    ) -> Result<(), AppError> {
        self.mutate(
            ctx,
            RelationKind::FavoriteUser,
            RelationDirection::Detach,
            actor,
            cmd.user_id.as_i64(),
            cmd.current_favorites,
        )
        .await
    }

    /// 六个操作共用的参数化实现：表 × 方向 × 计数列
    async fn mutate(
        &self,
        ctx: &AppContext,
        kind: RelationKind,
        direction: RelationDirection,
        actor: ProfileId,
        target_id: i64,
        current: i32,
    ) -> Result<(), AppError> {
        if current < 0 {
            return Err(AppError::InvalidInput(format!(
                "计数值不能为负: {}",
                current
            )));
        }
        if direction == RelationDirection::Detach && current == 0 {
            return Err(AppError::InvalidInput(
                "计数值已为零，无法递减".to_string(),
            ));
        }
        let delta = match direction {
            RelationDirection::Attach => 1,
            RelationDirection::Detach => -1,
        };
        let plan = DualWritePlan {
            kind,
            owner_id: actor,
            target_id,
            direction,
            counter_before: current,
            counter_after: current + delta,
        };
        let report = self.coordinator.perform(ctx, &plan).await;
        match report.primary_error() {
            None => Ok(()),
            Some(e) => Err(AppError::from(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::test_support::{NullEventBus, StubRelationStore};
    use domain::engagement::EngagementError;

    fn service(store: Arc<StubRelationStore>) -> EngagementService<NullEventBus> {
        EngagementService::new(store, Arc::new(NullEventBus))
    }

    #[tokio::test]
    async fn test_add_like_happy_path() {
        let store = Arc::new(StubRelationStore::new());
        store.seed_counter(RelationKind::Liked, 7, 5);
        let svc = service(store.clone());

        let result = svc
            .add_like(
                &AppContext::new(),
                ProfileId::from(100),
                AddLikeCmd {
                    place_id: PlaceId::from(7),
                    current_likes: 5,
                },
            )
            .await;

        assert!(result.is_ok());
        assert_eq!(store.counter(RelationKind::Liked, 7), Some(6));
        assert_eq!(store.row_count(RelationKind::Liked, 7), 1);
    }

    #[tokio::test]
    async fn test_add_then_remove_restores_initial_state() {
        // 四个 add/remove 配对都满足往返律：add 后按正确的计数值
        // remove，关系行消失、计数回到起点
        let store = Arc::new(StubRelationStore::new());
        store.seed_counter(RelationKind::Liked, 7, 5);
        store.seed_counter(RelationKind::FavoritePlace, 7, 2);
        store.seed_counter(RelationKind::FavoriteUser, 200, 9);
        let svc = service(store.clone());
        let ctx = AppContext::new();
        let actor = ProfileId::from(100);

        svc.add_like(
            &ctx,
            actor.clone(),
            AddLikeCmd {
                place_id: PlaceId::from(7),
                current_likes: 5,
            },
        )
        .await
        .unwrap();
        svc.remove_like(
            &ctx,
            actor.clone(),
            RemoveLikeCmd {
                place_id: PlaceId::from(7),
                current_likes: 6,
            },
        )
        .await
        .unwrap();
        assert_eq!(store.counter(RelationKind::Liked, 7), Some(5));
        assert_eq!(store.row_count(RelationKind::Liked, 7), 0);

        svc.add_favorite_place(
            &ctx,
            actor.clone(),
            AddFavoritePlaceCmd {
                place_id: PlaceId::from(7),
                current_favorites: 2,
            },
        )
        .await
        .unwrap();
        svc.remove_favorite_place(
            &ctx,
            actor.clone(),
            RemoveFavoritePlaceCmd {
                place_id: PlaceId::from(7),
                current_favorites: 3,
            },
        )
        .await
        .unwrap();
        assert_eq!(store.counter(RelationKind::FavoritePlace, 7), Some(2));
        assert_eq!(store.row_count(RelationKind::FavoritePlace, 7), 0);

        svc.add_favorite_user(
            &ctx,
            actor.clone(),
            AddFavoriteUserCmd {
                user_id: ProfileId::from(200),
                current_favorites: 9,
            },
        )
        .await
        .unwrap();
        svc.remove_favorite_user(
            &ctx,
            actor.clone(),
            RemoveFavoriteUserCmd {
                user_id: ProfileId::from(200),
                current_favorites: 10,
            },
        )
        .await
        .unwrap();
        assert_eq!(store.counter(RelationKind::FavoriteUser, 200), Some(9));
        assert_eq!(store.row_count(RelationKind::FavoriteUser, 200), 0);
    }

    #[tokio::test]
    async fn test_duplicate_add_like_surfaces_conflict_and_restores_counter() {
        // 存储对 (owner, target) 有唯一约束：第二次 add_like 的关系写入
        // 失败，计数器被补偿回去，错误上报给调用方
        let store = Arc::new(StubRelationStore::new());
        store.seed_counter(RelationKind::Liked, 7, 5);
        let svc = service(store.clone());
        let ctx = AppContext::new();
        let actor = ProfileId::from(100);

        svc.add_like(
            &ctx,
            actor.clone(),
            AddLikeCmd {
                place_id: PlaceId::from(7),
                current_likes: 5,
            },
        )
        .await
        .unwrap();

        let second = svc
            .add_like(
                &ctx,
                actor,
                AddLikeCmd {
                    place_id: PlaceId::from(7),
                    current_likes: 6,
                },
            )
            .await;

        assert!(matches!(
            second,
            Err(AppError::EngagementError(EngagementError::RelationWrite(_)))
        ));
        // 只有一条关系行，计数器仍与行数一致
        assert_eq!(store.row_count(RelationKind::Liked, 7), 1);
        assert_eq!(store.counter(RelationKind::Liked, 7), Some(6));
    }

    #[tokio::test]
    async fn test_remove_with_zero_counter_rejected() {
        let store = Arc::new(StubRelationStore::new());
        let svc = service(store.clone());

        let result = svc
            .remove_like(
                &AppContext::new(),
                ProfileId::from(100),
                RemoveLikeCmd {
                    place_id: PlaceId::from(7),
                    current_likes: 0,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
        // 没有任何写入发生
        assert_eq!(
            store
                .update_calls
                .load(std::sync::atomic::Ordering::SeqCst),
            0
        );
    }

    #[tokio::test]
    async fn test_negative_counter_rejected() {
        let store = Arc::new(StubRelationStore::new());
        let svc = service(store);

        let result = svc
            .add_like(
                &AppContext::new(),
                ProfileId::from(100),
                AddLikeCmd {
                    place_id: PlaceId::from(7),
                    current_likes: -1,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
