use crate::repository::postgres::command::db_data::place;
use application::query::dao::PlaceDao;
use application::query::dto::place_card::PlaceCard;
use application::query::QueryError;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::*;

/// 列表查询统一带出分类名和作者用户名
const BASE_SELECT: &str = r#"
    SELECT pl.id, pl.name, pl.comment, pl.category_id, c.name AS category_name,
           pl.created_by, pr.username AS author_username, pl.online, pl.city,
           pl.contact, pl.link, pl.tags, pl.likes, pl.favorites, pl.created_at
      FROM places pl
      LEFT JOIN categories c ON c.id = pl.category_id
      LEFT JOIN profiles pr ON pr.id = pl.created_by
"#;

#[derive(Debug, FromQueryResult)]
struct PlaceRow {
    id: i64,
    name: String,
    comment: String,
    category_id: Option<i64>,
    category_name: Option<String>,
    created_by: i64,
    author_username: Option<String>,
    online: bool,
    city: Option<String>,
    contact: Option<String>,
    link: Option<String>,
    tags: Vec<String>,
    likes: i32,
    favorites: i32,
    created_at: NaiveDateTime,
}

impl From<PlaceRow> for PlaceCard {
    fn from(row: PlaceRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            comment: row.comment,
            category_id: row.category_id,
            category_name: row.category_name,
            created_by: row.created_by,
            author_username: row.author_username,
            online: row.online,
            city: row.city,
            contact: row.contact,
            link: row.link,
            tags: row.tags,
            likes: row.likes,
            favorites: row.favorites,
            created_at: row.created_at,
        }
    }
}

pub struct PlaceDaoImpl {
    db: DatabaseConnection,
}

impl PlaceDaoImpl {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch(
        &self,
        suffix: &str,
        values: Vec<Value>,
    ) -> Result<Vec<PlaceCard>, QueryError> {
        let sql = format!("{} {}", BASE_SELECT, suffix);
        let rows = PlaceRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            &sql,
            values,
        ))
        .all(&self.db)
        .await
        .map_err(|e| QueryError::DbError(e.to_string()))?;
        Ok(rows.into_iter().map(PlaceCard::from).collect())
    }
}

#[async_trait]
impl PlaceDao for PlaceDaoImpl {
    async fn get_by_id(&self, id: i64) -> Result<Option<PlaceCard>, QueryError> {
        let mut cards = self.fetch("WHERE pl.id = $1", vec![id.into()]).await?;
        Ok(cards.pop())
    }

    async fn search_by_name(&self, query: &str, limit: i32) -> Result<Vec<PlaceCard>, QueryError> {
        let pattern = format!("%{}%", query.to_lowercase());
        self.fetch(
            "WHERE LOWER(pl.name) LIKE $1 ORDER BY pl.created_at DESC LIMIT $2",
            vec![pattern.into(), (limit as i64).into()],
        )
        .await
    }

    async fn get_recent(&self, limit: i32) -> Result<Vec<PlaceCard>, QueryError> {
        self.fetch(
            "ORDER BY pl.created_at DESC LIMIT $1",
            vec![(limit as i64).into()],
        )
        .await
    }

    async fn get_by_category(&self, category_id: i64) -> Result<Vec<PlaceCard>, QueryError> {
        self.fetch(
            "WHERE pl.category_id = $1 ORDER BY pl.created_at DESC",
            vec![category_id.into()],
        )
        .await
    }

    async fn get_created_by(&self, owner_id: i64) -> Result<Vec<PlaceCard>, QueryError> {
        self.fetch(
            "WHERE pl.created_by = $1 ORDER BY pl.created_at DESC",
            vec![owner_id.into()],
        )
        .await
    }

    async fn count_all(&self) -> Result<i64, QueryError> {
        let count = place::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| QueryError::DbError(e.to_string()))?;
        Ok(count as i64)
    }

    async fn get_favorited_by(&self, owner_id: i64) -> Result<Vec<PlaceCard>, QueryError> {
        self.fetch(
            "JOIN favorite_place f ON f.place_id = pl.id WHERE f.owner_id = $1 ORDER BY f.favorited_at DESC",
            vec![owner_id.into()],
        )
        .await
    }
}
