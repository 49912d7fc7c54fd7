use application::query::dto::category_item::CategoryItem;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<String>,
    pub is_child: bool,
}

impl From<CategoryItem> for CategoryResponse {
    fn from(item: CategoryItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name,
            slug: item.slug,
            parent_id: item.parent_id.map(|id| id.to_string()),
            is_child: item.is_child,
        }
    }
}
