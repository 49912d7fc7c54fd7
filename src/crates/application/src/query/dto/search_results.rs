use crate::query::dto::category_item::CategoryItem;
use crate::query::dto::place_card::PlaceCard;
use crate::query::dto::profile_card::ProfileCard;

/// 一次搜索命中的三类实体
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub users: Vec<ProfileCard>,
    pub categories: Vec<CategoryItem>,
    pub places: Vec<PlaceCard>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.categories.is_empty() && self.places.is_empty()
    }
}
