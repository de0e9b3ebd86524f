use serde::{Deserialize, Serialize};

/// Maximum number of product ids remembered per session.
pub const RECENTLY_VIEWED_LIMIT: usize = 5;

/// Most-recent-first list of product ids the visitor opened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentlyViewed {
    ids: Vec<i32>,
}

impl RecentlyViewed {
    /// Move `product_id` to the front, dropping duplicates and the oldest overflow.
    pub fn push(&mut self, product_id: i32) {
        self.ids.retain(|id| *id != product_id);
        self.ids.insert(0, product_id);
        self.ids.truncate(RECENTLY_VIEWED_LIMIT);
    }

    pub fn ids(&self) -> &[i32] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
