use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::ids::CategoryId;

/// Category id to type label, serialized as a JSON object keyed by id.
pub type CategoryMap = BTreeMap<CategoryId, String>;

/// A question category such as "Science" or "Sports".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Category {
    pub fn new(id: CategoryId, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }
}

/// Collapse a category listing into the id → type mapping.
#[must_use]
pub fn category_map(categories: impl IntoIterator<Item = Category>) -> CategoryMap {
    categories
        .into_iter()
        .map(|category| (category.id, category.kind))
        .collect()
}
