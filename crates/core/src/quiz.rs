use crate::model::CategoryId;

/// Which questions a quiz draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCategory {
    /// Every question in the store.
    Any,
    /// Only questions filed under this category.
    Only(CategoryId),
}

impl QuizCategory {
    /// Interpret a client-supplied category id, where `0` means "any category".
    #[must_use]
    pub fn from_id(id: u64) -> Self {
        if id == 0 {
            Self::Any
        } else {
            Self::Only(CategoryId::new(id))
        }
    }

    #[must_use]
    pub fn category(&self) -> Option<CategoryId> {
        match self {
            Self::Any => None,
            Self::Only(id) => Some(*id),
        }
    }
}
