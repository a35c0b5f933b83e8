use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use trivia_core::QuizCategory;
use trivia_core::model::{Category, CategoryId, NewQuestion, Question, QuestionId};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for trivia questions.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Insert a new question and return the store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the row cannot be stored.
    async fn insert_new_question(&self, question: NewQuestion) -> Result<QuestionId, StorageError>;

    /// Persist a question under its existing id, replacing any row with that id.
    ///
    /// Request handling never calls this; it is for imports and test fixtures
    /// that carry fixed ids. Later inserts continue after the highest id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the row cannot be stored.
    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError>;

    /// Fetch a question by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures; a missing row is `Ok(None)`.
    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError>;

    /// Delete a question by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no row was deleted.
    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError>;

    /// All questions ordered by id ascending.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError>;

    /// Number of questions in the store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn count_questions(&self) -> Result<u64, StorageError>;

    /// Questions filed under `category`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn questions_in_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Question>, StorageError>;

    /// Questions whose text contains `term`, ignoring case, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StorageError>;

    /// Questions in the quiz scope whose id is not in `exclude`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn questions_in_scope(
        &self,
        scope: QuizCategory,
        exclude: &[QuestionId],
    ) -> Result<Vec<Question>, StorageError>;

    /// Number of questions in the quiz scope.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn count_in_scope(&self, scope: QuizCategory) -> Result<u64, StorageError>;
}

/// Repository contract for question categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError>;

    /// Fetch a category by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures; a missing row is `Ok(None)`.
    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StorageError>;

    /// Persist or rename a category.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the category cannot be stored.
    async fn upsert_category(&self, category: &Category) -> Result<(), StorageError>;
}

#[derive(Default)]
struct QuestionTable {
    rows: BTreeMap<QuestionId, Question>,
    last_id: u64,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<QuestionTable>>,
    categories: Arc<Mutex<BTreeMap<CategoryId, Category>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_questions<T>(
        &self,
        f: impl FnOnce(&mut QuestionTable) -> T,
    ) -> Result<T, StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(f(&mut guard))
    }

    fn with_categories<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<CategoryId, Category>) -> T,
    ) -> Result<T, StorageError> {
        let mut guard = self
            .categories
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(f(&mut guard))
    }
}

fn in_scope(question: &Question, scope: QuizCategory) -> bool {
    scope
        .category()
        .is_none_or(|category| question.category == category)
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn insert_new_question(&self, question: NewQuestion) -> Result<QuestionId, StorageError> {
        self.with_questions(|table| {
            table.last_id += 1;
            let id = QuestionId::new(table.last_id);
            table.rows.insert(id, question.assign_id(id));
            id
        })
    }

    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError> {
        self.with_questions(|table| {
            table.last_id = table.last_id.max(question.id.value());
            table.rows.insert(question.id, question.clone());
        })
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        self.with_questions(|table| table.rows.get(&id).cloned())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        self.with_questions(|table| table.rows.remove(&id))?
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        self.with_questions(|table| table.rows.values().cloned().collect())
    }

    async fn count_questions(&self) -> Result<u64, StorageError> {
        self.with_questions(|table| table.rows.len() as u64)
    }

    async fn questions_in_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Question>, StorageError> {
        self.with_questions(|table| {
            table
                .rows
                .values()
                .filter(|q| q.category == category)
                .cloned()
                .collect()
        })
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StorageError> {
        self.with_questions(|table| {
            table
                .rows
                .values()
                .filter(|q| q.matches_term(term))
                .cloned()
                .collect()
        })
    }

    async fn questions_in_scope(
        &self,
        scope: QuizCategory,
        exclude: &[QuestionId],
    ) -> Result<Vec<Question>, StorageError> {
        self.with_questions(|table| {
            table
                .rows
                .values()
                .filter(|q| in_scope(q, scope) && !exclude.contains(&q.id))
                .cloned()
                .collect()
        })
    }

    async fn count_in_scope(&self, scope: QuizCategory) -> Result<u64, StorageError> {
        self.with_questions(|table| {
            table.rows.values().filter(|q| in_scope(q, scope)).count() as u64
        })
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        self.with_categories(|categories| categories.values().cloned().collect())
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StorageError> {
        self.with_categories(|categories| categories.get(&id).cloned())
    }

    async fn upsert_category(&self, category: &Category) -> Result<(), StorageError> {
        self.with_categories(|categories| {
            categories.insert(category.id, category.clone());
        })
    }
}

/// Aggregates question and category repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
    pub categories: Arc<dyn CategoryRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo.clone());
        let categories: Arc<dyn CategoryRepository> = Arc::new(repo);
        Self {
            questions,
            categories,
        }
    }
}
