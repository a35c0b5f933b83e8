use std::sync::Arc;

use rand::{Rng, rng};

use storage::repository::{CategoryRepository, QuestionRepository, StorageError};
use trivia_core::model::{CategoryId, CategoryMap, NewQuestion, Question, QuestionId, category_map};
use trivia_core::{PageRequest, QuizCategory, paginate};

use crate::error::QuestionServiceError;

/// One page of the full question listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionListing {
    pub questions: Vec<Question>,
    /// Count of every question in the store.
    pub total_questions: u64,
    pub categories: CategoryMap,
}

/// Outcome of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDeleted {
    pub deleted: QuestionId,
    pub questions: Vec<Question>,
    /// Count after the delete.
    pub total_questions: u64,
}

/// Outcome of a successful create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCreated {
    pub created: QuestionId,
    pub questions: Vec<Question>,
    /// Count after the insert.
    pub total_questions: u64,
}

/// One page of search matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    /// Count of every match, not just this page.
    pub total_questions: u64,
}

/// One page of a category's questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryQuestions {
    pub questions: Vec<Question>,
    /// Count of every question in the store, not only this category.
    pub total_questions: u64,
    /// Type label of the requested category.
    pub current_category: String,
}

fn unprocessable(err: StorageError) -> QuestionServiceError {
    tracing::warn!(error = %err, "store write failed");
    QuestionServiceError::Unprocessable(err)
}

/// Listing, search, create/delete and quiz draws over the question store.
#[derive(Clone)]
pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl QuestionService {
    #[must_use]
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            questions,
            categories,
        }
    }

    /// Page through all questions ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::NotFound` if the page is empty.
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn list_all(
        &self,
        page: PageRequest,
    ) -> Result<QuestionListing, QuestionServiceError> {
        let all = self.questions.list_questions().await?;
        let total_questions = all.len() as u64;
        let questions = paginate(all, page);
        if questions.is_empty() {
            tracing::debug!(page = page.number(), total_questions, "empty question page");
            return Err(QuestionServiceError::NotFound);
        }

        let categories = category_map(self.categories.list_categories().await?);
        Ok(QuestionListing {
            questions,
            total_questions,
            categories,
        })
    }

    /// All categories as an id → type mapping.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::NotFound` when there are no categories.
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn list_categories(&self) -> Result<CategoryMap, QuestionServiceError> {
        let categories = category_map(self.categories.list_categories().await?);
        if categories.is_empty() {
            return Err(QuestionServiceError::NotFound);
        }
        Ok(categories)
    }

    /// Delete a question, then return the requested page of what remains.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::NotFound` if the question does not exist.
    /// Returns `QuestionServiceError::Unprocessable` for any store failure.
    pub async fn delete(
        &self,
        question_id: QuestionId,
        page: PageRequest,
    ) -> Result<QuestionDeleted, QuestionServiceError> {
        let existing = self
            .questions
            .get_question(question_id)
            .await
            .map_err(unprocessable)?;
        if existing.is_none() {
            return Err(QuestionServiceError::NotFound);
        }

        match self.questions.delete_question(question_id).await {
            Ok(()) => {}
            Err(StorageError::NotFound) => return Err(QuestionServiceError::NotFound),
            Err(err) => return Err(unprocessable(err)),
        }
        tracing::debug!(%question_id, "deleted question");

        let remaining = self.questions.list_questions().await.map_err(unprocessable)?;
        let total_questions = remaining.len() as u64;
        Ok(QuestionDeleted {
            deleted: question_id,
            questions: paginate(remaining, page),
            total_questions,
        })
    }

    /// Insert a question, then return the requested page of all questions.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Unprocessable` for any store failure.
    pub async fn create(
        &self,
        question: NewQuestion,
        page: PageRequest,
    ) -> Result<QuestionCreated, QuestionServiceError> {
        let created = self
            .questions
            .insert_new_question(question)
            .await
            .map_err(unprocessable)?;
        tracing::debug!(question_id = %created, "created question");

        let all = self.questions.list_questions().await.map_err(unprocessable)?;
        let total_questions = all.len() as u64;
        Ok(QuestionCreated {
            created,
            questions: paginate(all, page),
            total_questions,
        })
    }

    /// Case-insensitive substring search over question text.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::NotFound` if the page of matches is empty.
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn search(
        &self,
        term: &str,
        page: PageRequest,
    ) -> Result<SearchResults, QuestionServiceError> {
        let matches = self.questions.search_questions(term).await?;
        let total_questions = matches.len() as u64;
        let questions = paginate(matches, page);
        if questions.is_empty() {
            tracing::debug!(term, total_questions, "search found nothing on page");
            return Err(QuestionServiceError::NotFound);
        }
        Ok(SearchResults {
            questions,
            total_questions,
        })
    }

    /// Page through the questions of one category.
    ///
    /// `total_questions` counts the whole store, not the category.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::BadRequest` if the category does not exist.
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn list_by_category(
        &self,
        category_id: CategoryId,
        page: PageRequest,
    ) -> Result<CategoryQuestions, QuestionServiceError> {
        let Some(category) = self.categories.get_category(category_id).await? else {
            tracing::debug!(%category_id, "unknown category");
            return Err(QuestionServiceError::BadRequest);
        };

        let in_category = self.questions.questions_in_category(category.id).await?;
        let total_questions = self.questions.count_questions().await?;
        Ok(CategoryQuestions {
            questions: paginate(in_category, page),
            total_questions,
            current_category: category.kind,
        })
    }

    /// Draw a random question the player has not seen yet.
    ///
    /// Returns `Ok(None)` once `previous` is as long as the whole scope.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::QuizHistoryMismatch` if no unseen question
    /// is left although `previous` does not use up the scope.
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn next_quiz_question(
        &self,
        previous: &[QuestionId],
        scope: QuizCategory,
    ) -> Result<Option<Question>, QuestionServiceError> {
        let pool_size = self.questions.count_in_scope(scope).await?;
        if previous.len() as u64 == pool_size {
            tracing::debug!(?scope, pool_size, "quiz exhausted");
            return Ok(None);
        }

        let mut candidates = self.questions.questions_in_scope(scope, previous).await?;
        if candidates.is_empty() {
            tracing::debug!(
                ?scope,
                pool_size,
                previous = previous.len(),
                "quiz history outside scope"
            );
            return Err(QuestionServiceError::QuizHistoryMismatch);
        }

        let index = rng().random_range(0..candidates.len());
        Ok(Some(candidates.swap_remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use storage::repository::InMemoryRepository;
    use trivia_core::model::Category;

    async fn service_with(
        categories: &[(u64, &str)],
        questions: &[(u64, &str, u64)],
    ) -> (QuestionService, InMemoryRepository) {
        let repo = InMemoryRepository::new();
        for (id, kind) in categories {
            repo.upsert_category(&Category::new(CategoryId::new(*id), *kind))
                .await
                .unwrap();
        }
        for (id, text, category) in questions {
            let question = NewQuestion::new(*text, "answer", CategoryId::new(*category), 1)
                .assign_id(QuestionId::new(*id));
            repo.upsert_question(&question).await.unwrap();
        }
        let service = QuestionService::new(Arc::new(repo.clone()), Arc::new(repo.clone()));
        (service, repo)
    }

    async fn numbered(count: u64) -> (QuestionService, InMemoryRepository) {
        let repo = InMemoryRepository::new();
        repo.upsert_category(&Category::new(CategoryId::new(1), "Science"))
            .await
            .unwrap();
        for n in 1..=count {
            repo.insert_new_question(NewQuestion::new(
                format!("Question {n}"),
                "answer",
                CategoryId::new(1 + n % 2),
                1,
            ))
            .await
            .unwrap();
        }
        let service = QuestionService::new(Arc::new(repo.clone()), Arc::new(repo.clone()));
        (service, repo)
    }

    #[tokio::test]
    async fn list_all_on_empty_store_is_not_found() {
        let (service, _) = service_with(&[(1, "Science")], &[]).await;
        let err = service.list_all(PageRequest::first()).await.unwrap_err();
        assert!(matches!(err, QuestionServiceError::NotFound));
    }

    #[tokio::test]
    async fn list_all_pages_and_counts_everything() {
        let (service, _) = numbered(23).await;
        let listing = service.list_all(PageRequest::new(3)).await.unwrap();
        assert_eq!(listing.questions.len(), 3);
        assert_eq!(listing.questions[0].id, QuestionId::new(21));
        assert_eq!(listing.total_questions, 23);
        assert_eq!(
            listing.categories.get(&CategoryId::new(1)).map(String::as_str),
            Some("Science")
        );

        let err = service.list_all(PageRequest::new(4)).await.unwrap_err();
        assert!(matches!(err, QuestionServiceError::NotFound));
    }

    #[tokio::test]
    async fn list_categories_requires_at_least_one() {
        let (empty, _) = service_with(&[], &[]).await;
        assert!(matches!(
            empty.list_categories().await.unwrap_err(),
            QuestionServiceError::NotFound
        ));

        let (service, _) = service_with(&[(1, "Science"), (2, "Sports")], &[]).await;
        let map = service.list_categories().await.unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&CategoryId::new(2)], "Sports");
    }

    #[tokio::test]
    async fn delete_missing_question_leaves_store_untouched() {
        let (service, repo) = numbered(3).await;
        let err = service
            .delete(QuestionId::new(100), PageRequest::first())
            .await
            .unwrap_err();
        assert!(matches!(err, QuestionServiceError::NotFound));
        assert_eq!(repo.count_questions().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn delete_returns_remaining_page() {
        let (service, _) = numbered(12).await;
        let outcome = service
            .delete(QuestionId::new(1), PageRequest::first())
            .await
            .unwrap();
        assert_eq!(outcome.deleted, QuestionId::new(1));
        assert_eq!(outcome.total_questions, 11);
        assert_eq!(outcome.questions.len(), 10);
        assert_eq!(outcome.questions[0].id, QuestionId::new(2));
    }

    #[tokio::test]
    async fn create_adds_exactly_one() {
        let (service, repo) = numbered(4).await;
        let before = repo.count_questions().await.unwrap();
        let outcome = service
            .create(
                NewQuestion::new("Who discovered penicillin?", "Fleming", CategoryId::new(1), 3),
                PageRequest::first(),
            )
            .await
            .unwrap();
        assert_eq!(outcome.total_questions, before + 1);
        let stored = repo.get_question(outcome.created).await.unwrap().unwrap();
        assert_eq!(stored.question, "Who discovered penicillin?");
        assert!(outcome.questions.iter().any(|q| q.id == outcome.created));
    }

    #[tokio::test]
    async fn search_matches_case_insensitively() {
        let (service, _) = service_with(
            &[(5, "Entertainment")],
            &[
                (1, "What was the Title of the 1990 fantasy?", 5),
                (2, "Who painted the Mona Lisa?", 5),
            ],
        )
        .await;
        let results = service.search("title", PageRequest::first()).await.unwrap();
        assert_eq!(results.total_questions, 1);
        assert_eq!(results.questions[0].id, QuestionId::new(1));

        let err = service
            .search("nothing like this", PageRequest::first())
            .await
            .unwrap_err();
        assert!(matches!(err, QuestionServiceError::NotFound));
    }

    #[tokio::test]
    async fn unknown_category_is_bad_request() {
        let (service, _) = service_with(&[(1, "Science")], &[(1, "Q", 1)]).await;
        let err = service
            .list_by_category(CategoryId::new(508), PageRequest::first())
            .await
            .unwrap_err();
        assert!(matches!(err, QuestionServiceError::BadRequest));
    }

    // total_questions is store-wide here, not scoped to the category.
    #[tokio::test]
    async fn category_listing_reports_store_wide_total() {
        let (service, _) = service_with(
            &[(1, "Science"), (6, "Sports")],
            &[(1, "Q1", 1), (2, "Q2", 6), (3, "Q3", 6), (4, "Q4", 1)],
        )
        .await;
        let listing = service
            .list_by_category(CategoryId::new(6), PageRequest::first())
            .await
            .unwrap();
        assert_eq!(listing.current_category, "Sports");
        assert_eq!(
            listing.questions.iter().map(|q| q.id.value()).collect::<Vec<_>>(),
            vec![2, 3]
        );
        assert_eq!(listing.total_questions, 4);
    }

    #[tokio::test]
    async fn empty_category_page_is_not_an_error() {
        let (service, _) = service_with(&[(2, "Art")], &[(1, "Q1", 1)]).await;
        let listing = service
            .list_by_category(CategoryId::new(2), PageRequest::first())
            .await
            .unwrap();
        assert!(listing.questions.is_empty());
        assert_eq!(listing.current_category, "Art");
    }

    #[tokio::test]
    async fn quiz_is_exhausted_when_previous_covers_category() {
        let (service, _) = service_with(
            &[(1, "Science"), (2, "Sports")],
            &[(6, "Orphan question", 5)],
        )
        .await;
        let next = service
            .next_quiz_question(&[QuestionId::new(6)], QuizCategory::from_id(5))
            .await
            .unwrap();
        assert!(next.is_none());
    }

    #[tokio::test]
    async fn quiz_never_repeats_previous_questions() {
        let (service, _) = numbered(8).await;
        let previous: Vec<QuestionId> = [1, 2, 3, 5].map(QuestionId::new).to_vec();
        for _ in 0..50 {
            let next = service
                .next_quiz_question(&previous, QuizCategory::Any)
                .await
                .unwrap()
                .expect("unseen questions remain");
            assert!(!previous.contains(&next.id));
        }
    }

    #[tokio::test]
    async fn quiz_scoped_draw_stays_in_category() {
        let (service, _) = numbered(10).await;
        for _ in 0..20 {
            let next = service
                .next_quiz_question(&[], QuizCategory::from_id(2))
                .await
                .unwrap()
                .unwrap();
            assert_eq!(next.category, CategoryId::new(2));
        }
    }

    #[tokio::test]
    async fn quiz_with_foreign_previous_ids_is_rejected() {
        let (service, _) = service_with(&[(1, "Science")], &[(1, "Q1", 1), (2, "Q2", 2)]).await;
        let err = service
            .next_quiz_question(
                &[QuestionId::new(1), QuestionId::new(2)],
                QuizCategory::from_id(1),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, QuestionServiceError::QuizHistoryMismatch));
    }

    #[tokio::test]
    async fn quiz_with_duplicate_previous_ids_is_rejected() {
        let (service, _) = service_with(&[(1, "Science")], &[(1, "Q1", 1), (2, "Q2", 1)]).await;
        let next = service
            .next_quiz_question(&[QuestionId::new(1)], QuizCategory::from_id(1))
            .await
            .unwrap()
            .expect("question 2 is unseen");
        assert_eq!(next.id, QuestionId::new(2));

        let err = service
            .next_quiz_question(
                &[QuestionId::new(2), QuestionId::new(2), QuestionId::new(1)],
                QuizCategory::from_id(1),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, QuestionServiceError::QuizHistoryMismatch));
    }
}
