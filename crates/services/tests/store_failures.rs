use std::sync::Arc;

use async_trait::async_trait;
use services::{QuestionService, QuestionServiceError};
use storage::repository::{InMemoryRepository, QuestionRepository, StorageError};
use trivia_core::model::{CategoryId, NewQuestion, Question, QuestionId};
use trivia_core::{PageRequest, QuizCategory};

/// Reads succeed against the wrapped repository; every write fails.
struct ReadOnlyQuestions {
    inner: InMemoryRepository,
}

fn refused() -> StorageError {
    StorageError::Connection("database is locked".into())
}

#[async_trait]
impl QuestionRepository for ReadOnlyQuestions {
    async fn insert_new_question(&self, _: NewQuestion) -> Result<QuestionId, StorageError> {
        Err(refused())
    }

    async fn upsert_question(&self, _: &Question) -> Result<(), StorageError> {
        Err(refused())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        self.inner.get_question(id).await
    }

    async fn delete_question(&self, _: QuestionId) -> Result<(), StorageError> {
        Err(refused())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        self.inner.list_questions().await
    }

    async fn count_questions(&self) -> Result<u64, StorageError> {
        self.inner.count_questions().await
    }

    async fn questions_in_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Question>, StorageError> {
        self.inner.questions_in_category(category).await
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StorageError> {
        self.inner.search_questions(term).await
    }

    async fn questions_in_scope(
        &self,
        scope: QuizCategory,
        exclude: &[QuestionId],
    ) -> Result<Vec<Question>, StorageError> {
        self.inner.questions_in_scope(scope, exclude).await
    }

    async fn count_in_scope(&self, scope: QuizCategory) -> Result<u64, StorageError> {
        self.inner.count_in_scope(scope).await
    }
}

async fn read_only_service() -> (QuestionService, InMemoryRepository) {
    let repo = InMemoryRepository::new();
    repo.insert_new_question(NewQuestion::new("Q1", "A1", CategoryId::new(1), 1))
        .await
        .unwrap();
    let questions = ReadOnlyQuestions {
        inner: repo.clone(),
    };
    let service = QuestionService::new(Arc::new(questions), Arc::new(repo.clone()));
    (service, repo)
}

#[tokio::test]
async fn failed_insert_is_unprocessable() {
    let (service, repo) = read_only_service().await;
    let err = service
        .create(
            NewQuestion::new("Q2", "A2", CategoryId::new(1), 2),
            PageRequest::first(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, QuestionServiceError::Unprocessable(_)));
    assert_eq!(repo.count_questions().await.unwrap(), 1);
}

#[tokio::test]
async fn failed_delete_is_unprocessable() {
    let (service, repo) = read_only_service().await;
    let err = service
        .delete(QuestionId::new(1), PageRequest::first())
        .await
        .unwrap_err();
    assert!(matches!(err, QuestionServiceError::Unprocessable(_)));
    assert_eq!(repo.count_questions().await.unwrap(), 1);
}

#[tokio::test]
async fn missing_question_wins_over_store_failure() {
    let (service, _) = read_only_service().await;
    let err = service
        .delete(QuestionId::new(42), PageRequest::first())
        .await
        .unwrap_err();
    assert!(matches!(err, QuestionServiceError::NotFound));
}
