use sqlx::Row;
use trivia_core::QuizCategory;
use trivia_core::model::{CategoryId, NewQuestion, Question, QuestionId};

use super::SqliteRepository;
use super::mapping::{
    conn, count_from_i64, like_pattern, map_question_row, map_question_rows, question_id_from_i64,
    ser, u64_to_i64,
};
use crate::repository::{QuestionRepository, StorageError};

const SELECT_QUESTIONS: &str = "SELECT id, question, answer, category, difficulty FROM questions";

/// Build the quiz-scope query: optional category filter plus `NOT IN` exclusions.
///
/// Placeholders are numbered; the category (when present) binds as `?1`.
fn scope_sql(base: &str, scope: QuizCategory, exclude_len: usize) -> String {
    let mut sql = String::from(base);
    let mut clauses = Vec::new();
    let mut next = 1;

    if scope.category().is_some() {
        clauses.push(String::from("category = ?1"));
        next = 2;
    }

    if exclude_len > 0 {
        let mut list = String::from("id NOT IN (");
        for i in 0..exclude_len {
            if i > 0 {
                list.push_str(", ");
            }
            list.push('?');
            list.push_str(&(next + i).to_string());
        }
        list.push(')');
        clauses.push(list);
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql
}

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn insert_new_question(&self, question: NewQuestion) -> Result<QuestionId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(question.question)
        .bind(question.answer)
        .bind(u64_to_i64("category", question.category.value())?)
        .bind(i64::from(question.difficulty))
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        question_id_from_i64(res.last_insert_rowid())
    }

    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO questions (id, question, answer, category, difficulty)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                question = excluded.question,
                answer = excluded.answer,
                category = excluded.category,
                difficulty = excluded.difficulty
            ",
        )
        .bind(u64_to_i64("question_id", question.id.value())?)
        .bind(question.question.as_str())
        .bind(question.answer.as_str())
        .bind(u64_to_i64("category", question.category.value())?)
        .bind(i64::from(question.difficulty))
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let row = sqlx::query(&format!("{SELECT_QUESTIONS} WHERE id = ?1"))
            .bind(u64_to_i64("question_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.as_ref().map(map_question_row).transpose()
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM questions WHERE id = ?1")
            .bind(u64_to_i64("question_id", id.value())?)
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(&format!("{SELECT_QUESTIONS} ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        map_question_rows(&rows)
    }

    async fn count_questions(&self) -> Result<u64, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM questions")
            .fetch_one(&self.pool)
            .await
            .map_err(conn)?;

        count_from_i64(row.try_get("total").map_err(ser)?)
    }

    async fn questions_in_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(&format!(
            "{SELECT_QUESTIONS} WHERE category = ?1 ORDER BY id ASC"
        ))
        .bind(u64_to_i64("category", category.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        map_question_rows(&rows)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StorageError> {
        // SQLite LIKE folds ASCII case only.
        let rows = sqlx::query(&format!(
            r"{SELECT_QUESTIONS} WHERE question LIKE ?1 ESCAPE '\' ORDER BY id ASC"
        ))
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        map_question_rows(&rows)
    }

    async fn questions_in_scope(
        &self,
        scope: QuizCategory,
        exclude: &[QuestionId],
    ) -> Result<Vec<Question>, StorageError> {
        let mut sql = scope_sql(SELECT_QUESTIONS, scope, exclude.len());
        sql.push_str(" ORDER BY id ASC");

        let mut q = sqlx::query(&sql);
        if let Some(category) = scope.category() {
            q = q.bind(u64_to_i64("category", category.value())?);
        }
        for id in exclude {
            q = q.bind(u64_to_i64("question_id", id.value())?);
        }

        let rows = q.fetch_all(&self.pool).await.map_err(conn)?;
        map_question_rows(&rows)
    }

    async fn count_in_scope(&self, scope: QuizCategory) -> Result<u64, StorageError> {
        let sql = scope_sql("SELECT COUNT(*) AS total FROM questions", scope, 0);

        let mut q = sqlx::query(&sql);
        if let Some(category) = scope.category() {
            q = q.bind(u64_to_i64("category", category.value())?);
        }

        let row = q.fetch_one(&self.pool).await.map_err(conn)?;
        count_from_i64(row.try_get("total").map_err(ser)?)
    }
}
