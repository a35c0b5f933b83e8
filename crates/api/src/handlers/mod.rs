mod categories;
mod questions;
mod quizzes;

pub(crate) use categories::{list_by_category, list_categories};
pub(crate) use questions::{create_or_search, delete_question, list_questions, search_by_path};
pub(crate) use quizzes::next_quiz_question;

use crate::error::ApiError;

pub(crate) async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub(crate) async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
