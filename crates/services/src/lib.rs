#![forbid(unsafe_code)]

pub mod error;
pub mod question_service;

pub use error::QuestionServiceError;
pub use question_service::{
    CategoryQuestions, QuestionCreated, QuestionDeleted, QuestionListing, QuestionService,
    SearchResults,
};
