#![forbid(unsafe_code)]

pub mod model;
pub mod pagination;
pub mod quiz;

pub use pagination::{PageRequest, QUESTIONS_PER_PAGE, paginate};
pub use quiz::QuizCategory;
