mod category;
mod ids;
mod question;

pub use category::{Category, CategoryMap, category_map};
pub use ids::{CategoryId, ParseIdError, QuestionId};
pub use question::{NewQuestion, Question};
