//! Sample catalog for fresh databases.

use trivia_core::model::{Category, CategoryId, NewQuestion};

use crate::repository::{Storage, StorageError};

const CATEGORIES: [(u64, &str); 6] = [
    (1, "Science"),
    (2, "Art"),
    (3, "Geography"),
    (4, "History"),
    (5, "Entertainment"),
    (6, "Sports"),
];

// (question, answer, category, difficulty)
const QUESTIONS: [(&str, &str, u64, u32); 19] = [
    ("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2),
    ("What boxer's original name is Cassius Clay?", "Muhammad Ali", 4, 1),
    (
        "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?",
        "Apollo 13",
        5,
        4,
    ),
    (
        "What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?",
        "Tom Cruise",
        5,
        4,
    ),
    (
        "What was the title of the 1990 fantasy directed by Tim Burton about a young man with multi-bladed appendages?",
        "Edward Scissorhands",
        5,
        3,
    ),
    ("Which is the only team to play in every soccer World Cup tournament?", "Brazil", 6, 3),
    ("Which country won the first ever soccer World Cup in 1930?", "Uruguay", 6, 4),
    ("Who invented Peanut Butter?", "George Washington Carver", 4, 2),
    ("What is the largest lake in Africa?", "Lake Victoria", 3, 2),
    ("In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, 3),
    ("The Taj Mahal is located in which Indian city?", "Agra", 3, 2),
    (
        "Which Dutch graphic artist, initials M C, was a creator of optical illusions?",
        "Escher",
        2,
        1,
    ),
    ("La Giaconda is better known as what?", "Mona Lisa", 2, 3),
    ("How many paintings did Van Gogh sell in his lifetime?", "One", 2, 4),
    (
        "Which American artist was a pioneer of Abstract Expressionism, and a leading exponent of action painting?",
        "Jackson Pollock",
        2,
        2,
    ),
    ("What is the heaviest organ in the human body?", "The Liver", 1, 4),
    ("Who discovered penicillin?", "Alexander Fleming", 1, 3),
    ("Hematology is a branch of medicine involving the study of what?", "Blood", 1, 4),
    ("Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", 4, 4),
];

/// What a seeding run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub questions: usize,
}

impl SeedReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories == 0 && self.questions == 0
    }
}

/// Insert the sample categories and questions into an uninitialized store.
///
/// Does nothing when any category already exists.
///
/// # Errors
///
/// Returns `StorageError` if a read or insert fails.
pub async fn seed_sample_data(storage: &Storage) -> Result<SeedReport, StorageError> {
    if !storage.categories.list_categories().await?.is_empty() {
        tracing::debug!("categories present, skipping seed");
        return Ok(SeedReport::default());
    }

    let mut report = SeedReport::default();
    for (id, kind) in CATEGORIES {
        storage
            .categories
            .upsert_category(&Category::new(CategoryId::new(id), kind))
            .await?;
        report.categories += 1;
    }

    for (question, answer, category, difficulty) in QUESTIONS {
        storage
            .questions
            .insert_new_question(NewQuestion::new(
                question,
                answer,
                CategoryId::new(category),
                difficulty,
            ))
            .await?;
        report.questions += 1;
    }

    tracing::info!(
        categories = report.categories,
        questions = report.questions,
        "seeded sample data"
    );
    Ok(report)
}
