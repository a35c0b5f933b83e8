use storage::repository::{CategoryRepository, QuestionRepository, StorageError};
use storage::sqlite::SqliteRepository;
use trivia_core::QuizCategory;
use trivia_core::model::{Category, CategoryId, NewQuestion, Question, QuestionId};

async fn open(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

fn new_question(text: &str, category: u64, difficulty: u32) -> NewQuestion {
    NewQuestion::new(text, "answer", CategoryId::new(category), difficulty)
}

#[tokio::test]
async fn sqlite_insert_get_delete_roundtrip() {
    let repo = open("memdb_roundtrip").await;

    let id = repo
        .insert_new_question(new_question("What is the heaviest organ?", 1, 4))
        .await
        .unwrap();
    let fetched = repo.get_question(id).await.unwrap().expect("stored");
    assert_eq!(fetched.question, "What is the heaviest organ?");
    assert_eq!(fetched.category, CategoryId::new(1));
    assert_eq!(fetched.difficulty, 4);
    assert_eq!(repo.count_questions().await.unwrap(), 1);

    repo.delete_question(id).await.unwrap();
    assert!(repo.get_question(id).await.unwrap().is_none());
    let err = repo.delete_question(id).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
    assert_eq!(repo.count_questions().await.unwrap(), 0);
}

#[tokio::test]
async fn sqlite_migrate_is_idempotent() {
    let repo = open("memdb_migrate_twice").await;
    repo.migrate().await.expect("second migrate");
    repo.upsert_category(&Category::new(CategoryId::new(1), "Science"))
        .await
        .unwrap();
    assert_eq!(repo.list_categories().await.unwrap().len(), 1);
}

#[tokio::test]
async fn sqlite_lists_in_id_order_and_filters_category() {
    let repo = open("memdb_listing").await;
    for (text, category) in [("Q1", 2), ("Q2", 1), ("Q3", 2)] {
        repo.insert_new_question(new_question(text, category, 1))
            .await
            .unwrap();
    }

    let all = repo.list_questions().await.unwrap();
    let ids: Vec<u64> = all.iter().map(|q| q.id.value()).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let in_two = repo
        .questions_in_category(CategoryId::new(2))
        .await
        .unwrap();
    assert_eq!(
        in_two.iter().map(|q| q.question.as_str()).collect::<Vec<_>>(),
        vec!["Q1", "Q3"]
    );
}

#[tokio::test]
async fn sqlite_search_ignores_case_and_wildcards() {
    let repo = open("memdb_search").await;
    repo.insert_new_question(new_question(
        "What was the Title of the 1990 fantasy directed by Tim Burton?",
        5,
        3,
    ))
    .await
    .unwrap();
    repo.insert_new_question(new_question("Score 100% on the quiz?", 1, 1))
        .await
        .unwrap();
    repo.insert_new_question(new_question("Score 1000 points?", 1, 1))
        .await
        .unwrap();

    let found = repo.search_questions("title").await.unwrap();
    assert_eq!(found.len(), 1);
    assert!(found[0].question.contains("Title"));

    let literal = repo.search_questions("100%").await.unwrap();
    assert_eq!(literal.len(), 1);
    assert_eq!(literal[0].question, "Score 100% on the quiz?");

    assert!(repo.search_questions("zzz").await.unwrap().is_empty());
}

#[tokio::test]
async fn sqlite_quiz_scope_excludes_previous() {
    let repo = open("memdb_quiz_scope").await;
    let a = repo
        .insert_new_question(new_question("A", 5, 1))
        .await
        .unwrap();
    let b = repo
        .insert_new_question(new_question("B", 5, 1))
        .await
        .unwrap();
    let c = repo
        .insert_new_question(new_question("C", 6, 1))
        .await
        .unwrap();

    let scope = QuizCategory::from_id(5);
    assert_eq!(repo.count_in_scope(scope).await.unwrap(), 2);
    assert_eq!(repo.count_in_scope(QuizCategory::Any).await.unwrap(), 3);

    let left = repo.questions_in_scope(scope, &[a]).await.unwrap();
    assert_eq!(left.iter().map(|q| q.id).collect::<Vec<_>>(), vec![b]);

    let left = repo
        .questions_in_scope(QuizCategory::Any, &[a, c])
        .await
        .unwrap();
    assert_eq!(left.iter().map(|q| q.id).collect::<Vec<_>>(), vec![b]);

    let none = repo.questions_in_scope(scope, &[a, b]).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn sqlite_accepts_questions_for_unknown_categories() {
    let repo = open("memdb_orphan_category").await;
    repo.upsert_category(&Category::new(CategoryId::new(1), "Science"))
        .await
        .unwrap();
    let orphan = Question {
        id: QuestionId::new(6),
        question: "Orphaned?".into(),
        answer: "Yes".into(),
        category: CategoryId::new(5),
        difficulty: 2,
    };
    repo.upsert_question(&orphan).await.unwrap();

    assert!(repo.get_category(CategoryId::new(5)).await.unwrap().is_none());
    let fetched = repo.get_question(QuestionId::new(6)).await.unwrap();
    assert_eq!(fetched, Some(orphan));

    let next = repo
        .insert_new_question(new_question("After", 1, 1))
        .await
        .unwrap();
    assert_eq!(next, QuestionId::new(7));
}

#[tokio::test]
async fn sqlite_category_upsert_renames() {
    let repo = open("memdb_category_upsert").await;
    let id = CategoryId::new(3);
    repo.upsert_category(&Category::new(id, "Geo"))
        .await
        .unwrap();
    repo.upsert_category(&Category::new(id, "Geography"))
        .await
        .unwrap();
    let fetched = repo.get_category(id).await.unwrap().expect("stored");
    assert_eq!(fetched.kind, "Geography");
    assert!(repo.get_category(CategoryId::new(99)).await.unwrap().is_none());
}
