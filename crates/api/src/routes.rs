use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{delete, get, post};

use services::QuestionService;

use crate::cors::cors;
use crate::handlers;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<QuestionService>,
}

impl AppState {
    #[must_use]
    pub fn new(questions: Arc<QuestionService>) -> Self {
        Self { questions }
    }
}

/// Build the trivia API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(handlers::list_categories))
        .route(
            "/categories/{category_id}/questions",
            get(handlers::list_by_category),
        )
        .route(
            "/questions",
            get(handlers::list_questions).post(handlers::create_or_search),
        )
        .route(
            "/questions/{segment}",
            delete(handlers::delete_question).post(handlers::search_by_path),
        )
        .route("/quizzes", post(handlers::next_quiz_question))
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(cors))
        .with_state(state)
}
