use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use trivia_core::QuizCategory;
use trivia_core::model::{Question, QuestionId};

use crate::error::ApiError;
use crate::extract::{JsonBody, LenientU64};
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct QuizCategoryBody {
    id: LenientU64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuizBody {
    previous_questions: Vec<LenientU64>,
    quiz_category: QuizCategoryBody,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuizResponse {
    success: bool,
    question: Option<Question>,
}

/// `POST /quizzes`
pub(crate) async fn next_quiz_question(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<QuizBody>,
) -> Result<Json<QuizResponse>, ApiError> {
    let previous: Vec<QuestionId> = body
        .previous_questions
        .iter()
        .map(|id| QuestionId::new(id.0))
        .collect();
    let scope = QuizCategory::from_id(body.quiz_category.id.0);

    let question = state.questions.next_quiz_question(&previous, scope).await?;
    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}
