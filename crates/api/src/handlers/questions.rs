use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use trivia_core::PageRequest;
use trivia_core::model::{CategoryId, CategoryMap, NewQuestion, Question, QuestionId};

use crate::error::ApiError;
use crate::extract::{JsonBody, LenientU64, Page};
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub(crate) struct QuestionListResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: u64,
    categories: CategoryMap,
    current_category: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteResponse {
    success: bool,
    deleted: QuestionId,
    questions: Vec<Question>,
    total_questions: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateResponse {
    success: bool,
    created: QuestionId,
    questions: Vec<Question>,
    total_questions: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: u64,
    current_category: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum QuestionsPostResponse {
    Created(CreateResponse),
    Found(SearchResponse),
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateQuestionBody {
    question: String,
    answer: String,
    category: LenientU64,
    difficulty: LenientU64,
}

impl CreateQuestionBody {
    fn into_new_question(self) -> Result<NewQuestion, ApiError> {
        let difficulty = u32::try_from(self.difficulty.0).map_err(|_| ApiError::Unprocessable)?;
        Ok(NewQuestion::new(
            self.question,
            self.answer,
            CategoryId::new(self.category.0),
            difficulty,
        ))
    }
}

/// `POST /questions` carries either a search term or a new question.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum QuestionsPostBody {
    Search {
        #[serde(rename = "searchTerm")]
        search_term: String,
    },
    Create(CreateQuestionBody),
}

/// `GET /questions?page=N`
pub(crate) async fn list_questions(
    State(state): State<AppState>,
    Page(page): Page,
) -> Result<Json<QuestionListResponse>, ApiError> {
    let listing = state.questions.list_all(page).await?;
    Ok(Json(QuestionListResponse {
        success: true,
        questions: listing.questions,
        total_questions: listing.total_questions,
        categories: listing.categories,
        current_category: None,
    }))
}

/// `DELETE /questions/{question_id}`
pub(crate) async fn delete_question(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Page(page): Page,
) -> Result<Json<DeleteResponse>, ApiError> {
    let question_id: QuestionId = raw_id.parse().map_err(|_| ApiError::NotFound)?;
    let outcome = state.questions.delete(question_id, page).await?;
    Ok(Json(DeleteResponse {
        success: true,
        deleted: outcome.deleted,
        questions: outcome.questions,
        total_questions: outcome.total_questions,
    }))
}

/// `POST /questions`
pub(crate) async fn create_or_search(
    State(state): State<AppState>,
    Page(page): Page,
    JsonBody(body): JsonBody<QuestionsPostBody>,
) -> Result<Json<QuestionsPostResponse>, ApiError> {
    let response = match body {
        QuestionsPostBody::Search { search_term } => {
            QuestionsPostResponse::Found(search(&state, &search_term, page).await?)
        }
        QuestionsPostBody::Create(new_question) => {
            let outcome = state
                .questions
                .create(new_question.into_new_question()?, page)
                .await?;
            QuestionsPostResponse::Created(CreateResponse {
                success: true,
                created: outcome.created,
                questions: outcome.questions,
                total_questions: outcome.total_questions,
            })
        }
    };
    Ok(Json(response))
}

/// `POST /questions/{search_term}`
pub(crate) async fn search_by_path(
    State(state): State<AppState>,
    Path(search_term): Path<String>,
    Page(page): Page,
) -> Result<Json<SearchResponse>, ApiError> {
    Ok(Json(search(&state, &search_term, page).await?))
}

async fn search(
    state: &AppState,
    term: &str,
    page: PageRequest,
) -> Result<SearchResponse, ApiError> {
    let results = state.questions.search(term, page).await?;
    Ok(SearchResponse {
        success: true,
        questions: results.questions,
        total_questions: results.total_questions,
        current_category: String::new(),
    })
}
