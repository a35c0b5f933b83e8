use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use trivia_core::model::{CategoryId, CategoryMap, Question};

use crate::error::ApiError;
use crate::extract::Page;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub(crate) struct CategoriesResponse {
    success: bool,
    categories: CategoryMap,
}

#[derive(Debug, Serialize)]
pub(crate) struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: u64,
    current_category: String,
}

/// `GET /categories`
pub(crate) async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state.questions.list_categories().await?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

/// `GET /categories/{category_id}/questions`
pub(crate) async fn list_by_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Page(page): Page,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let category_id: CategoryId = raw_id.parse().map_err(|_| ApiError::NotFound)?;
    let listing = state.questions.list_by_category(category_id, page).await?;
    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: listing.questions,
        total_questions: listing.total_questions,
        current_category: listing.current_category,
    }))
}
