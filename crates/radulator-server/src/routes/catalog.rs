use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use radulator_calculators::CalculatorSummary;

use crate::error::ApiError;
use crate::state::AppState;

/// One sidebar group.
#[derive(Serialize)]
pub struct Category {
    name: String,
    calculators: Vec<CalculatorSummary>,
}

fn category(state: &AppState, name: &str) -> Category {
    Category {
        name: name.to_string(),
        calculators: state
            .registry
            .get_by_category(name)
            .iter()
            .map(|c| c.summary())
            .collect(),
    }
}

pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(
        state
            .registry
            .sorted_categories()
            .into_iter()
            .map(|name| category(&state, name))
            .collect(),
    )
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Category>, ApiError> {
    let found = category(&state, &name);
    if found.calculators.is_empty() {
        return Err(ApiError::NotFound(format!("category not found: {name}")));
    }
    Ok(Json(found))
}

pub async fn list_tags(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(
        state
            .registry
            .all_tags()
            .into_iter()
            .map(str::to_string)
            .collect(),
    )
}
