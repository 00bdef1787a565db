use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    status: &'static str,
    calculators: usize,
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Health>, ApiError> {
    if state.registry.is_empty() {
        return Err(ApiError::Internal("calculator registry is empty".to_string()));
    }
    Ok(Json(Health {
        status: "ok",
        calculators: state.registry.len(),
    }))
}
