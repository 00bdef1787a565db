use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use radulator_calculators::{Calculator, CalculatorDetail, CalculatorError, CalculatorSummary};
use radulator_core::{Outcome, Values};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListQuery {
    q: Option<String>,
}

#[derive(Serialize)]
pub struct Visibility {
    calculator_id: String,
    visible_fields: Vec<String>,
}

#[derive(Serialize)]
pub struct Computation {
    calculator_id: String,
    visible_fields: Vec<String>,
    outcome: Outcome,
}

fn lookup<'a>(state: &'a AppState, id: &str) -> Result<&'a dyn Calculator, ApiError> {
    state
        .registry
        .get_by_id(id)
        .ok_or_else(|| CalculatorError::UnknownCalculator(id.to_string()).into())
}

/// Parse the request body into answers restricted to the calculator's
/// declared and currently visible fields.
fn answers(
    calculator: &dyn Calculator,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Values, ApiError> {
    let Json(body) = body?;
    Ok(Values::from_json(body)?.restricted_to(calculator.fields()))
}

fn visible_ids(calculator: &dyn Calculator, values: &Values) -> Vec<String> {
    calculator
        .visible_fields(values)
        .into_iter()
        .map(|f| f.id.clone())
        .collect()
}

pub async fn list_calculators(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<CalculatorSummary>> {
    let calculators = match query.q.as_deref() {
        Some(q) => state.registry.search(q),
        None => state.registry.all().collect(),
    };
    Json(calculators.iter().map(|c| c.summary()).collect())
}

pub async fn get_calculator(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CalculatorDetail>, ApiError> {
    Ok(Json(lookup(&state, &id)?.detail()))
}

pub async fn visible_fields(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Visibility>, ApiError> {
    let calculator = lookup(&state, &id)?;
    let values = answers(calculator, body)?;

    Ok(Json(Visibility {
        calculator_id: id,
        visible_fields: visible_ids(calculator, &values),
    }))
}

pub async fn compute(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Computation>, ApiError> {
    let calculator = lookup(&state, &id)?;
    let values = answers(calculator, body)?;
    let outcome = calculator.compute(&values);

    match &outcome {
        Outcome::Invalid { message } => {
            tracing::debug!(calculator = %id, %message, "input rejected");
        }
        Outcome::Report(report) => {
            tracing::debug!(calculator = %id, rows = report.rows.len(), "computed");
        }
    }

    Ok(Json(Computation {
        visible_fields: visible_ids(calculator, &values),
        calculator_id: id,
        outcome,
    }))
}
