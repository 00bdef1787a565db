use thiserror::Error;

use crate::field::ScoreRange;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("expected a JSON object of field values, got {0}")]
    NotAnObject(String),
}

/// A user-correctable problem with the values handed to `compute`.
///
/// The message is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InputError {
    pub message: String,
}

impl InputError {
    pub fn missing(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Names the offending value and the acceptable range.
    pub fn out_of_range(label: &str, value: f64, range: ScoreRange, unit: &str) -> Self {
        let unit = if unit.is_empty() {
            String::new()
        } else {
            format!(" {unit}")
        };
        Self {
            message: format!(
                "{} of {value}{unit} is outside the acceptable range ({} to {}{unit}).",
                capitalize(label),
                range.min,
                range.max,
            ),
        }
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
