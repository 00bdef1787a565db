use thiserror::Error;

/// Why a calculator definition was refused by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("calculator '{name}' has no id")]
    MissingId { name: String },

    #[error("calculator '{id}' has no display name")]
    MissingName { id: String },

    #[error("duplicate calculator id: {0}")]
    DuplicateId(String),

    #[error("duplicate field '{field_id}' in calculator '{calculator_id}'")]
    DuplicateField {
        calculator_id: String,
        field_id: String,
    },

    #[error("field '{field_id}' in calculator '{calculator_id}' has no options")]
    MissingOptions {
        calculator_id: String,
        field_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculatorError {
    #[error("unknown calculator: {0}")]
    UnknownCalculator(String),
}
