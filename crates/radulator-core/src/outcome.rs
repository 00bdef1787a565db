use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::InputError;

/// Coarse rendering hint attached to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    Success,
    Warning,
    Danger,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResultRow {
    pub label: String,
    pub value: String,
}

/// A successful computation: labelled display strings in render order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Report {
    pub rows: Vec<ResultRow>,
    pub severity: Option<Severity>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.rows.push(ResultRow {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    /// Append a row only when `value` is present.
    pub fn row_opt(self, label: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.row(label, value),
            None => self,
        }
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }
}

/// What `compute` hands back to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum Outcome {
    Report(Report),
    Invalid { message: String },
}

impl Outcome {
    pub fn invalid(message: impl Into<String>) -> Self {
        Outcome::Invalid {
            message: message.into(),
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Outcome::Invalid { .. })
    }

    pub fn report(&self) -> Option<&Report> {
        match self {
            Outcome::Report(report) => Some(report),
            Outcome::Invalid { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Report(_) => None,
            Outcome::Invalid { message } => Some(message),
        }
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.report().and_then(|r| r.value(label))
    }

    pub fn severity(&self) -> Option<Severity> {
        self.report().and_then(|r| r.severity)
    }

    /// Flatten into the string map older renderers expect, with the reserved
    /// `Error` and `_severity` keys.
    pub fn to_result_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        match self {
            Outcome::Invalid { message } => {
                map.insert("Error".to_string(), message.clone());
            }
            Outcome::Report(report) => {
                for row in &report.rows {
                    map.insert(row.label.clone(), row.value.clone());
                }
                if let Some(severity) = report.severity {
                    map.insert("_severity".to_string(), severity.to_string());
                }
            }
        }
        map
    }
}

impl From<Report> for Outcome {
    fn from(report: Report) -> Self {
        Outcome::Report(report)
    }
}

impl From<InputError> for Outcome {
    fn from(e: InputError) -> Self {
        Outcome::Invalid { message: e.message }
    }
}

impl From<Result<Report, InputError>> for Outcome {
    fn from(result: Result<Report, InputError>) -> Self {
        match result {
            Ok(report) => report.into(),
            Err(e) => e.into(),
        }
    }
}
