use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::values::Values;

/// The input control a field is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FieldKind {
    Number,
    Radio,
    Checkbox,
    Select,
    Textarea,
}

impl FieldKind {
    /// Radio and select fields choose from a fixed option list.
    pub fn is_enumerated(self) -> bool {
        matches!(self, FieldKind::Radio | FieldKind::Select)
    }
}

/// Defines the valid range for a numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

impl ScoreRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            step: None,
        }
    }

    pub const fn stepped(min: f64, max: f64, step: f64) -> Self {
        Self {
            min,
            max,
            step: Some(step),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        if value.is_nan() || value < self.min || value > self.max {
            return false;
        }
        if let Some(step) = self.step {
            let offset = value - self.min;
            let remainder = offset % step;
            // Allow floating point tolerance
            remainder < 1e-9 || (step - remainder) < 1e-9
        } else {
            true
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

/// Visibility predicate over the current answers.
///
/// Must tolerate a partially filled map and must not depend on anything but
/// its argument.
#[derive(Clone, Copy)]
pub struct ShowIf(pub fn(&Values) -> bool);

impl fmt::Debug for ShowIf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ShowIf(..)")
    }
}

/// One declared input control of a calculator.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct Field {
    pub id: String,
    pub label: String,
    pub sub_label: Option<String>,
    pub kind: FieldKind,
    pub opts: Vec<FieldOption>,
    pub unit: Option<String>,
    pub range: Option<ScoreRange>,
    pub placeholder: Option<String>,
    #[serde(skip)]
    pub show_if: Option<ShowIf>,
}

impl Field {
    fn new(id: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            sub_label: None,
            kind,
            opts: Vec::new(),
            unit: None,
            range: None,
            placeholder: None,
            show_if: None,
        }
    }

    pub fn number(id: &str, label: &str) -> Self {
        Self::new(id, label, FieldKind::Number)
    }

    pub fn checkbox(id: &str, label: &str) -> Self {
        Self::new(id, label, FieldKind::Checkbox)
    }

    pub fn textarea(id: &str, label: &str) -> Self {
        Self::new(id, label, FieldKind::Textarea)
    }

    /// A radio group; `opts` are `(value, label)` pairs in display order.
    pub fn radio(id: &str, label: &str, opts: &[(&str, &str)]) -> Self {
        Self::new(id, label, FieldKind::Radio).with_opts(opts)
    }

    pub fn select(id: &str, label: &str, opts: &[(&str, &str)]) -> Self {
        Self::new(id, label, FieldKind::Select).with_opts(opts)
    }

    fn with_opts(mut self, opts: &[(&str, &str)]) -> Self {
        self.opts = opts
            .iter()
            .map(|(value, label)| FieldOption {
                value: value.to_string(),
                label: label.to_string(),
            })
            .collect();
        self
    }

    pub fn sub_label(mut self, text: &str) -> Self {
        self.sub_label = Some(text.to_string());
        self
    }

    pub fn unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn range(mut self, range: ScoreRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn placeholder(mut self, text: &str) -> Self {
        self.placeholder = Some(text.to_string());
        self
    }

    pub fn show_if(mut self, predicate: fn(&Values) -> bool) -> Self {
        self.show_if = Some(ShowIf(predicate));
        self
    }

    pub fn is_conditional(&self) -> bool {
        self.show_if.is_some()
    }

    pub fn is_visible(&self, values: &Values) -> bool {
        self.show_if.is_none_or(|ShowIf(predicate)| predicate(values))
    }
}
