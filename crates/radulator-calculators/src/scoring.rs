//! Shared option lists and small arithmetic helpers used by the calculators.

use radulator_core::{InputError, ScoreRange, Values};

pub const YES_NO: &[(&str, &str)] = &[("no", "No"), ("yes", "Yes")];

/// Whether a yes/no radio was answered "yes". Unanswered counts as "no".
pub fn answered_yes(values: &Values, id: &str) -> bool {
    values.choice(id) == Some("yes") || values.flag(id)
}

/// Sum questionnaire items that must all be answered and lie in `range`.
///
/// `missing` is reported when any item is unanswered.
pub fn sum_items(
    values: &Values,
    ids: &[&str],
    range: ScoreRange,
    missing: &str,
) -> Result<f64, InputError> {
    let mut total = 0.0;
    for id in ids {
        let answer = values.number(id).ok_or_else(|| InputError::missing(missing))?;
        if !range.contains(answer) {
            return Err(InputError::out_of_range(
                &format!("Answer to {}", id.to_uppercase()),
                answer,
                range,
                "",
            ));
        }
        total += answer;
    }
    Ok(total)
}

/// Labels of the checked boxes among `(id, label)` pairs.
pub fn checked<'a>(values: &Values, boxes: &[(&str, &'a str)]) -> Vec<&'a str> {
    boxes
        .iter()
        .filter(|(id, _)| values.flag(id))
        .map(|(_, label)| *label)
        .collect()
}

/// Fixed-point display without a negative zero.
pub fn fixed(value: f64, decimals: usize) -> String {
    let s = format!("{value:.decimals$}");
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}
