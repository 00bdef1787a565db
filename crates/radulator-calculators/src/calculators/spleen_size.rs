use std::sync::LazyLock;

use radulator_core::{Field, InputError, Outcome, Reference, Report, ScoreRange, Severity, Values};

use crate::Calculator;

const LENGTH_CM: ScoreRange = ScoreRange::new(1.0, 40.0);
const AGE: ScoreRange = ScoreRange::new(0.0, 120.0);

/// Splenomegaly assessment from craniocaudal length.
pub struct SpleenSize;

impl Calculator for SpleenSize {
    fn id(&self) -> &str {
        "spleen-size"
    }

    fn name(&self) -> &str {
        "Spleen Size"
    }

    fn desc(&self) -> &str {
        "Splenic length against the upper limit of normal for sex and age."
    }

    fn category(&self) -> &str {
        "Abdominal"
    }

    fn tags(&self) -> &[&str] {
        &["spleen", "ultrasound", "ct"]
    }

    fn keywords(&self) -> &[&str] {
        &["splenomegaly", "upper limit of normal", "craniocaudal"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            vec![
                Field::number("length", "Craniocaudal length")
                    .unit("cm")
                    .range(LENGTH_CM),
                Field::radio("sex", "Sex", &[("male", "Male"), ("female", "Female")]),
                Field::number("age", "Age").unit("years").range(AGE),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Values) -> Outcome {
        assess(values).into()
    }

    fn refs(&self) -> &[Reference] {
        static REFS: LazyLock<Vec<Reference>> = LazyLock::new(|| {
            vec![Reference::new(
                "Chow KU et al. Spleen size is significantly influenced by body height and sex: establishment of normal values for spleen size at US with a cohort of 1200 healthy individuals. Radiology. 2016;279(1):306-313.",
                "https://doi.org/10.1148/radiol.2015150887",
            )]
        });
        &REFS
    }
}

/// Upper limit of normal length in cm.
pub fn upper_limit(male: bool, age: f64) -> f64 {
    match (male, age < 40.0) {
        (true, true) => 13.0,
        (true, false) => 12.5,
        (false, true) => 12.0,
        (false, false) => 11.5,
    }
}

fn assess(values: &Values) -> Result<Report, InputError> {
    let length = values.require_in("length", "the splenic length", LENGTH_CM, "cm")?;
    let male = match values.require_choice("sex", "Please select the sex.")? {
        "male" => true,
        "female" => false,
        other => return Err(InputError::invalid(format!("Unknown sex: {other}."))),
    };
    let age = values.require_in("age", "the age", AGE, "years")?;

    let limit = upper_limit(male, age);
    let (interpretation, severity) = if length > limit {
        ("Splenomegaly", Severity::Warning)
    } else {
        ("Normal spleen size", Severity::Success)
    };

    Ok(Report::new()
        .row("Spleen Length", format!("{length} cm"))
        .row("Upper Limit of Normal", format!("{limit:.1} cm"))
        .row("Interpretation", interpretation)
        .severity(severity))
}
