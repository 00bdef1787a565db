use std::sync::LazyLock;

use radulator_core::{Field, InputError, Outcome, Reference, Report, ScoreRange, Severity, Values};

use crate::Calculator;

const ANGLE: ScoreRange = ScoreRange::new(0.0, 120.0);
const AGE_WEEKS: ScoreRange = ScoreRange::new(0.0, 104.0);
const COVERAGE: ScoreRange = ScoreRange::new(0.0, 100.0);

/// Graf sonographic classification of infant hip dysplasia.
pub struct HipGraf;

impl Calculator for HipGraf {
    fn id(&self) -> &str {
        "hip-graf"
    }

    fn name(&self) -> &str {
        "Hip Ultrasound (Graf)"
    }

    fn desc(&self) -> &str {
        "Graf classification of developmental dysplasia of the hip from alpha and beta angles."
    }

    fn category(&self) -> &str {
        "Pediatrics"
    }

    fn tags(&self) -> &[&str] {
        &["pediatric", "ultrasound", "hip"]
    }

    fn keywords(&self) -> &[&str] {
        &["DDH", "alpha angle", "beta angle", "femoral head coverage"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            vec![
                Field::number("alpha", "Alpha angle").unit("°").range(ANGLE),
                Field::number("beta", "Beta angle").unit("°").range(ANGLE),
                Field::number("age_weeks", "Age")
                    .sub_label("Needed to separate IIa from IIb")
                    .unit("weeks")
                    .range(AGE_WEEKS),
                Field::number("coverage", "Femoral head coverage")
                    .sub_label("Optional")
                    .unit("%")
                    .range(COVERAGE),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Values) -> Outcome {
        classify(values).into()
    }

    fn refs(&self) -> &[Reference] {
        static REFS: LazyLock<Vec<Reference>> = LazyLock::new(|| {
            vec![Reference::new(
                "Graf R. Fundamentals of sonographic diagnosis of infant hip dysplasia. J Pediatr Orthop. 1984;4(6):735-740.",
                "https://doi.org/10.1097/01241398-198411000-00015",
            )]
        });
        &REFS
    }
}

fn classify(values: &Values) -> Result<Report, InputError> {
    let alpha = values.require_in("alpha", "the alpha angle", ANGLE, "°")?;
    let beta = values.require_in("beta", "the beta angle", ANGLE, "°")?;
    let coverage = values.optional_in("coverage", "Femoral head coverage", COVERAGE, "%")?;

    let (graf_type, description, management, severity) = if alpha >= 60.0 {
        if beta < 55.0 {
            ("Type Ia", "Mature hip.", "No follow-up.", Severity::Success)
        } else {
            (
                "Type Ib",
                "Mature hip with short cartilaginous roof.",
                "No follow-up.",
                Severity::Success,
            )
        }
    } else if alpha >= 50.0 {
        let age_weeks = values.require_in("age_weeks", "age in weeks", AGE_WEEKS, "weeks")?;
        if age_weeks < 12.0 {
            (
                "Type IIa",
                "Physiologically immature hip.",
                "Repeat ultrasound at about 12 weeks of age.",
                Severity::Warning,
            )
        } else {
            (
                "Type IIb",
                "Delayed ossification beyond 12 weeks.",
                "Treatment with abduction bracing.",
                Severity::Danger,
            )
        }
    } else if alpha >= 43.0 {
        if beta <= 77.0 {
            (
                "Type IIc",
                "Critical hip: deficient bony roof, labrum still covering the head.",
                "Treatment with abduction bracing.",
                Severity::Danger,
            )
        } else {
            (
                "Type D",
                "Decentering hip.",
                "Treatment required.",
                Severity::Danger,
            )
        }
    } else {
        (
            "Type III/IV",
            "Decentered or dislocated hip.",
            "Orthopedic referral for reduction.",
            Severity::Danger,
        )
    };

    let coverage_note = coverage.map(|c| {
        if c >= 50.0 {
            format!("{c}% (normal ≥ 50%)")
        } else {
            format!("{c}% (deficient, < 50%)")
        }
    });

    Ok(Report::new()
        .row("Graf Type", graf_type)
        .row("Description", description)
        .row("Management", management)
        .row_opt("Femoral Head Coverage", coverage_note)
        .severity(severity))
}
