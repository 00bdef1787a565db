use std::sync::LazyLock;

use radulator_core::{Field, InputError, Outcome, Reference, Report, ScoreRange, Severity, Values};

use crate::scoring::{answered_yes, YES_NO};
use crate::Calculator;

const RADIUS_CM: ScoreRange = ScoreRange::new(0.1, 30.0);

/// R.E.N.A.L. nephrometry score for renal mass complexity.
pub struct RenalNephrometry;

impl Calculator for RenalNephrometry {
    fn id(&self) -> &str {
        "renal-nephrometry"
    }

    fn name(&self) -> &str {
        "RENAL Nephrometry Score"
    }

    fn desc(&self) -> &str {
        "Anatomic complexity of a renal mass for nephron-sparing surgery planning."
    }

    fn category(&self) -> &str {
        "Genitourinary"
    }

    fn tags(&self) -> &[&str] {
        &["kidney", "oncology", "surgery", "ct", "mri"]
    }

    fn keywords(&self) -> &[&str] {
        &["RENAL", "partial nephrectomy", "renal mass", "nephrometry"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            vec![
                Field::number("radius", "(R)adius: maximal diameter")
                    .unit("cm")
                    .range(RADIUS_CM),
                Field::radio(
                    "exophytic",
                    "(E)xophytic/endophytic",
                    &[
                        (">=50", "≥ 50% exophytic"),
                        ("<50", "< 50% exophytic"),
                        ("endophytic", "Entirely endophytic"),
                    ],
                ),
                Field::radio(
                    "nearness",
                    "(N)earness to collecting system or sinus",
                    &[(">=7", "≥ 7 mm"), ("4-7", "> 4 and < 7 mm"), ("<=4", "≤ 4 mm")],
                ),
                Field::radio(
                    "anterior",
                    "(A)nterior/posterior",
                    &[
                        ("a", "Anterior"),
                        ("p", "Posterior"),
                        ("x", "Neither"),
                    ],
                ),
                Field::radio(
                    "location",
                    "(L)ocation relative to polar lines",
                    &[
                        ("above/below", "Entirely above or below"),
                        ("crosses", "Crosses a polar line"),
                        ("central", "> 50% across, or between the polar lines"),
                    ],
                ),
                Field::radio("hilar", "Touches main renal artery or vein (hilar)", YES_NO),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Values) -> Outcome {
        score(values).into()
    }

    fn refs(&self) -> &[Reference] {
        static REFS: LazyLock<Vec<Reference>> = LazyLock::new(|| {
            vec![Reference::new(
                "Kutikov A, Uzzo RG. The R.E.N.A.L. nephrometry score: a comprehensive standardized system for quantitating renal tumor size, location and depth. J Urol. 2009;182(3):844-853.",
                "https://doi.org/10.1016/j.juro.2009.05.035",
            )]
        });
        &REFS
    }
}

fn radius_points(radius_cm: f64) -> u32 {
    if radius_cm <= 4.0 {
        1
    } else if radius_cm < 7.0 {
        2
    } else {
        3
    }
}

fn option_points(values: &Values, id: &str, options: [&str; 3], message: &str) -> Result<u32, InputError> {
    let answer = values.require_choice(id, message)?;
    options
        .iter()
        .position(|o| *o == answer)
        .map(|i| i as u32 + 1)
        .ok_or_else(|| InputError::invalid(format!("Unknown answer for {id}: {answer}.")))
}

/// Complexity band for a total of 4..=12 points.
pub fn complexity(total: u32) -> &'static str {
    match total {
        ..=6 => "Low",
        7..=9 => "Moderate",
        _ => "High",
    }
}

fn score(values: &Values) -> Result<Report, InputError> {
    let radius = values.require_in("radius", "the maximal diameter", RADIUS_CM, "cm")?;
    let r = radius_points(radius);
    let e = option_points(
        values,
        "exophytic",
        [">=50", "<50", "endophytic"],
        "Please select the exophytic/endophytic properties.",
    )?;
    let n = option_points(
        values,
        "nearness",
        [">=7", "4-7", "<=4"],
        "Please select the nearness to the collecting system.",
    )?;
    let l = option_points(
        values,
        "location",
        ["above/below", "crosses", "central"],
        "Please select the location relative to the polar lines.",
    )?;

    let suffix = match values.choice("anterior") {
        Some(s @ ("a" | "p")) => s,
        _ => "x",
    };
    let hilar = if answered_yes(values, "hilar") { "h" } else { "" };

    let total = r + e + n + l;
    let band = complexity(total);
    let severity = match band {
        "Low" => Severity::Success,
        "Moderate" => Severity::Warning,
        _ => Severity::Danger,
    };

    Ok(Report::new()
        .row("RENAL Score", format!("{total}{suffix}{hilar}"))
        .row("Complexity", format!("{band} complexity"))
        .row("Breakdown", format!("R={r} E={e} N={n} L={l}"))
        .severity(severity))
}
