use std::sync::LazyLock;

use radulator_core::{Field, Info, InputError, Outcome, Reference, Report, ScoreRange, Severity, Values};

use crate::scoring::checked;
use crate::Calculator;

const AGE: ScoreRange = ScoreRange::new(0.0, 120.0);
const CONTRAST_ML: ScoreRange = ScoreRange::new(0.0, 2000.0);
const EGFR: ScoreRange = ScoreRange::new(0.0, 200.0);

/// Fixed-point risk factors: id, label, points.
const FACTORS: &[(&str, &str, u32)] = &[
    ("hypotension", "Hypotension", 5),
    ("iabp", "Intra-aortic balloon pump", 5),
    ("chf", "Congestive heart failure", 5),
    ("anemia", "Anemia", 3),
    ("diabetes", "Diabetes mellitus", 3),
];

/// Mehran risk score for contrast-induced nephropathy after PCI.
pub struct Mehran;

impl Calculator for Mehran {
    fn id(&self) -> &str {
        "mehran-cin"
    }

    fn name(&self) -> &str {
        "Mehran CIN Risk Score"
    }

    fn desc(&self) -> &str {
        "Risk of contrast-induced nephropathy and dialysis after coronary intervention."
    }

    fn category(&self) -> &str {
        "Cardiac"
    }

    fn tags(&self) -> &[&str] {
        &["contrast", "kidney", "cardiac", "risk"]
    }

    fn keywords(&self) -> &[&str] {
        &["CIN", "contrast nephropathy", "PCI", "eGFR", "dialysis"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            vec![
                Field::checkbox("hypotension", "Hypotension")
                    .sub_label("SBP < 80 mmHg for ≥ 1 h requiring inotropes or IABP"),
                Field::checkbox("iabp", "Intra-aortic balloon pump"),
                Field::checkbox("chf", "Congestive heart failure")
                    .sub_label("NYHA III/IV or history of pulmonary edema"),
                Field::number("age", "Age").unit("years").range(AGE),
                Field::checkbox("anemia", "Anemia")
                    .sub_label("Hematocrit < 39% (men) or < 36% (women)"),
                Field::checkbox("diabetes", "Diabetes mellitus"),
                Field::number("contrast", "Contrast volume")
                    .unit("mL")
                    .range(CONTRAST_ML),
                Field::number("egfr", "eGFR")
                    .unit("mL/min/1.73 m²")
                    .range(EGFR),
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
                "Mehran R et al. A simple risk score for prediction of contrast-induced nephropathy after percutaneous coronary intervention. J Am Coll Cardiol. 2004;44(7):1393-1399.",
                "https://doi.org/10.1016/j.jacc.2004.06.068",
            )]
        });
        &REFS
    }

    fn info(&self) -> Option<&Info> {
        static INFO: LazyLock<Info> = LazyLock::new(|| {
            Info::new(
                "Contrast volume adds 1 point per 100 mL. eGFR 45-59 adds 2, 30-44 adds 4 and \
                 below 30 adds 6 points.",
            )
        });
        Some(&INFO)
    }
}

fn egfr_points(egfr: f64) -> u32 {
    if egfr < 30.0 {
        6
    } else if egfr < 45.0 {
        4
    } else if egfr < 60.0 {
        2
    } else {
        0
    }
}

fn score(values: &Values) -> Result<Report, InputError> {
    let egfr = values.require_in("egfr", "eGFR", EGFR, "mL/min/1.73 m²")?;
    let age = values.optional_in("age", "Age", AGE, "years")?;
    let contrast = values
        .optional_in("contrast", "Contrast volume", CONTRAST_ML, "mL")?
        .unwrap_or(0.0);

    let mut total: u32 = FACTORS
        .iter()
        .filter(|(id, _, _)| values.flag(id))
        .map(|(_, _, points)| points)
        .sum();
    if age.is_some_and(|a| a > 75.0) {
        total += 4;
    }
    total += (contrast / 100.0).floor() as u32;
    total += egfr_points(egfr);

    let (risk, cin, dialysis, severity) = match total {
        ..=5 => ("Low Risk", "7.5%", "0.04%", Severity::Success),
        6..=10 => ("Moderate Risk", "14.0%", "0.12%", Severity::Warning),
        11..=15 => ("High Risk", "26.1%", "1.09%", Severity::Danger),
        _ => ("Very High Risk", "57.3%", "12.6%", Severity::Danger),
    };

    let labels: Vec<(&str, &str)> = FACTORS.iter().map(|(id, label, _)| (*id, *label)).collect();
    let present = checked(values, &labels);

    Ok(Report::new()
        .row("Total Score", total.to_string())
        .row("Risk Category", risk)
        .row("Risk of CIN", cin)
        .row("Risk of Dialysis", dialysis)
        .row(
            "Risk Factors",
            if present.is_empty() {
                "None checked".to_string()
            } else {
                present.join(", ")
            },
        )
        .severity(severity))
}
