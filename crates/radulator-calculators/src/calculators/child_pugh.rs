use std::sync::LazyLock;

use radulator_core::{Field, InputError, Outcome, Reference, Report, ScoreRange, Severity, Values};

use crate::Calculator;

const BILIRUBIN: ScoreRange = ScoreRange::new(0.1, 60.0);
const ALBUMIN: ScoreRange = ScoreRange::new(0.5, 7.0);
const INR: ScoreRange = ScoreRange::new(0.5, 15.0);

/// Child-Pugh classification of cirrhosis severity.
pub struct ChildPugh;

impl Calculator for ChildPugh {
    fn id(&self) -> &str {
        "child-pugh"
    }

    fn name(&self) -> &str {
        "Child-Pugh Score"
    }

    fn desc(&self) -> &str {
        "Severity of chronic liver disease from labs, ascites and encephalopathy."
    }

    fn category(&self) -> &str {
        "Hepatology"
    }

    fn tags(&self) -> &[&str] {
        &["liver", "cirrhosis", "laboratory"]
    }

    fn keywords(&self) -> &[&str] {
        &["Child-Turcotte-Pugh", "CTP", "ascites", "encephalopathy"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            vec![
                Field::number("bilirubin", "Total bilirubin")
                    .unit("mg/dL")
                    .range(BILIRUBIN),
                Field::number("albumin", "Serum albumin")
                    .unit("g/dL")
                    .range(ALBUMIN),
                Field::number("inr", "INR").range(INR),
                Field::radio(
                    "ascites",
                    "Ascites",
                    &[
                        ("none", "None"),
                        ("slight", "Slight"),
                        ("moderate", "Moderate to severe"),
                    ],
                ),
                Field::radio(
                    "encephalopathy",
                    "Hepatic encephalopathy",
                    &[
                        ("none", "None"),
                        ("grade1-2", "Grade 1-2"),
                        ("grade3-4", "Grade 3-4"),
                    ],
                ),
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
                "Pugh RN et al. Transection of the oesophagus for bleeding oesophageal varices. Br J Surg. 1973;60(8):646-649.",
                "https://doi.org/10.1002/bjs.1800600817",
            )]
        });
        &REFS
    }
}

fn classify(values: &Values) -> Result<Report, InputError> {
    let bilirubin = values.require_in("bilirubin", "total bilirubin", BILIRUBIN, "mg/dL")?;
    let albumin = values.require_in("albumin", "serum albumin", ALBUMIN, "g/dL")?;
    let inr = values.require_in("inr", "INR", INR, "")?;

    let bilirubin_points = if bilirubin < 2.0 {
        1
    } else if bilirubin <= 3.0 {
        2
    } else {
        3
    };
    let albumin_points = if albumin > 3.5 {
        1
    } else if albumin >= 2.8 {
        2
    } else {
        3
    };
    let inr_points = if inr < 1.7 {
        1
    } else if inr <= 2.2 {
        2
    } else {
        3
    };
    let ascites_points = match values.choice("ascites") {
        Some("slight") => 2,
        Some("moderate") => 3,
        _ => 1,
    };
    let encephalopathy_points = match values.choice("encephalopathy") {
        Some("grade1-2") => 2,
        Some("grade3-4") => 3,
        _ => 1,
    };

    let total =
        bilirubin_points + albumin_points + inr_points + ascites_points + encephalopathy_points;
    let (class, survival, severity) = match total {
        ..=6 => ("A", "1-year survival ~100%, 2-year ~85%", Severity::Success),
        7..=9 => ("B", "1-year survival ~80%, 2-year ~60%", Severity::Warning),
        _ => ("C", "1-year survival ~45%, 2-year ~35%", Severity::Danger),
    };

    Ok(Report::new()
        .row("Total Score", total.to_string())
        .row("Child-Pugh Class", format!("Class {class}"))
        .row("Survival", survival)
        .row(
            "Breakdown",
            format!(
                "Bilirubin {bilirubin_points}, Albumin {albumin_points}, INR {inr_points}, \
                 Ascites {ascites_points}, Encephalopathy {encephalopathy_points}"
            ),
        )
        .severity(severity))
}
