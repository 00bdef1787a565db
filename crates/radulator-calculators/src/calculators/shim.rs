use std::sync::LazyLock;

use radulator_core::{Field, InputError, Outcome, Reference, Report, ScoreRange, Severity, Values};

use crate::scoring::sum_items;
use crate::Calculator;

const QUESTIONS: &[(&str, &str)] = &[
    ("q1", "Confidence that you could get and keep an erection"),
    ("q2", "Erections hard enough for penetration"),
    ("q3", "Able to maintain erection after penetration"),
    ("q4", "Able to maintain erection to completion of intercourse"),
    ("q5", "Intercourse satisfactory"),
];

const ANSWERS: &[(&str, &str)] = &[
    ("1", "1 - Very low / almost never"),
    ("2", "2 - Low / a few times"),
    ("3", "3 - Moderate / sometimes"),
    ("4", "4 - High / most times"),
    ("5", "5 - Very high / almost always"),
];

const ITEM: ScoreRange = ScoreRange::stepped(1.0, 5.0, 1.0);

/// Sexual Health Inventory for Men (IIEF-5), past six months.
pub struct Shim;

impl Calculator for Shim {
    fn id(&self) -> &str {
        "shim"
    }

    fn name(&self) -> &str {
        "SHIM (IIEF-5)"
    }

    fn desc(&self) -> &str {
        "Sexual Health Inventory for Men: five-item erectile function questionnaire."
    }

    fn category(&self) -> &str {
        "Genitourinary"
    }

    fn tags(&self) -> &[&str] {
        &["questionnaire", "urology"]
    }

    fn keywords(&self) -> &[&str] {
        &["erectile dysfunction", "ED", "IIEF"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            QUESTIONS
                .iter()
                .map(|(id, label)| Field::select(id, label, ANSWERS))
                .collect()
        });
        &FIELDS
    }

    fn compute(&self, values: &Values) -> Outcome {
        score(values).into()
    }

    fn refs(&self) -> &[Reference] {
        static REFS: LazyLock<Vec<Reference>> = LazyLock::new(|| {
            vec![Reference::new(
                "Rosen RC et al. Development and evaluation of an abridged, 5-item version of the International Index of Erectile Function (IIEF-5) as a diagnostic tool for erectile dysfunction. Int J Impot Res. 1999;11(6):319-326.",
                "https://doi.org/10.1038/sj.ijir.3900472",
            )]
        });
        &REFS
    }
}

/// Category for a 5-25 total.
pub fn shim_category(total: u32) -> &'static str {
    match total {
        22.. => "No ED",
        17..=21 => "Mild ED",
        12..=16 => "Mild to Moderate ED",
        8..=11 => "Moderate ED",
        _ => "Severe ED",
    }
}

fn score(values: &Values) -> Result<Report, InputError> {
    let ids: Vec<&str> = QUESTIONS.iter().map(|(id, _)| *id).collect();
    let total = sum_items(values, &ids, ITEM, "Please answer all five questions.")?;
    // Items are whole numbers in 1..=5, so the sum is exact.
    let total = total as u32;

    let category = shim_category(total);
    let severity = match category {
        "No ED" => Severity::Success,
        "Mild ED" => Severity::Info,
        "Severe ED" => Severity::Danger,
        _ => Severity::Warning,
    };

    Ok(Report::new()
        .row("Total Score", format!("{total}/25"))
        .row("Category", category)
        .severity(severity))
}
