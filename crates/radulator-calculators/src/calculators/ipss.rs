use std::sync::LazyLock;

use radulator_core::{Field, InputError, Outcome, Reference, Report, ScoreRange, Severity, Values};

use crate::scoring::sum_items;
use crate::Calculator;

const SYMPTOM_QUESTIONS: &[(&str, &str)] = &[
    ("q1", "Incomplete emptying"),
    ("q2", "Frequency"),
    ("q3", "Intermittency"),
    ("q4", "Urgency"),
    ("q5", "Weak stream"),
    ("q6", "Straining"),
    ("q7", "Nocturia"),
];

const FREQUENCY: &[(&str, &str)] = &[
    ("0", "Not at all"),
    ("1", "Less than 1 time in 5"),
    ("2", "Less than half the time"),
    ("3", "About half the time"),
    ("4", "More than half the time"),
    ("5", "Almost always"),
];

const NOCTURIA: &[(&str, &str)] = &[
    ("0", "None"),
    ("1", "1 time"),
    ("2", "2 times"),
    ("3", "3 times"),
    ("4", "4 times"),
    ("5", "5 or more times"),
];

const QUALITY_OF_LIFE: &[(&str, &str)] = &[
    ("0", "Delighted"),
    ("1", "Pleased"),
    ("2", "Mostly satisfied"),
    ("3", "Mixed"),
    ("4", "Mostly dissatisfied"),
    ("5", "Unhappy"),
    ("6", "Terrible"),
];

const ITEM: ScoreRange = ScoreRange::stepped(0.0, 5.0, 1.0);
const QOL: ScoreRange = ScoreRange::stepped(0.0, 6.0, 1.0);

/// International Prostate Symptom Score.
pub struct Ipss;

impl Calculator for Ipss {
    fn id(&self) -> &str {
        "ipss"
    }

    fn name(&self) -> &str {
        "IPSS"
    }

    fn desc(&self) -> &str {
        "International Prostate Symptom Score for lower urinary tract symptoms."
    }

    fn category(&self) -> &str {
        "Genitourinary"
    }

    fn tags(&self) -> &[&str] {
        &["prostate", "questionnaire", "urology"]
    }

    fn keywords(&self) -> &[&str] {
        &["BPH", "LUTS", "AUA symptom index"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            let mut fields: Vec<Field> = SYMPTOM_QUESTIONS
                .iter()
                .map(|(id, label)| {
                    let opts = if *id == "q7" { NOCTURIA } else { FREQUENCY };
                    Field::select(id, label, opts)
                })
                .collect();
            fields.push(
                Field::select("qol", "Quality of life due to urinary symptoms", QUALITY_OF_LIFE)
                    .sub_label("Optional"),
            );
            fields
        });
        &FIELDS
    }

    fn compute(&self, values: &Values) -> Outcome {
        score(values).into()
    }

    fn refs(&self) -> &[Reference] {
        static REFS: LazyLock<Vec<Reference>> = LazyLock::new(|| {
            vec![Reference::new(
                "Barry MJ et al. The American Urological Association symptom index for benign prostatic hyperplasia. J Urol. 1992;148(5):1549-1557.",
                "https://doi.org/10.1016/s0022-5347(17)36966-5",
            )]
        });
        &REFS
    }
}

fn score(values: &Values) -> Result<Report, InputError> {
    let ids: Vec<&str> = SYMPTOM_QUESTIONS.iter().map(|(id, _)| *id).collect();
    let total = sum_items(values, &ids, ITEM, "Please answer all seven symptom questions.")?;
    let qol = values.optional_in("qol", "Quality of life answer", QOL, "")?;

    let (severity_label, management, severity) = if total <= 7.0 {
        ("Mild", "Watchful waiting.", Severity::Success)
    } else if total <= 19.0 {
        ("Moderate", "Consider medical therapy.", Severity::Warning)
    } else {
        (
            "Severe",
            "Medical therapy; consider surgical evaluation.",
            Severity::Danger,
        )
    };

    Ok(Report::new()
        .row("Total Score", format!("{total}/35"))
        .row("Symptom Severity", severity_label)
        .row("Management", management)
        .row_opt("Quality of Life", qol.map(|q| format!("{q}/6")))
        .severity(severity))
}
