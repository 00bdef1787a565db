use std::sync::LazyLock;

use radulator_core::{Field, Info, InputError, Outcome, Reference, Report, ScoreRange, Severity, Values};

use crate::Calculator;

const CREATININE: ScoreRange = ScoreRange::new(0.1, 20.0);
const BILIRUBIN: ScoreRange = ScoreRange::new(0.1, 60.0);
const INR: ScoreRange = ScoreRange::new(0.5, 15.0);
const SODIUM: ScoreRange = ScoreRange::new(100.0, 180.0);

const SCORE_FLOOR: f64 = 6.0;
const SCORE_CEILING: f64 = 40.0;

/// Model for End-stage Liver Disease with sodium correction.
pub struct MeldNa;

impl Calculator for MeldNa {
    fn id(&self) -> &str {
        "meld-na"
    }

    fn name(&self) -> &str {
        "MELD-Na Score"
    }

    fn desc(&self) -> &str {
        "Model for End-Stage Liver Disease with sodium, for 3-month mortality."
    }

    fn category(&self) -> &str {
        "Hepatology"
    }

    fn tags(&self) -> &[&str] {
        &["liver", "transplant", "laboratory"]
    }

    fn keywords(&self) -> &[&str] {
        &["MELD", "UNOS", "sodium", "dialysis", "mortality"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            vec![
                Field::number("creatinine", "Serum creatinine")
                    .unit("mg/dL")
                    .range(CREATININE),
                Field::number("bilirubin", "Total bilirubin")
                    .unit("mg/dL")
                    .range(BILIRUBIN),
                Field::number("inr", "INR").range(INR),
                Field::number("sodium", "Serum sodium")
                    .unit("mmol/L")
                    .range(SODIUM),
                Field::checkbox("dialysis", "Dialysis ≥ 2 times in the past week"),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Values) -> Outcome {
        score(values).into()
    }

    fn refs(&self) -> &[Reference] {
        static REFS: LazyLock<Vec<Reference>> = LazyLock::new(|| {
            vec![
                Reference::new(
                    "Kim WR et al. Hyponatremia and mortality among patients on the liver-transplant waiting list. N Engl J Med. 2008;359(10):1018-1026.",
                    "https://doi.org/10.1056/NEJMoa0801209",
                ),
                Reference::new(
                    "Kamath PS et al. A model to predict survival in patients with end-stage liver disease. Hepatology. 2001;33(2):464-470.",
                    "https://doi.org/10.1053/jhep.2001.22172",
                ),
            ]
        });
        &REFS
    }

    fn info(&self) -> Option<&Info> {
        static INFO: LazyLock<Info> = LazyLock::new(|| {
            Info::new(
                "Laboratory values below 1.0 are set to 1.0. Creatinine is capped at 4.0 mg/dL \
                 and set to 4.0 with dialysis. The sodium correction applies only when MELD \
                 exceeds 11, with sodium bounded to 125-137 mmol/L.",
            )
        });
        Some(&INFO)
    }
}

/// MELD and MELD-Na, each rounded and bounded to 6..=40.
pub fn meld_scores(creatinine: f64, bilirubin: f64, inr: f64, sodium: f64, dialysis: bool) -> (u32, u32) {
    let creatinine = if dialysis { 4.0 } else { creatinine.clamp(1.0, 4.0) };
    let bilirubin = bilirubin.max(1.0);
    let inr = inr.max(1.0);

    let raw = 10.0 * (0.957 * creatinine.ln() + 0.378 * bilirubin.ln() + 1.120 * inr.ln() + 0.643);
    let meld = raw.round().clamp(SCORE_FLOOR, SCORE_CEILING);

    let meld_na = if meld > 11.0 {
        let gap = 137.0 - sodium.clamp(125.0, 137.0);
        (meld + 1.32 * gap - 0.033 * meld * gap)
            .round()
            .clamp(SCORE_FLOOR, SCORE_CEILING)
    } else {
        meld
    };
    (meld as u32, meld_na as u32)
}

fn score(values: &Values) -> Result<Report, InputError> {
    let creatinine = values.require_in("creatinine", "serum creatinine", CREATININE, "mg/dL")?;
    let bilirubin = values.require_in("bilirubin", "total bilirubin", BILIRUBIN, "mg/dL")?;
    let inr = values.require_in("inr", "INR", INR, "")?;
    let sodium = values.require_in("sodium", "serum sodium", SODIUM, "mmol/L")?;

    let (meld, meld_na) = meld_scores(creatinine, bilirubin, inr, sodium, values.flag("dialysis"));

    let (risk, mortality, severity) = match meld_na {
        ..=9 => ("Low risk", "1.9%", Severity::Success),
        10..=19 => ("Moderate risk", "6.0%", Severity::Warning),
        20..=29 => ("High risk", "19.6%", Severity::Danger),
        30..=39 => ("Very high risk", "52.6%", Severity::Danger),
        _ => ("Critical risk", ">70%", Severity::Danger),
    };

    Ok(Report::new()
        .row("MELD", meld.to_string())
        .row("MELD-Na", meld_na.to_string())
        .row("Risk Category", risk)
        .row("3-Month Mortality", mortality)
        .severity(severity))
}
