use std::sync::LazyLock;

use radulator_core::{
    Field, Info, InputError, Outcome, Reference, Report, ScoreRange, Severity, Values,
};

use crate::scoring::fixed;
use crate::Calculator;

/// mg/dL → μmol/L.
pub const BILIRUBIN_US_TO_SI: f64 = 17.104;
/// g/dL → g/L.
pub const ALBUMIN_US_TO_SI: f64 = 10.0;

const GRADE_1_MAX: f64 = -2.60;
const GRADE_2_MAX: f64 = -1.39;

const ALBUMIN_SI: ScoreRange = ScoreRange::new(10.0, 70.0);
const BILIRUBIN_SI: ScoreRange = ScoreRange::new(1.0, 1000.0);
const ALBUMIN_US: ScoreRange = ScoreRange::new(1.0, 7.0);
const BILIRUBIN_US: ScoreRange = ScoreRange::new(0.06, 58.5);

/// Albumin-Bilirubin grade of liver function, independent of the subjective
/// Child-Pugh variables.
pub struct Albi;

impl Calculator for Albi {
    fn id(&self) -> &str {
        "albi"
    }

    fn name(&self) -> &str {
        "ALBI Grade"
    }

    fn desc(&self) -> &str {
        "Albumin-Bilirubin score for objective grading of liver function."
    }

    fn category(&self) -> &str {
        "Hepatology"
    }

    fn tags(&self) -> &[&str] {
        &["liver", "hcc", "laboratory"]
    }

    fn keywords(&self) -> &[&str] {
        &["albumin", "bilirubin", "cirrhosis", "hepatocellular carcinoma"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            vec![
                Field::radio(
                    "units",
                    "Units",
                    &[("si", "SI (g/L, μmol/L)"), ("us", "US (g/dL, mg/dL)")],
                ),
                Field::number("albumin", "Serum albumin")
                    .placeholder("g/L or g/dL"),
                Field::number("bilirubin", "Total bilirubin")
                    .placeholder("μmol/L or mg/dL"),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Values) -> Outcome {
        grade(values).into()
    }

    fn refs(&self) -> &[Reference] {
        static REFS: LazyLock<Vec<Reference>> = LazyLock::new(|| {
            vec![Reference::new(
                "Johnson PJ et al. Assessment of liver function in patients with hepatocellular carcinoma: a new evidence-based approach-the ALBI grade. J Clin Oncol. 2015;33(6):550-558.",
                "https://doi.org/10.1200/JCO.2014.57.9151",
            )]
        });
        &REFS
    }

    fn info(&self) -> Option<&Info> {
        static INFO: LazyLock<Info> = LazyLock::new(|| {
            Info::new(
                "ALBI = (log10 bilirubin [μmol/L] × 0.66) + (albumin [g/L] × −0.0852). \
                 Grade 1: ≤ −2.60; Grade 2: > −2.60 to ≤ −1.39; Grade 3: > −1.39.",
            )
        });
        Some(&INFO)
    }
}

/// ALBI score from SI inputs.
pub fn albi_score(albumin_g_l: f64, bilirubin_umol_l: f64) -> f64 {
    bilirubin_umol_l.log10() * 0.66 + albumin_g_l * -0.0852
}

/// Grade 1-3 for a score; boundaries belong to the better grade.
pub fn albi_grade(score: f64) -> u8 {
    if score <= GRADE_1_MAX {
        1
    } else if score <= GRADE_2_MAX {
        2
    } else {
        3
    }
}

fn grade(values: &Values) -> Result<Report, InputError> {
    let us_units = values.choice("units") == Some("us");

    let (albumin, bilirubin) = if us_units {
        let albumin = values.require_in("albumin", "serum albumin", ALBUMIN_US, "g/dL")?;
        let bilirubin = values.require_in("bilirubin", "total bilirubin", BILIRUBIN_US, "mg/dL")?;
        (albumin * ALBUMIN_US_TO_SI, bilirubin * BILIRUBIN_US_TO_SI)
    } else {
        let albumin = values.require_in("albumin", "serum albumin", ALBUMIN_SI, "g/L")?;
        let bilirubin =
            values.require_in("bilirubin", "total bilirubin", BILIRUBIN_SI, "μmol/L")?;
        (albumin, bilirubin)
    };

    let score = albi_score(albumin, bilirubin);
    let grade = albi_grade(score);
    let (interpretation, severity) = match grade {
        1 => ("Best liver function; well compensated.", Severity::Success),
        2 => ("Intermediate liver function.", Severity::Warning),
        _ => ("Worst liver function; poorly compensated.", Severity::Danger),
    };

    let converted = us_units.then(|| {
        format!(
            "Albumin {} g/L, bilirubin {} μmol/L",
            fixed(albumin, 1),
            fixed(bilirubin, 1)
        )
    });

    Ok(Report::new()
        .row("ALBI Score", fixed(score, 2))
        .row("ALBI Grade", format!("Grade {grade}"))
        .row("Interpretation", interpretation)
        .row_opt("SI Equivalent", converted)
        .severity(severity))
}
