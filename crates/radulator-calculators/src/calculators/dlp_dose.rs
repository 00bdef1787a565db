use std::sync::LazyLock;

use radulator_core::{Field, Info, InputError, Outcome, Reference, Report, ScoreRange, Severity, Values};

use crate::scoring::fixed;
use crate::Calculator;

const DLP: ScoreRange = ScoreRange::new(0.0, 50_000.0);

/// Annual natural background dose used for the comparison row, mSv.
const BACKGROUND_MSV_PER_YEAR: f64 = 3.0;

const REGIONS: &[(&str, &str)] = &[
    ("head", "Head"),
    ("head_neck", "Head & neck"),
    ("neck", "Neck"),
    ("chest", "Chest"),
    ("abdomen_pelvis", "Abdomen & pelvis"),
    ("trunk", "Chest, abdomen & pelvis"),
];

const AGES: &[(&str, &str)] = &[
    ("adult", "Adult"),
    ("10y", "10 years"),
    ("5y", "5 years"),
    ("1y", "1 year"),
    ("0y", "Newborn"),
];

/// Effective dose from the scanner-reported dose-length product using the
/// AAPM Report 96 conversion coefficients.
pub struct DlpDose;

impl Calculator for DlpDose {
    fn id(&self) -> &str {
        "dlp-dose"
    }

    fn name(&self) -> &str {
        "CT Effective Dose (DLP)"
    }

    fn desc(&self) -> &str {
        "Estimate CT effective dose in mSv from the dose-length product."
    }

    fn category(&self) -> &str {
        "Radiation Safety"
    }

    fn tags(&self) -> &[&str] {
        &["ct", "dose", "radiation"]
    }

    fn keywords(&self) -> &[&str] {
        &["DLP", "mSv", "k-factor", "effective dose"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            vec![
                Field::number("dlp", "Dose-length product")
                    .unit("mGy·cm")
                    .range(DLP),
                Field::select("region", "Body region", REGIONS),
                Field::select("age", "Patient age", AGES),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Values) -> Outcome {
        estimate(values).into()
    }

    fn refs(&self) -> &[Reference] {
        static REFS: LazyLock<Vec<Reference>> = LazyLock::new(|| {
            vec![Reference::new(
                "AAPM Report No. 96. The Measurement, Reporting, and Management of Radiation Dose in CT. American Association of Physicists in Medicine; 2008.",
                "https://www.aapm.org/pubs/reports/RPT_96.pdf",
            )]
        });
        &REFS
    }

    fn info(&self) -> Option<&Info> {
        static INFO: LazyLock<Info> = LazyLock::new(|| {
            Info::new(
                "Effective dose = DLP × k. The k-factor depends on body region and age; \
                 the result is a population estimate, not a patient-specific dose.",
            )
        });
        Some(&INFO)
    }
}

/// Conversion coefficient in mSv/(mGy·cm).
pub fn k_factor(region: &str, age: &str) -> Option<f64> {
    // Columns: newborn, 1 y, 5 y, 10 y, adult.
    let row: [f64; 5] = match region {
        "head_neck" => [0.013, 0.0085, 0.0057, 0.0042, 0.0031],
        "head" => [0.011, 0.0067, 0.0040, 0.0032, 0.0021],
        "neck" => [0.017, 0.012, 0.011, 0.0079, 0.0059],
        "chest" => [0.039, 0.026, 0.018, 0.013, 0.014],
        "abdomen_pelvis" => [0.049, 0.030, 0.020, 0.015, 0.015],
        "trunk" => [0.044, 0.028, 0.019, 0.014, 0.015],
        _ => return None,
    };
    let column = match age {
        "0y" => 0,
        "1y" => 1,
        "5y" => 2,
        "10y" => 3,
        "adult" => 4,
        _ => return None,
    };
    Some(row[column])
}

fn estimate(values: &Values) -> Result<Report, InputError> {
    let dlp = values.require_in("dlp", "the dose-length product", DLP, "mGy·cm")?;
    let region = values.require_choice("region", "Please select the body region.")?;
    let age = values.choice("age").unwrap_or("adult");
    let k = k_factor(region, age)
        .ok_or_else(|| InputError::invalid(format!("No conversion factor for {region} / {age}.")))?;

    let dose = dlp * k;
    let background_days = dose / BACKGROUND_MSV_PER_YEAR * 365.0;

    let severity = if dose < 1.0 {
        Severity::Success
    } else if dose < 10.0 {
        Severity::Info
    } else {
        Severity::Warning
    };

    Ok(Report::new()
        .row("Effective Dose", format!("{} mSv", fixed(dose, 2)))
        .row("k-factor", format!("{k} mSv/(mGy·cm)"))
        .row(
            "Background Equivalent",
            format!("~{} days of natural background radiation", background_days.round()),
        )
        .severity(severity))
}
