use std::sync::LazyLock;

use radulator_core::{Field, InputError, Outcome, Reference, Report, ScoreRange, Severity, Values};

use crate::scoring::fixed;
use crate::Calculator;

const DIMENSION_CM: ScoreRange = ScoreRange::new(0.5, 15.0);
const PSA: ScoreRange = ScoreRange::new(0.0, 1000.0);

const ELLIPSOID: f64 = 0.52;
const DENSITY_CUTOFF: f64 = 0.15;

/// Prostate volume by the ellipsoid formula and PSA density.
pub struct ProstateVolume;

impl Calculator for ProstateVolume {
    fn id(&self) -> &str {
        "prostate-volume"
    }

    fn name(&self) -> &str {
        "Prostate Volume & PSA Density"
    }

    fn desc(&self) -> &str {
        "Ellipsoid prostate volume and PSA density from three orthogonal dimensions."
    }

    fn category(&self) -> &str {
        "Genitourinary"
    }

    fn tags(&self) -> &[&str] {
        &["prostate", "mri", "ultrasound", "volume"]
    }

    fn keywords(&self) -> &[&str] {
        &["PSAD", "ellipsoid", "gland volume"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            vec![
                Field::number("length", "Length (craniocaudal)")
                    .unit("cm")
                    .range(DIMENSION_CM),
                Field::number("height", "Height (anteroposterior)")
                    .unit("cm")
                    .range(DIMENSION_CM),
                Field::number("width", "Width (transverse)")
                    .unit("cm")
                    .range(DIMENSION_CM),
                Field::number("psa", "PSA")
                    .sub_label("Optional, for PSA density")
                    .unit("ng/mL")
                    .range(PSA),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Values) -> Outcome {
        volume(values).into()
    }

    fn refs(&self) -> &[Reference] {
        static REFS: LazyLock<Vec<Reference>> = LazyLock::new(|| {
            vec![Reference::new(
                "Benson MC et al. Prostate specific antigen density: a means of distinguishing benign prostatic hypertrophy and prostate cancer. J Urol. 1992;147(3 Pt 2):815-816.",
                "https://doi.org/10.1016/s0022-5347(17)37393-7",
            )]
        });
        &REFS
    }
}

fn volume(values: &Values) -> Result<Report, InputError> {
    let length = values.require_in("length", "the length", DIMENSION_CM, "cm")?;
    let height = values.require_in("height", "the height", DIMENSION_CM, "cm")?;
    let width = values.require_in("width", "the width", DIMENSION_CM, "cm")?;
    let psa = values.optional_in("psa", "PSA", PSA, "ng/mL")?;

    let volume = length * height * width * ELLIPSOID;
    let density = psa.map(|psa| psa / volume);

    let severity = match density {
        Some(d) if d >= DENSITY_CUTOFF => Severity::Warning,
        Some(_) => Severity::Success,
        None => Severity::Info,
    };
    let interpretation = density.map(|d| {
        if d < DENSITY_CUTOFF {
            "Normal (< 0.15 ng/mL/cc)"
        } else {
            "Elevated (≥ 0.15 ng/mL/cc)"
        }
    });

    Ok(Report::new()
        .row("Prostate Volume", format!("{} mL", fixed(volume, 2)))
        .row_opt("PSA Density", density.map(|d| format!("{} ng/mL/cc", fixed(d, 3))))
        .row_opt("Interpretation", interpretation)
        .severity(severity))
}
