use std::sync::LazyLock;

use radulator_core::{Field, InputError, Outcome, Reference, Report, ScoreRange, Severity, Values};

use crate::scoring::fixed;
use crate::Calculator;

const SIGNAL: ScoreRange = ScoreRange::new(0.0, 100_000.0);

/// Chemical shift MRI of an adrenal nodule: signal intensity index, and the
/// adrenal-to-spleen ratio when splenic signal is given.
pub struct AdrenalMri;

impl Calculator for AdrenalMri {
    fn id(&self) -> &str {
        "adrenal-mri"
    }

    fn name(&self) -> &str {
        "Adrenal MRI Chemical Shift"
    }

    fn desc(&self) -> &str {
        "Signal intensity index and adrenal-to-spleen ratio on in- and opposed-phase MRI."
    }

    fn category(&self) -> &str {
        "Abdominal"
    }

    fn tags(&self) -> &[&str] {
        &["adrenal", "mri", "incidentaloma"]
    }

    fn keywords(&self) -> &[&str] {
        &["SII", "ASR", "opposed-phase", "out-of-phase", "adenoma"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            vec![
                Field::number("in_phase", "Adrenal in-phase signal").range(SIGNAL),
                Field::number("out_phase", "Adrenal opposed-phase signal").range(SIGNAL),
                Field::number("spleen_in", "Spleen in-phase signal")
                    .sub_label("Optional")
                    .range(SIGNAL),
                Field::number("spleen_out", "Spleen opposed-phase signal")
                    .sub_label("Optional")
                    .range(SIGNAL),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Values) -> Outcome {
        chemical_shift(values).into()
    }

    fn refs(&self) -> &[Reference] {
        static REFS: LazyLock<Vec<Reference>> = LazyLock::new(|| {
            vec![Reference::new(
                "Adam SZ et al. Chemical Shift MR Imaging of the Adrenal Gland: Principles, Pitfalls, and Applications. RadioGraphics. 2016;36(2):414-432.",
                "https://doi.org/10.1148/rg.2016150139",
            )]
        });
        &REFS
    }
}

fn chemical_shift(values: &Values) -> Result<Report, InputError> {
    let in_phase = values.require_in("in_phase", "adrenal in-phase signal", SIGNAL, "")?;
    let out_phase = values.require_in("out_phase", "adrenal opposed-phase signal", SIGNAL, "")?;
    if in_phase == 0.0 || out_phase == 0.0 {
        return Err(InputError::invalid(
            "Adrenal signal intensities must be greater than zero.",
        ));
    }

    let sii = (in_phase - out_phase) / in_phase * 100.0;
    let ratio = in_phase / out_phase;

    let spleen_in = values.optional_in("spleen_in", "Spleen in-phase signal", SIGNAL, "")?;
    let spleen_out = values.optional_in("spleen_out", "Spleen opposed-phase signal", SIGNAL, "")?;
    let asr = match (spleen_in, spleen_out) {
        (Some(si), Some(so)) if si > 0.0 && so > 0.0 => {
            Some((out_phase / so) / (in_phase / si))
        }
        (Some(_), Some(_)) => {
            return Err(InputError::invalid(
                "Splenic signal intensities must be greater than zero.",
            ));
        }
        _ => None,
    };

    let adenoma = sii > 16.5 || asr.is_some_and(|a| a < 0.71);
    let (interpretation, severity) = if adenoma {
        ("Consistent with lipid-rich adenoma.", Severity::Success)
    } else {
        (
            "Does not meet criteria for lipid-rich adenoma (SII > 16.5% or ASR < 0.71).",
            Severity::Warning,
        )
    };

    Ok(Report::new()
        .row("Signal Intensity Index (%)", fixed(sii, 2))
        .row("In/Opposed-Phase Ratio", fixed(ratio, 3))
        .row_opt("Adrenal-to-Spleen Ratio", asr.map(|a| fixed(a, 3)))
        .row("Interpretation", interpretation)
        .severity(severity))
}
