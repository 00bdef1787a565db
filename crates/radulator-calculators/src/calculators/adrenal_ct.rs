use std::sync::LazyLock;

use radulator_core::{Field, InputError, Outcome, Reference, Report, ScoreRange, Severity, Values};

use crate::scoring::fixed;
use crate::Calculator;

const HU: ScoreRange = ScoreRange::new(-200.0, 600.0);

/// Adrenal protocol CT washout.
/// Absolute washout needs the unenhanced phase; relative washout does not.
pub struct AdrenalCt;

impl Calculator for AdrenalCt {
    fn id(&self) -> &str {
        "adrenal-ct"
    }

    fn name(&self) -> &str {
        "Adrenal Washout CT"
    }

    fn desc(&self) -> &str {
        "Absolute and relative washout of an adrenal nodule on protocol CT."
    }

    fn category(&self) -> &str {
        "Abdominal"
    }

    fn tags(&self) -> &[&str] {
        &["adrenal", "ct", "incidentaloma"]
    }

    fn keywords(&self) -> &[&str] {
        &["adenoma", "washout", "APW", "RPW"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            vec![
                Field::number("unenh", "Unenhanced attenuation")
                    .sub_label("Optional; required for absolute washout")
                    .unit("HU")
                    .range(HU),
                Field::number("portal", "Portal venous attenuation")
                    .sub_label("~60-75 s after contrast")
                    .unit("HU")
                    .range(HU),
                Field::number("delayed", "Delayed attenuation")
                    .sub_label("15 minutes after contrast")
                    .unit("HU")
                    .range(HU),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Values) -> Outcome {
        washout(values).into()
    }

    fn refs(&self) -> &[Reference] {
        static REFS: LazyLock<Vec<Reference>> = LazyLock::new(|| {
            vec![
                Reference::new(
                    "Mayo-Smith WW et al. Management of Incidental Adrenal Masses: A White Paper of the ACR Incidental Findings Committee. J Am Coll Radiol. 2017;14(8):1038-1044.",
                    "https://doi.org/10.1016/j.jacr.2017.05.001",
                ),
                Reference::new(
                    "Caoili EM et al. Adrenal masses: characterization with combined unenhanced and delayed enhanced CT. Radiology. 2002;222(3):629-633.",
                    "https://doi.org/10.1148/radiol.2223010766",
                ),
            ]
        });
        &REFS
    }
}

fn washout(values: &Values) -> Result<Report, InputError> {
    let unenhanced = values.optional_in("unenh", "Unenhanced attenuation", HU, "HU")?;
    let portal = values.require_in("portal", "portal venous attenuation", HU, "HU")?;
    let delayed = values.require_in("delayed", "delayed attenuation", HU, "HU")?;

    if portal == 0.0 {
        return Err(InputError::invalid(
            "Portal venous attenuation must not be 0 HU.",
        ));
    }
    if unenhanced == Some(portal) {
        return Err(InputError::invalid(
            "Portal venous and unenhanced attenuation must differ.",
        ));
    }

    let relative = (portal - delayed) / portal * 100.0;
    let absolute = unenhanced.map(|u| (portal - delayed) / (portal - u) * 100.0);

    let (interpretation, severity) = match (unenhanced, absolute) {
        (Some(u), _) if u <= 10.0 => (
            "Lipid-rich adenoma (unenhanced attenuation ≤ 10 HU).",
            Severity::Success,
        ),
        // With an unenhanced phase both washout thresholds must be met.
        (_, Some(a)) if a >= 60.0 && relative >= 40.0 => {
            ("Consistent with adenoma.", Severity::Success)
        }
        (None, None) if relative >= 40.0 => ("Consistent with adenoma.", Severity::Success),
        _ => (
            "Indeterminate: washout below adenoma thresholds (absolute ≥ 60%, relative ≥ 40%).",
            Severity::Warning,
        ),
    };

    Ok(Report::new()
        .row_opt("Absolute Washout (%)", absolute.map(|a| fixed(a, 1)))
        .row("Relative Washout (%)", fixed(relative, 1))
        .row("Interpretation", interpretation)
        .severity(severity))
}
