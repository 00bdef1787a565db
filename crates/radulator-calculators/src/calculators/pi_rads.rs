use std::sync::LazyLock;

use radulator_core::{Field, Info, InputError, Outcome, Reference, Report, Severity, Values};

use crate::Calculator;

const SCORES: &[(&str, &str)] = &[("1", "1"), ("2", "2"), ("3", "3"), ("4", "4"), ("5", "5")];

/// PI-RADS v2.1 assessment of a prostate MRI lesion.
pub struct PiRads;

impl Calculator for PiRads {
    fn id(&self) -> &str {
        "pi-rads"
    }

    fn name(&self) -> &str {
        "PI-RADS v2.1"
    }

    fn desc(&self) -> &str {
        "Prostate Imaging Reporting and Data System overall assessment category."
    }

    fn category(&self) -> &str {
        "Genitourinary"
    }

    fn tags(&self) -> &[&str] {
        &["prostate", "mri", "reporting", "oncology"]
    }

    fn keywords(&self) -> &[&str] {
        &["DWI", "T2W", "DCE", "peripheral zone", "transition zone", "csPCa"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            vec![
                Field::radio(
                    "zone",
                    "Lesion location",
                    &[("pz", "Peripheral zone"), ("tz", "Transition zone")],
                ),
                Field::select("t2", "T2W score", SCORES),
                Field::select("dwi", "DWI score", SCORES),
                Field::radio(
                    "dce",
                    "DCE",
                    &[("negative", "Negative"), ("positive", "Positive")],
                )
                .show_if(|v| v.choice("zone") == Some("pz")),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Values) -> Outcome {
        assess(values).into()
    }

    fn refs(&self) -> &[Reference] {
        static REFS: LazyLock<Vec<Reference>> = LazyLock::new(|| {
            vec![Reference::new(
                "Turkbey B et al. Prostate Imaging Reporting and Data System Version 2.1: 2019 Update of Prostate Imaging Reporting and Data System Version 2. Eur Urol. 2019;76(3):340-351.",
                "https://doi.org/10.1016/j.eururo.2019.02.033",
            )]
        });
        &REFS
    }

    fn info(&self) -> Option<&Info> {
        static INFO: LazyLock<Info> = LazyLock::new(|| {
            Info::new(
                "DWI is dominant in the peripheral zone and T2W in the transition zone. DCE only \
                 upgrades a peripheral zone DWI score of 3.",
            )
            .link("ACR PI-RADS", "https://www.acr.org/Clinical-Resources/Reporting-and-Data-Systems/PI-RADS")
        });
        Some(&INFO)
    }
}

fn score(values: &Values, id: &str, name: &str) -> Result<u8, InputError> {
    let answer = values.require_choice(id, &format!("Please select the {name} score."))?;
    match answer.parse::<u8>() {
        Ok(n @ 1..=5) => Ok(n),
        _ => Err(InputError::invalid(format!("Unknown {name} score: {answer}."))),
    }
}

/// Overall category from the dominant sequence and its modifiers.
pub fn pi_rads_category(peripheral: bool, t2: u8, dwi: u8, dce_positive: bool) -> u8 {
    if peripheral {
        if dwi == 3 && dce_positive { 4 } else { dwi }
    } else {
        match (t2, dwi) {
            (2, 4..) => 3,
            (3, 5) => 4,
            _ => t2,
        }
    }
}

fn assess(values: &Values) -> Result<Report, InputError> {
    let zone = values.require_choice("zone", "Please select the lesion location.")?;
    let peripheral = match zone {
        "pz" => true,
        "tz" => false,
        other => return Err(InputError::invalid(format!("Unknown zone: {other}."))),
    };
    let t2 = score(values, "t2", "T2W")?;
    let dwi = score(values, "dwi", "DWI")?;
    let dce_positive = values.choice("dce") == Some("positive");

    let category = pi_rads_category(peripheral, t2, dwi, dce_positive);
    let (likelihood, severity) = match category {
        1 => ("Very low (clinically significant cancer highly unlikely)", Severity::Success),
        2 => ("Low (clinically significant cancer unlikely)", Severity::Success),
        3 => ("Intermediate (equivocal)", Severity::Warning),
        4 => ("High (clinically significant cancer likely)", Severity::Danger),
        _ => ("Very high (clinically significant cancer highly likely)", Severity::Danger),
    };

    let dominant = if peripheral { "DWI (peripheral zone)" } else { "T2W (transition zone)" };

    Ok(Report::new()
        .row("PI-RADS Category", format!("PI-RADS {category}"))
        .row("Likelihood", likelihood)
        .row("Dominant Sequence", dominant)
        .severity(severity))
}
