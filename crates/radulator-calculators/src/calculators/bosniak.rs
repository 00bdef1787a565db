use std::sync::LazyLock;

use radulator_core::{Field, Info, InputError, Outcome, Reference, Report, Severity, Values};

use crate::scoring::{answered_yes, YES_NO};
use crate::Calculator;

/// Bosniak classification of cystic renal masses, version 2019 (CT).
pub struct Bosniak;

impl Calculator for Bosniak {
    fn id(&self) -> &str {
        "bosniak"
    }

    fn name(&self) -> &str {
        "Bosniak Classification (2019)"
    }

    fn desc(&self) -> &str {
        "Categorize cystic renal masses on contrast-enhanced CT by the Bosniak 2019 update."
    }

    fn category(&self) -> &str {
        "Genitourinary"
    }

    fn tags(&self) -> &[&str] {
        &["kidney", "ct", "cyst", "reporting"]
    }

    fn keywords(&self) -> &[&str] {
        &["renal cyst", "cystic renal mass", "IIF", "septa"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            vec![
                Field::radio(
                    "soft_tissue",
                    "Enhancing soft-tissue component?",
                    YES_NO,
                )
                .sub_label("Enhancing nodule ≥ 4 mm with convex margins, or any size with obtuse margins"),
                Field::radio(
                    "wall",
                    "Thickest wall or septum",
                    &[
                        ("thin", "Thin (≤ 2 mm) and smooth"),
                        ("minimal", "Minimally thickened (3 mm) and smooth"),
                        ("thick", "Thickened (≥ 4 mm)"),
                        ("irregular", "Irregular (≤ 3 mm obtuse protrusion)"),
                    ],
                )
                .show_if(|v| !answered_yes(v, "soft_tissue")),
                Field::radio(
                    "septa",
                    "Number of septa",
                    &[
                        ("none", "None"),
                        ("few", "Few (1-3)"),
                        ("many", "Many (≥ 4)"),
                    ],
                )
                .show_if(|v| !answered_yes(v, "soft_tissue")),
                Field::radio("enhancement", "Do the wall or septa enhance?", YES_NO)
                    .show_if(|v| !answered_yes(v, "soft_tissue")),
                Field::radio(
                    "attenuation",
                    "Content attenuation",
                    &[
                        ("simple", "Simple fluid (-9 to 20 HU)"),
                        ("hyperattenuating", "Homogeneous ≥ 70 HU on unenhanced CT"),
                        ("high_nonenhancing", "Homogeneous > 20 HU, non-enhancing"),
                    ],
                )
                .show_if(|v| !answered_yes(v, "soft_tissue")),
                Field::checkbox("calcification", "Calcification present")
                    .show_if(|v| !answered_yes(v, "soft_tissue")),
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
                "Silverman SG et al. Bosniak Classification of Cystic Renal Masses, Version 2019: An Update Proposal and Needs Assessment. Radiology. 2019;292(2):475-488.",
                "https://doi.org/10.1148/radiol.2019182646",
            )]
        });
        &REFS
    }

    fn info(&self) -> Option<&Info> {
        static INFO: LazyLock<Info> = LazyLock::new(|| {
            Info::new(
                "An enhancing soft-tissue component makes the mass Bosniak IV regardless of \
                 any other feature. Otherwise the most complex wall or septum decides.",
            )
        });
        Some(&INFO)
    }
}

/// Bosniak class as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BosniakClass {
    I,
    II,
    IIF,
    III,
    IV,
}

impl BosniakClass {
    pub fn label(self) -> &'static str {
        match self {
            BosniakClass::I => "I",
            BosniakClass::II => "II",
            BosniakClass::IIF => "IIF",
            BosniakClass::III => "III",
            BosniakClass::IV => "IV",
        }
    }
}

/// Decision tree over the answers. Soft tissue dominates everything else.
pub fn bosniak_class(values: &Values) -> Result<BosniakClass, InputError> {
    if answered_yes(values, "soft_tissue") {
        return Ok(BosniakClass::IV);
    }

    let wall = values.require_choice(
        "wall",
        "Please select the thickness of the thickest wall or septum.",
    )?;
    let enhancing = answered_yes(values, "enhancement");
    let septa = values.choice("septa").unwrap_or("none");
    let attenuation = values.choice("attenuation").unwrap_or("simple");

    let class = match wall {
        "thick" | "irregular" if enhancing => BosniakClass::III,
        "thick" | "irregular" => BosniakClass::IIF,
        "minimal" if enhancing => BosniakClass::IIF,
        _ if septa == "many" && enhancing => BosniakClass::IIF,
        _ if septa != "none"
            || attenuation != "simple"
            || values.flag("calcification")
            || wall == "minimal" =>
        {
            BosniakClass::II
        }
        _ => BosniakClass::I,
    };
    Ok(class)
}

fn classify(values: &Values) -> Result<Report, InputError> {
    let class = bosniak_class(values)?;
    let (description, management, malignancy, severity) = match class {
        BosniakClass::I => (
            "Simple cyst: thin smooth wall, simple fluid, no septa or calcification.",
            "No follow-up.",
            "~0%",
            Severity::Success,
        ),
        BosniakClass::II => (
            "Benign minimally complex cyst.",
            "No follow-up.",
            "~0%",
            Severity::Success,
        ),
        BosniakClass::IIF => (
            "Probably benign; minimally thickened or numerous enhancing septa.",
            "Follow-up CT or MRI at 6 months, 12 months, then annually for 5 years.",
            "~10%",
            Severity::Warning,
        ),
        BosniakClass::III => (
            "Indeterminate: enhancing thick or irregular wall or septa.",
            "Surgical excision or active surveillance.",
            "~50%",
            Severity::Danger,
        ),
        BosniakClass::IV => (
            "Enhancing soft-tissue component.",
            "Surgical excision or ablation.",
            "~90%",
            Severity::Danger,
        ),
    };

    Ok(Report::new()
        .row("Bosniak Category", format!("Bosniak {}", class.label()))
        .row("Description", description)
        .row("Likelihood of Malignancy", malignancy)
        .row("Management", management)
        .severity(severity))
}
