use std::sync::LazyLock;

use radulator_core::{Field, Info, InputError, Outcome, Reference, Report, ScoreRange, Severity, Values};

use crate::scoring::YES_NO;
use crate::Calculator;

const SIZE_MM: ScoreRange = ScoreRange::new(1.0, 300.0);

/// LI-RADS v2018 diagnostic category for CT/MRI in patients at risk for HCC.
pub struct LiRads;

impl Calculator for LiRads {
    fn id(&self) -> &str {
        "li-rads"
    }

    fn name(&self) -> &str {
        "LI-RADS v2018 (CT/MRI)"
    }

    fn desc(&self) -> &str {
        "Liver Imaging Reporting and Data System diagnostic category for CT and MRI."
    }

    fn category(&self) -> &str {
        "Hepatology"
    }

    fn tags(&self) -> &[&str] {
        &["liver", "hcc", "reporting", "ct", "mri"]
    }

    fn keywords(&self) -> &[&str] {
        &["APHE", "washout", "capsule", "threshold growth", "ancillary features"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            vec![
                Field::checkbox("not_categorizable", "Image degradation or omission (LR-NC)"),
                Field::checkbox("tumor_in_vein", "Unequivocal enhancing soft tissue in vein (LR-TV)")
                    .show_if(|v| !v.flag("not_categorizable")),
                Field::radio(
                    "benign",
                    "Benign appearance",
                    &[
                        ("none", "Neither"),
                        ("definite", "Definitely benign (LR-1)"),
                        ("probable", "Probably benign (LR-2)"),
                    ],
                )
                .show_if(precedence_open),
                Field::checkbox("lr_m", "Targetoid or other LR-M features")
                    .show_if(|v| precedence_open(v) && !benign_answer(v)),
                Field::number("size", "Observation size")
                    .unit("mm")
                    .range(SIZE_MM)
                    .show_if(table_applies),
                Field::radio("aphe", "Nonrim arterial phase hyperenhancement (APHE)", YES_NO)
                    .show_if(table_applies),
                Field::checkbox("washout", "Nonperipheral washout").show_if(table_applies),
                Field::checkbox("capsule", "Enhancing capsule").show_if(table_applies),
                Field::checkbox("growth", "Threshold growth").show_if(table_applies),
                Field::checkbox("af_malignancy", "Ancillary features favoring malignancy")
                    .show_if(table_applies),
                Field::checkbox("af_benignity", "Ancillary features favoring benignity")
                    .show_if(table_applies),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Values) -> Outcome {
        categorize(values).into()
    }

    fn refs(&self) -> &[Reference] {
        static REFS: LazyLock<Vec<Reference>> = LazyLock::new(|| {
            vec![
                Reference::new(
                    "American College of Radiology. CT/MRI LI-RADS v2018 Core.",
                    "https://www.acr.org/Clinical-Resources/Reporting-and-Data-Systems/LI-RADS/CT-MRI-LI-RADS-v2018",
                ),
                Reference::new(
                    "Chernyak V et al. Liver Imaging Reporting and Data System (LI-RADS) Version 2018: Imaging of Hepatocellular Carcinoma in At-Risk Patients. Radiology. 2018;289(3):816-830.",
                    "https://doi.org/10.1148/radiol.2018181494",
                ),
            ]
        });
        &REFS
    }

    fn info(&self) -> Option<&Info> {
        static INFO: LazyLock<Info> = LazyLock::new(|| {
            Info::new(
                "Ancillary features may adjust the category by one step. Features favoring \
                 malignancy cannot upgrade to LR-5; when features favoring both malignancy and \
                 benignity are present, no adjustment is made.",
            )
        });
        Some(&INFO)
    }
}

fn precedence_open(values: &Values) -> bool {
    !values.flag("not_categorizable") && !values.flag("tumor_in_vein")
}

fn benign_answer(values: &Values) -> bool {
    matches!(values.choice("benign"), Some("definite" | "probable"))
}

fn table_applies(values: &Values) -> bool {
    precedence_open(values) && !benign_answer(values) && !values.flag("lr_m")
}

/// LR-3 .. LR-5 from the diagnostic table.
fn table_category(size_mm: f64, aphe: bool, washout: bool, capsule: bool, growth: bool) -> u8 {
    let features = [washout, capsule, growth].iter().filter(|f| **f).count();
    if !aphe {
        return if features >= 2 || (size_mm >= 20.0 && features >= 1) { 4 } else { 3 };
    }
    if size_mm < 10.0 {
        if features == 0 { 3 } else { 4 }
    } else if size_mm < 20.0 {
        match features {
            0 => 3,
            // a single enhancing capsule stays LR-4
            1 if capsule => 4,
            _ => 5,
        }
    } else if features == 0 {
        4
    } else {
        5
    }
}

/// Ancillary feature adjustment: one step at most, never upgrading into LR-5,
/// and no change when the two kinds conflict.
fn adjust(category: u8, favors_malignancy: bool, favors_benignity: bool) -> u8 {
    match (favors_malignancy, favors_benignity) {
        (true, false) if category < 4 => category + 1,
        (false, true) if category > 1 => category - 1,
        _ => category,
    }
}

fn categorize(values: &Values) -> Result<Report, InputError> {
    if values.flag("not_categorizable") {
        return Ok(summary(
            "LR-NC",
            "Not categorizable due to image degradation or omission.",
            "Repeat or alternative diagnostic imaging in ≤ 3 months.",
            Severity::Info,
        ));
    }
    if values.flag("tumor_in_vein") {
        return Ok(summary(
            "LR-TV",
            "Tumor in vein.",
            "Multidisciplinary discussion; may need biopsy.",
            Severity::Danger,
        ));
    }
    match values.choice("benign") {
        Some("definite") => {
            return Ok(summary(
                "LR-1",
                "Definitely benign.",
                "Return to surveillance in 6 months.",
                Severity::Success,
            ));
        }
        Some("probable") => {
            return Ok(summary(
                "LR-2",
                "Probably benign.",
                "Return to surveillance in 6 months.",
                Severity::Success,
            ));
        }
        _ => {}
    }
    if values.flag("lr_m") {
        return Ok(summary(
            "LR-M",
            "Probably or definitely malignant, not HCC specific.",
            "Multidisciplinary discussion; often biopsy.",
            Severity::Danger,
        ));
    }

    let size = values.require_in("size", "the observation size", SIZE_MM, "mm")?;
    let aphe = values.require_choice(
        "aphe",
        "Please indicate whether nonrim APHE is present.",
    )? == "yes";
    let washout = values.flag("washout");
    let capsule = values.flag("capsule");
    let growth = values.flag("growth");

    let base = table_category(size, aphe, washout, capsule, growth);
    let final_category = adjust(base, values.flag("af_malignancy"), values.flag("af_benignity"));

    let (description, management, severity) = match final_category {
        1 => ("Definitely benign.", "Return to surveillance in 6 months.", Severity::Success),
        2 => ("Probably benign.", "Return to surveillance in 6 months.", Severity::Success),
        3 => (
            "Intermediate probability of malignancy.",
            "Repeat or alternative diagnostic imaging in 3-6 months.",
            Severity::Warning,
        ),
        4 => (
            "Probably HCC.",
            "Multidisciplinary discussion; repeat imaging in ≤ 3 months or biopsy.",
            Severity::Danger,
        ),
        _ => (
            "Definitely HCC.",
            "Multidisciplinary discussion for consensus management.",
            Severity::Danger,
        ),
    };

    let adjustment = match final_category.cmp(&base) {
        std::cmp::Ordering::Greater => Some(format!("Upgraded from LR-{base} by ancillary features")),
        std::cmp::Ordering::Less => Some(format!("Downgraded from LR-{base} by ancillary features")),
        std::cmp::Ordering::Equal => None,
    };

    Ok(Report::new()
        .row("LI-RADS Category", format!("LR-{final_category}"))
        .row("Description", description)
        .row("Management", management)
        .row_opt("Ancillary Adjustment", adjustment)
        .severity(severity))
}

fn summary(category: &str, description: &str, management: &str, severity: Severity) -> Report {
    Report::new()
        .row("LI-RADS Category", category)
        .row("Description", description)
        .row("Management", management)
        .severity(severity)
}
