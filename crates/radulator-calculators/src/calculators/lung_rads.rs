use std::sync::LazyLock;

use radulator_core::{Field, Info, InputError, Outcome, Reference, Report, ScoreRange, Severity, Values};

use crate::Calculator;

const DIAMETER_MM: ScoreRange = ScoreRange::new(0.0, 100.0);

/// Lung-RADS v2022 for low-dose CT lung cancer screening.
pub struct LungRads;

impl Calculator for LungRads {
    fn id(&self) -> &str {
        "lung-rads"
    }

    fn name(&self) -> &str {
        "Lung-RADS v2022"
    }

    fn desc(&self) -> &str {
        "Lung CT screening category and management for the dominant nodule."
    }

    fn category(&self) -> &str {
        "Chest"
    }

    fn tags(&self) -> &[&str] {
        &["lung", "ct", "screening", "reporting"]
    }

    fn keywords(&self) -> &[&str] {
        &["LDCT", "pulmonary nodule", "ground glass", "part-solid", "4X"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            vec![
                Field::radio(
                    "exam",
                    "Screening round",
                    &[("baseline", "Baseline"), ("follow_up", "Annual / follow-up")],
                ),
                Field::select(
                    "nodule",
                    "Dominant finding",
                    &[
                        ("incomplete", "Incomplete: comparison or part of lungs unavailable"),
                        ("none", "No nodules"),
                        ("benign", "Nodule with benign calcification or fat"),
                        ("solid", "Solid nodule"),
                        ("part_solid", "Part-solid nodule"),
                        ("ggn", "Ground-glass nodule"),
                    ],
                ),
                Field::number("size", "Mean diameter")
                    .unit("mm")
                    .range(DIAMETER_MM)
                    .show_if(has_measurable_nodule),
                Field::number("solid_component", "Solid component mean diameter")
                    .unit("mm")
                    .range(DIAMETER_MM)
                    .show_if(|v| v.choice("nodule") == Some("part_solid")),
                Field::radio(
                    "change",
                    "Compared with prior",
                    &[("new", "New"), ("growing", "Growing"), ("stable", "Stable")],
                )
                .show_if(|v| has_measurable_nodule(v) && v.choice("exam") == Some("follow_up")),
                Field::checkbox("suspicious", "Additional features suspicious for malignancy")
                    .sub_label("Spiculation, lymphadenopathy, GGN doubling in a year, etc.")
                    .show_if(has_measurable_nodule),
                Field::checkbox("significant", "Other clinically significant finding (S)"),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Values) -> Outcome {
        categorize(values).into()
    }

    fn refs(&self) -> &[Reference] {
        static REFS: LazyLock<Vec<Reference>> = LazyLock::new(|| {
            vec![Reference::new(
                "American College of Radiology. Lung-RADS v2022.",
                "https://www.acr.org/Clinical-Resources/Reporting-and-Data-Systems/Lung-Rads",
            )]
        });
        &REFS
    }

    fn info(&self) -> Option<&Info> {
        static INFO: LazyLock<Info> = LazyLock::new(|| {
            Info::new(
                "Category 3 or 4 findings with additional suspicious features may be upgraded \
                 to 4X. The S modifier flags clinically significant findings unrelated to lung \
                 cancer.",
            )
        });
        Some(&INFO)
    }
}

fn has_measurable_nodule(values: &Values) -> bool {
    matches!(values.choice("nodule"), Some("solid" | "part_solid" | "ggn"))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Change {
    Baseline,
    New,
    Growing,
    Stable,
}

fn solid(size: f64, change: Change) -> &'static str {
    match change {
        Change::Baseline => match size {
            s if s < 6.0 => "2",
            s if s < 8.0 => "3",
            s if s < 15.0 => "4A",
            _ => "4B",
        },
        Change::New => match size {
            s if s < 4.0 => "2",
            s if s < 6.0 => "3",
            s if s < 8.0 => "4A",
            _ => "4B",
        },
        Change::Growing => {
            if size < 8.0 { "4A" } else { "4B" }
        }
        Change::Stable => "2",
    }
}

fn part_solid(size: f64, solid_component: f64, change: Change) -> &'static str {
    match change {
        Change::Baseline => {
            if size < 6.0 {
                "2"
            } else if solid_component < 6.0 {
                "3"
            } else if solid_component < 8.0 {
                "4A"
            } else {
                "4B"
            }
        }
        Change::New if size < 6.0 => "3",
        Change::New | Change::Growing => {
            if solid_component < 4.0 { "4A" } else { "4B" }
        }
        Change::Stable => "2",
    }
}

fn ground_glass(size: f64, change: Change) -> &'static str {
    match change {
        Change::Baseline | Change::New if size >= 30.0 => "3",
        _ => "2",
    }
}

fn categorize(values: &Values) -> Result<Report, InputError> {
    let nodule = values.require_choice("nodule", "Please select the dominant finding.")?;

    let category = match nodule {
        "incomplete" => "0",
        "none" | "benign" => "1",
        "solid" | "part_solid" | "ggn" => {
            let size = values.require_in("size", "the mean diameter", DIAMETER_MM, "mm")?;
            let change = match values.choice("exam") {
                Some("follow_up") => {
                    match values.require_choice(
                        "change",
                        "Please indicate whether the nodule is new, growing or stable.",
                    )? {
                        "new" => Change::New,
                        "growing" => Change::Growing,
                        _ => Change::Stable,
                    }
                }
                _ => Change::Baseline,
            };
            let base = match nodule {
                "solid" => solid(size, change),
                "part_solid" => {
                    let solid_component = values.require_in(
                        "solid_component",
                        "the solid component diameter",
                        DIAMETER_MM,
                        "mm",
                    )?;
                    if solid_component > size {
                        return Err(InputError::invalid(
                            "Solid component cannot exceed the total nodule diameter.",
                        ));
                    }
                    part_solid(size, solid_component, change)
                }
                _ => ground_glass(size, change),
            };
            if values.flag("suspicious") && matches!(base, "3" | "4A" | "4B") {
                "4X"
            } else {
                base
            }
        }
        other => return Err(InputError::invalid(format!("Unknown finding: {other}."))),
    };

    let (description, malignancy, management, severity) = match category {
        "0" => (
            "Incomplete",
            "n/a",
            "Obtain prior CT for comparison or additional screening imaging.",
            Severity::Info,
        ),
        "1" => (
            "Negative",
            "< 1%",
            "Continue annual screening with LDCT in 12 months.",
            Severity::Success,
        ),
        "2" => (
            "Benign appearance or behavior",
            "< 1%",
            "Continue annual screening with LDCT in 12 months.",
            Severity::Success,
        ),
        "3" => (
            "Probably benign",
            "1-2%",
            "LDCT in 6 months.",
            Severity::Warning,
        ),
        "4A" => (
            "Suspicious",
            "5-15%",
            "LDCT in 3 months; PET/CT may be considered if there is a ≥ 8 mm solid component.",
            Severity::Danger,
        ),
        _ => (
            "Very suspicious",
            "> 15%",
            "Diagnostic chest CT with or without contrast; PET/CT and/or tissue sampling depending on the probability of malignancy.",
            Severity::Danger,
        ),
    };

    let modifier = if values.flag("significant") { "S" } else { "" };

    Ok(Report::new()
        .row("Lung-RADS Category", format!("Lung-RADS {category}{modifier}"))
        .row("Description", description)
        .row("Probability of Malignancy", malignancy)
        .row("Management", management)
        .row_opt(
            "S Modifier",
            values
                .flag("significant")
                .then_some("Clinically significant or potentially significant non-lung-cancer finding."),
        )
        .severity(severity))
}
