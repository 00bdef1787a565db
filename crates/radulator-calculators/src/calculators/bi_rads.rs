use std::sync::LazyLock;

use radulator_core::{Field, InputError, Outcome, Reference, Report, Severity, Values};

use crate::Calculator;

/// ACR BI-RADS final assessment category (5th edition).
pub struct BiRads;

impl Calculator for BiRads {
    fn id(&self) -> &str {
        "bi-rads"
    }

    fn name(&self) -> &str {
        "BI-RADS Assessment"
    }

    fn desc(&self) -> &str {
        "Breast imaging final assessment category with management and likelihood of malignancy."
    }

    fn category(&self) -> &str {
        "Breast"
    }

    fn tags(&self) -> &[&str] {
        &["breast", "mammography", "reporting"]
    }

    fn keywords(&self) -> &[&str] {
        &["birads", "ACR", "ultrasound", "density"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            vec![
                Field::radio(
                    "complete",
                    "Is the evaluation complete?",
                    &[
                        ("yes", "Yes"),
                        ("no", "No - additional imaging or prior comparison needed"),
                    ],
                ),
                Field::radio(
                    "finding",
                    "Overall finding",
                    &[
                        ("none", "Negative - nothing to comment on"),
                        ("benign", "Benign finding"),
                        ("probably_benign", "Probably benign finding"),
                        ("suspicious", "Suspicious abnormality"),
                        ("highly_suggestive", "Highly suggestive of malignancy"),
                        ("known_malignancy", "Known biopsy-proven malignancy"),
                    ],
                )
                .show_if(|v| v.choice("complete") != Some("no")),
                Field::radio(
                    "suspicion",
                    "Level of suspicion",
                    &[
                        ("low", "Low (>2% to ≤10%)"),
                        ("moderate", "Moderate (>10% to ≤50%)"),
                        ("high", "High (>50% to <95%)"),
                    ],
                )
                .show_if(|v| {
                    v.choice("complete") != Some("no") && v.choice("finding") == Some("suspicious")
                }),
                Field::select(
                    "density",
                    "Breast composition",
                    &[
                        ("a", "A - almost entirely fatty"),
                        ("b", "B - scattered fibroglandular density"),
                        ("c", "C - heterogeneously dense"),
                        ("d", "D - extremely dense"),
                    ],
                ),
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
                "D'Orsi CJ, Sickles EA, Mendelson EB, Morris EA, et al. ACR BI-RADS Atlas, Breast Imaging Reporting and Data System. Reston, VA: American College of Radiology; 2013.",
                "https://www.acr.org/Clinical-Resources/Reporting-and-Data-Systems/Bi-Rads",
            )]
        });
        &REFS
    }
}

struct Assessment {
    category: &'static str,
    label: &'static str,
    management: &'static str,
    malignancy: &'static str,
    severity: Severity,
}

const fn assessment(
    category: &'static str,
    label: &'static str,
    management: &'static str,
    malignancy: &'static str,
    severity: Severity,
) -> Assessment {
    Assessment {
        category,
        label,
        management,
        malignancy,
        severity,
    }
}

fn assess(values: &Values) -> Result<Report, InputError> {
    let a = if values.choice("complete") == Some("no") {
        assessment(
            "0",
            "Incomplete",
            "Recall for additional imaging and/or comparison with prior examinations.",
            "N/A",
            Severity::Info,
        )
    } else {
        let finding =
            values.require_choice("finding", "Please select the overall finding.")?;
        match finding {
            "none" => assessment(
                "1",
                "Negative",
                "Routine screening.",
                "Essentially 0%",
                Severity::Success,
            ),
            "benign" => assessment(
                "2",
                "Benign",
                "Routine screening.",
                "Essentially 0%",
                Severity::Success,
            ),
            "probably_benign" => assessment(
                "3",
                "Probably Benign",
                "Short-interval (6-month) follow-up or continued surveillance.",
                ">0% but ≤2%",
                Severity::Warning,
            ),
            "suspicious" => {
                let level = values.require_choice(
                    "suspicion",
                    "Please select the level of suspicion for a suspicious finding.",
                )?;
                match level {
                    "low" => assessment(
                        "4A",
                        "Low Suspicion for Malignancy",
                        "Tissue diagnosis.",
                        ">2% to ≤10%",
                        Severity::Danger,
                    ),
                    "moderate" => assessment(
                        "4B",
                        "Moderate Suspicion for Malignancy",
                        "Tissue diagnosis.",
                        ">10% to ≤50%",
                        Severity::Danger,
                    ),
                    "high" => assessment(
                        "4C",
                        "High Suspicion for Malignancy",
                        "Tissue diagnosis.",
                        ">50% to <95%",
                        Severity::Danger,
                    ),
                    other => {
                        return Err(InputError::invalid(format!(
                            "Unknown level of suspicion: {other}."
                        )));
                    }
                }
            }
            "highly_suggestive" => assessment(
                "5",
                "Highly Suggestive of Malignancy",
                "Tissue diagnosis.",
                "≥95%",
                Severity::Danger,
            ),
            "known_malignancy" => assessment(
                "6",
                "Known Biopsy-Proven Malignancy",
                "Surgical excision when clinically appropriate.",
                "N/A",
                Severity::Danger,
            ),
            other => {
                return Err(InputError::invalid(format!("Unknown finding: {other}.")));
            }
        }
    };

    let composition = values.choice("density").and_then(|d| match d {
        "a" => Some("A - almost entirely fatty"),
        "b" => Some("B - scattered areas of fibroglandular density"),
        "c" => Some("C - heterogeneously dense, may obscure small masses"),
        "d" => Some("D - extremely dense, lowers sensitivity of mammography"),
        _ => None,
    });
    let dense = matches!(values.choice("density"), Some("c" | "d"));

    Ok(Report::new()
        .row("BI-RADS Category", format!("BI-RADS {}", a.category))
        .row("Assessment", a.label)
        .row("Management", a.management)
        .row("Likelihood of Malignancy", a.malignancy)
        .row_opt("Breast Composition", composition)
        .row_opt(
            "Density Note",
            dense.then_some("Dense breasts: consider supplemental screening per risk assessment."),
        )
        .severity(a.severity))
}
