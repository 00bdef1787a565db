use std::sync::LazyLock;

use radulator_core::{Field, Info, InputError, Outcome, Reference, Report, Severity, Values};

use crate::Calculator;

/// CAD-RADS 2.0 for coronary CT angiography.
pub struct CadRads;

impl Calculator for CadRads {
    fn id(&self) -> &str {
        "cad-rads"
    }

    fn name(&self) -> &str {
        "CAD-RADS 2.0"
    }

    fn desc(&self) -> &str {
        "Coronary Artery Disease Reporting and Data System for coronary CTA."
    }

    fn category(&self) -> &str {
        "Cardiac"
    }

    fn tags(&self) -> &[&str] {
        &["cardiac", "ct", "reporting", "coronary"]
    }

    fn keywords(&self) -> &[&str] {
        &["CCTA", "stenosis", "plaque burden", "high-risk plaque"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            vec![
                Field::select(
                    "stenosis",
                    "Maximal coronary stenosis",
                    &[
                        ("0", "0% - no plaque or stenosis"),
                        ("1-24", "1-24% - minimal"),
                        ("25-49", "25-49% - mild"),
                        ("50-69", "50-69% - moderate"),
                        ("70-99", "70-99% - severe"),
                        ("100", "100% - total occlusion"),
                    ],
                ),
                Field::checkbox("left_main", "Left main stenosis ≥ 50%"),
                Field::checkbox("three_vessel", "Three-vessel obstructive disease (≥ 70%)"),
                Field::select(
                    "plaque",
                    "Plaque burden",
                    &[
                        ("none", "Not assessed / none"),
                        ("P1", "P1 - mild"),
                        ("P2", "P2 - moderate"),
                        ("P3", "P3 - severe"),
                        ("P4", "P4 - extensive"),
                    ],
                )
                .show_if(|v| v.choice("stenosis").is_some_and(|s| s != "0")),
                Field::checkbox("nondiagnostic", "Non-diagnostic segment(s) (N)"),
                Field::checkbox("hrp", "High-risk plaque (HRP)"),
                Field::radio(
                    "ischemia",
                    "CT-FFR / CT perfusion",
                    &[
                        ("none", "Not performed"),
                        ("I-", "I- : no ischemia"),
                        ("I+", "I+ : ischemia"),
                        ("I+/-", "I+/- : borderline"),
                    ],
                ),
                Field::checkbox("stent", "Stent (S)"),
                Field::checkbox("graft", "Bypass graft (G)"),
                Field::checkbox("exception", "Exception (E) - non-atherosclerotic cause"),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Values) -> Outcome {
        report(values).into()
    }

    fn refs(&self) -> &[Reference] {
        static REFS: LazyLock<Vec<Reference>> = LazyLock::new(|| {
            vec![Reference::new(
                "Cury RC et al. CAD-RADS 2.0 - 2022 Coronary Artery Disease-Reporting and Data System: An Expert Consensus Document. Radiol Cardiothorac Imaging. 2022;4(5):e220183.",
                "https://doi.org/10.1148/ryct.220183",
            )]
        });
        &REFS
    }

    fn info(&self) -> Option<&Info> {
        static INFO: LazyLock<Info> = LazyLock::new(|| {
            Info::new(
                "Modifiers follow the category in the order P, HRP, I, S, G, E. A non-diagnostic \
                 study without obstructive disease elsewhere is reported as CAD-RADS N; otherwise \
                 the N modifier comes first, ahead of P.",
            )
        });
        Some(&INFO)
    }
}

/// Stenosis category before modifiers.
fn stenosis_category(values: &Values) -> Result<&'static str, InputError> {
    let stenosis = values.require_choice(
        "stenosis",
        "Please select the maximal coronary stenosis.",
    )?;
    let base = match stenosis {
        "0" => "0",
        "1-24" => "1",
        "25-49" => "2",
        "50-69" => "3",
        "70-99" => "4A",
        "100" => "5",
        other => {
            return Err(InputError::invalid(format!("Unknown stenosis grade: {other}.")));
        }
    };

    // Total occlusion outranks 4B.
    if base != "5" && (values.flag("left_main") || values.flag("three_vessel")) {
        return Ok("4B");
    }
    Ok(base)
}

fn report(values: &Values) -> Result<Report, InputError> {
    let category = stenosis_category(values)?;
    let obstructive = matches!(category, "3" | "4A" | "4B" | "5");

    if values.flag("nondiagnostic") && !obstructive {
        return Ok(Report::new()
            .row("CAD-RADS", "CAD-RADS N")
            .row("Description", "Non-diagnostic study; obstructive CAD cannot be excluded.")
            .row("Management", "Additional or alternative evaluation may be needed.")
            .severity(Severity::Info));
    }

    let mut modifiers: Vec<&str> = Vec::new();
    if values.flag("nondiagnostic") {
        modifiers.push("N");
    }
    if category != "0"
        && let Some(plaque @ ("P1" | "P2" | "P3" | "P4")) = values.choice("plaque")
    {
        modifiers.push(plaque);
    }
    if values.flag("hrp") {
        modifiers.push("HRP");
    }
    if let Some(ischemia @ ("I-" | "I+" | "I+/-")) = values.choice("ischemia") {
        modifiers.push(ischemia);
    }
    if values.flag("stent") {
        modifiers.push("S");
    }
    if values.flag("graft") {
        modifiers.push("G");
    }
    if values.flag("exception") {
        modifiers.push("E");
    }

    let mut label = format!("CAD-RADS {category}");
    for modifier in &modifiers {
        label.push('/');
        label.push_str(modifier);
    }

    let (description, management, severity) = match category {
        "0" => (
            "Absence of CAD (0% stenosis, no plaque).",
            "Reassurance; consider non-atherosclerotic causes of symptoms.",
            Severity::Success,
        ),
        "1" => (
            "Minimal non-obstructive CAD (1-24%).",
            "Consider non-atherosclerotic causes; preventive therapy and risk factor modification.",
            Severity::Success,
        ),
        "2" => (
            "Mild non-obstructive CAD (25-49%).",
            "Preventive therapy and risk factor modification.",
            Severity::Warning,
        ),
        "3" => (
            "Moderate stenosis (50-69%).",
            "Consider functional assessment; guideline-directed preventive and anti-anginal therapy.",
            Severity::Warning,
        ),
        "4A" => (
            "Severe stenosis (70-99%).",
            "Consider invasive coronary angiography or functional assessment.",
            Severity::Danger,
        ),
        "4B" => (
            "Left main ≥ 50% or three-vessel obstructive (≥ 70%) disease.",
            "Invasive coronary angiography recommended.",
            Severity::Danger,
        ),
        _ => (
            "Total coronary occlusion (100%).",
            "Consider invasive coronary angiography and/or viability assessment.",
            Severity::Danger,
        ),
    };

    let hrp_note = (values.flag("hrp") && category != "0")
        .then_some("High-risk plaque present: intensify preventive therapy.");

    Ok(Report::new()
        .row("CAD-RADS", label)
        .row("Description", description)
        .row("Management", management)
        .row_opt("Note", hrp_note)
        .severity(severity))
}
