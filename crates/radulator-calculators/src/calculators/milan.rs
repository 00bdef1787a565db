use std::sync::LazyLock;

use radulator_core::{Field, Info, InputError, Outcome, Reference, Report, ScoreRange, Severity, Values};

use crate::scoring::{answered_yes, YES_NO};
use crate::Calculator;

const TUMOR_CM: ScoreRange = ScoreRange::new(0.1, 30.0);

/// Milan and UCSF transplant criteria for hepatocellular carcinoma.
pub struct Milan;

impl Calculator for Milan {
    fn id(&self) -> &str {
        "milan"
    }

    fn name(&self) -> &str {
        "Milan / UCSF Criteria"
    }

    fn desc(&self) -> &str {
        "Liver transplant eligibility for hepatocellular carcinoma by Milan and UCSF criteria."
    }

    fn category(&self) -> &str {
        "Hepatology"
    }

    fn tags(&self) -> &[&str] {
        &["liver", "hcc", "transplant", "oncology"]
    }

    fn keywords(&self) -> &[&str] {
        &["Mazzaferro", "UCSF", "tumor burden", "OLT"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            vec![
                Field::select(
                    "count",
                    "Number of tumors",
                    &[("1", "1"), ("2", "2"), ("3", "3"), ("4", "4 or more")],
                ),
                Field::number("tumor1", "Largest tumor")
                    .unit("cm")
                    .range(TUMOR_CM),
                Field::number("tumor2", "Second tumor")
                    .unit("cm")
                    .range(TUMOR_CM)
                    .show_if(|v| matches!(v.choice("count"), Some("2" | "3"))),
                Field::number("tumor3", "Third tumor")
                    .unit("cm")
                    .range(TUMOR_CM)
                    .show_if(|v| v.choice("count") == Some("3")),
                Field::radio("macrovascular", "Macrovascular invasion", YES_NO),
                Field::radio("extrahepatic", "Extrahepatic disease", YES_NO),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Values) -> Outcome {
        assess(values).into()
    }

    fn refs(&self) -> &[Reference] {
        static REFS: LazyLock<Vec<Reference>> = LazyLock::new(|| {
            vec![
                Reference::new(
                    "Mazzaferro V et al. Liver transplantation for the treatment of small hepatocellular carcinomas in patients with cirrhosis. N Engl J Med. 1996;334(11):693-699.",
                    "https://doi.org/10.1056/NEJM199603143341104",
                ),
                Reference::new(
                    "Yao FY et al. Liver transplantation for hepatocellular carcinoma: expansion of the tumor size limits does not adversely impact survival. Hepatology. 2001;33(6):1394-1403.",
                    "https://doi.org/10.1053/jhep.2001.24563",
                ),
            ]
        });
        &REFS
    }

    fn info(&self) -> Option<&Info> {
        static INFO: LazyLock<Info> = LazyLock::new(|| {
            Info::new(
                "Milan: single tumor ≤ 5 cm, or 2-3 tumors each ≤ 3 cm. UCSF: single tumor \
                 ≤ 6.5 cm, or 2-3 tumors with the largest ≤ 4.5 cm and total diameter ≤ 8 cm. \
                 Macrovascular invasion or extrahepatic spread excludes both.",
            )
        });
        Some(&INFO)
    }
}

fn verdict(within: bool) -> &'static str {
    if within { "Within criteria" } else { "Exceeds criteria" }
}

fn assess(values: &Values) -> Result<Report, InputError> {
    if answered_yes(values, "macrovascular") || answered_yes(values, "extrahepatic") {
        return Ok(Report::new()
            .row("Milan Criteria", "Excluded")
            .row("UCSF Criteria", "Excluded")
            .row("Reason", "Macrovascular invasion or extrahepatic disease present.")
            .severity(Severity::Danger));
    }

    let count = values.require_choice("count", "Please select the number of tumors.")?;
    let count: usize = count
        .parse()
        .map_err(|_| InputError::invalid(format!("Unknown tumor count: {count}.")))?;
    if count >= 4 {
        return Ok(Report::new()
            .row("Milan Criteria", verdict(false))
            .row("UCSF Criteria", verdict(false))
            .row("Reason", "More than 3 tumors.")
            .severity(Severity::Danger));
    }

    let mut sizes = vec![values.require_in("tumor1", "the largest tumor size", TUMOR_CM, "cm")?];
    if count >= 2 {
        sizes.push(values.require_in("tumor2", "the second tumor size", TUMOR_CM, "cm")?);
    }
    if count >= 3 {
        sizes.push(values.require_in("tumor3", "the third tumor size", TUMOR_CM, "cm")?);
    }

    let largest = sizes.iter().copied().fold(0.0, f64::max);
    let total: f64 = sizes.iter().sum();

    let (milan, ucsf) = if count == 1 {
        (largest <= 5.0, largest <= 6.5)
    } else {
        (
            sizes.iter().all(|s| *s <= 3.0),
            largest <= 4.5 && total <= 8.0,
        )
    };

    let severity = match (milan, ucsf) {
        (true, _) => Severity::Success,
        (false, true) => Severity::Warning,
        (false, false) => Severity::Danger,
    };

    Ok(Report::new()
        .row("Milan Criteria", verdict(milan))
        .row("UCSF Criteria", verdict(ucsf))
        .row("Largest Tumor", format!("{largest} cm"))
        .row_opt("Total Diameter", (count > 1).then(|| format!("{total} cm")))
        .severity(severity))
}
