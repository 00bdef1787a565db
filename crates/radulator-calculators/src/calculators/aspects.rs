use std::sync::LazyLock;

use radulator_core::{Field, Info, Outcome, Reference, Report, Severity, Values};

use crate::scoring::checked;
use crate::Calculator;

const REGIONS: &[(&str, &str)] = &[
    ("caudate", "Caudate (C)"),
    ("lentiform", "Lentiform nucleus (L)"),
    ("internal_capsule", "Internal capsule (IC)"),
    ("insula", "Insular ribbon (I)"),
    ("m1", "M1 - anterior MCA cortex"),
    ("m2", "M2 - MCA cortex lateral to insula"),
    ("m3", "M3 - posterior MCA cortex"),
    ("m4", "M4 - anterior MCA territory above M1"),
    ("m5", "M5 - lateral MCA territory above M2"),
    ("m6", "M6 - posterior MCA territory above M3"),
];

/// Alberta Stroke Program Early CT Score. One point is subtracted from 10
/// for each MCA region with early ischemic change.
pub struct Aspects;

impl Calculator for Aspects {
    fn id(&self) -> &str {
        "aspects"
    }

    fn name(&self) -> &str {
        "ASPECTS"
    }

    fn desc(&self) -> &str {
        "Alberta Stroke Program Early CT Score for MCA territory infarction."
    }

    fn category(&self) -> &str {
        "Neuroradiology"
    }

    fn tags(&self) -> &[&str] {
        &["stroke", "ct", "neuro"]
    }

    fn keywords(&self) -> &[&str] {
        &["ischemia", "MCA", "thrombectomy"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            REGIONS
                .iter()
                .map(|(id, label)| Field::checkbox(id, label))
                .collect()
        });
        &FIELDS
    }

    fn compute(&self, values: &Values) -> Outcome {
        let affected = checked(values, REGIONS);
        let score = REGIONS.len() - affected.len();

        let (interpretation, severity) = match score {
            8.. => ("Small or no early ischemic changes.", Severity::Success),
            6..=7 => ("Moderate early ischemic changes.", Severity::Warning),
            _ => (
                "Extensive early ischemic changes; reduced likelihood of a favorable outcome.",
                Severity::Danger,
            ),
        };

        let regions = if affected.is_empty() {
            "None".to_string()
        } else {
            affected.join(", ")
        };

        Report::new()
            .row("ASPECTS", format!("{score}/10"))
            .row("Affected Regions", regions)
            .row("Interpretation", interpretation)
            .severity(severity)
            .into()
    }

    fn refs(&self) -> &[Reference] {
        static REFS: LazyLock<Vec<Reference>> = LazyLock::new(|| {
            vec![Reference::new(
                "Barber PA et al. Validity and reliability of a quantitative computed tomography score in predicting outcome of hyperacute stroke before thrombolytic therapy. Lancet. 2000;355(9216):1670-1674.",
                "https://doi.org/10.1016/S0140-6736(00)02237-6",
            )]
        });
        &REFS
    }

    fn info(&self) -> Option<&Info> {
        static INFO: LazyLock<Info> = LazyLock::new(|| {
            Info::new(
                "Assess two axial levels: the ganglionic level (C, L, IC, I, M1-M3) and the \
                 supraganglionic level (M4-M6). Check every region showing early ischemic change.",
            )
            .link("ASPECTS training", "https://aspectsinstroke.com")
        });
        Some(&INFO)
    }
}
