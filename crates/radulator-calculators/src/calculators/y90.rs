use std::sync::LazyLock;

use radulator_core::{Field, Info, InputError, Outcome, Reference, Report, ScoreRange, Severity, Values};

use crate::scoring::fixed;
use crate::Calculator;

/// Gy·kg per GBq of fully deposited Y-90.
pub const GY_KG_PER_GBQ: f64 = 49.67;
/// Single-treatment lung dose limit, Gy.
const LUNG_DOSE_LIMIT: f64 = 30.0;
const LUNG_MASS_KG: f64 = 1.0;

const VOLUME_ML: ScoreRange = ScoreRange::new(1.0, 5000.0);
const DOSE_GY: ScoreRange = ScoreRange::new(1.0, 1000.0);
const LSF_PERCENT: ScoreRange = ScoreRange::new(0.0, 50.0);
const TN_RATIO: ScoreRange = ScoreRange::new(0.1, 50.0);

/// Y-90 radioembolization activity prescription by MIRD or partition model.
pub struct Y90;

impl Calculator for Y90 {
    fn id(&self) -> &str {
        "y90"
    }

    fn name(&self) -> &str {
        "Y-90 Radioembolization Activity"
    }

    fn desc(&self) -> &str {
        "Prescribed Y-90 activity and lung dose for radiation segmentectomy or lobectomy."
    }

    fn category(&self) -> &str {
        "Interventional"
    }

    fn tags(&self) -> &[&str] {
        &["liver", "dosimetry", "interventional", "hcc"]
    }

    fn keywords(&self) -> &[&str] {
        &["TARE", "SIRT", "MIRD", "partition model", "lung shunt fraction"]
    }

    fn fields(&self) -> &[Field] {
        static FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
            vec![
                Field::radio(
                    "model",
                    "Dosimetry model",
                    &[("mird", "MIRD (single compartment)"), ("partition", "Partition")],
                ),
                Field::number("volume", "Perfused liver volume")
                    .sub_label("Tissue density 1.0 g/mL")
                    .unit("mL")
                    .range(VOLUME_ML),
                Field::number("dose", "Target dose")
                    .sub_label("Tumor dose for the partition model")
                    .unit("Gy")
                    .range(DOSE_GY),
                Field::number("lsf", "Lung shunt fraction")
                    .unit("%")
                    .range(LSF_PERCENT),
                Field::number("tumor_volume", "Tumor volume")
                    .unit("mL")
                    .range(VOLUME_ML)
                    .show_if(is_partition),
                Field::number("tn_ratio", "Tumor-to-normal ratio")
                    .range(TN_RATIO)
                    .show_if(is_partition),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Values) -> Outcome {
        prescribe(values).into()
    }

    fn refs(&self) -> &[Reference] {
        static REFS: LazyLock<Vec<Reference>> = LazyLock::new(|| {
            vec![
                Reference::new(
                    "Salem R et al. Y90 Radiation Segmentectomy: Dosimetry and Technique. J Vasc Interv Radiol. 2011;22(5):S101.",
                    "",
                ),
                Reference::new(
                    "Ho S et al. Partition model for estimating radiation doses from yttrium-90 microspheres in treating hepatic tumours. Eur J Nucl Med. 1996;23(8):947-952.",
                    "https://doi.org/10.1007/BF01084369",
                ),
            ]
        });
        &REFS
    }

    fn info(&self) -> Option<&Info> {
        static INFO: LazyLock<Info> = LazyLock::new(|| {
            Info::new(
                "Prescribed activity A = D × M × (1 - LSF) / 49.67 over the perfused mass for \
                 both models; the partition model prescribes to the tumor dose with normal tissue \
                 receiving D / (T:N). The shunt-corrected activity D × M / (49.67 × (1 - LSF)) is \
                 shown alongside. Lung dose = 49.67 × A × LSF with 1 kg lungs; more than 30 Gy \
                 per treatment risks radiation pneumonitis.",
            )
        });
        Some(&INFO)
    }
}

fn is_partition(values: &Values) -> bool {
    values.choice("model") == Some("partition")
}

/// Prescribed activity in GBq for `dose_gy` over `mass_kg`, reduced by the lung shunt
/// fraction `lsf`.
pub fn prescribed_activity(dose_gy: f64, mass_kg: f64, lsf: f64) -> f64 {
    dose_gy * mass_kg * (1.0 - lsf) / GY_KG_PER_GBQ
}

/// Activity in GBq that still delivers `dose_gy` to `mass_kg` after `lsf` shunts to the lungs.
pub fn shunt_corrected_activity(dose_gy: f64, mass_kg: f64, lsf: f64) -> f64 {
    dose_gy * mass_kg / (GY_KG_PER_GBQ * (1.0 - lsf))
}

pub fn lung_dose(activity_gbq: f64, lsf: f64) -> f64 {
    GY_KG_PER_GBQ * activity_gbq * lsf / LUNG_MASS_KG
}

fn prescribe(values: &Values) -> Result<Report, InputError> {
    let model = values.require_choice("model", "Please select the dosimetry model.")?;
    let volume = values.require_in("volume", "the perfused liver volume", VOLUME_ML, "mL")?;
    let dose = values.require_in("dose", "the target dose", DOSE_GY, "Gy")?;
    let lsf = values.require_in("lsf", "the lung shunt fraction", LSF_PERCENT, "%")? / 100.0;
    let mass = volume / 1000.0;

    let (model_label, normal_dose) = match model {
        "mird" => ("MIRD", None),
        "partition" => {
            let tumor_volume =
                values.require_in("tumor_volume", "the tumor volume", VOLUME_ML, "mL")?;
            let ratio = values.require_in("tn_ratio", "the tumor-to-normal ratio", TN_RATIO, "")?;
            if tumor_volume >= volume {
                return Err(InputError::invalid(
                    "Tumor volume must be smaller than the perfused liver volume.",
                ));
            }
            ("Partition", Some(dose / ratio))
        }
        other => return Err(InputError::invalid(format!("Unknown dosimetry model: {other}."))),
    };

    let activity = prescribed_activity(dose, mass, lsf);
    let lungs = lung_dose(activity, lsf);
    let severity = if lungs > LUNG_DOSE_LIMIT {
        Severity::Danger
    } else {
        Severity::Success
    };

    Ok(Report::new()
        .row("Prescribed Activity", format!("{} GBq", fixed(activity, 2)))
        .row(
            "Shunt-Corrected Activity",
            format!("{} GBq", fixed(shunt_corrected_activity(dose, mass, lsf), 2)),
        )
        .row("Model", model_label)
        .row_opt("Normal Liver Dose", normal_dose.map(|d| format!("{} Gy", fixed(d, 1))))
        .row("Lung Dose", format!("{} Gy", fixed(lungs, 2)))
        .row(
            "Lung Safety",
            if lungs > LUNG_DOSE_LIMIT {
                "Exceeds 30 Gy single-treatment limit"
            } else {
                "Within 30 Gy single-treatment limit"
            },
        )
        .severity(severity))
}
