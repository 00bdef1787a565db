use radulator_calculators::calculators::{albi, renal_nephrometry};
use radulator_calculators::{default_registry, Registry};
use radulator_core::{Outcome, Severity, Values};

fn run(registry: &Registry, id: &str, values: Values) -> Outcome {
    registry.evaluate(id, &values).unwrap()
}

fn value<'a>(outcome: &'a Outcome, label: &str) -> &'a str {
    outcome
        .value(label)
        .unwrap_or_else(|| panic!("no row {label:?} in {outcome:?}"))
}

#[test]
fn albi_intermediate_grade() {
    let registry = default_registry();
    let outcome = run(
        &registry,
        "albi",
        Values::new().with("albumin", 35).with("bilirubin", 20),
    );
    assert_eq!(value(&outcome, "ALBI Score"), "-2.12");
    assert_eq!(value(&outcome, "ALBI Grade"), "Grade 2");
    assert_eq!(outcome.severity(), Some(Severity::Warning));
}

#[test]
fn albi_grade_boundaries_are_inclusive_of_the_better_grade() {
    assert_eq!(albi::albi_grade(-2.60), 1);
    assert_eq!(albi::albi_grade(-2.59), 2);
    assert_eq!(albi::albi_grade(-1.39), 2);
    assert_eq!(albi::albi_grade(-1.38), 3);
}

#[test]
fn albi_us_units_match_si_grade() {
    let registry = default_registry();
    for (albumin_us, bilirubin_us) in [(4.5, 0.4), (3.5, 1.2), (2.4, 6.0)] {
        let us = run(
            &registry,
            "albi",
            Values::new()
                .with("units", "us")
                .with("albumin", albumin_us)
                .with("bilirubin", bilirubin_us),
        );
        let si = run(
            &registry,
            "albi",
            Values::new()
                .with("units", "si")
                .with("albumin", albumin_us * albi::ALBUMIN_US_TO_SI)
                .with("bilirubin", bilirubin_us * albi::BILIRUBIN_US_TO_SI),
        );
        assert_eq!(us.value("ALBI Grade"), si.value("ALBI Grade"));
        assert_eq!(us.value("ALBI Score"), si.value("ALBI Score"));
        assert!(us.value("SI Equivalent").is_some());
        assert!(si.value("SI Equivalent").is_none());
    }
}

#[test]
fn albi_out_of_range_names_value_and_range() {
    let registry = default_registry();
    let outcome = run(
        &registry,
        "albi",
        Values::new().with("albumin", 120).with("bilirubin", 20),
    );
    assert_eq!(
        outcome.error(),
        Some("Serum albumin of 120 g/L is outside the acceptable range (10 to 70 g/L).")
    );
}

#[test]
fn dlp_head_adult() {
    let registry = default_registry();
    let outcome = run(
        &registry,
        "dlp-dose",
        Values::new()
            .with("dlp", 500)
            .with("region", "head")
            .with("age", "adult"),
    );
    assert_eq!(value(&outcome, "Effective Dose"), "1.05 mSv");
}

#[test]
fn aspects_without_affected_regions() {
    let registry = default_registry();
    let outcome = run(&registry, "aspects", Values::new());
    assert_eq!(value(&outcome, "ASPECTS"), "10/10");
    assert_eq!(
        value(&outcome, "Interpretation"),
        "Small or no early ischemic changes."
    );
}

#[test]
fn mehran_very_high_risk() {
    let registry = default_registry();
    let outcome = run(
        &registry,
        "mehran-cin",
        Values::new()
            .with("hypotension", true)
            .with("chf", true)
            .with("age", 80)
            .with("egfr", 25),
    );
    assert_eq!(value(&outcome, "Total Score"), "20");
    assert_eq!(value(&outcome, "Risk Category"), "Very High Risk");
    assert_eq!(value(&outcome, "Risk of Dialysis"), "12.6%");
}

#[test]
fn mehran_requires_egfr() {
    let registry = default_registry();
    let outcome = run(&registry, "mehran-cin", Values::new().with("chf", true));
    assert!(outcome.is_invalid());
}

#[test]
fn shim_maximum_score() {
    let registry = default_registry();
    let values: Values = ["q1", "q2", "q3", "q4", "q5"]
        .into_iter()
        .map(|q| (q, "5"))
        .collect();
    let outcome = run(&registry, "shim", values);
    assert_eq!(value(&outcome, "Total Score"), "25/25");
    assert_eq!(value(&outcome, "Category"), "No ED");
}

#[test]
fn shim_missing_answer() {
    let registry = default_registry();
    let outcome = run(&registry, "shim", Values::new().with("q1", "5"));
    assert_eq!(outcome.error(), Some("Please answer all five questions."));
}

#[test]
fn bosniak_soft_tissue_dominates() {
    let registry = default_registry();
    let outcome = run(
        &registry,
        "bosniak",
        Values::new()
            .with("soft_tissue", "yes")
            .with("wall", "thin")
            .with("septa", "none")
            .with("enhancement", "no")
            .with("attenuation", "simple"),
    );
    assert_eq!(value(&outcome, "Bosniak Category"), "Bosniak IV");
}

#[test]
fn ipss_severe() {
    let registry = default_registry();
    let values: Values = (1..=7)
        .map(|n| (format!("q{n}"), "3"))
        .chain([("qol".to_string(), "4")])
        .collect();
    let outcome = run(&registry, "ipss", values);
    assert_eq!(value(&outcome, "Total Score"), "21/35");
    assert_eq!(value(&outcome, "Symptom Severity"), "Severe");
}

#[test]
fn adrenal_ct_washout() {
    let registry = default_registry();
    let outcome = run(
        &registry,
        "adrenal-ct",
        Values::new()
            .with("unenh", 20)
            .with("portal", 80)
            .with("delayed", 40),
    );
    assert_eq!(value(&outcome, "Absolute Washout (%)"), "66.7");
    assert_eq!(value(&outcome, "Relative Washout (%)"), "50.0");
    assert_eq!(value(&outcome, "Interpretation"), "Consistent with adenoma.");

    let relative_only = run(
        &registry,
        "adrenal-ct",
        Values::new().with("portal", 100).with("delayed", 80),
    );
    assert!(relative_only.value("Absolute Washout (%)").is_none());
    assert_eq!(value(&relative_only, "Relative Washout (%)"), "20.0");
}

#[test]
fn adrenal_ct_needs_both_washouts_with_unenhanced_phase() {
    let registry = default_registry();
    // absolute 56.25%, relative 45%
    let one_criterion = run(
        &registry,
        "adrenal-ct",
        Values::new()
            .with("unenh", 20)
            .with("portal", 100)
            .with("delayed", 55),
    );
    assert_eq!(value(&one_criterion, "Relative Washout (%)"), "45.0");
    assert!(value(&one_criterion, "Interpretation").starts_with("Indeterminate"));
    assert_eq!(one_criterion.severity(), Some(Severity::Warning));

    let relative_alone = run(
        &registry,
        "adrenal-ct",
        Values::new().with("portal", 100).with("delayed", 55),
    );
    assert_eq!(value(&relative_alone, "Interpretation"), "Consistent with adenoma.");

    let lipid_rich = run(
        &registry,
        "adrenal-ct",
        Values::new()
            .with("unenh", 5)
            .with("portal", 100)
            .with("delayed", 90),
    );
    assert!(value(&lipid_rich, "Interpretation").starts_with("Lipid-rich adenoma"));
}

#[test]
fn adrenal_mri_signal_drop() {
    let registry = default_registry();
    let outcome = run(
        &registry,
        "adrenal-mri",
        Values::new().with("in_phase", 100).with("out_phase", 70),
    );
    assert_eq!(value(&outcome, "Signal Intensity Index (%)"), "30.00");
    assert_eq!(outcome.severity(), Some(Severity::Success));
}

#[test]
fn meld_na_sodium_correction() {
    let registry = default_registry();
    let outcome = run(
        &registry,
        "meld-na",
        Values::new()
            .with("creatinine", 2.0)
            .with("bilirubin", 3.0)
            .with("inr", 1.5)
            .with("sodium", 130),
    );
    assert_eq!(value(&outcome, "MELD"), "22");
    assert_eq!(value(&outcome, "MELD-Na"), "26");
    assert_eq!(value(&outcome, "3-Month Mortality"), "19.6%");

    let floor = run(
        &registry,
        "meld-na",
        Values::new()
            .with("creatinine", 0.8)
            .with("bilirubin", 0.5)
            .with("inr", 1.0)
            .with("sodium", 140),
    );
    assert_eq!(value(&floor, "MELD"), "6");
    assert_eq!(value(&floor, "MELD-Na"), "6");
}

#[test]
fn child_pugh_class_a() {
    let registry = default_registry();
    let outcome = run(
        &registry,
        "child-pugh",
        Values::new()
            .with("bilirubin", 1.0)
            .with("albumin", 4.0)
            .with("inr", 1.0),
    );
    assert_eq!(value(&outcome, "Total Score"), "5");
    assert_eq!(value(&outcome, "Child-Pugh Class"), "Class A");
}

#[test]
fn cad_rads_modifiers_follow_category() {
    let registry = default_registry();
    let outcome = run(
        &registry,
        "cad-rads",
        Values::new()
            .with("stenosis", "70-99")
            .with("left_main", true)
            .with("plaque", "P2")
            .with("hrp", true),
    );
    assert_eq!(value(&outcome, "CAD-RADS"), "CAD-RADS 4B/P2/HRP");

    let occluded = run(
        &registry,
        "cad-rads",
        Values::new().with("stenosis", "100").with("three_vessel", true),
    );
    assert_eq!(value(&occluded, "CAD-RADS"), "CAD-RADS 5");

    let nondiagnostic = run(
        &registry,
        "cad-rads",
        Values::new().with("stenosis", "25-49").with("nondiagnostic", true),
    );
    assert_eq!(value(&nondiagnostic, "CAD-RADS"), "CAD-RADS N");

    let obstructive = run(
        &registry,
        "cad-rads",
        Values::new()
            .with("stenosis", "50-69")
            .with("nondiagnostic", true)
            .with("plaque", "P1")
            .with("ischemia", "I+")
            .with("stent", true),
    );
    assert_eq!(value(&obstructive, "CAD-RADS"), "CAD-RADS 3/N/P1/I+/S");
}

#[test]
fn bi_rads_suspicion_levels() {
    let registry = default_registry();
    let outcome = run(
        &registry,
        "bi-rads",
        Values::new()
            .with("complete", "yes")
            .with("finding", "suspicious")
            .with("suspicion", "moderate")
            .with("density", "d"),
    );
    assert_eq!(value(&outcome, "BI-RADS Category"), "BI-RADS 4B");
    assert!(outcome.value("Density Note").is_some());

    let incomplete = run(
        &registry,
        "bi-rads",
        Values::new().with("complete", "no").with("finding", "benign"),
    );
    assert_eq!(value(&incomplete, "BI-RADS Category"), "BI-RADS 0");

    let missing_level = run(
        &registry,
        "bi-rads",
        Values::new().with("finding", "suspicious"),
    );
    assert!(missing_level.is_invalid());
}

#[test]
fn li_rads_precedence_and_table() {
    let registry = default_registry();

    let tv = run(
        &registry,
        "li-rads",
        Values::new()
            .with("tumor_in_vein", true)
            .with("benign", "definite")
            .with("size", 30)
            .with("aphe", "yes"),
    );
    assert_eq!(value(&tv, "LI-RADS Category"), "LR-TV");

    let lr5 = run(
        &registry,
        "li-rads",
        Values::new()
            .with("size", 25)
            .with("aphe", "yes")
            .with("washout", true),
    );
    assert_eq!(value(&lr5, "LI-RADS Category"), "LR-5");

    let capsule_only = run(
        &registry,
        "li-rads",
        Values::new()
            .with("size", 15)
            .with("aphe", "yes")
            .with("capsule", true),
    );
    assert_eq!(value(&capsule_only, "LI-RADS Category"), "LR-4");
}

#[test]
fn li_rads_table_without_aphe() {
    let registry = default_registry();
    let category = |size: i32, washout: bool, capsule: bool| {
        let outcome = run(
            &registry,
            "li-rads",
            Values::new()
                .with("benign", "none")
                .with("size", size)
                .with("aphe", "no")
                .with("washout", washout)
                .with("capsule", capsule),
        );
        value(&outcome, "LI-RADS Category").to_string()
    };

    assert_eq!(category(15, false, false), "LR-3");
    assert_eq!(category(15, true, false), "LR-3");
    assert_eq!(category(15, true, true), "LR-4");
    assert_eq!(category(25, true, false), "LR-4");
    assert_eq!(category(25, false, false), "LR-3");
}

#[test]
fn li_rads_ancillary_features() {
    let registry = default_registry();
    let base = Values::new().with("size", 8).with("aphe", "no");

    let upgraded = run(&registry, "li-rads", base.clone().with("af_malignancy", true));
    assert_eq!(value(&upgraded, "LI-RADS Category"), "LR-4");

    // Malignancy features never reach LR-5.
    let capped = run(
        &registry,
        "li-rads",
        Values::new()
            .with("size", 15)
            .with("aphe", "yes")
            .with("capsule", true)
            .with("af_malignancy", true),
    );
    assert_eq!(value(&capped, "LI-RADS Category"), "LR-4");

    let downgraded = run(&registry, "li-rads", base.clone().with("af_benignity", true));
    assert_eq!(value(&downgraded, "LI-RADS Category"), "LR-2");

    let both = run(
        &registry,
        "li-rads",
        base.with("af_malignancy", true).with("af_benignity", true),
    );
    assert_eq!(value(&both, "LI-RADS Category"), "LR-3");
}

#[test]
fn lung_rads_baseline_solid() {
    let registry = default_registry();
    let baseline = Values::new()
        .with("exam", "baseline")
        .with("nodule", "solid")
        .with("size", 7);
    let outcome = run(&registry, "lung-rads", baseline.clone());
    assert_eq!(value(&outcome, "Lung-RADS Category"), "Lung-RADS 3");

    let upgraded = run(&registry, "lung-rads", baseline.with("suspicious", true));
    assert_eq!(value(&upgraded, "Lung-RADS Category"), "Lung-RADS 4X");

    let small = run(
        &registry,
        "lung-rads",
        Values::new()
            .with("nodule", "solid")
            .with("size", 4)
            .with("significant", true),
    );
    assert_eq!(value(&small, "Lung-RADS Category"), "Lung-RADS 2S");
}

#[test]
fn lung_rads_follow_up_requires_change() {
    let registry = default_registry();
    let values = Values::new()
        .with("exam", "follow_up")
        .with("nodule", "part_solid")
        .with("size", 10)
        .with("solid_component", 5);
    assert!(run(&registry, "lung-rads", values.clone()).is_invalid());

    let growing = run(&registry, "lung-rads", values.with("change", "growing"));
    assert_eq!(value(&growing, "Lung-RADS Category"), "Lung-RADS 4B");
}

#[test]
fn pi_rads_zone_rules() {
    let registry = default_registry();
    let pz = run(
        &registry,
        "pi-rads",
        Values::new()
            .with("zone", "pz")
            .with("t2", "2")
            .with("dwi", "3")
            .with("dce", "positive"),
    );
    assert_eq!(value(&pz, "PI-RADS Category"), "PI-RADS 4");

    let tz = run(
        &registry,
        "pi-rads",
        Values::new()
            .with("zone", "tz")
            .with("t2", "2")
            .with("dwi", "4"),
    );
    assert_eq!(value(&tz, "PI-RADS Category"), "PI-RADS 3");

    // DCE is not offered for the transition zone, so a stale answer is ignored.
    let stale = run(
        &registry,
        "pi-rads",
        Values::new()
            .with("zone", "tz")
            .with("t2", "3")
            .with("dwi", "3")
            .with("dce", "positive"),
    );
    assert_eq!(value(&stale, "PI-RADS Category"), "PI-RADS 3");
}

#[test]
fn milan_and_ucsf() {
    let registry = default_registry();
    let single = run(
        &registry,
        "milan",
        Values::new().with("count", "1").with("tumor1", 5.5),
    );
    assert_eq!(value(&single, "Milan Criteria"), "Exceeds criteria");
    assert_eq!(value(&single, "UCSF Criteria"), "Within criteria");

    let three = run(
        &registry,
        "milan",
        Values::new()
            .with("count", "3")
            .with("tumor1", 3)
            .with("tumor2", 3)
            .with("tumor3", 2),
    );
    assert_eq!(value(&three, "Milan Criteria"), "Within criteria");
    assert_eq!(value(&three, "UCSF Criteria"), "Within criteria");

    let excluded = run(
        &registry,
        "milan",
        Values::new()
            .with("count", "1")
            .with("tumor1", 2)
            .with("macrovascular", "yes"),
    );
    assert_eq!(value(&excluded, "Milan Criteria"), "Excluded");
}

#[test]
fn prostate_volume_and_density() {
    let registry = default_registry();
    let outcome = run(
        &registry,
        "prostate-volume",
        Values::new()
            .with("length", 5)
            .with("height", 4)
            .with("width", 4)
            .with("psa", 8),
    );
    assert_eq!(value(&outcome, "Prostate Volume"), "41.60 mL");
    assert_eq!(value(&outcome, "PSA Density"), "0.192 ng/mL/cc");
    assert_eq!(outcome.severity(), Some(Severity::Warning));
}

#[test]
fn renal_score_with_suffixes() {
    let registry = default_registry();
    let outcome = run(
        &registry,
        "renal-nephrometry",
        Values::new()
            .with("radius", 3)
            .with("exophytic", ">=50")
            .with("nearness", ">=7")
            .with("location", "above/below")
            .with("anterior", "a")
            .with("hilar", "yes"),
    );
    assert_eq!(value(&outcome, "RENAL Score"), "4ah");
    assert_eq!(value(&outcome, "Complexity"), "Low complexity");
    assert_eq!(value(&outcome, "Breakdown"), "R=1 E=1 N=1 L=1");
}

#[test]
fn renal_complexity_is_monotone() {
    let rank = |band: &str| match band {
        "Low" => 0,
        "Moderate" => 1,
        _ => 2,
    };
    let tiers: Vec<_> = (4..=12)
        .map(|total| rank(renal_nephrometry::complexity(total)))
        .collect();
    assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(tiers.first(), Some(&0));
    assert_eq!(tiers.last(), Some(&2));
}

#[test]
fn spleen_upper_limit_by_sex_and_age() {
    let registry = default_registry();
    let outcome = run(
        &registry,
        "spleen-size",
        Values::new()
            .with("length", 14)
            .with("sex", "male")
            .with("age", 30),
    );
    assert_eq!(value(&outcome, "Upper Limit of Normal"), "13.0 cm");
    assert_eq!(value(&outcome, "Interpretation"), "Splenomegaly");

    let normal = run(
        &registry,
        "spleen-size",
        Values::new()
            .with("length", 11.5)
            .with("sex", "female")
            .with("age", 60),
    );
    assert_eq!(value(&normal, "Interpretation"), "Normal spleen size");
}

#[test]
fn y90_mird_activity() {
    let registry = default_registry();
    let outcome = run(
        &registry,
        "y90",
        Values::new()
            .with("model", "mird")
            .with("volume", 1000)
            .with("dose", 120)
            .with("lsf", 10),
    );
    assert_eq!(value(&outcome, "Prescribed Activity"), "2.17 GBq");
    assert_eq!(value(&outcome, "Shunt-Corrected Activity"), "2.68 GBq");
    assert_eq!(value(&outcome, "Lung Dose"), "10.80 Gy");
    assert_eq!(outcome.severity(), Some(Severity::Success));
}

#[test]
fn y90_partition_needs_tumor_inputs() {
    let registry = default_registry();
    let values = Values::new()
        .with("model", "partition")
        .with("volume", 1000)
        .with("dose", 200)
        .with("lsf", 20);
    assert!(run(&registry, "y90", values.clone()).is_invalid());

    let outcome = run(
        &registry,
        "y90",
        values.with("tumor_volume", 200).with("tn_ratio", 4),
    );
    assert_eq!(value(&outcome, "Normal Liver Dose"), "50.0 Gy");
    // same whole-segment activity as MIRD at the tumor dose
    assert_eq!(value(&outcome, "Prescribed Activity"), "3.22 GBq");
    assert_eq!(value(&outcome, "Lung Dose"), "32.00 Gy");
    assert_eq!(outcome.severity(), Some(Severity::Danger));
}

#[test]
fn hip_graf_types() {
    let registry = default_registry();
    let mature = run(
        &registry,
        "hip-graf",
        Values::new().with("alpha", 62).with("beta", 50),
    );
    assert_eq!(value(&mature, "Graf Type"), "Type Ia");

    let needs_age = run(
        &registry,
        "hip-graf",
        Values::new().with("alpha", 55).with("beta", 60),
    );
    assert_eq!(needs_age.error(), Some("Please enter age in weeks."));

    let critical = run(
        &registry,
        "hip-graf",
        Values::new().with("alpha", 45).with("beta", 70),
    );
    assert_eq!(value(&critical, "Graf Type"), "Type IIc");
}
