use radulator_calculators::{
    all_calculators, default_registry, get_calculator, Calculator, CalculatorError,
    DefinitionError, Registry,
};
use radulator_core::{Field, Outcome, Report, Values};

struct Stub {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    tags: &'static [&'static str],
    fields: Vec<Field>,
}

impl Stub {
    fn new(id: &'static str, name: &'static str, category: &'static str) -> Self {
        Self {
            id,
            name,
            category,
            tags: &[],
            fields: vec![Field::number("x", "X")],
        }
    }

    fn tags(mut self, tags: &'static [&'static str]) -> Self {
        self.tags = tags;
        self
    }
}

impl Calculator for Stub {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn desc(&self) -> &str {
        "stub"
    }

    fn category(&self) -> &str {
        self.category
    }

    fn tags(&self) -> &[&str] {
        self.tags
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn compute(&self, values: &Values) -> Outcome {
        Report::new()
            .row("Seen", values.ids().collect::<Vec<_>>().join(","))
            .into()
    }
}

fn boxed(stubs: Vec<Stub>) -> Vec<Box<dyn Calculator>> {
    stubs
        .into_iter()
        .map(|s| Box::new(s) as Box<dyn Calculator>)
        .collect()
}

#[test]
fn missing_id_is_skipped_without_aborting() {
    let registry = Registry::build(boxed(vec![
        Stub::new("a", "Alpha", "Chest"),
        Stub::new("", "Nameless id", "Chest"),
        Stub::new("b", "Beta", "Chest"),
    ]));
    assert_eq!(registry.len(), 2);
    assert!(registry.get_by_id("a").is_some());
    assert!(registry.get_by_id("b").is_some());
}

#[test]
fn duplicate_ids_keep_the_first() {
    let registry = Registry::build(boxed(vec![
        Stub::new("a", "First", "Chest"),
        Stub::new("a", "Second", "Chest"),
    ]));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get_by_id("a").map(|c| c.name()), Some("First"));
}

#[test]
fn definition_checks_catch_bad_fields() {
    let mut duplicate = Stub::new("dup", "Dup", "Chest");
    duplicate.fields = vec![Field::number("x", "X"), Field::checkbox("x", "X again")];
    assert_eq!(
        duplicate.check_definition(),
        Err(DefinitionError::DuplicateField {
            calculator_id: "dup".into(),
            field_id: "x".into(),
        })
    );

    let mut no_options = Stub::new("opts", "Opts", "Chest");
    no_options.fields = vec![Field::select("grade", "Grade", &[])];
    assert!(matches!(
        no_options.check_definition(),
        Err(DefinitionError::MissingOptions { .. })
    ));

    let registry = Registry::build(boxed(vec![duplicate, no_options]));
    assert!(registry.is_empty());
}

#[test]
fn calculators_sorted_by_name_case_insensitively() {
    let registry = Registry::build(boxed(vec![
        Stub::new("c", "charlie", "Chest"),
        Stub::new("a", "Alpha", "Chest"),
        Stub::new("b", "Bravo", "Chest"),
    ]));
    let names: Vec<_> = registry.all().map(|c| c.name()).collect();
    assert_eq!(names, vec!["Alpha", "Bravo", "charlie"]);

    let chest: Vec<_> = registry.get_by_category("Chest").iter().map(|c| c.id()).collect();
    assert_eq!(chest, vec!["a", "b", "c"]);
    assert!(registry.get_by_category("Nowhere").is_empty());
}

#[test]
fn preferred_categories_come_first_then_alphabetical() {
    let registry = Registry::build(boxed(vec![
        Stub::new("z", "Zeta", "Zoology"),
        Stub::new("g", "Gamma", "Genitourinary"),
        Stub::new("n", "Nu", "Neuroradiology"),
        Stub::new("a", "Alpha", "Anatomy"),
    ]));
    assert_eq!(
        registry.sorted_categories(),
        vec!["Neuroradiology", "Genitourinary", "Anatomy", "Zoology"]
    );
}

#[test]
fn tags_are_deduplicated_and_sorted() {
    let registry = Registry::build(boxed(vec![
        Stub::new("a", "Alpha", "Chest").tags(&["mri", "ct"]),
        Stub::new("b", "Beta", "Chest").tags(&["ct", "liver"]),
    ]));
    assert_eq!(registry.all_tags(), vec!["ct", "liver", "mri"]);
}

#[test]
fn evaluate_unknown_id_is_an_error() {
    let registry = default_registry();
    let err = registry.evaluate("nope", &Values::new()).unwrap_err();
    assert_eq!(err, CalculatorError::UnknownCalculator("nope".into()));
    assert_eq!(err.to_string(), "unknown calculator: nope");
}

#[test]
fn shipped_catalog_is_fully_indexed() {
    let registry = default_registry();
    assert_eq!(registry.len(), all_calculators().len());
    for calculator in all_calculators() {
        assert_eq!(calculator.check_definition(), Ok(()), "{}", calculator.id());
        assert!(registry.get_by_id(calculator.id()).is_some());
    }

    let categories = registry.sorted_categories();
    assert_eq!(categories.first(), Some(&"Neuroradiology"));
    assert_eq!(categories.last(), Some(&"Radiation Safety"));
}

#[test]
fn search_matches_name_tags_and_keywords() {
    let registry = default_registry();

    let ids = |q: &str| -> Vec<String> {
        registry.search(q).iter().map(|c| c.id().to_string()).collect()
    };

    assert!(ids("albi").contains(&"albi".to_string()));
    // keyword only
    assert!(ids("thrombectomy").contains(&"aspects".to_string()));
    // tag, case-insensitive
    assert!(ids("PROSTATE").contains(&"pi-rads".to_string()));
    assert_eq!(ids("   ").len(), registry.len());
    assert!(ids("no such calculator").is_empty());
}

#[test]
fn detail_serializes_flat_summary() {
    let registry = default_registry();
    let detail = registry.get_by_id("milan").map(|c| c.detail()).unwrap();
    let json = serde_json::to_value(&detail).unwrap();
    assert_eq!(json["id"], "milan");
    assert_eq!(json["category"], "Hepatology");
    assert!(json["fields"].as_array().is_some_and(|f| !f.is_empty()));
    assert!(json.get("summary").is_none());
}

#[test]
fn get_calculator_matches_registry_lookup() {
    let registry = default_registry();
    let direct = get_calculator("meld-na").unwrap();
    let indexed = registry.get_by_id("meld-na").unwrap();
    assert_eq!(direct.name(), indexed.name());

    let values = Values::new()
        .with("creatinine", 1.0)
        .with("bilirubin", 1.0)
        .with("inr", 1.0)
        .with("sodium", 137);
    assert_eq!(direct.evaluate(&values), indexed.evaluate(&values));

    assert!(get_calculator("nope").is_none());
}
