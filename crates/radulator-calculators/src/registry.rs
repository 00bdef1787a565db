use std::collections::{BTreeMap, BTreeSet, HashMap};

use radulator_core::{Outcome, Values};

use crate::error::{CalculatorError, DefinitionError};
use crate::Calculator;

/// Sidebar order. Categories not listed here follow alphabetically.
pub const PREFERRED_CATEGORY_ORDER: &[&str] = &[
    "Neuroradiology",
    "Chest",
    "Cardiac",
    "Breast",
    "Abdominal",
    "Hepatology",
    "Genitourinary",
    "Interventional",
    "Pediatrics",
];

/// Read-only index over calculator definitions.
///
/// Built once from an explicit list and never mutated afterwards; share it
/// behind an `Arc` when several consumers need it.
pub struct Registry {
    /// Sorted by display name.
    calculators: Vec<Box<dyn Calculator>>,
    by_id: HashMap<String, usize>,
    by_category: BTreeMap<String, Vec<usize>>,
    tags: BTreeSet<String>,
}

impl Registry {
    /// Index `definitions`, discarding (with a warning) any that fail
    /// [`Calculator::check_definition`] or reuse an id already accepted.
    pub fn build(definitions: Vec<Box<dyn Calculator>>) -> Self {
        let mut accepted: Vec<Box<dyn Calculator>> = Vec::with_capacity(definitions.len());
        for definition in definitions {
            let checked = definition.check_definition().and_then(|()| {
                if accepted.iter().any(|c| c.id() == definition.id()) {
                    Err(DefinitionError::DuplicateId(definition.id().to_string()))
                } else {
                    Ok(())
                }
            });
            match checked {
                Ok(()) => accepted.push(definition),
                Err(e) => tracing::warn!(error = %e, "skipping calculator definition"),
            }
        }

        accepted.sort_by(|a, b| {
            a.name()
                .to_lowercase()
                .cmp(&b.name().to_lowercase())
                .then_with(|| a.id().cmp(b.id()))
        });

        let mut by_id = HashMap::new();
        let mut by_category: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        let mut tags = BTreeSet::new();
        for (idx, calculator) in accepted.iter().enumerate() {
            by_id.insert(calculator.id().to_string(), idx);
            by_category
                .entry(calculator.category().to_string())
                .or_default()
                .push(idx);
            tags.extend(calculator.tags().iter().map(|t| t.to_string()));
        }

        tracing::debug!(
            calculators = accepted.len(),
            categories = by_category.len(),
            "calculator registry built"
        );

        Self {
            calculators: accepted,
            by_id,
            by_category,
            tags,
        }
    }

    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }

    /// All calculators, sorted by display name.
    pub fn all(&self) -> impl Iterator<Item = &dyn Calculator> {
        self.calculators.iter().map(|c| &**c)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&dyn Calculator> {
        let idx = *self.by_id.get(id)?;
        self.calculators.get(idx).map(|c| &**c)
    }

    /// Calculators whose category equals `category`, in name order.
    pub fn get_by_category(&self, category: &str) -> Vec<&dyn Calculator> {
        self.by_category
            .get(category)
            .map(|indices| {
                indices
                    .iter()
                    .filter_map(|&idx| self.calculators.get(idx))
                    .map(|c| &**c)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Categories in [`PREFERRED_CATEGORY_ORDER`], then the rest alphabetically.
    pub fn sorted_categories(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = PREFERRED_CATEGORY_ORDER
            .iter()
            .copied()
            .filter(|c| self.by_category.contains_key(*c))
            .collect();
        // BTreeMap keys are already alphabetical.
        sorted.extend(
            self.by_category
                .keys()
                .map(String::as_str)
                .filter(|c| !PREFERRED_CATEGORY_ORDER.contains(c)),
        );
        sorted
    }

    /// Deduplicated, sorted union of all tags.
    pub fn all_tags(&self) -> Vec<&str> {
        self.tags.iter().map(String::as_str).collect()
    }

    /// Case-insensitive substring search over name, id, description, tags
    /// and keywords. A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<&dyn Calculator> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.all().collect();
        }
        self.all()
            .filter(|c| {
                c.name().to_lowercase().contains(&needle)
                    || c.id().to_lowercase().contains(&needle)
                    || c.desc().to_lowercase().contains(&needle)
                    || c
                        .tags()
                        .iter()
                        .chain(c.keywords())
                        .any(|t| t.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Look up `id` and evaluate it over `values`.
    pub fn evaluate(&self, id: &str, values: &Values) -> Result<Outcome, CalculatorError> {
        let calculator = self
            .get_by_id(id)
            .ok_or_else(|| CalculatorError::UnknownCalculator(id.to_string()))?;
        Ok(calculator.evaluate(values))
    }
}
