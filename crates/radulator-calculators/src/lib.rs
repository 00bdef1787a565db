//! radulator-calculators
//!
//! Clinical scoring calculators and the registry that indexes them. Each
//! calculator is static data plus a pure `compute` over the submitted values.

pub mod calculators;
pub mod error;
pub mod registry;
pub mod scoring;

use std::collections::HashSet;

use serde::Serialize;
use ts_rs::TS;

use radulator_core::{Field, Info, Outcome, Reference, Values};

pub use error::{CalculatorError, DefinitionError};
pub use registry::{Registry, PREFERRED_CATEGORY_ORDER};

/// Trait implemented by each scoring calculator.
pub trait Calculator: Send + Sync {
    /// Stable unique identifier (e.g., "albi", "pi-rads").
    fn id(&self) -> &str;

    /// Human-readable name shown in the sidebar.
    fn name(&self) -> &str;

    /// One-line description.
    fn desc(&self) -> &str;

    /// Sidebar group this calculator is listed under.
    fn category(&self) -> &str;

    fn tags(&self) -> &[&str] {
        &[]
    }

    /// Extra search terms that do not appear in the name.
    fn keywords(&self) -> &[&str] {
        &[]
    }

    /// Input fields in display order.
    fn fields(&self) -> &[Field];

    /// Pure computation over the answers. Must not panic for any value shapes
    /// and must tolerate absent fields.
    fn compute(&self, values: &Values) -> Outcome;

    fn refs(&self) -> &[Reference] {
        &[]
    }

    fn info(&self) -> Option<&Info> {
        None
    }

    /// Fields to present for the current answers.
    fn visible_fields(&self, values: &Values) -> Vec<&Field> {
        self.fields()
            .iter()
            .filter(|f| f.is_visible(values))
            .collect()
    }

    /// Compute over the answers the user could actually see: undeclared ids
    /// and answers to hidden fields are dropped first.
    fn evaluate(&self, values: &Values) -> Outcome {
        self.compute(&values.restricted_to(self.fields()))
    }

    /// Structural checks the registry runs before accepting a definition.
    fn check_definition(&self) -> Result<(), DefinitionError> {
        if self.id().trim().is_empty() {
            return Err(DefinitionError::MissingId {
                name: self.name().to_string(),
            });
        }
        if self.name().trim().is_empty() {
            return Err(DefinitionError::MissingName {
                id: self.id().to_string(),
            });
        }

        let mut seen = HashSet::new();
        for field in self.fields() {
            if !seen.insert(field.id.as_str()) {
                return Err(DefinitionError::DuplicateField {
                    calculator_id: self.id().to_string(),
                    field_id: field.id.clone(),
                });
            }
            if field.kind.is_enumerated() && field.opts.is_empty() {
                return Err(DefinitionError::MissingOptions {
                    calculator_id: self.id().to_string(),
                    field_id: field.id.clone(),
                });
            }
        }
        Ok(())
    }

    fn summary(&self) -> CalculatorSummary {
        CalculatorSummary {
            id: self.id().to_string(),
            name: self.name().to_string(),
            desc: self.desc().to_string(),
            category: self.category().to_string(),
            tags: self.tags().iter().map(|t| t.to_string()).collect(),
        }
    }

    fn detail(&self) -> CalculatorDetail {
        CalculatorDetail {
            summary: self.summary(),
            keywords: self.keywords().iter().map(|k| k.to_string()).collect(),
            fields: self.fields().to_vec(),
            refs: self.refs().to_vec(),
            info: self.info().cloned(),
        }
    }
}

/// Sidebar listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CalculatorSummary {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub category: String,
    pub tags: Vec<String>,
}

/// Everything the front end needs to render one calculator form.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct CalculatorDetail {
    #[serde(flatten)]
    pub summary: CalculatorSummary,
    pub keywords: Vec<String>,
    pub fields: Vec<Field>,
    pub refs: Vec<Reference>,
    pub info: Option<Info>,
}

/// Return all shipped calculators.
pub fn all_calculators() -> Vec<Box<dyn Calculator>> {
    use calculators::*;

    vec![
        Box::new(adrenal_ct::AdrenalCt),
        Box::new(adrenal_mri::AdrenalMri),
        Box::new(albi::Albi),
        Box::new(aspects::Aspects),
        Box::new(bi_rads::BiRads),
        Box::new(bosniak::Bosniak),
        Box::new(cad_rads::CadRads),
        Box::new(child_pugh::ChildPugh),
        Box::new(dlp_dose::DlpDose),
        Box::new(hip_graf::HipGraf),
        Box::new(ipss::Ipss),
        Box::new(li_rads::LiRads),
        Box::new(lung_rads::LungRads),
        Box::new(mehran::Mehran),
        Box::new(meld_na::MeldNa),
        Box::new(milan::Milan),
        Box::new(pi_rads::PiRads),
        Box::new(prostate_volume::ProstateVolume),
        Box::new(renal_nephrometry::RenalNephrometry),
        Box::new(shim::Shim),
        Box::new(spleen_size::SpleenSize),
        Box::new(y90::Y90),
    ]
}

/// Look up a calculator by ID.
pub fn get_calculator(id: &str) -> Option<Box<dyn Calculator>> {
    all_calculators().into_iter().find(|c| c.id() == id)
}

/// Registry over [`all_calculators`].
pub fn default_registry() -> Registry {
    Registry::build(all_calculators())
}
