use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A literature citation shown under a calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Reference {
    pub text: String,
    pub url: Option<String>,
}

impl Reference {
    pub fn new(text: &str, url: &str) -> Self {
        Self {
            text: text.to_string(),
            url: (!url.is_empty()).then(|| url.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// Free-text explanation block, optionally pointing at an external page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Info {
    pub text: String,
    pub link: Option<Link>,
}

impl Info {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            link: None,
        }
    }

    pub fn link(mut self, label: &str, url: &str) -> Self {
        self.link = Some(Link {
            label: label.to_string(),
            url: url.to_string(),
        });
        self
    }
}
