//! Document values flowing through the matching pipeline

use serde::{Deserialize, Serialize};

/// A decoded document and the identifier it is reported under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    pub id: String,
    pub text: String,
}

impl RawDocument {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A processed job description: the raw text kept for the report summary
/// and its normalized form used as corpus entry 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobContext {
    raw_text: String,
    normalized: String,
}

impl JobContext {
    pub(crate) fn new(raw_text: String, normalized: String) -> Self {
        Self { raw_text, normalized }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Length of the normalized text in characters
    pub fn preprocessed_length(&self) -> usize {
        self.normalized.chars().count()
    }
}
