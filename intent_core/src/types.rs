//! Core data types for match results

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of resolving one utterance
///
/// `name` is `None` when no registered intent matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentMatch {
    pub name: Option<String>,
    pub entities: BTreeMap<String, String>,
}

impl IntentMatch {
    pub fn new(name: String, entities: BTreeMap<String, String>) -> Self {
        Self {
            name: Some(name),
            entities,
        }
    }

    /// The null result: no intent, no entities.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_match(&self) -> bool {
        self.name.is_some()
    }

    pub fn entity(&self, name: &str) -> Option<&str> {
        self.entities.get(name).map(String::as_str)
    }

    /// Total number of characters captured by all entities.
    ///
    /// Lower is more specific: a tighter slot fit means more of the
    /// utterance was accounted for by literal template words.
    pub fn specificity(&self) -> usize {
        self.entities.values().map(|v| v.chars().count()).sum()
    }
}
