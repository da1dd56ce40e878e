//! Skill manifests - intents and entities declared as JSON
//!
//! ```json
//! {
//!   "intents": { "paint:fill": ["paint (it|the wall) {color}"] },
//!   "entities": { "paint:color": ["red", "dark blue"] }
//! }
//! ```

use crate::container::IntentContainer;
use crate::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillManifest {
    #[serde(default)]
    pub intents: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub entities: IndexMap<String, Vec<String>>,
}

impl SkillManifest {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let manifest = Self::from_json(&content)?;
        debug!(
            path = %path.display(),
            intents = manifest.intents.len(),
            entities = manifest.entities.len(),
            "loaded skill manifest"
        );
        Ok(manifest)
    }

    /// Register every entity, then every intent, in declaration order.
    pub fn apply(&self, container: &IntentContainer) {
        for (name, lines) in &self.entities {
            container.register_entity(name.clone(), lines);
        }
        for (name, templates) in &self.intents {
            container.register_intent(name.clone(), templates);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAINT: &str = r#"{
        "intents": { "paint:fill": ["paint (it|the wall) {color}"] },
        "entities": { "paint:color": ["red", "dark blue"] }
    }"#;

    #[test]
    fn test_parse_keeps_order() {
        let manifest = SkillManifest::from_json(PAINT).unwrap();
        assert_eq!(manifest.intents.keys().collect::<Vec<_>>(), vec!["paint:fill"]);
        assert_eq!(manifest.entities["paint:color"], vec!["red", "dark blue"]);
    }

    #[test]
    fn test_apply_registers_everything() {
        let container = IntentContainer::new();
        SkillManifest::from_json(PAINT).unwrap().apply(&container);

        let result = container.resolve("paint the wall red");
        assert_eq!(result.name.as_deref(), Some("paint:fill"));
        assert_eq!(result.entity("color"), Some("red"));
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let manifest = SkillManifest::from_json("{}").unwrap();
        assert!(manifest.intents.is_empty());
        assert!(manifest.entities.is_empty());
    }
}
