//! Engine configuration

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Trim filler words around the command before matching.
    #[serde(default = "default_span_extraction")]
    pub span_extraction: bool,
    /// Skill manifests registered when a container is built from this config.
    #[serde(default)]
    pub manifests: Vec<PathBuf>,
    /// Upper bound in bytes on one compiled variant. Large entities inline
    /// every line into each template that uses them.
    #[serde(default = "default_regex_size_limit")]
    pub regex_size_limit: usize,
    /// Upper bound in bytes on the lazy DFA cache of one compiled variant.
    #[serde(default = "default_regex_dfa_size_limit")]
    pub regex_dfa_size_limit: usize,
}

fn default_span_extraction() -> bool {
    true
}

fn default_regex_size_limit() -> usize {
    512 * (1 << 20)
}

fn default_regex_dfa_size_limit() -> usize {
    64 * (1 << 20)
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            span_extraction: default_span_extraction(),
            manifests: Vec::new(),
            regex_size_limit: default_regex_size_limit(),
            regex_dfa_size_limit: default_regex_dfa_size_limit(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_missing() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert!(config.span_extraction);
        assert!(config.manifests.is_empty());
        assert_eq!(config.regex_size_limit, 512 * (1 << 20));
        assert_eq!(config.regex_dfa_size_limit, 64 * (1 << 20));
    }

    #[test]
    fn test_parse_regex_limits() {
        let config =
            EngineConfig::from_json(r#"{"regex_size_limit": 4096, "regex_dfa_size_limit": 2048}"#)
                .unwrap();
        assert_eq!(config.regex_size_limit, 4096);
        assert_eq!(config.regex_dfa_size_limit, 2048);
        assert!(config.span_extraction);
    }

    #[test]
    fn test_parse_fields() {
        let config = EngineConfig::from_json(
            r#"{"span_extraction": false, "manifests": ["skills/spelling.json"]}"#,
        )
        .unwrap();
        assert!(!config.span_extraction);
        assert_eq!(config.manifests, vec![PathBuf::from("skills/spelling.json")]);
    }

    #[test]
    fn test_invalid_json_is_manifest_error() {
        let err = EngineConfig::from_json("{span_extraction").unwrap_err();
        assert!(matches!(err, crate::error::Error::Manifest(_)));
    }
}
