//! Entity registry - named slot types referenced by `{name}` in templates

use crate::pattern::entity_line_pattern;
use ahash::AHashMap;
use indexmap::IndexMap;

/// Raw entity definitions, keyed by (possibly namespaced) entity name
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    lines: IndexMap<String, Vec<String>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the lines for `name`, replacing any previous definition.
    pub fn define(&mut self, name: String, lines: Vec<String>) {
        self.lines.insert(name, lines);
    }

    /// Remove `name`. Returns whether it was defined.
    pub fn undefine(&mut self, name: &str) -> bool {
        self.lines.shift_remove(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Compile every entity into one alternation group over its lines.
    ///
    /// Entities without any non-blank line get no pattern, so slots that
    /// reference them fall back to the generic wildcard.
    pub fn compile_all(&self) -> CompiledEntities {
        let patterns = self
            .lines
            .iter()
            .filter_map(|(name, lines)| {
                let alternatives: Vec<String> = lines
                    .iter()
                    .filter(|line| !line.trim().is_empty())
                    .map(|line| entity_line_pattern(line))
                    .collect();
                if alternatives.is_empty() {
                    return None;
                }
                Some((name.clone(), format!("({})", alternatives.join("|"))))
            })
            .collect();

        CompiledEntities { patterns }
    }
}

/// Entity name to compiled regex fragment
#[derive(Debug, Clone, Default)]
pub struct CompiledEntities {
    patterns: AHashMap<String, String>,
}

impl CompiledEntities {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.patterns.get(name).map(String::as_str)
    }

    /// Pattern for a slot used by an intent in `namespace`.
    ///
    /// `namespace:slot` takes precedence over a global `slot`.
    pub fn resolve(&self, slot: &str, namespace: &str) -> Option<&str> {
        self.get(&format!("{namespace}:{slot}"))
            .or_else(|| self.get(slot))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
