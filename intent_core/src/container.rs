//! Intent container - thread-safe registry of intents and entities
//!
//! Every mutation marks the container dirty. The next match recompiles all
//! entities and intents under the same lock, then searches an immutable
//! snapshot without holding it.

use crate::config::EngineConfig;
use crate::entities::EntityRegistry;
use crate::error::Result;
use crate::expand::expand_templates;
use crate::manifest::SkillManifest;
use crate::matcher::{match_all, match_best, CompiledIntent, CompiledSet};
use crate::pattern::compile_variant;
use crate::types::IntentMatch;
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct State {
    /// Intent name to its expanded variants, longest first.
    intents: IndexMap<String, Vec<String>>,
    entities: EntityRegistry,
    dirty: bool,
    compiled: Arc<CompiledSet>,
}

impl State {
    fn compile(&mut self, config: &EngineConfig) {
        let entities = self.entities.compile_all();
        // Capture discriminators only need to be unique within one pass
        let mut discriminator = 0u32;

        let intents = self
            .intents
            .iter()
            .map(|(name, variants)| CompiledIntent {
                name: name.clone(),
                patterns: variants
                    .iter()
                    .filter(|v| !v.trim().is_empty())
                    .filter_map(|variant| {
                        match compile_variant(variant, name, &entities, &mut discriminator, config) {
                            Ok(regex) => Some(regex),
                            Err(e) => {
                                warn!(intent = %name, variant = %variant, error = %e, "dropping template variant");
                                None
                            }
                        }
                    })
                    .collect(),
            })
            .collect();

        let compiled = CompiledSet {
            intents,
            variants: self.intents.values().flatten().cloned().collect(),
        };
        debug!(
            intents = compiled.intents.len(),
            entities = entities.len(),
            patterns = compiled.pattern_count(),
            "compiled intent container"
        );

        self.compiled = Arc::new(compiled);
        self.dirty = false;
    }
}

/// Rule-based intent recognizer shared between threads
#[derive(Debug, Default)]
pub struct IntentContainer {
    state: Mutex<State>,
    config: EngineConfig,
}

impl IntentContainer {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            state: Mutex::new(State::default()),
            config,
        }
    }

    /// Build a container and register every manifest listed in `config`.
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        let manifests = config
            .manifests
            .iter()
            .map(|path| SkillManifest::load_from_file(path))
            .collect::<Result<Vec<_>>>()?;

        let container = Self::with_config(config);
        for manifest in &manifests {
            manifest.apply(&container);
        }
        Ok(container)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Register (or replace) an intent with its raw templates.
    pub fn register_intent<S: AsRef<str>>(&self, name: impl Into<String>, templates: &[S]) {
        let variants = expand_templates(templates);
        let mut state = self.state.lock();
        state.dirty = true;
        state.intents.insert(name.into(), variants);
    }

    pub fn unregister_intent(&self, name: &str) {
        let mut state = self.state.lock();
        state.dirty = true;
        state.intents.shift_remove(name);
    }

    /// Register (or replace) an entity with its literal or patterned lines.
    pub fn register_entity<S: AsRef<str>>(&self, name: impl Into<String>, lines: &[S]) {
        let lines = lines.iter().map(|l| l.as_ref().to_string()).collect();
        let mut state = self.state.lock();
        state.dirty = true;
        state.entities.define(name.into(), lines);
    }

    pub fn unregister_entity(&self, name: &str) {
        let mut state = self.state.lock();
        state.dirty = true;
        state.entities.undefine(name);
    }

    /// Recompile everything now, whether or not anything changed.
    pub fn compile(&self) {
        self.state.lock().compile(&self.config);
    }

    /// Compiled patterns, recompiling first if the registry changed.
    pub fn snapshot(&self) -> Arc<CompiledSet> {
        let mut state = self.state.lock();
        if state.dirty {
            state.compile(&self.config);
        }
        Arc::clone(&state.compiled)
    }

    /// Most specific match of every intent that matches `query`.
    pub fn match_all(&self, query: &str) -> Vec<IntentMatch> {
        match_all(&self.snapshot(), query)
    }

    /// Best intent for `query`, or a result with no name.
    pub fn resolve(&self, query: &str) -> IntentMatch {
        match_best(&self.snapshot(), query, &self.config)
    }

    pub fn intent_names(&self) -> Vec<String> {
        self.state.lock().intents.keys().cloned().collect()
    }

    /// Expanded variants stored for `name`.
    pub fn variants(&self, name: &str) -> Option<Vec<String>> {
        self.state.lock().intents.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.lock().intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
