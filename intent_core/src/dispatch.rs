//! Intent dispatch - route resolved intents to the handler registered with them

use crate::container::IntentContainer;
use crate::error::{Error, Result};
use crate::types::IntentMatch;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

/// Acts on a resolved intent
pub trait IntentHandler<T>: Send + Sync {
    fn handle(&self, matched: &IntentMatch) -> Result<T>;
}

/// Adapter so plain closures can serve as handlers.
pub struct FnHandler<F>(pub F);

impl<T, F> IntentHandler<T> for FnHandler<F>
where
    F: Fn(&IntentMatch) -> Result<T> + Send + Sync,
{
    fn handle(&self, matched: &IntentMatch) -> Result<T> {
        (self.0)(matched)
    }
}

/// A group of intents handled by one component
pub trait Skill<T>: IntentHandler<T> {
    /// Intent names with their raw templates.
    fn intents(&self) -> Vec<(String, Vec<String>)>;

    /// Entity definitions the intents rely on.
    fn entities(&self) -> Vec<(String, Vec<String>)> {
        Vec::new()
    }
}

/// Intent container plus an explicit intent-name to handler map
pub struct Dispatcher<T> {
    container: IntentContainer,
    handlers: IndexMap<String, Arc<dyn IntentHandler<T>>>,
}

impl<T> Default for Dispatcher<T> {
    fn default() -> Self {
        Self::new(IntentContainer::new())
    }
}

impl<T> Dispatcher<T> {
    pub fn new(container: IntentContainer) -> Self {
        Self {
            container,
            handlers: IndexMap::new(),
        }
    }

    pub fn container(&self) -> &IntentContainer {
        &self.container
    }

    /// Register an intent's templates together with its handler.
    pub fn register<S: AsRef<str>>(
        &mut self,
        name: impl Into<String>,
        templates: &[S],
        handler: Arc<dyn IntentHandler<T>>,
    ) {
        let name = name.into();
        self.container.register_intent(name.clone(), templates);
        self.handlers.insert(name, handler);
    }

    /// Register every intent and entity of `skill`, all routed to it.
    pub fn add_skill<S: Skill<T> + 'static>(&mut self, skill: Arc<S>) {
        for (name, lines) in skill.entities() {
            self.container.register_entity(name, &lines);
        }
        for (name, templates) in skill.intents() {
            let handler: Arc<dyn IntentHandler<T>> = skill.clone();
            self.register(name, &templates, handler);
        }
    }

    pub fn unregister(&mut self, name: &str) {
        self.container.unregister_intent(name);
        self.handlers.shift_remove(name);
    }

    /// Resolve `utterance` and run the matching handler.
    ///
    /// `Ok(None)` means no rule-based intent matched; the caller decides on
    /// a fallback.
    pub fn handle(&self, utterance: &str) -> Result<Option<T>> {
        let matched = self.container.resolve(utterance);
        let Some(name) = matched.name.as_deref() else {
            return Ok(None);
        };
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| Error::UnhandledIntent(name.to_string()))?;

        debug!(intent = name, entities = ?matched.entities, "dispatching intent");
        handler.handle(&matched).map(Some)
    }
}
