//! Intent core - rule-based intent and entity recognition
//!
//! Templates such as `spell (the word|) {word}` are expanded, compiled into
//! regexes and matched against transcribed utterances. The most specific
//! match (fewest characters captured by slots) wins.

pub mod config;
pub mod container;
pub mod dispatch;
pub mod entities;
pub mod error;
pub mod expand;
pub mod manifest;
pub mod matcher;
pub mod pattern;
pub mod skills;
pub mod span;
pub mod types;

pub use config::EngineConfig;
pub use container::IntentContainer;
pub use dispatch::{Dispatcher, FnHandler, IntentHandler, Skill};
pub use entities::{CompiledEntities, EntityRegistry};
pub use error::{Error, Result};
pub use expand::{expand_template, expand_templates};
pub use manifest::SkillManifest;
pub use matcher::{match_all, match_best, CompiledIntent, CompiledSet};
pub use span::extract_span;
pub use types::IntentMatch;

// Python bindings
#[cfg(feature = "extension-module")]
pub mod py;

#[cfg(feature = "extension-module")]
use pyo3::prelude::*;

#[cfg(feature = "extension-module")]
#[pymodule]
fn intent_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<py::PyIntentContainer>()?;
    Ok(())
}
