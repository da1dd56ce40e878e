//! Intent matcher - search compiled patterns and pick the most specific match

use crate::config::EngineConfig;
use crate::pattern::entity_name;
use crate::span::extract_span;
use crate::types::IntentMatch;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Compiled patterns of one intent, most specific variant first
#[derive(Debug, Clone)]
pub struct CompiledIntent {
    pub name: String,
    pub patterns: Vec<Regex>,
}

/// Immutable output of one compile pass, shared by concurrent matchers
#[derive(Debug, Clone, Default)]
pub struct CompiledSet {
    pub intents: Vec<CompiledIntent>,
    /// Every stored template variant in registry order, for span extraction.
    pub variants: Vec<String>,
}

impl CompiledSet {
    pub fn pattern_count(&self) -> usize {
        self.intents.iter().map(|i| i.patterns.len()).sum()
    }
}

fn extract_entities(regex: &Regex, caps: &Captures<'_>) -> BTreeMap<String, String> {
    regex
        .capture_names()
        .flatten()
        .filter_map(|name| {
            let value = caps.name(name)?.as_str().trim();
            (!value.is_empty()).then(|| (entity_name(name), value.to_string()))
        })
        .collect()
}

/// Best match of every intent with at least one matching pattern.
///
/// Within an intent the candidate with the fewest captured characters wins;
/// on a tie the earlier pattern is kept.
pub fn match_all(set: &CompiledSet, query: &str) -> Vec<IntentMatch> {
    let padded = format!(" {query} ");

    set.intents
        .iter()
        .filter_map(|intent| {
            intent
                .patterns
                .iter()
                .filter_map(|regex| {
                    let caps = regex.captures(&padded)?;
                    Some(IntentMatch::new(
                        intent.name.clone(),
                        extract_entities(regex, &caps),
                    ))
                })
                .min_by_key(IntentMatch::specificity)
        })
        .collect()
}

/// Single most specific match across all intents, or [`IntentMatch::none`].
pub fn match_best(set: &CompiledSet, query: &str, config: &EngineConfig) -> IntentMatch {
    let query = if config.span_extraction {
        extract_span(query, &set.variants)
    } else {
        Cow::Borrowed(query)
    };

    match_all(set, &query)
        .into_iter()
        .min_by_key(IntentMatch::specificity)
        .unwrap_or_else(IntentMatch::none)
}
