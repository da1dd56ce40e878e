//! End-to-end resolution through the public container API

use intent_core::{expand_template, extract_span, IntentContainer, IntentMatch};
use std::sync::Arc;
use std::thread;

fn spelling_container() -> IntentContainer {
    let container = IntentContainer::new();
    container.register_intent(
        "spelling_spell_word",
        &[
            "spell (word|the word|) {word}",
            "spelling (of|for|) (the word|word|) {word}",
            "how is (the word|word|) {word} spelled",
            "{word} spelling",
        ],
    );
    container.register_intent(
        "spelling_count_letters",
        &["how many {letter} (can you find|are|) in (word|the word) {word}"],
    );
    container
}

#[test]
fn test_spell_word_with_empty_entity() {
    let container = IntentContainer::new();
    let no_lines: [&str; 0] = [];
    container.register_entity("word", &no_lines);
    container.register_intent("spelling_spell_word", &["spell {word}"]);

    let result = container.resolve("spell cat");
    assert_eq!(result.name.as_deref(), Some("spelling_spell_word"));
    assert_eq!(result.entities.len(), 1);
    assert_eq!(result.entity("word"), Some("cat"));
}

#[test]
fn test_no_match() {
    let container = spelling_container();
    assert_eq!(container.resolve("completely unrelated gibberish"), IntentMatch::none());
}

#[test]
fn test_optional_words_select_tightest_slot() {
    let container = spelling_container();

    let result = container.resolve("spell the word cat");
    assert_eq!(result.name.as_deref(), Some("spelling_spell_word"));
    assert_eq!(result.entity("word"), Some("cat"));

    let result = container.resolve("how many a are in the word banana");
    assert_eq!(result.name.as_deref(), Some("spelling_count_letters"));
    assert_eq!(result.entity("letter"), Some("a"));
    assert_eq!(result.entity("word"), Some("banana"));
}

#[test]
fn test_case_insensitive_keeps_query_text() {
    let container = spelling_container();
    assert_eq!(container.resolve("SPELL Cat").entity("word"), Some("Cat"));
}

#[test]
fn test_superset_template_is_more_specific() {
    let container = IntentContainer::new();
    container.register_intent("music_play", &["play {song}", "play {song} by {artist}"]);

    let result = container.resolve("play hello by adele");
    assert_eq!(result.entity("song"), Some("hello"));
    assert_eq!(result.entity("artist"), Some("adele"));
}

#[test]
fn test_namespaced_entity_wins() {
    let container = IntentContainer::new();
    container.register_entity("color", &["green"]);
    container.register_entity("myintent:color", &["red"]);
    container.register_intent("myintent", &["paint it {color}"]);
    container.register_intent("other", &["color it {color}"]);

    let result = container.resolve("paint it red");
    assert_eq!(result.name.as_deref(), Some("myintent"));
    assert_eq!(result.entity("color"), Some("red"));

    assert_eq!(container.resolve("paint it green"), IntentMatch::none());
    assert_eq!(container.resolve("color it green").entity("color"), Some("green"));
}

#[test]
fn test_foreign_namespace_reference() {
    let container = IntentContainer::new();
    container.register_entity("paint:color", &["red", "blue"]);
    container.register_intent("car", &["a {paint:color} car"]);

    let result = container.resolve("a blue car");
    assert_eq!(result.name.as_deref(), Some("car"));
    assert_eq!(result.entity("paint:color"), Some("blue"));
}

#[test]
fn test_entity_lines_with_alternatives() {
    let container = IntentContainer::new();
    container.register_entity("size", &["(extra|) large", "small"]);
    container.register_intent("pizza_order", &["order a {size} pizza"]);

    assert_eq!(
        container.resolve("order a extra large pizza").entity("size"),
        Some("extra large")
    );
    assert_eq!(container.resolve("order a small pizza").entity("size"), Some("small"));
    assert_eq!(container.resolve("order a huge pizza"), IntentMatch::none());
}

#[test]
fn test_digit_is_wildcard() {
    let container = IntentContainer::new();
    container.register_intent("timer_set", &["set timer for 5 minutes"]);

    assert_eq!(
        container.resolve("set timer for 9 minutes").name.as_deref(),
        Some("timer_set")
    );
    assert_eq!(container.resolve("set timer for nine minutes"), IntentMatch::none());
}

#[test]
fn test_single_word_wildcard() {
    let container = IntentContainer::new();
    container.register_intent("call", &["call :0"]);

    assert_eq!(container.resolve("call bob").name.as_deref(), Some("call"));
    assert_eq!(container.resolve("call bob smith"), IntentMatch::none());
}

#[test]
fn test_punctuation_is_optional() {
    let container = IntentContainer::new();
    container.register_intent("greeting", &["what's up"]);

    assert!(container.resolve("what's up").is_match());
    assert!(container.resolve("what s up?").is_match());
}

#[test]
fn test_span_extraction_shortens_query() {
    let query = "uh can you remind me to buy milk please";
    let span = extract_span(query, &["remind me to {thing}"]);

    assert!(span.len() < query.len());
    assert!("remind me to buy milk please".starts_with(&*span));
}

#[test]
fn test_expansion_count_is_product() {
    let variants = expand_template("(set|start) (a|the|) (timer|alarm) now");
    assert_eq!(variants.len(), 2 * 3 * 2);
}

#[test]
fn test_match_all_reports_each_intent() {
    let container = IntentContainer::new();
    container.register_intent("search", &["search {query}"]);
    container.register_intent("search_web", &["search the web for {query}"]);

    let matches = container.match_all("search the web for cats");
    let names: Vec<_> = matches.iter().filter_map(|m| m.name.as_deref()).collect();
    assert_eq!(names, vec!["search", "search_web"]);
}

#[test]
fn test_concurrent_resolve_during_mutation() {
    let container = Arc::new(spelling_container());

    thread::scope(|scope| {
        let writer = Arc::clone(&container);
        scope.spawn(move || {
            for i in 0..50 {
                writer.register_intent(format!("noise_{i}"), &["noise number {n}"]);
            }
        });

        for _ in 0..4 {
            let reader = Arc::clone(&container);
            scope.spawn(move || {
                for _ in 0..50 {
                    let result = reader.resolve("spell cat");
                    assert_eq!(result.name.as_deref(), Some("spelling_spell_word"));
                    assert_eq!(result.entity("word"), Some("cat"));
                }
            });
        }
    });

    assert_eq!(container.len(), 52);
}
