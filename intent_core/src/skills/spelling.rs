//! Spelling skill - spell a word out, count letters in a word

use crate::dispatch::{IntentHandler, Skill};
use crate::error::{Error, Result};
use crate::types::IntentMatch;
use serde::{Deserialize, Serialize};

pub const SPELL_WORD: &str = "spelling_spell_word";
pub const COUNT_LETTERS: &str = "spelling_count_letters";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpellingAnswer {
    Spelled { word: String, letters: Vec<char> },
    LetterCount { letter: char, word: String, count: usize },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SpellingSkill;

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| l.to_string()).collect()
}

fn require<'a>(matched: &'a IntentMatch, entity: &str) -> Result<&'a str> {
    matched.entity(entity).ok_or_else(|| Error::Handler {
        intent: matched.name.clone().unwrap_or_default(),
        message: format!("missing entity {entity}"),
    })
}

/// Uppercase form of one letter, or the letter itself when its uppercase
/// form is not a single character (`ß` uppercases to `SS`).
fn upper_letter(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

impl IntentHandler<SpellingAnswer> for SpellingSkill {
    fn handle(&self, matched: &IntentMatch) -> Result<SpellingAnswer> {
        match matched.name.as_deref() {
            Some(SPELL_WORD) => {
                let word = require(matched, "word")?;
                Ok(SpellingAnswer::Spelled {
                    word: word.to_string(),
                    letters: word.chars().map(upper_letter).collect(),
                })
            }
            Some(COUNT_LETTERS) => {
                let word = require(matched, "word")?;
                let letter = require(matched, "letter")?
                    .chars()
                    .next()
                    .ok_or_else(|| Error::Handler {
                        intent: COUNT_LETTERS.to_string(),
                        message: "empty letter".to_string(),
                    })?;
                Ok(SpellingAnswer::LetterCount {
                    letter,
                    word: word.to_string(),
                    count: word.chars().filter(|&c| c == letter).count(),
                })
            }
            other => Err(Error::UnhandledIntent(other.unwrap_or_default().to_string())),
        }
    }
}

impl Skill<SpellingAnswer> for SpellingSkill {
    fn intents(&self) -> Vec<(String, Vec<String>)> {
        vec![
            (
                SPELL_WORD.to_string(),
                owned(&[
                    "spell (word|the word|) {word}",
                    "spelling (of|for|) (the word|word|) {word}",
                    "spell out (the word|word|) {word}",
                    "(the word|word|) {word} is spelled how",
                    "how is (the word|word|) {word} spelled",
                    "how (the word|word|) {word} is spelled",
                    "{word} spelling",
                ]),
            ),
            (
                COUNT_LETTERS.to_string(),
                owned(&["how many {letter} (can you find|are|) in (word|the word) {word}"]),
            ),
        ]
    }
}
