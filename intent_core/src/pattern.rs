//! Pattern compiler - translate template variants and entity lines into regexes
//!
//! A line is first tokenized (with one padding space on each side), then
//! rewritten in order:
//!
//! 1. `(text)` without a `|` is kept as literal parentheses.
//! 2. Other punctuation becomes a literal symbol; `{name}` becomes a slot.
//! 3. Remaining `(`, `|`, `)` become a non-capturing alternation.
//! 4. ` :0 ` matches one word, `#` and literal digits match any digit.
//! 5. Word characters touching a non-word token get a gap inserted between
//!    them, so attached punctuation is its own token.
//! 6. Symbols are optional.
//! 7. A gap after a word, digit or slot needs at least one separator
//!    (`\W+`); every other gap is optional (`\W*`).

use crate::config::EngineConfig;
use crate::entities::CompiledEntities;
use crate::error::{Error, Result};
use regex::{Regex, RegexBuilder};

/// Separator used in capture names for namespaced entity references.
const COLON_ESCAPE: &str = "__colon__";

/// Pattern for a slot that names no registered entity: at least one word,
/// matched lazily.
const GENERIC_SLOT: &str = r".*?\w.*?";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(char),
    Space,
    Symbol(char),
    Digit,
    AnyWord,
    Slot(String),
    GroupOpen,
    Alternative,
    GroupClose,
}

impl Token {
    /// Whether the rendered token ends in a word character.
    fn ends_word(&self) -> bool {
        matches!(self, Token::Word(_) | Token::Digit | Token::Slot(_))
    }
}

/// Whether `{name}` markers are slots or literal braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotMode {
    Slots,
    Literal,
}

/// A tokenized line with word boundaries already inserted
#[derive(Debug, Clone)]
pub struct Fragment {
    tokens: Vec<Token>,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Index of the `)` closing a literal group opened at `open`, if the group
/// contains no alternatives.
fn literal_group_end(chars: &[char], open: usize) -> Option<usize> {
    for (i, &c) in chars.iter().enumerate().skip(open + 1) {
        match c {
            '|' => return None,
            ')' => return Some(i),
            _ => {}
        }
    }
    None
}

fn is_slot_name(name: &str) -> bool {
    !name.is_empty()
        && name.split(':').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

/// Slot name of a `{name}` marker starting at `open`.
fn slot_at(chars: &[char], open: usize) -> Option<String> {
    let len = chars[open + 1..].iter().position(|&c| c == '}')?;
    let name: String = chars[open + 1..open + 1 + len].iter().collect();
    is_slot_name(&name).then_some(name)
}

fn needs_boundary(prev: &Token, next: &Token) -> bool {
    match (prev, next) {
        (Token::Space, _) | (_, Token::Space) => false,
        (Token::Word(_), Token::Word(_)) => false,
        (Token::Word(_), _) => true,
        (Token::Digit, Token::Word(_)) => false,
        (_, Token::Word(_)) => true,
        _ => false,
    }
}

impl Fragment {
    pub fn parse(line: &str, mode: SlotMode) -> Self {
        let chars: Vec<char> = line.chars().collect();
        let mut tokens = vec![Token::Space];
        let mut literal_close = None;
        let mut i = 0;

        while i < chars.len() {
            let token = match chars[i] {
                ')' if literal_close == Some(i) => {
                    literal_close = None;
                    Token::Symbol(')')
                }
                '(' if literal_close.is_some() => Token::Symbol('('),
                '(' => match literal_group_end(&chars, i) {
                    Some(close) => {
                        literal_close = Some(close);
                        Token::Symbol('(')
                    }
                    None => Token::GroupOpen,
                },
                ')' => Token::GroupClose,
                '|' => Token::Alternative,
                '{' if mode == SlotMode::Slots => match slot_at(&chars, i) {
                    Some(name) => {
                        i += name.len() + 2;
                        tokens.push(Token::Slot(name));
                        continue;
                    }
                    None => Token::Symbol('{'),
                },
                ':' if tokens.last() == Some(&Token::Space)
                    && chars.get(i + 1) == Some(&'0')
                    && chars.get(i + 2).map_or(true, |c| c.is_whitespace()) =>
                {
                    i += 2;
                    tokens.push(Token::AnyWord);
                    continue;
                }
                '#' => Token::Digit,
                c if c.is_ascii_digit() => Token::Digit,
                c if c.is_whitespace() => Token::Space,
                c if is_word_char(c) => Token::Word(c),
                c => Token::Symbol(c),
            };
            tokens.push(token);
            i += 1;
        }
        tokens.push(Token::Space);

        let mut bounded: Vec<Token> = Vec::with_capacity(tokens.len() * 2);
        for token in tokens {
            if bounded.last().is_some_and(|prev| needs_boundary(prev, &token)) {
                bounded.push(Token::Space);
            }
            bounded.push(token);
        }

        Self { tokens: bounded }
    }

    /// Render as regex source. `slot` supplies the pattern for each slot.
    pub fn render(&self, mut slot: impl FnMut(&str) -> String) -> String {
        let mut out = String::new();
        let mut gap = false;
        let mut after_word = false;

        for token in &self.tokens {
            if *token == Token::Space {
                gap = true;
                continue;
            }
            if gap {
                out.push_str(if after_word { r"\W+" } else { r"\W*" });
                gap = false;
            }
            match token {
                Token::Word(c) => out.push(*c),
                Token::Symbol(c) => {
                    out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
                    out.push('?');
                }
                Token::Digit => out.push_str(r"\d"),
                Token::AnyWord => out.push_str(r"\w+"),
                Token::Slot(name) => out.push_str(&slot(name)),
                Token::GroupOpen => out.push_str("(?:"),
                Token::Alternative => out.push('|'),
                Token::GroupClose => out.push(')'),
                Token::Space => {}
            }
            after_word = token.ends_word();
        }
        if gap {
            out.push_str(r"\W*");
        }

        out
    }
}

/// Regex fragment for one entity definition line. Braces are literal here.
pub fn entity_line_pattern(line: &str) -> String {
    Fragment::parse(line, SlotMode::Literal).render(|_| String::new())
}

/// Capture group name for a slot, unique within one compile pass.
pub fn capture_name(slot: &str, discriminator: u32) -> String {
    format!("{}__{}", slot.replace(':', COLON_ESCAPE), discriminator)
}

/// Recover the entity name from a capture group name.
pub fn entity_name(capture: &str) -> String {
    let base = capture.rsplit_once("__").map_or(capture, |(base, _)| base);
    base.replace(COLON_ESCAPE, ":")
}

/// Namespace of an intent: everything before its first `:`.
pub fn namespace(intent: &str) -> &str {
    intent.split(':').next().unwrap_or(intent)
}

/// Regex source for one template variant, anchored to the padded utterance.
pub fn intent_pattern(
    variant: &str,
    intent: &str,
    entities: &CompiledEntities,
    discriminator: &mut u32,
) -> String {
    let namespace = namespace(intent);
    let body = Fragment::parse(variant, SlotMode::Slots).render(|slot| {
        let name = capture_name(slot, *discriminator);
        *discriminator += 1;
        match entities.resolve(slot, namespace) {
            Some(pattern) => format!("(?P<{name}>{pattern})"),
            None => format!("(?P<{name}>{GENERIC_SLOT})"),
        }
    });
    format!("^{body}$")
}

/// Compile one template variant into a case-insensitive regex, bounded by
/// the size limits in `config`.
pub fn compile_variant(
    variant: &str,
    intent: &str,
    entities: &CompiledEntities,
    discriminator: &mut u32,
    config: &EngineConfig,
) -> Result<Regex> {
    let pattern = intent_pattern(variant, intent, entities, discriminator);
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .size_limit(config.regex_size_limit)
        .dfa_size_limit(config.regex_dfa_size_limit)
        .build()
        .map_err(|source| Error::Pattern {
            variant: variant.to_string(),
            intent: intent.to_string(),
            source,
        })
}
