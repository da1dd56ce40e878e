//! Span extraction - trim filler words around the command in an utterance
//!
//! Each template variant is reduced to its literal skeleton (the words
//! between `{slot}` markers). The first variant whose skeleton can be found
//! in the query decides the trimmed span.

use std::borrow::Cow;

/// Split a variant on its `{...}` markers into the literal phrases around them.
fn skeleton(variant: &str) -> Vec<Vec<&str>> {
    let mut phrases = Vec::new();
    let mut index = 0;
    let mut from = 0;

    while let Some(open) = variant[from..].find('{').map(|i| i + from) {
        let Some(close) = variant[open..].find('}').map(|i| i + open) else {
            break;
        };
        phrases.push(variant[index..open].split_whitespace().collect());
        index = close + 1;
        from = close + 1;
    }
    phrases.push(variant[index..].split_whitespace().collect());

    phrases
}

/// Position of every skeleton word in `words`, or `None` if one is missing.
///
/// Within a phrase each word is searched from the position of the previous
/// one, so phrase word order is kept while filler words may sit between.
fn locate(phrases: &[Vec<&str>], words: &[&str]) -> Option<Vec<usize>> {
    let mut found = Vec::new();
    for phrase in phrases {
        let mut from = 0;
        for word in phrase {
            let at = words[from..].iter().position(|w| w == word)? + from;
            found.push(at);
            from = at;
        }
    }
    Some(found)
}

/// Trim `query` to the tightest span matching one variant's skeleton.
///
/// A variant that starts (ends) with a slot widens the span by one word on
/// the left (right). The span only counts if it holds more words than the
/// skeleton itself. Returns the query unchanged when no variant qualifies.
pub fn extract_span<'a, S: AsRef<str>>(query: &'a str, variants: &[S]) -> Cow<'a, str> {
    let words: Vec<&str> = query.split_whitespace().collect();

    for variant in variants {
        let phrases = skeleton(variant.as_ref());
        let Some(found) = locate(&phrases, &words) else {
            continue;
        };
        let (Some(&first), Some(&last)) = (found.first(), found.last()) else {
            continue;
        };

        let open_start = phrases.first().is_some_and(|p| p.is_empty());
        let open_end = phrases.last().is_some_and(|p| p.is_empty());
        // Clamped at the query start, so "{a} paint {b}" over "paint blue extra"
        // yields "paint blue" instead of skipping the variant.
        let start = if open_start { first.saturating_sub(1) } else { first };
        let end = (if open_end { last + 2 } else { last + 1 }).min(words.len());

        if end > start && end - start > found.len() {
            return Cow::Owned(words[start..end].join(" "));
        }
    }

    Cow::Borrowed(query)
}
