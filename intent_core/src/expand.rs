//! Template expansion - resolve `(a|b|)` alternation groups into concrete variants

use std::cmp::Reverse;

/// One `(...)` group: its options and the byte offsets of its parentheses.
struct Group<'a> {
    options: Vec<&'a str>,
    open: usize,
    close: usize,
}

pub fn count_words(line: &str) -> usize {
    line.split_whitespace().count()
}

/// Scan left to right for `(` / `)` pairs. Groups do not nest; an unclosed
/// `(` ends the scan and stays literal.
fn find_groups(template: &str) -> Vec<Group<'_>> {
    let mut groups = Vec::new();
    let mut from = 0;

    while let Some(open) = template[from..].find('(').map(|i| i + from) {
        let Some(close) = template[open + 1..].find(')').map(|i| i + open + 1) else {
            break;
        };
        groups.push(Group {
            options: template[open + 1..close].split('|').collect(),
            open,
            close,
        });
        from = close + 1;
    }

    groups
}

/// Expand a single template into every combination of its group options.
///
/// Combinations follow cartesian-product order, last group varying fastest.
/// Whitespace in expanded lines is collapsed, so an empty option simply
/// drops the group. Templates without groups come back verbatim.
pub fn expand_template(template: &str) -> Vec<String> {
    let groups = find_groups(template);
    if groups.is_empty() {
        return vec![template.to_string()];
    }

    let mut variants = Vec::new();
    let mut picks = vec![0usize; groups.len()];

    loop {
        let mut line = String::with_capacity(template.len());
        let mut index = 0;
        for (group, &pick) in groups.iter().zip(&picks) {
            line.push_str(&template[index..group.open]);
            line.push_str(group.options[pick]);
            index = group.close + 1;
        }
        line.push_str(&template[index..]);
        variants.push(line.split_whitespace().collect::<Vec<_>>().join(" "));

        // Advance the odometer
        let mut slot = groups.len();
        loop {
            if slot == 0 {
                return variants;
            }
            slot -= 1;
            picks[slot] += 1;
            if picks[slot] < groups[slot].options.len() {
                break;
            }
            picks[slot] = 0;
        }
    }
}

/// Expand all templates of one intent, longest variants first.
///
/// The sort is stable so equally long variants keep their expansion order.
pub fn expand_templates<S: AsRef<str>>(templates: &[S]) -> Vec<String> {
    let mut variants: Vec<String> = templates
        .iter()
        .flat_map(|t| expand_template(t.as_ref()))
        .collect();
    variants.sort_by_key(|v| Reverse(count_words(v)));
    variants
}
