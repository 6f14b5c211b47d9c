/*!
 * Text normalization for screenplay lines.
 *
 * Small, pure rewrite helpers shared by the classifier: voice-over and
 * continuation modifiers on character cues, unclosed parentheticals,
 * case policies, and whitespace collapsing. Every rewrite here is
 * idempotent; running a canonical line through again returns it
 * unchanged.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::formatting::profile::CasePolicy;

static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Whitespace pattern must compile")
});

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUNS.replace_all(text.trim(), " ").into_owned()
}

/// Uppercase the first character, leaving the rest of the line alone.
pub fn sentence_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Apply a profile's case policy to a line.
pub fn apply_case_policy(text: &str, policy: CasePolicy) -> String {
    match policy {
        CasePolicy::Uppercase => text.to_uppercase(),
        CasePolicy::Sentence => sentence_case(text),
        CasePolicy::Preserve => text.to_string(),
        CasePolicy::Lowercase => text.to_lowercase(),
    }
}

/// Append the missing closing parenthesis to a parenthetical line.
///
/// Lines that already end with `)` come back unchanged, so a second
/// pass is a no-op.
pub fn close_parenthetical(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.ends_with(')') {
        trimmed.to_string()
    } else {
        format!("{})", trimmed)
    }
}

/// Rewrite voice-over and continuation modifiers to their canonical
/// spellings: `V.O.`, `O.S.`, `O.C.` and `CONT'D`.
///
/// Accepts the common variant spellings (`VO`, `v.o.`, `(V.O.)`,
/// `CONTD`, `CONTINUED`, and period-split pairs like `V. O.`) and
/// collapses immediately repeated modifiers. Non-modifier tokens pass
/// through untouched apart from whitespace collapsing.
pub fn normalize_modifiers(text: &str) -> String {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut output: Vec<String> = Vec::with_capacity(tokens.len());

    let mut index = 0;
    while index < tokens.len() {
        if index + 1 < tokens.len() {
            if let Some(canonical) = split_modifier(tokens[index], tokens[index + 1]) {
                push_modifier(&mut output, canonical);
                index += 2;
                continue;
            }
        }
        match single_modifier(tokens[index]) {
            Some(canonical) => push_modifier(&mut output, canonical),
            None => output.push(tokens[index].to_string()),
        }
        index += 1;
    }

    output.join(" ")
}

/// Bare character name with canonical modifier tokens removed, so
/// `JOHN V.O.` and `JOHN CONT'D` both resolve to `JOHN`.
pub fn strip_modifiers(cue: &str) -> String {
    normalize_modifiers(cue)
        .split_whitespace()
        .filter(|token| single_modifier(token).is_none())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical form of a single modifier token, if it is one.
fn single_modifier(token: &str) -> Option<&'static str> {
    match modifier_key(token).as_str() {
        "vo" => Some("V.O."),
        "os" => Some("O.S."),
        "oc" => Some("O.C."),
        "cont" | "contd" | "continued" => Some("CONT'D"),
        _ => None,
    }
}

/// Canonical form of a modifier split across two tokens, e.g. `V. O.`.
fn split_modifier(first: &str, second: &str) -> Option<&'static str> {
    match (modifier_key(first).as_str(), modifier_key(second).as_str()) {
        ("v", "o") => Some("V.O."),
        ("o", "s") => Some("O.S."),
        ("o", "c") => Some("O.C."),
        ("cont", "d") => Some("CONT'D"),
        _ => None,
    }
}

/// Lookup key for a token: lowercased with parentheses, periods and
/// apostrophes removed.
fn modifier_key(token: &str) -> String {
    token
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '.' | '\''))
        .collect::<String>()
        .to_lowercase()
}

fn push_modifier(output: &mut Vec<String>, canonical: &'static str) {
    if output.last().map(String::as_str) != Some(canonical) {
        output.push(canonical.to_string());
    }
}
