/*!
 * Line classification for screenplay text.
 *
 * `LineClassifier::classify` is the single rule cascade that assigns a
 * structural type to a raw line and rewrites it into canonical form.
 * It is pure and total: identical inputs always produce the same
 * result, and no input can make it fail. Context is limited to the
 * previous line's type and text plus a provisional/finalized flag.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::formatting::element::ElementType;
use crate::formatting::normalizer::{
    apply_case_policy, close_parenthetical, collapse_whitespace, normalize_modifiers,
};
use crate::formatting::profile::profile_for;

/// Scene heading openers, dual-location forms first so `INT./EXT.`
/// is not consumed as a bare `INT.` with a stray slash behind it.
static SCENE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?P<prefix>int\s*\.?\s*/\s*ext|ext\s*\.?\s*/\s*int|i\s*/\s*e|int|ext)(?P<rest>[.\s/-].*|\.?)$",
    )
    .expect("Scene prefix pattern must compile")
});

/// Time-of-day vocabulary for scene headings, matched case-insensitively
/// against the final whitespace-delimited token.
const TIME_OF_DAY: [&str; 9] = [
    "day",
    "night",
    "morning",
    "evening",
    "noon",
    "dawn",
    "dusk",
    "later",
    "continuous",
];

/// Camera-direction openers that mark a line as a shot when followed
/// by a space and more text.
const SHOT_OPENERS: [&str; 9] = [
    "angle", "close", "pov", "wide", "back", "on", "insert", "aerial", "tracking",
];

/// Common English function words. A line containing one of these reads
/// like prose rather than a name, so the relaxed character-cue path
/// skips it. The word-frequency analysis pass filters on the same table.
pub static STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "had", "has", "have",
    "he", "her", "him", "his", "i", "if", "in", "into", "is", "it", "its", "my", "no", "not",
    "of", "on", "or", "our", "out", "she", "so", "that", "the", "their", "then", "there", "they",
    "this", "to", "up", "was", "we", "were", "what", "when", "where", "which", "who", "will",
    "with", "you", "your",
];

/// What the classifier knows about the line before the one being classified.
#[derive(Debug, Clone, Default)]
pub struct ClassificationContext {
    /// Structural type assigned to the previous line, if any.
    pub previous_type: Option<ElementType>,
    /// Raw text of the previous line, if any.
    pub previous_line: Option<String>,
    /// True when the line is being committed rather than still typed.
    pub is_final: bool,
}

impl ClassificationContext {
    /// Context at the start of a document: no previous line.
    pub fn start() -> Self {
        Self::default()
    }

    /// Context following a line of the given type.
    pub fn after(previous_type: ElementType) -> Self {
        Self {
            previous_type: Some(previous_type),
            previous_line: None,
            is_final: false,
        }
    }

    /// Context following a line of the given type with its raw text.
    pub fn after_line(previous_type: ElementType, previous_line: impl Into<String>) -> Self {
        Self {
            previous_type: Some(previous_type),
            previous_line: Some(previous_line.into()),
            is_final: false,
        }
    }

    /// Mark this classification as a line commit.
    pub fn finalized(mut self) -> Self {
        self.is_final = true;
        self
    }
}

/// Outcome of classifying one line.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    /// Structural type assigned by the cascade.
    pub element_type: ElementType,
    /// Canonical text after normalization.
    pub text: String,
    /// True when the canonical text differs from the raw input.
    pub modified: bool,
    /// Optional suffix the caller may append, e.g. a missing time of day.
    pub suggested_suffix: Option<String>,
    /// Optional human-readable warning about the line.
    pub warning: Option<String>,
}

impl ClassificationResult {
    fn new(raw_line: &str, element_type: ElementType, text: String) -> Self {
        let modified = text != raw_line;
        Self {
            element_type,
            text,
            modified,
            suggested_suffix: None,
            warning: None,
        }
    }
}

/// The rule cascade that types and canonicalizes screenplay lines.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    default_time_of_day: String,
}

impl LineClassifier {
    /// Classifier with the standard `DAY` suggestion for headings
    /// committed without a time of day.
    pub fn new() -> Self {
        Self {
            default_time_of_day: "DAY".to_string(),
        }
    }

    /// Override the time of day suggested for incomplete scene headings.
    pub fn with_time_of_day(mut self, time_of_day: impl Into<String>) -> Self {
        self.default_time_of_day = time_of_day.into().to_uppercase();
        self
    }

    /// Assign a structural type to a raw line and produce its canonical text.
    ///
    /// Rules are tried in fixed priority order; the first match wins and
    /// Action is the universal fallback, so every input resolves to a
    /// valid result. Blank lines come back as Action with empty text and
    /// no modification flagged.
    pub fn classify(&self, raw_line: &str, context: &ClassificationContext) -> ClassificationResult {
        let trimmed = raw_line.trim();

        if trimmed.is_empty() {
            return ClassificationResult {
                element_type: ElementType::Action,
                text: String::new(),
                modified: false,
                suggested_suffix: None,
                warning: None,
            };
        }

        if let Some(result) = self.scene_heading(raw_line, trimmed, context) {
            return result;
        }

        if trimmed.starts_with('(') {
            let text = close_parenthetical(trimmed);
            return ClassificationResult::new(raw_line, ElementType::Parenthetical, text);
        }

        if let Some(text) = transition(trimmed) {
            return ClassificationResult::new(raw_line, ElementType::Transition, text);
        }

        if let Some(text) = shot(trimmed) {
            return ClassificationResult::new(raw_line, ElementType::Shot, text);
        }

        if let Some(text) = centered(trimmed) {
            return ClassificationResult::new(raw_line, ElementType::CenteredText, text);
        }

        if let Some(text) = character_cue(trimmed, context) {
            return ClassificationResult::new(raw_line, ElementType::Character, text);
        }

        if matches!(
            context.previous_type,
            Some(ElementType::Character) | Some(ElementType::Parenthetical)
        ) {
            return ClassificationResult::new(raw_line, ElementType::Dialogue, trimmed.to_string());
        }

        let action_case = profile_for(ElementType::Action).case_policy;
        ClassificationResult::new(
            raw_line,
            ElementType::Action,
            apply_case_policy(trimmed, action_case),
        )
    }

    /// Scene heading rule: recognized opener, canonical token, and the
    /// location/time split.
    fn scene_heading(
        &self,
        raw_line: &str,
        trimmed: &str,
        context: &ClassificationContext,
    ) -> Option<ClassificationResult> {
        let captures = SCENE_PREFIX.captures(trimmed)?;
        let token = canonical_scene_token(captures.name("prefix")?.as_str());
        let rest = captures.name("rest").map_or("", |m| m.as_str());

        let remainder = collapse_whitespace(
            rest.trim_start_matches(|c: char| {
                c.is_whitespace() || matches!(c, '.' | '-' | '/')
            }),
        );

        let (location, time_of_day) = match remainder.rsplit_once(' ') {
            Some((head, last)) if is_time_of_day(last) => (head, Some(last)),
            None if is_time_of_day(&remainder) => ("", Some(remainder.as_str())),
            _ => (remainder.as_str(), None),
        };
        let location = location
            .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '-' | ','))
            .to_uppercase();

        let mut result = match time_of_day {
            Some(time) => {
                let text = if location.is_empty() {
                    format!("{} - {}", token, time.to_uppercase())
                } else {
                    format!("{} {} - {}", token, location, time.to_uppercase())
                };
                ClassificationResult::new(raw_line, ElementType::SceneHeading, text)
            }
            None => {
                let text = if location.is_empty() {
                    token.to_string()
                } else {
                    format!("{} {}", token, location)
                };
                let mut result =
                    ClassificationResult::new(raw_line, ElementType::SceneHeading, text);
                if context.is_final {
                    result.suggested_suffix = Some(format!(" - {}", self.default_time_of_day));
                    result.warning = Some("Scene heading has no time of day".to_string());
                }
                result
            }
        };

        // A heading reduced to its bare token is flagged even mid-typing.
        if result.text == token && result.warning.is_none() {
            result.warning = Some("Scene heading has no location".to_string());
        }
        Some(result)
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// One of exactly three canonical scene tokens.
fn canonical_scene_token(prefix: &str) -> &'static str {
    let lowered = prefix.to_lowercase();
    if lowered.contains('/') {
        "INT./EXT."
    } else if lowered.starts_with("int") {
        "INT."
    } else {
        "EXT."
    }
}

/// Whether a token belongs to the scene-heading time vocabulary.
pub(crate) fn is_time_of_day(token: &str) -> bool {
    TIME_OF_DAY.contains(&token.to_lowercase().as_str())
}

/// Transition rule: terminal colon, nothing but plain cue punctuation
/// before it, and at least one letter.
fn transition(trimmed: &str) -> Option<String> {
    let body = trimmed.strip_suffix(':')?;
    if body.is_empty() || !body.chars().any(char::is_alphabetic) {
        return None;
    }
    let plain = body.chars().all(|c| {
        c.is_alphanumeric() || c.is_whitespace() || matches!(c, '.' | '\'' | '-' | '(' | ')')
    });
    plain.then(|| trimmed.to_uppercase())
}

/// Shot rule: camera-direction opener followed by a space and more text.
fn shot(trimmed: &str) -> Option<String> {
    let (first, _) = trimmed.split_once(char::is_whitespace)?;
    SHOT_OPENERS
        .contains(&first.to_lowercase().as_str())
        .then(|| trimmed.to_uppercase())
}

/// Centered text rule: `>` ... `<` wrapper, rewrapped with single-space padding.
fn centered(trimmed: &str) -> Option<String> {
    if trimmed.len() >= 2 && trimmed.starts_with('>') && trimmed.ends_with('<') {
        let inner = trimmed[1..trimmed.len() - 1].trim();
        Some(format!("> {} <", inner))
    } else {
        None
    }
}

/// Character cue rule.
///
/// An entirely uppercase line of cue shape qualifies in any context. A
/// mixed-case line qualifies only in a cue position, and only when it
/// carries no function words and no sentence punctuation, so `john`
/// after a scene heading becomes `JOHN` while `she waits.` stays Action.
fn character_cue(trimmed: &str, context: &ClassificationContext) -> Option<String> {
    if !has_cue_shape(trimmed) {
        return None;
    }

    let uppercase_only = !trimmed.chars().any(char::is_lowercase);
    let name_in_cue_position = cue_position(context.previous_type)
        && !trimmed.ends_with(['.', '!', '?', ','])
        && !contains_stop_word(trimmed);

    (uppercase_only || name_in_cue_position)
        .then(|| normalize_modifiers(&trimmed.to_uppercase()))
}

/// Shape check shared by both character-cue paths: at most 30
/// characters, one to four words, at least one letter, no trailing
/// colon, and nothing outside letters, digits and cue punctuation.
fn has_cue_shape(trimmed: &str) -> bool {
    if trimmed.chars().count() > 30 || trimmed.ends_with(':') {
        return false;
    }
    let allowed = trimmed.chars().all(|c| {
        c.is_alphabetic()
            || c.is_ascii_digit()
            || c.is_whitespace()
            || matches!(c, '.' | '\'' | '-' | '(' | ')')
    });
    if !allowed || !trimmed.chars().any(char::is_alphabetic) {
        return false;
    }
    (1..=4).contains(&trimmed.split_whitespace().count())
}

/// Whether a dialogue block plausibly opens after the previous type.
///
/// Driven by the profile table's successor hints. A parenthetical lists
/// Character among its successors but the line after one belongs to the
/// open speech, so it never counts as a cue position.
fn cue_position(previous_type: Option<ElementType>) -> bool {
    match previous_type {
        None | Some(ElementType::Parenthetical) => false,
        Some(previous) => profile_for(previous)
            .preferred_successors
            .contains(&ElementType::Character),
    }
}

fn contains_stop_word(line: &str) -> bool {
    line.split_whitespace().any(|token| {
        let key: String = token
            .chars()
            .filter(|c| c.is_alphabetic())
            .collect::<String>()
            .to_lowercase();
        !key.is_empty() && STOP_WORDS.contains(&key.as_str())
    })
}
