/*!
 * Screenplay document model.
 *
 * A `Screenplay` is an ordered sequence of typed elements plus
 * metadata, serializable to JSON for persistence. Documents are built
 * either element by element, or by running raw text through the
 * classifier line by line. Rendering back to fixed-pitch text applies
 * each element's profile: margins, alignment and word wrapping.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::DocumentError;
use crate::formatting::classifier::{ClassificationContext, LineClassifier};
use crate::formatting::element::{ElementType, ScriptElement};
use crate::formatting::margins::{indentation_for, left_pad, MeasurementUnit};
use crate::formatting::normalizer::strip_modifiers;
use crate::formatting::pagination::{total_pages_for_elements, PageFormat, MINUTES_PER_PAGE};
use crate::formatting::profile::profile_for;
use crate::formatting::validation::{ValidationPass, ValidationReport};

/// Complete screenplay document with metadata and typed elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screenplay {
    /// Document metadata
    pub metadata: ScreenplayMetadata,

    /// All document elements in script order
    #[serde(default)]
    pub elements: Vec<ScriptElement>,
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenplayMetadata {
    /// Script title
    pub title: String,

    /// Author name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Original source file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,

    /// RFC 3339 timestamp of the last save
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
}

impl Screenplay {
    /// Create an empty screenplay with the given title.
    pub fn new(title: &str) -> Self {
        Self {
            metadata: ScreenplayMetadata {
                title: title.to_string(),
                ..ScreenplayMetadata::default()
            },
            elements: Vec::new(),
        }
    }

    /// Create a screenplay from an existing element sequence.
    pub fn from_elements(title: &str, elements: Vec<ScriptElement>) -> Self {
        let mut screenplay = Self::new(title);
        screenplay.elements = elements;
        screenplay
    }

    /// Set the author name.
    pub fn with_author(mut self, author: &str) -> Self {
        self.metadata.author = Some(author.to_string());
        self
    }

    /// Set the source file path.
    pub fn with_source_file(mut self, source_file: &str) -> Self {
        self.metadata.source_file = Some(source_file.to_string());
        self
    }

    /// Build a screenplay by classifying raw text line by line.
    ///
    /// Each line is committed through the classifier with the previous
    /// line's outcome as context, and suggested suffixes are applied.
    /// Blank lines separate blocks and produce no elements of their
    /// own, but they still reset the context so a speech does not
    /// continue across a gap.
    pub fn from_plain_text(title: &str, text: &str, classifier: &LineClassifier) -> Self {
        Self::from_plain_text_with_progress(title, text, classifier, true, |_, _| {})
    }

    /// Same as [`from_plain_text`](Self::from_plain_text), reporting
    /// `(lines_done, lines_total)` after each classified line.
    /// `apply_suffixes` controls whether suggested suffixes (a missing
    /// time of day) are appended to the canonical text.
    pub fn from_plain_text_with_progress<F>(
        title: &str,
        text: &str,
        classifier: &LineClassifier,
        apply_suffixes: bool,
        mut on_progress: F,
    ) -> Self
    where
        F: FnMut(usize, usize),
    {
        let total_lines = text.lines().count();
        let mut elements = Vec::new();
        let mut context = ClassificationContext::start().finalized();

        for (line_index, line) in text.lines().enumerate() {
            let result = classifier.classify(line, &context);
            let mut element_text = result.text;
            if apply_suffixes {
                if let Some(suffix) = result.suggested_suffix {
                    element_text.push_str(&suffix);
                }
            }

            if !element_text.trim().is_empty() {
                elements.push(ScriptElement::new(result.element_type, element_text));
            }
            context = ClassificationContext::after_line(result.element_type, line).finalized();
            on_progress(line_index + 1, total_lines);
        }

        Self::from_elements(title, elements)
    }

    /// Append one element to the document.
    pub fn push(&mut self, element: ScriptElement) {
        self.elements.push(element);
    }

    /// Number of scene headings in the document.
    pub fn scene_count(&self) -> usize {
        self.count_of(ElementType::SceneHeading)
    }

    /// Number of character cues in the document.
    pub fn speech_count(&self) -> usize {
        self.count_of(ElementType::Character)
    }

    fn count_of(&self, element_type: ElementType) -> usize {
        self.elements
            .iter()
            .filter(|e| e.element_type == element_type)
            .count()
    }

    /// Distinct speaking characters, modifier tokens stripped, sorted.
    pub fn character_names(&self) -> Vec<String> {
        let names: BTreeSet<String> = self
            .elements
            .iter()
            .filter(|e| e.element_type == ElementType::Character)
            .map(|e| strip_modifiers(&e.text))
            .filter(|name| !name.is_empty())
            .collect();
        names.into_iter().collect()
    }

    /// Pages the document fills in the given format.
    pub fn total_pages(&self, format: &PageFormat, chars_per_inch: u32) -> usize {
        total_pages_for_elements(
            self.elements
                .iter()
                .map(|e| (e.element_type, e.text.as_str())),
            format,
            chars_per_inch,
        )
    }

    /// Estimated screen time in minutes, one minute per page.
    pub fn estimated_minutes(&self, format: &PageFormat, chars_per_inch: u32) -> f64 {
        self.total_pages(format, chars_per_inch) as f64 * MINUTES_PER_PAGE
    }

    /// Run the validation pass without modifying the document.
    pub fn validate(&self, pass: &ValidationPass) -> ValidationReport {
        pass.validate(&self.elements)
    }

    /// Run the validation pass and let it repair what it can.
    pub fn validate_and_repair(&mut self, pass: &ValidationPass) -> ValidationReport {
        pass.validate_and_repair(&mut self.elements)
    }

    /// Render the document as fixed-pitch text with profile margins,
    /// alignment and word wrapping applied.
    pub fn render_plain(&self, format: &PageFormat, chars_per_inch: u32) -> String {
        let unit = MeasurementUnit::Characters {
            per_inch: chars_per_inch,
        };
        let mut lines: Vec<String> = Vec::new();

        for element in &self.elements {
            if element.element_type == ElementType::PageBreak {
                continue;
            }
            if element.element_type.starts_block() && !lines.is_empty() {
                lines.push(String::new());
            }

            let profile = profile_for(element.element_type);
            let margin = indentation_for(element.element_type, unit).as_spaces();
            let width = profile.column_width(format.page_width_in, chars_per_inch);

            for row in wrap_text(&element.text, width) {
                let pad = left_pad(profile.alignment, width, row.chars().count());
                lines.push(format!("{}{}{}", margin, " ".repeat(pad), row));
            }
        }

        let mut output = lines.join("\n");
        if !output.is_empty() {
            output.push('\n');
        }
        output
    }

    /// Serialize the document to pretty JSON, stamping the save time.
    pub fn to_json_string(&mut self) -> Result<String, DocumentError> {
        self.metadata.saved_at = Some(chrono::Utc::now().to_rfc3339());
        serde_json::to_string_pretty(self).map_err(|e| DocumentError::SerializeError(e.to_string()))
    }

    /// Parse a document from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(json).map_err(|e| DocumentError::ParseError(e.to_string()))
    }
}

/// Greedy word wrap to a column width. A word longer than the width
/// stands alone on its own row rather than being split.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut rows: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            rows.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}
