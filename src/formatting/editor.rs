/*!
 * Adapter between the classifier and an interactive editing surface.
 *
 * Classification itself is pure; everything a text widget needs beyond
 * the classification result lives here: whether to jump the caret after
 * a rewrite, whether to apply suggested suffixes on commit, and what
 * indentation a fresh line should open with.
 */

use crate::formatting::classifier::{ClassificationContext, LineClassifier};
use crate::formatting::element::ElementType;
use crate::formatting::margins::{auto_indent_for_next_line, Indentation, MeasurementUnit};

/// Where the editing surface should place the caret after applying an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretHint {
    /// Jump to the end of the rewritten line.
    MoveToEnd,
    /// Leave the caret where the user had it.
    Keep,
}

/// What the editing surface applies to the live buffer for one line.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    /// Structural type assigned to the line.
    pub element_type: ElementType,
    /// Text to place in the buffer, suffix policy already applied.
    pub text: String,
    /// Caret placement after the edit.
    pub caret: CaretHint,
    /// True when the buffer text changes.
    pub modified: bool,
    /// Warning to surface in the status bar, if any.
    pub warning: Option<String>,
}

/// Editing-surface policy wrapped around a classifier.
#[derive(Debug, Clone)]
pub struct EditorAdapter {
    classifier: LineClassifier,
    measurement: MeasurementUnit,
    apply_suggested_suffixes: bool,
}

impl EditorAdapter {
    pub fn new(classifier: LineClassifier) -> Self {
        Self {
            classifier,
            measurement: MeasurementUnit::default(),
            apply_suggested_suffixes: true,
        }
    }

    /// Resolve indentation in the given measurement system instead of
    /// fixed-pitch columns.
    pub fn with_measurement(mut self, measurement: MeasurementUnit) -> Self {
        self.measurement = measurement;
        self
    }

    /// Surface suggested suffixes as warnings instead of applying them.
    pub fn without_suffix_application(mut self) -> Self {
        self.apply_suggested_suffixes = false;
        self
    }

    /// Classification feedback while the line is still being typed.
    ///
    /// Suggested suffixes are never applied mid-typing; the caret only
    /// jumps when the rewrite changed the text under it.
    pub fn preview(&self, raw_line: &str, context: &ClassificationContext) -> EditOutcome {
        let result = self.classifier.classify(raw_line, context);
        EditOutcome {
            element_type: result.element_type,
            caret: caret_for(result.modified),
            modified: result.modified,
            text: result.text,
            warning: result.warning,
        }
    }

    /// Classification applied when the user commits the line.
    pub fn commit(&self, raw_line: &str, context: &ClassificationContext) -> EditOutcome {
        let finalized = context.clone().finalized();
        let result = self.classifier.classify(raw_line, &finalized);

        let mut text = result.text;
        let mut modified = result.modified;
        if self.apply_suggested_suffixes {
            if let Some(suffix) = &result.suggested_suffix {
                text.push_str(suffix);
                modified = true;
            }
        }

        EditOutcome {
            element_type: result.element_type,
            caret: caret_for(modified),
            modified,
            text,
            warning: result.warning,
        }
    }

    /// Indentation the next fresh line should open with.
    pub fn next_line_indent(&self, previous_type: Option<ElementType>) -> Indentation {
        auto_indent_for_next_line(previous_type, self.measurement)
    }
}

impl Default for EditorAdapter {
    fn default() -> Self {
        Self::new(LineClassifier::new())
    }
}

fn caret_for(modified: bool) -> CaretHint {
    if modified {
        CaretHint::MoveToEnd
    } else {
        CaretHint::Keep
    }
}
