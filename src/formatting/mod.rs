/*!
 * Screenplay formatting engine.
 *
 * This module contains the core line classification, normalization and
 * pagination machinery. It is split into several submodules:
 *
 * - `element`: Structural element types and the typed element record
 * - `profile`: Immutable per-type layout profiles
 * - `normalizer`: Pure text rewrite helpers
 * - `classifier`: The rule cascade assigning types to raw lines
 * - `margins`: Margin and indentation resolution
 * - `pagination`: Stateless page counting and runtime estimates
 * - `validation`: Optional structure checks over element sequences
 * - `editor`: Caret and suffix policy for interactive surfaces
 */

// Re-export main types for easier usage
pub use self::classifier::{
    ClassificationContext, ClassificationResult, LineClassifier, STOP_WORDS,
};
pub use self::element::{ElementType, ScriptElement};
pub use self::profile::{profile_for, Alignment, CasePolicy, ElementProfile};

// Re-export layout and pagination types
pub use self::margins::{
    auto_indent_for_next_line, indentation_for, left_pad, Indentation, MeasurementUnit,
    DEFAULT_CHARS_PER_INCH, DEFAULT_UNITS_PER_INCH,
};
pub use self::pagination::{
    estimated_screen_minutes, page_break_offsets, total_pages, total_pages_for_elements,
    PageFormat, PagePreset, DEFAULT_LINES_PER_PAGE, MINUTES_PER_PAGE,
};

// Re-export editor and validation surfaces
pub use self::editor::{CaretHint, EditOutcome, EditorAdapter};
pub use self::validation::{ValidationConfig, ValidationPass, ValidationReport};

// Submodules
pub mod classifier;
pub mod editor;
pub mod element;
pub mod margins;
pub mod normalizer;
pub mod pagination;
pub mod profile;
pub mod validation;
