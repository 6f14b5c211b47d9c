/*!
 * Validation pass for screenplay structure.
 *
 * Classification never fails, so structural problems surface here
 * instead: empty character cues, scene headings without a time of day,
 * dialogue with no speaker, unclosed parentheticals. The pass walks a
 * typed element sequence and returns a report of issues; nothing is
 * raised, and callers decide whether an issue blocks saving. A repair
 * step can fix the mechanical issues in place.
 */

use crate::formatting::classifier::is_time_of_day;
use crate::formatting::element::{ElementType, ScriptElement};
use crate::formatting::normalizer::close_parenthetical;

/// Issues ranked at or above this severity fail the pass.
const CRITICAL_SEVERITY: f32 = 0.8;

/// Configuration for the validation pass.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Whether to check element succession (orphan dialogue, dangling cues)
    pub check_successions: bool,

    /// Whether to check scene heading completeness
    pub check_scene_headings: bool,

    /// Whether to attempt auto-repair
    pub enable_auto_repair: bool,

    /// Time of day appended when repairing an incomplete heading
    pub default_time_of_day: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            check_successions: true,
            check_scene_headings: true,
            enable_auto_repair: true,
            default_time_of_day: "DAY".to_string(),
        }
    }
}

impl ValidationConfig {
    /// Create a strict validation config: report everything, change nothing.
    pub fn strict() -> Self {
        Self {
            enable_auto_repair: false,
            ..Self::default()
        }
    }

    /// Create a lenient validation config: skip succession checks.
    pub fn lenient() -> Self {
        Self {
            check_successions: false,
            ..Self::default()
        }
    }
}

/// Types of validation issues.
#[derive(Debug, Clone)]
pub enum ValidationIssue {
    /// Character cue with no name
    EmptyCharacterName {
        index: usize,
    },

    /// Scene heading without a time-of-day marker
    MissingTimeOfDay {
        index: usize,
        heading: String,
    },

    /// Scene heading reduced to its bare opener token
    EmptyLocation {
        index: usize,
    },

    /// Parenthetical missing its closing delimiter
    UnclosedParenthetical {
        index: usize,
        text: String,
    },

    /// Dialogue that does not follow a character cue or parenthetical
    OrphanDialogue {
        index: usize,
    },

    /// Parenthetical that does not sit inside a speech block
    OrphanParenthetical {
        index: usize,
    },

    /// Character cue with no speech after it
    DanglingCharacterCue {
        index: usize,
        name: String,
    },
}

impl ValidationIssue {
    /// Get the element index associated with this issue.
    pub fn index(&self) -> usize {
        match self {
            ValidationIssue::EmptyCharacterName { index } => *index,
            ValidationIssue::MissingTimeOfDay { index, .. } => *index,
            ValidationIssue::EmptyLocation { index } => *index,
            ValidationIssue::UnclosedParenthetical { index, .. } => *index,
            ValidationIssue::OrphanDialogue { index } => *index,
            ValidationIssue::OrphanParenthetical { index } => *index,
            ValidationIssue::DanglingCharacterCue { index, .. } => *index,
        }
    }

    /// Get a human-readable description of the issue.
    pub fn description(&self) -> String {
        match self {
            ValidationIssue::EmptyCharacterName { index } => {
                format!("Element {} is a character cue with no name", index)
            }
            ValidationIssue::MissingTimeOfDay { index, heading } => {
                format!("Element {} has no time of day: '{}'", index, heading)
            }
            ValidationIssue::EmptyLocation { index } => {
                format!("Element {} is a scene heading with no location", index)
            }
            ValidationIssue::UnclosedParenthetical { index, text } => {
                format!("Element {} is an unclosed parenthetical: '{}'", index, text)
            }
            ValidationIssue::OrphanDialogue { index } => {
                format!("Element {} is dialogue with no speaker above it", index)
            }
            ValidationIssue::OrphanParenthetical { index } => {
                format!("Element {} is a parenthetical outside any speech", index)
            }
            ValidationIssue::DanglingCharacterCue { index, name } => {
                format!("Element {} cues '{}' but no speech follows", index, name)
            }
        }
    }

    /// Get the severity of the issue (0.0 = minor, 1.0 = critical).
    pub fn severity(&self) -> f32 {
        match self {
            ValidationIssue::EmptyCharacterName { .. } => 1.0,
            ValidationIssue::OrphanDialogue { .. } => 0.9,
            ValidationIssue::DanglingCharacterCue { .. } => 0.7,
            ValidationIssue::UnclosedParenthetical { .. } => 0.6,
            ValidationIssue::MissingTimeOfDay { .. } => 0.5,
            ValidationIssue::OrphanParenthetical { .. } => 0.5,
            ValidationIssue::EmptyLocation { .. } => 0.4,
        }
    }

    /// Check if this issue can be auto-repaired.
    pub fn is_repairable(&self) -> bool {
        matches!(
            self,
            ValidationIssue::MissingTimeOfDay { .. } | ValidationIssue::UnclosedParenthetical { .. }
        )
    }
}

/// Repair action taken during auto-repair.
#[derive(Debug, Clone)]
pub enum RepairAction {
    /// Appended the default time of day to a scene heading
    AppendedTimeOfDay {
        index: usize,
        suffix: String,
    },

    /// Closed an open parenthetical
    ClosedParenthetical {
        index: usize,
    },
}

impl RepairAction {
    /// Get a description of the action.
    pub fn description(&self) -> String {
        match self {
            RepairAction::AppendedTimeOfDay { index, suffix } => {
                format!("Appended '{}' to heading at element {}", suffix, index)
            }
            RepairAction::ClosedParenthetical { index } => {
                format!("Closed parenthetical at element {}", index)
            }
        }
    }
}

/// Result of an auto-repair attempt.
#[derive(Debug, Clone, Default)]
pub struct RepairResult {
    /// Actions taken during repair
    pub actions: Vec<RepairAction>,

    /// Issues that could not be repaired
    pub unresolved_issues: Vec<ValidationIssue>,
}

/// Validation report containing all issues found.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// All issues found during validation
    pub issues: Vec<ValidationIssue>,

    /// Number of elements validated
    pub elements_validated: usize,

    /// Number of elements with issues
    pub elements_with_issues: usize,

    /// Overall structure score (0.0 - 1.0)
    pub structure_score: f32,

    /// Repair result (if auto-repair was attempted)
    pub repair_result: Option<RepairResult>,
}

impl ValidationReport {
    /// Create an empty validation report.
    pub fn new(elements_validated: usize) -> Self {
        Self {
            issues: Vec::new(),
            elements_validated,
            elements_with_issues: 0,
            structure_score: 1.0,
            repair_result: None,
        }
    }

    /// Add an issue to the report.
    pub fn add_issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Calculate the structure score based on issues.
    pub fn calculate_score(&mut self) {
        if self.elements_validated == 0 {
            self.structure_score = 1.0;
            return;
        }

        let total_severity: f32 = self.issues.iter().map(|i| i.severity()).sum();
        let max_severity = self.elements_validated as f32;
        self.structure_score = (1.0 - total_severity / max_severity).max(0.0);

        // Count unique elements with issues
        let mut indices: Vec<usize> = self.issues.iter().map(|i| i.index()).collect();
        indices.sort();
        indices.dedup();
        self.elements_with_issues = indices.len();
    }

    /// Check if the document passed validation.
    pub fn passed(&self) -> bool {
        self.critical_issues().is_empty()
    }

    /// Get only critical issues.
    pub fn critical_issues(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity() >= CRITICAL_SEVERITY)
            .collect()
    }

    /// Get a summary of the report.
    pub fn summary(&self) -> String {
        format!(
            "Validated {} elements: {} issues found, {} elements affected, structure score: {:.2}%",
            self.elements_validated,
            self.issues.len(),
            self.elements_with_issues,
            self.structure_score * 100.0
        )
    }
}

/// Validation pass over a typed element sequence.
pub struct ValidationPass {
    config: ValidationConfig,
}

impl ValidationPass {
    /// Create a new validation pass with the given configuration.
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a validation pass with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Validate an element sequence and return a report.
    pub fn validate(&self, elements: &[ScriptElement]) -> ValidationReport {
        let mut report = ValidationReport::new(elements.len());

        for (index, element) in elements.iter().enumerate() {
            self.validate_element(index, element, elements, &mut report);
        }

        report.calculate_score();
        report
    }

    /// Validate an element sequence and attempt auto-repair.
    pub fn validate_and_repair(&self, elements: &mut Vec<ScriptElement>) -> ValidationReport {
        let mut report = self.validate(elements);

        if self.config.enable_auto_repair && !report.issues.is_empty() {
            let repair_result = self.auto_repair(elements, &report.issues);
            report.repair_result = Some(repair_result);

            // Re-validate after repair
            let post_repair = self.validate(elements);
            report.issues = post_repair.issues;
            report.calculate_score();
        }

        report
    }

    /// Validate a single element against its neighbors.
    fn validate_element(
        &self,
        index: usize,
        element: &ScriptElement,
        elements: &[ScriptElement],
        report: &mut ValidationReport,
    ) {
        let previous_type = index
            .checked_sub(1)
            .map(|i| elements[i].element_type);
        let next_type = elements.get(index + 1).map(|e| e.element_type);

        match element.element_type {
            ElementType::Character => {
                if element.is_blank() {
                    report.add_issue(ValidationIssue::EmptyCharacterName { index });
                    return;
                }
                if self.config.check_successions
                    && !matches!(
                        next_type,
                        Some(ElementType::Dialogue) | Some(ElementType::Parenthetical)
                    )
                {
                    report.add_issue(ValidationIssue::DanglingCharacterCue {
                        index,
                        name: element.text.clone(),
                    });
                }
            }
            ElementType::SceneHeading if self.config.check_scene_headings => {
                if is_bare_heading(&element.text) {
                    report.add_issue(ValidationIssue::EmptyLocation { index });
                }
                if !heading_has_time(&element.text) {
                    report.add_issue(ValidationIssue::MissingTimeOfDay {
                        index,
                        heading: element.text.clone(),
                    });
                }
            }
            ElementType::Parenthetical => {
                if !element.text.trim_end().ends_with(')') {
                    report.add_issue(ValidationIssue::UnclosedParenthetical {
                        index,
                        text: element.text.clone(),
                    });
                }
                if self.config.check_successions
                    && !matches!(
                        previous_type,
                        Some(ElementType::Character) | Some(ElementType::Dialogue)
                    )
                {
                    report.add_issue(ValidationIssue::OrphanParenthetical { index });
                }
            }
            ElementType::Dialogue if self.config.check_successions => {
                if !matches!(
                    previous_type,
                    Some(ElementType::Character)
                        | Some(ElementType::Parenthetical)
                        | Some(ElementType::Dialogue)
                ) {
                    report.add_issue(ValidationIssue::OrphanDialogue { index });
                }
            }
            _ => {}
        }
    }

    /// Attempt to auto-repair issues in place.
    fn auto_repair(
        &self,
        elements: &mut [ScriptElement],
        issues: &[ValidationIssue],
    ) -> RepairResult {
        let mut result = RepairResult::default();

        for issue in issues {
            match issue {
                ValidationIssue::MissingTimeOfDay { index, .. } => {
                    if let Some(element) = elements.get_mut(*index) {
                        let suffix = format!(" - {}", self.config.default_time_of_day);
                        element.text.push_str(&suffix);
                        result
                            .actions
                            .push(RepairAction::AppendedTimeOfDay { index: *index, suffix });
                    }
                }
                ValidationIssue::UnclosedParenthetical { index, .. } => {
                    if let Some(element) = elements.get_mut(*index) {
                        element.text = close_parenthetical(&element.text);
                        result
                            .actions
                            .push(RepairAction::ClosedParenthetical { index: *index });
                    }
                }
                _ => {
                    result.unresolved_issues.push(issue.clone());
                }
            }
        }

        result
    }
}

impl Default for ValidationPass {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// A heading that is nothing but its opener token has no location,
/// with or without a time-of-day tail.
fn is_bare_heading(text: &str) -> bool {
    let trimmed = text.trim();
    let head = match trimmed.rsplit_once(" - ") {
        Some((head, tail)) if is_time_of_day(tail) => head.trim_end(),
        _ => trimmed,
    };
    matches!(head, "INT." | "EXT." | "INT./EXT." | "INT" | "EXT")
}

/// Whether a heading's final token is a recognized time of day.
fn heading_has_time(text: &str) -> bool {
    text.split_whitespace()
        .last()
        .is_some_and(is_time_of_day)
}
