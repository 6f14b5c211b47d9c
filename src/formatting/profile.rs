/*!
 * Per-element formatting profiles.
 *
 * Each element type carries a fixed profile describing how it sits on a
 * US Letter page: left and right margins in inches, case policy,
 * horizontal alignment, and which element types usually follow it. The
 * table is immutable; `profile_for` is total and falls back to the
 * Action profile for document-level types that never reach the printed
 * page layout path.
 */

use serde::{Deserialize, Serialize};

use crate::formatting::element::ElementType;

/// How text case is treated when a line settles into an element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasePolicy {
    /// Force the whole line to uppercase.
    Uppercase,
    /// Uppercase the first character, leave the rest alone.
    Sentence,
    /// Leave the author's casing untouched.
    Preserve,
    /// Force the whole line to lowercase. No standard profile uses
    /// this, but custom profiles may.
    Lowercase,
}

/// Horizontal alignment of an element within its margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Layout and behavior profile for one element type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementProfile {
    /// Name shown in reports and editor chrome.
    pub display_name: &'static str,
    /// Case policy applied by the classifier's canonical rewrite.
    pub case_policy: CasePolicy,
    /// Distance from the physical left page edge, in inches.
    pub left_margin_in: f64,
    /// Distance from the physical right page edge, in inches.
    pub right_margin_in: f64,
    /// Horizontal alignment within the margins.
    pub alignment: Alignment,
    /// Likely element types for the next line, most likely first.
    pub preferred_successors: &'static [ElementType],
    /// Small sample lines, used by help output and documentation.
    pub examples: &'static [&'static str],
}

impl ElementProfile {
    /// Printable column width in characters at the given character pitch.
    ///
    /// Derived from a US Letter page: whatever the margins leave of the
    /// 8.5 inch width, times characters per inch. Never below one column.
    pub fn column_width(&self, page_width_in: f64, chars_per_inch: u32) -> usize {
        let usable_in = (page_width_in - self.left_margin_in - self.right_margin_in).max(0.0);
        let width = (usable_in * f64::from(chars_per_inch)).floor() as usize;
        width.max(1)
    }
}

static SCENE_HEADING: ElementProfile = ElementProfile {
    display_name: "Scene Heading",
    case_policy: CasePolicy::Uppercase,
    left_margin_in: 1.5,
    right_margin_in: 1.0,
    alignment: Alignment::Left,
    preferred_successors: &[ElementType::Action, ElementType::Character],
    examples: &["INT. KITCHEN - DAY", "EXT. PARKING LOT - NIGHT"],
};

static ACTION: ElementProfile = ElementProfile {
    display_name: "Action",
    case_policy: CasePolicy::Sentence,
    left_margin_in: 1.5,
    right_margin_in: 1.0,
    alignment: Alignment::Left,
    preferred_successors: &[ElementType::Action, ElementType::Character],
    examples: &["The kettle shrieks on the stove.", "She won't look at him."],
};

static CHARACTER: ElementProfile = ElementProfile {
    display_name: "Character",
    case_policy: CasePolicy::Uppercase,
    left_margin_in: 3.7,
    right_margin_in: 1.0,
    alignment: Alignment::Left,
    preferred_successors: &[ElementType::Dialogue, ElementType::Parenthetical],
    examples: &["JOHN", "SARAH V.O.", "COP 2"],
};

static DIALOGUE: ElementProfile = ElementProfile {
    display_name: "Dialogue",
    case_policy: CasePolicy::Preserve,
    left_margin_in: 2.5,
    right_margin_in: 2.0,
    alignment: Alignment::Left,
    preferred_successors: &[ElementType::Character, ElementType::Action],
    examples: &["I told you not to come back here."],
};

static PARENTHETICAL: ElementProfile = ElementProfile {
    display_name: "Parenthetical",
    case_policy: CasePolicy::Preserve,
    left_margin_in: 3.1,
    right_margin_in: 2.9,
    alignment: Alignment::Left,
    preferred_successors: &[ElementType::Dialogue, ElementType::Character],
    examples: &["(beat)", "(under her breath)"],
};

static TRANSITION: ElementProfile = ElementProfile {
    display_name: "Transition",
    case_policy: CasePolicy::Uppercase,
    left_margin_in: 6.0,
    right_margin_in: 1.0,
    alignment: Alignment::Right,
    preferred_successors: &[ElementType::SceneHeading, ElementType::Action],
    examples: &["CUT TO:", "DISSOLVE TO:"],
};

static SHOT: ElementProfile = ElementProfile {
    display_name: "Shot",
    case_policy: CasePolicy::Uppercase,
    left_margin_in: 1.5,
    right_margin_in: 1.0,
    alignment: Alignment::Left,
    preferred_successors: &[ElementType::Action, ElementType::Character],
    examples: &["CLOSE ON THE LETTER", "ANGLE ON THE DOORWAY"],
};

static CENTERED_TEXT: ElementProfile = ElementProfile {
    display_name: "Centered Text",
    case_policy: CasePolicy::Preserve,
    left_margin_in: 1.5,
    right_margin_in: 1.0,
    alignment: Alignment::Center,
    preferred_successors: &[ElementType::Action],
    examples: &["> THE END <"],
};

/// Look up the formatting profile for an element type.
///
/// Total over all element types. Document-level variants that have no
/// printed-page layout of their own share the Action profile.
pub fn profile_for(element_type: ElementType) -> &'static ElementProfile {
    match element_type {
        ElementType::SceneHeading => &SCENE_HEADING,
        ElementType::Action => &ACTION,
        ElementType::Character => &CHARACTER,
        ElementType::Dialogue => &DIALOGUE,
        ElementType::Parenthetical => &PARENTHETICAL,
        ElementType::Transition => &TRANSITION,
        ElementType::Shot => &SHOT,
        ElementType::CenteredText => &CENTERED_TEXT,
        _ => &ACTION,
    }
}
