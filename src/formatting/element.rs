/*!
 * Structural element types for screenplay lines.
 *
 * Every line of a screenplay plays one structural role: a scene heading,
 * a character cue, dialogue, and so on. The classifier assigns one of the
 * eight primary types; the remaining variants exist at the document level
 * (sections, notes, page breaks) and are never produced by classification.
 */

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Structural role of a single screenplay line or document block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    /// Scene heading / slugline, e.g. `INT. KITCHEN - DAY`
    SceneHeading,
    /// Scene description and stage direction
    Action,
    /// Character cue above a speech, e.g. `JOHN V.O.`
    Character,
    /// Spoken line beneath a character cue
    Dialogue,
    /// Delivery direction inside a speech, e.g. `(beat)`
    Parenthetical,
    /// Editing direction between scenes, e.g. `CUT TO:`
    Transition,
    /// Camera direction, e.g. `CLOSE ON the letter`
    Shot,
    /// Text centered on the page, e.g. `> THE END <`
    CenteredText,
    /// Outline section marker (document level, not a classifier target)
    Section,
    /// Scene synopsis (document level)
    Synopsis,
    /// Author note (document level)
    Note,
    /// Side-by-side dialogue container (document level)
    DualDialogue,
    /// Title page block (document level)
    TitlePage,
    /// Forced page break (document level)
    PageBreak,
}

impl ElementType {
    /// The eight types the line classifier can produce.
    pub const CLASSIFIER_TARGETS: [ElementType; 8] = [
        ElementType::SceneHeading,
        ElementType::Action,
        ElementType::Character,
        ElementType::Dialogue,
        ElementType::Parenthetical,
        ElementType::Transition,
        ElementType::Shot,
        ElementType::CenteredText,
    ];

    /// Whether the classifier can assign this type to a line.
    pub fn is_classifier_target(&self) -> bool {
        Self::CLASSIFIER_TARGETS.contains(self)
    }

    /// Whether this element opens a new block on the printed page.
    ///
    /// Dialogue and parentheticals continue the cue block started by a
    /// character cue; every other type is separated from the previous
    /// element by a blank line.
    pub fn starts_block(&self) -> bool {
        !matches!(self, ElementType::Dialogue | ElementType::Parenthetical)
    }

    /// Human-readable name, as shown in reports and editor status bars.
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementType::SceneHeading => "Scene Heading",
            ElementType::Action => "Action",
            ElementType::Character => "Character",
            ElementType::Dialogue => "Dialogue",
            ElementType::Parenthetical => "Parenthetical",
            ElementType::Transition => "Transition",
            ElementType::Shot => "Shot",
            ElementType::CenteredText => "Centered Text",
            ElementType::Section => "Section",
            ElementType::Synopsis => "Synopsis",
            ElementType::Note => "Note",
            ElementType::DualDialogue => "Dual Dialogue",
            ElementType::TitlePage => "Title Page",
            ElementType::PageBreak => "Page Break",
        }
    }

    /// Lowercase identifier used in config files and CLI output.
    pub fn to_lowercase_string(&self) -> String {
        match self {
            ElementType::SceneHeading => "scene_heading".to_string(),
            ElementType::Action => "action".to_string(),
            ElementType::Character => "character".to_string(),
            ElementType::Dialogue => "dialogue".to_string(),
            ElementType::Parenthetical => "parenthetical".to_string(),
            ElementType::Transition => "transition".to_string(),
            ElementType::Shot => "shot".to_string(),
            ElementType::CenteredText => "centered_text".to_string(),
            ElementType::Section => "section".to_string(),
            ElementType::Synopsis => "synopsis".to_string(),
            ElementType::Note => "note".to_string(),
            ElementType::DualDialogue => "dual_dialogue".to_string(),
            ElementType::TitlePage => "title_page".to_string(),
            ElementType::PageBreak => "page_break".to_string(),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One typed element of a screenplay document: a structural type plus
/// its canonical text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptElement {
    /// Structural role of this element.
    #[serde(rename = "type")]
    pub element_type: ElementType,
    /// Canonical text content. Empty for page breaks.
    #[serde(default)]
    pub text: String,
}

impl ScriptElement {
    pub fn new(element_type: ElementType, text: impl Into<String>) -> Self {
        Self {
            element_type,
            text: text.into(),
        }
    }

    /// A forced page break carries no text of its own.
    pub fn page_break() -> Self {
        Self::new(ElementType::PageBreak, "")
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl fmt::Display for ScriptElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.element_type.display_name(), self.text)
    }
}

impl FromStr for ElementType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "scene_heading" | "slugline" => Ok(ElementType::SceneHeading),
            "action" => Ok(ElementType::Action),
            "character" => Ok(ElementType::Character),
            "dialogue" => Ok(ElementType::Dialogue),
            "parenthetical" => Ok(ElementType::Parenthetical),
            "transition" => Ok(ElementType::Transition),
            "shot" => Ok(ElementType::Shot),
            "centered_text" | "centered" => Ok(ElementType::CenteredText),
            "section" => Ok(ElementType::Section),
            "synopsis" => Ok(ElementType::Synopsis),
            "note" => Ok(ElementType::Note),
            "dual_dialogue" => Ok(ElementType::DualDialogue),
            "title_page" => Ok(ElementType::TitlePage),
            "page_break" => Ok(ElementType::PageBreak),
            _ => Err(anyhow!("Invalid element type: {}", s)),
        }
    }
}
