/*!
 * Stateless pagination over screenplay text.
 *
 * Page counts, break offsets and runtime estimates are re-derived from
 * the full buffer on every call; nothing is cached between calls, so
 * concurrent use needs no coordination. The one-page-one-minute
 * convention of fixed-pitch screenplay formatting drives the runtime
 * estimate. Malformed page formats are rejected when the `PageFormat`
 * is built, which keeps every pagination call total.
 */

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::formatting::element::ElementType;
use crate::formatting::profile::profile_for;

/// One correctly formatted page plays for about one minute.
pub const MINUTES_PER_PAGE: f64 = 1.0;

/// Standard line capacity of a fixed-pitch screenplay page.
pub const DEFAULT_LINES_PER_PAGE: u32 = 55;

fn default_lines_per_page() -> u32 {
    DEFAULT_LINES_PER_PAGE
}

fn default_page_width_in() -> f64 {
    8.5
}

fn default_page_height_in() -> f64 {
    11.0
}

fn default_top_margin_in() -> f64 {
    1.0
}

fn default_bottom_margin_in() -> f64 {
    1.0
}

/// Physical page description used by the pagination functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFormat {
    /// How many text lines fit on one page.
    #[serde(default = "default_lines_per_page")]
    pub lines_per_page: u32,
    /// Page width in inches.
    #[serde(default = "default_page_width_in")]
    pub page_width_in: f64,
    /// Page height in inches.
    #[serde(default = "default_page_height_in")]
    pub page_height_in: f64,
    /// Top margin in inches.
    #[serde(default = "default_top_margin_in")]
    pub top_margin_in: f64,
    /// Bottom margin in inches.
    #[serde(default = "default_bottom_margin_in")]
    pub bottom_margin_in: f64,
}

impl PageFormat {
    /// Page format with a custom line capacity on US Letter paper.
    pub fn new(lines_per_page: u32) -> Result<Self, ConfigError> {
        let format = Self {
            lines_per_page,
            ..Self::default()
        };
        format.validate()?;
        Ok(format)
    }

    /// US Letter at the standard 55 lines.
    pub fn us_letter() -> Self {
        Self::default()
    }

    /// A4 at the standard 55 lines.
    pub fn a4() -> Self {
        Self {
            page_width_in: 8.27,
            page_height_in: 11.69,
            ..Self::default()
        }
    }

    pub fn from_preset(preset: PagePreset) -> Self {
        match preset {
            PagePreset::UsLetter => Self::us_letter(),
            PagePreset::A4 => Self::a4(),
        }
    }

    /// Reject page formats that pagination could not work with.
    ///
    /// Deserialized formats bypass `new`, so config loading calls this
    /// explicitly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lines_per_page == 0 {
            return Err(ConfigError::InvalidLinesPerPage(self.lines_per_page));
        }
        if self.page_width_in <= 0.0 || self.page_height_in <= 0.0 {
            return Err(ConfigError::InvalidPageSize {
                width_in: self.page_width_in,
                height_in: self.page_height_in,
            });
        }
        if self.top_margin_in + self.bottom_margin_in >= self.page_height_in {
            return Err(ConfigError::InvalidValue(format!(
                "Vertical margins leave no printable space: {}in + {}in on a {}in page",
                self.top_margin_in, self.bottom_margin_in, self.page_height_in
            )));
        }
        Ok(())
    }
}

impl Default for PageFormat {
    fn default() -> Self {
        Self {
            lines_per_page: default_lines_per_page(),
            page_width_in: default_page_width_in(),
            page_height_in: default_page_height_in(),
            top_margin_in: default_top_margin_in(),
            bottom_margin_in: default_bottom_margin_in(),
        }
    }
}

/// Named page format presets selectable from config and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PagePreset {
    UsLetter,
    A4,
}

impl fmt::Display for PagePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PagePreset::UsLetter => write!(f, "letter"),
            PagePreset::A4 => write!(f, "a4"),
        }
    }
}

impl FromStr for PagePreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "letter" | "us_letter" | "us-letter" => Ok(PagePreset::UsLetter),
            "a4" => Ok(PagePreset::A4),
            _ => Err(anyhow!("Unknown page preset: {}", s)),
        }
    }
}

/// Number of printed pages the buffer fills. Never less than one.
pub fn total_pages(text: &str, format: &PageFormat) -> usize {
    let line_count = text.lines().count();
    if line_count == 0 {
        return 1;
    }
    line_count.div_ceil(format.lines_per_page as usize)
}

/// Character offsets at which pages two and onward begin.
///
/// Offsets are counted in characters, with each line's terminator
/// included, so a CRLF line costs two more than its visible text. A
/// break landing exactly at the end of the buffer starts no page and is
/// dropped.
pub fn page_break_offsets(text: &str, format: &PageFormat) -> Vec<usize> {
    let lines_per_page = format.lines_per_page as usize;
    let mut offsets = Vec::new();
    let mut offset = 0;

    for (line_index, segment) in text.split_inclusive('\n').enumerate() {
        offset += segment.chars().count();
        if (line_index + 1) % lines_per_page == 0 {
            offsets.push(offset);
        }
    }

    if offsets.last() == Some(&text.chars().count()) {
        offsets.pop();
    }
    offsets
}

/// Estimated screen time of the buffer, in minutes.
pub fn estimated_screen_minutes(text: &str, format: &PageFormat) -> f64 {
    total_pages(text, format) as f64 * MINUTES_PER_PAGE
}

/// Printed lines one element occupies: its text wrapped to the
/// element's column width, plus the blank separator line every
/// block-starting element carries above itself.
///
/// The separator is suppressed by the sequence walker for the first
/// element of a document, so this counts it unconditionally only for
/// callers asking about an element in flow.
pub fn element_line_count(
    element_type: ElementType,
    text: &str,
    format: &PageFormat,
    chars_per_inch: u32,
) -> usize {
    let width = profile_for(element_type).column_width(format.page_width_in, chars_per_inch);
    let wrapped = text.chars().count().div_ceil(width).max(1);
    if element_type.starts_block() {
        wrapped + 1
    } else {
        wrapped
    }
}

/// Pages filled by a typed element sequence.
///
/// Forced page breaks round the running line count up to the next page
/// boundary instead of occupying lines of their own.
pub fn total_pages_for_elements<'a, I>(
    elements: I,
    format: &PageFormat,
    chars_per_inch: u32,
) -> usize
where
    I: IntoIterator<Item = (ElementType, &'a str)>,
{
    let lines_per_page = format.lines_per_page as usize;
    let mut lines = 0;
    let mut first = true;

    for (element_type, text) in elements {
        if element_type == ElementType::PageBreak {
            let remainder = lines % lines_per_page;
            if remainder != 0 {
                lines += lines_per_page - remainder;
            }
            continue;
        }

        let mut cost = element_line_count(element_type, text, format, chars_per_inch);
        if first && element_type.starts_block() {
            cost -= 1;
        }
        lines += cost;
        first = false;
    }

    if lines == 0 {
        1
    } else {
        lines.div_ceil(lines_per_page)
    }
}
