/*!
 * Margin and indentation resolution.
 *
 * Profiles express margins in inches. Rendering surfaces want either a
 * whitespace run (fixed-pitch text, ten characters to the inch) or a
 * linear offset (point-based surfaces, ninety-six units to the inch).
 * The functions here convert between the two and resolve alignment
 * padding; all of them are pure.
 */

use crate::formatting::element::ElementType;
use crate::formatting::profile::{profile_for, Alignment};

/// Character pitch of fixed-width screenplay rendering.
pub const DEFAULT_CHARS_PER_INCH: u32 = 10;

/// Linear conversion for point-based rendering surfaces.
pub const DEFAULT_UNITS_PER_INCH: f64 = 96.0;

/// Target measurement system for indentation values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasurementUnit {
    /// Whole character columns at a fixed pitch.
    Characters { per_inch: u32 },
    /// Continuous linear units, e.g. CSS pixels or typographic points.
    Units { per_inch: f64 },
}

impl MeasurementUnit {
    /// Fixed-pitch columns at the standard ten characters per inch.
    pub fn characters() -> Self {
        Self::Characters {
            per_inch: DEFAULT_CHARS_PER_INCH,
        }
    }

    /// Linear units at the standard ninety-six per inch.
    pub fn units() -> Self {
        Self::Units {
            per_inch: DEFAULT_UNITS_PER_INCH,
        }
    }

    /// Character pitch for fixed-pitch text output. A units-based
    /// measurement has no column width, so it resolves to the standard
    /// pitch.
    pub fn column_pitch(&self) -> u32 {
        match self {
            Self::Characters { per_inch } => *per_inch,
            Self::Units { .. } => DEFAULT_CHARS_PER_INCH,
        }
    }
}

impl Default for MeasurementUnit {
    fn default() -> Self {
        Self::characters()
    }
}

/// A resolved indentation in one of the two measurement systems.
#[derive(Debug, Clone, PartialEq)]
pub enum Indentation {
    /// Number of leading space characters.
    Columns(usize),
    /// Linear offset from the page's left edge.
    Offset(f64),
}

impl Indentation {
    /// The zero indentation in the given measurement system.
    pub fn zero(unit: MeasurementUnit) -> Self {
        match unit {
            MeasurementUnit::Characters { .. } => Indentation::Columns(0),
            MeasurementUnit::Units { .. } => Indentation::Offset(0.0),
        }
    }

    /// Whitespace run for fixed-pitch rendering. Offsets render no text.
    pub fn as_spaces(&self) -> String {
        match self {
            Indentation::Columns(count) => " ".repeat(*count),
            Indentation::Offset(_) => String::new(),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Indentation::Columns(count) => *count == 0,
            Indentation::Offset(offset) => *offset == 0.0,
        }
    }
}

/// Indentation for an element type's left margin.
pub fn indentation_for(element_type: ElementType, unit: MeasurementUnit) -> Indentation {
    let left_margin_in = profile_for(element_type).left_margin_in;
    match unit {
        MeasurementUnit::Characters { per_inch } => {
            Indentation::Columns((left_margin_in * f64::from(per_inch)).round() as usize)
        }
        MeasurementUnit::Units { per_inch } => Indentation::Offset(left_margin_in * per_inch),
    }
}

/// Indentation a fresh line should open with, based on the most likely
/// successor of the previous element. Zero at document start.
pub fn auto_indent_for_next_line(
    previous_type: Option<ElementType>,
    unit: MeasurementUnit,
) -> Indentation {
    match previous_type.and_then(|previous| profile_for(previous).preferred_successors.first()) {
        Some(&successor) => indentation_for(successor, unit),
        None => Indentation::zero(unit),
    }
}

/// Leading pad that realizes an alignment within a rendering width.
///
/// Content wider than the available width gets no pad rather than a
/// negative one.
pub fn left_pad(alignment: Alignment, render_width: usize, content_length: usize) -> usize {
    match alignment {
        Alignment::Left => 0,
        Alignment::Center => render_width.saturating_sub(content_length) / 2,
        Alignment::Right => render_width.saturating_sub(content_length),
    }
}
