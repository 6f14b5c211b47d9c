/*!
 * Analysis pass over screenplay documents.
 *
 * Derives reporting data from a typed element sequence: per-type
 * element counts, page and runtime estimates, a speaker table with
 * spoken word counts, the most frequent content words, and the list of
 * locations visited. Analysis never modifies the document.
 */

use std::collections::BTreeMap;
use std::fmt;

use crate::formatting::classifier::{is_time_of_day, STOP_WORDS};
use crate::formatting::element::ElementType;
use crate::formatting::normalizer::strip_modifiers;
use crate::formatting::pagination::PageFormat;
use crate::formatting::DEFAULT_CHARS_PER_INCH;
use crate::script_document::Screenplay;

/// Configuration for the analysis pass.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Page format used for page and runtime estimates
    pub page_format: PageFormat,

    /// Character pitch used for line estimation
    pub chars_per_inch: u32,

    /// How many frequent words to report
    pub top_word_limit: usize,

    /// Whether to build the word frequency table
    pub count_words: bool,

    /// Whether to build the speaker table
    pub collect_speakers: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            page_format: PageFormat::us_letter(),
            chars_per_inch: DEFAULT_CHARS_PER_INCH,
            top_word_limit: 10,
            count_words: true,
            collect_speakers: true,
        }
    }
}

impl AnalysisConfig {
    /// Create a minimal analysis config: counts and pages only.
    pub fn minimal() -> Self {
        Self {
            count_words: false,
            collect_speakers: false,
            ..Self::default()
        }
    }

    /// Use a specific page format for the estimates.
    pub fn with_page_format(mut self, page_format: PageFormat) -> Self {
        self.page_format = page_format;
        self
    }

    /// Report more frequent words.
    pub fn with_top_word_limit(mut self, limit: usize) -> Self {
        self.top_word_limit = limit;
        self
    }
}

/// Per-speaker share of the script.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakerStats {
    /// Bare character name, modifiers stripped
    pub name: String,

    /// Number of cues for this character
    pub cue_count: usize,

    /// Words spoken across all of the character's dialogue
    pub word_count: usize,
}

/// Statistics derived from one screenplay.
#[derive(Debug, Clone)]
pub struct ScriptStatistics {
    /// Total number of elements analyzed
    pub total_elements: usize,

    /// Number of scene headings
    pub scene_count: usize,

    /// Number of character cues
    pub speech_count: usize,

    /// Words across all dialogue elements
    pub dialogue_words: usize,

    /// Words across all action elements
    pub action_words: usize,

    /// Pages the script fills
    pub pages: usize,

    /// Estimated screen minutes
    pub minutes: f64,

    /// Speaker table, largest share first
    pub speakers: Vec<SpeakerStats>,

    /// Most frequent content words with their counts
    pub top_words: Vec<(String, usize)>,

    /// Distinct locations from scene headings, sorted
    pub locations: Vec<String>,
}

impl ScriptStatistics {
    /// Get a one-line summary of the statistics.
    pub fn description(&self) -> String {
        format!(
            "{} elements over {} page(s) (~{:.0} min): {} scene(s), {} speech(es) by {} speaker(s)",
            self.total_elements,
            self.pages,
            self.minutes,
            self.scene_count,
            self.speech_count,
            self.speakers.len()
        )
    }
}

impl fmt::Display for ScriptStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.description())?;
        if !self.locations.is_empty() {
            writeln!(f, "Locations: {}", self.locations.join(", "))?;
        }
        for speaker in &self.speakers {
            writeln!(
                f,
                "  {:<20} {} cue(s), {} word(s)",
                speaker.name, speaker.cue_count, speaker.word_count
            )?;
        }
        if !self.top_words.is_empty() {
            let words: Vec<String> = self
                .top_words
                .iter()
                .map(|(word, count)| format!("{} ({})", word, count))
                .collect();
            writeln!(f, "Frequent words: {}", words.join(", "))?;
        }
        Ok(())
    }
}

/// Analysis pass for deriving statistics from screenplays.
pub struct ScriptAnalyzer {
    config: AnalysisConfig,
}

impl ScriptAnalyzer {
    /// Create a new analyzer with the given configuration.
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Create an analyzer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(AnalysisConfig::default())
    }

    /// Analyze a screenplay and return its statistics.
    pub fn analyze(&self, screenplay: &Screenplay) -> ScriptStatistics {
        let mut dialogue_words = 0;
        let mut action_words = 0;
        let mut word_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut speaker_table: BTreeMap<String, SpeakerStats> = BTreeMap::new();
        let mut current_speaker: Option<String> = None;

        for element in &screenplay.elements {
            match element.element_type {
                ElementType::Character => {
                    let name = strip_modifiers(&element.text);
                    if self.config.collect_speakers && !name.is_empty() {
                        let entry =
                            speaker_table
                                .entry(name.clone())
                                .or_insert_with(|| SpeakerStats {
                                    name: name.clone(),
                                    cue_count: 0,
                                    word_count: 0,
                                });
                        entry.cue_count += 1;
                    }
                    current_speaker = Some(name);
                }
                ElementType::Dialogue => {
                    let words = count_words(&element.text);
                    dialogue_words += words;
                    if self.config.count_words {
                        tally_content_words(&element.text, &mut word_counts);
                    }
                    if self.config.collect_speakers {
                        if let Some(name) = &current_speaker {
                            if let Some(entry) = speaker_table.get_mut(name) {
                                entry.word_count += words;
                            }
                        }
                    }
                }
                ElementType::Parenthetical => {
                    // Stays inside the current speech block.
                }
                ElementType::Action => {
                    action_words += count_words(&element.text);
                    if self.config.count_words {
                        tally_content_words(&element.text, &mut word_counts);
                    }
                    current_speaker = None;
                }
                _ => {
                    current_speaker = None;
                }
            }
        }

        let mut speakers: Vec<SpeakerStats> = speaker_table.into_values().collect();
        speakers.sort_by(|a, b| b.word_count.cmp(&a.word_count).then(a.name.cmp(&b.name)));

        ScriptStatistics {
            total_elements: screenplay.elements.len(),
            scene_count: screenplay.scene_count(),
            speech_count: screenplay.speech_count(),
            dialogue_words,
            action_words,
            pages: screenplay.total_pages(&self.config.page_format, self.config.chars_per_inch),
            minutes: screenplay
                .estimated_minutes(&self.config.page_format, self.config.chars_per_inch),
            speakers,
            top_words: top_words(word_counts, self.config.top_word_limit),
            locations: self.locations(screenplay),
        }
    }

    /// Distinct locations named by scene headings.
    fn locations(&self, screenplay: &Screenplay) -> Vec<String> {
        let mut locations: Vec<String> = screenplay
            .elements
            .iter()
            .filter(|e| e.element_type == ElementType::SceneHeading)
            .filter_map(|e| heading_location(&e.text))
            .collect();
        locations.sort();
        locations.dedup();
        locations
    }
}

impl Default for ScriptAnalyzer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Fold a line's content words into the frequency table. Tokens are
/// lowercased and reduced to letters; stop words and leftovers shorter
/// than three characters are skipped.
fn tally_content_words(text: &str, counts: &mut BTreeMap<String, usize>) {
    for token in text.split_whitespace() {
        let word: String = token
            .chars()
            .filter(|c| c.is_alphabetic())
            .collect::<String>()
            .to_lowercase();
        if word.chars().count() < 3 || STOP_WORDS.contains(&word.as_str()) {
            continue;
        }
        *counts.entry(word).or_insert(0) += 1;
    }
}

fn top_words(counts: BTreeMap<String, usize>, limit: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

/// Location part of a canonical heading: opener token and time-of-day
/// marker removed.
fn heading_location(heading: &str) -> Option<String> {
    let without_prefix = heading
        .trim_start_matches("INT./EXT.")
        .trim_start_matches("INT.")
        .trim_start_matches("EXT.")
        .trim_start();

    let mut tokens: Vec<&str> = without_prefix.split_whitespace().collect();
    if let Some(last) = tokens.last() {
        if is_time_of_day(last) {
            tokens.pop();
            while tokens.last() == Some(&"-") {
                tokens.pop();
            }
        }
    }

    let location = tokens.join(" ");
    if location.is_empty() {
        None
    } else {
        Some(location)
    }
}
