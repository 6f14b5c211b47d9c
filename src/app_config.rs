use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

use crate::formatting::{MeasurementUnit, PageFormat};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Page layout used for pagination and runtime estimates
    #[serde(default)]
    pub page_format: PageFormat,

    /// Measurement settings used when converting margins to indents
    #[serde(default)]
    pub measurement: MeasurementConfig,

    /// Formatting behaviour settings
    #[serde(default)]
    pub formatting: FormattingConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Measurement mode for indentation output
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementMode {
    // @mode: Whole columns for monospaced text views
    #[default]
    Characters,
    // @mode: Fractional screen units for pixel based views
    Units,
}

impl MeasurementMode {
    // @returns: Capitalized mode name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Characters => "Characters",
            Self::Units => "Units",
        }
    }

    // @returns: Lowercase mode identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Characters => "characters".to_string(),
            Self::Units => "units".to_string(),
        }
    }
}

// Implement Display trait for MeasurementMode
impl std::fmt::Display for MeasurementMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for MeasurementMode
impl std::str::FromStr for MeasurementMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "characters" | "chars" | "columns" => Ok(Self::Characters),
            "units" | "pixels" => Ok(Self::Units),
            _ => Err(anyhow!("Invalid measurement mode: {}", s)),
        }
    }
}

/// Measurement configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MeasurementConfig {
    // @field: Measurement mode identifier
    #[serde(default)]
    pub mode: MeasurementMode,

    // @field: Monospace columns per horizontal inch
    #[serde(default = "default_chars_per_inch")]
    pub chars_per_inch: u32,

    // @field: Screen units per horizontal inch
    #[serde(default = "default_units_per_inch")]
    pub units_per_inch: f64,
}

impl MeasurementConfig {
    // @returns: Measurement unit for the configured mode
    pub fn to_unit(&self) -> MeasurementUnit {
        match self.mode {
            MeasurementMode::Characters => MeasurementUnit::Characters {
                per_inch: self.chars_per_inch,
            },
            MeasurementMode::Units => MeasurementUnit::Units {
                per_inch: self.units_per_inch,
            },
        }
    }
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        Self {
            mode: MeasurementMode::default(),
            chars_per_inch: default_chars_per_inch(),
            units_per_inch: default_units_per_inch(),
        }
    }
}

/// Configuration for line classification and repair
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FormattingConfig {
    /// Time of day appended to scene headings that lack one
    #[serde(default = "default_time_of_day")]
    pub default_time_of_day: String,

    /// Whether finalizing a line applies pending scene heading suffixes
    #[serde(default = "default_true")]
    pub apply_suffixes: bool,

    /// Whether validation may repair structural issues automatically
    #[serde(default = "default_true")]
    pub auto_repair: bool,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            default_time_of_day: default_time_of_day(),
            apply_suffixes: true,
            auto_repair: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_chars_per_inch() -> u32 {
    10 // 12 point Courier, ten columns to the inch
}

fn default_units_per_inch() -> f64 {
    96.0 // CSS reference pixel density
}

fn default_time_of_day() -> String {
    "DAY".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate the page geometry
        self.page_format.validate()?;

        if self.measurement.chars_per_inch == 0 {
            return Err(anyhow!("Measurement chars_per_inch must be greater than zero"));
        }

        if self.measurement.units_per_inch <= 0.0 {
            return Err(anyhow!("Measurement units_per_inch must be greater than zero"));
        }

        // The default time of day is appended verbatim to scene headings,
        // so it has to be a single word
        let time_of_day = self.formatting.default_time_of_day.trim();
        if time_of_day.is_empty() {
            return Err(anyhow!("Default time of day must not be empty"));
        }
        if time_of_day.split_whitespace().count() != 1 {
            return Err(anyhow!(
                "Default time of day must be a single word, got: {}",
                time_of_day
            ));
        }

        Ok(())
    }

    /// Get the default per-user config path
    pub fn user_config_path() -> Result<PathBuf> {
        // Try to use the system config directory
        let base_dir = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(base_dir.join("screenwright").join("conf.json"))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            page_format: PageFormat::default(),
            measurement: MeasurementConfig::default(),
            formatting: FormattingConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
