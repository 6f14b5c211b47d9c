/*!
 * Error types for the screenwright application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when building or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A page must hold at least one line
    #[error("Lines per page must be at least 1, got {0}")]
    InvalidLinesPerPage(u32),

    /// Page dimensions must leave printable space
    #[error("Page dimensions are unusable: {width_in}in x {height_in}in")]
    InvalidPageSize {
        /// Configured page width in inches
        width_in: f64,
        /// Configured page height in inches
        height_in: f64,
    },

    /// A measurement constant must be positive
    #[error("Measurement constant must be positive: {0}")]
    InvalidMeasurement(String),

    /// Any other invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidValue(String),
}

/// Errors that can occur while reading or writing script documents
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Error parsing a stored document
    #[error("Failed to parse document: {0}")]
    ParseError(String),

    /// A stored element carried a type name the model does not know
    #[error("Unknown element type: {0}")]
    UnknownElementType(String),

    /// Error serializing a document for storage
    #[error("Failed to serialize document: {0}")]
    SerializeError(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration handling
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from document handling
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
