//! Rubric interchange formats
//!
//! Two interchangeable representations parse into the same `Rubric`: a
//! sentinel-marker text format and a structured JSON format. The format of
//! an incoming file is resolved by extension first, content sniffing second.

pub mod json;
pub mod text;

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, RubricaError};
use crate::model::Rubric;

/// The two interchange formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Text,
    Json,
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportFormat::Text => write!(f, "text"),
            ImportFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ImportFormat {
    type Err = RubricaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ImportFormat::Text),
            "json" => Ok(ImportFormat::Json),
            other => Err(RubricaError::UnknownFormat(other.to_string())),
        }
    }
}

/// Resolve the format of an incoming file: extension first, then a sniff of
/// the content (JSON documents open with a brace).
pub fn detect(file_name: &str, content: &str) -> ImportFormat {
    let lowered = file_name.to_lowercase();
    if lowered.ends_with(".json") {
        return ImportFormat::Json;
    }
    if lowered.ends_with(".txt") {
        return ImportFormat::Text;
    }
    if content.trim_start().starts_with('{') {
        ImportFormat::Json
    } else {
        ImportFormat::Text
    }
}

/// Parse `content` in the given format into a fresh draft rubric
pub fn parse(content: &str, format: ImportFormat) -> Result<Rubric> {
    match format {
        ImportFormat::Text => text::parse(content),
        ImportFormat::Json => json::parse(content),
    }
}

/// Render a rubric in the given format
pub fn export(rubric: &Rubric, format: ImportFormat) -> Result<String> {
    match format {
        ImportFormat::Text => Ok(text::export(rubric)),
        ImportFormat::Json => json::export(rubric),
    }
}
