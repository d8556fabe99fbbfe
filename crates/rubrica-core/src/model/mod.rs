//! Domain model: rubric definitions, evaluations and course state
//!
//! Persisted field names keep the original Spanish camelCase layout so that
//! existing stores remain readable.

mod course;
mod evaluation;
mod rubric;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RubricaError;

pub use course::{CanvasAttachment, CourseState};
pub use evaluation::Evaluation;
pub use rubric::{Criterion, GradeBand, Level, Rubric};

/// Rubric type: group or individual grading
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RubricType {
    #[serde(rename = "Grupal")]
    Group,
    #[serde(rename = "Individual")]
    Individual,
}

impl RubricType {
    /// Letter used in generated rubric codes
    pub fn code_letter(&self) -> char {
        match self {
            RubricType::Group => 'G',
            RubricType::Individual => 'I',
        }
    }
}

impl fmt::Display for RubricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RubricType::Group => write!(f, "Grupal"),
            RubricType::Individual => write!(f, "Individual"),
        }
    }
}

impl FromStr for RubricType {
    type Err = RubricaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grupal" | "g" | "pg" => Ok(RubricType::Group),
            "individual" | "i" | "pi" => Ok(RubricType::Individual),
            other => Err(RubricaError::UsageError(format!(
                "unknown rubric type: {} (expected: grupal or individual)",
                other
            ))),
        }
    }
}

/// Delivery milestone a rubric applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Delivery {
    #[serde(rename = "E1")]
    First,
    #[serde(rename = "E2")]
    Second,
    #[serde(rename = "EF")]
    Final,
}

impl Delivery {
    /// Short code used in rubric codes and composite keys
    pub fn code(&self) -> &'static str {
        match self {
            Delivery::First => "E1",
            Delivery::Second => "E2",
            Delivery::Final => "EF",
        }
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Delivery {
    type Err = RubricaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "E1" => Ok(Delivery::First),
            "E2" => Ok(Delivery::Second),
            "EF" => Ok(Delivery::Final),
            other => Err(RubricaError::UsageError(format!(
                "unknown delivery: {} (expected: E1, E2 or EF)",
                other
            ))),
        }
    }
}

/// Lifecycle state of a rubric; the transition draft -> published is one-way
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RubricStatus {
    #[default]
    #[serde(rename = "borrador")]
    Draft,
    #[serde(rename = "publicada")]
    Published,
}

impl fmt::Display for RubricStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RubricStatus::Draft => write!(f, "borrador"),
            RubricStatus::Published => write!(f, "publicada"),
        }
    }
}
