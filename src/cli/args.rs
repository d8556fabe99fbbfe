use clap::{Args, ValueEnum};
use std::path::PathBuf;

use rubrica_core::model::{Delivery, RubricType};

use super::parse::{parse_delivery, parse_rubric_type};

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Rubric name
    pub name: String,

    /// Rubric type
    #[arg(long, short = 'T', value_parser = parse_rubric_type)]
    pub r#type: Option<RubricType>,

    /// Delivery (E1, E2, EF)
    #[arg(long, short, value_parser = parse_delivery)]
    pub delivery: Delivery,

    /// Course code the rubric applies to
    #[arg(long, short)]
    pub course: String,

    /// Expected sum of criterion weights
    #[arg(long, default_value_t = 100.0)]
    pub total: f64,
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// File in the text or JSON interchange format
    pub file: PathBuf,

    /// Course code override (replaces the courses in the file)
    #[arg(long, short)]
    pub course: Option<String>,

    /// What to do when the rubric duplicates an existing one
    #[arg(long, value_enum, default_value = "skip")]
    pub on_duplicate: OnDuplicate,
}

/// Resolution policy for classified duplicate outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnDuplicate {
    /// Report the conflict and leave the store untouched
    Skip,
    /// Replace the matched rubric's content in place
    Overwrite,
    /// Save the candidate as the next version of the matched rubric
    NewVersion,
}
