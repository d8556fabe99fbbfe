//! CLI argument parsing for rubrica
//!
//! Global flags: --root, --store, --format, --quiet, --verbose

pub mod args;
pub mod output;
pub mod parse;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rubrica_core::model::{Delivery, RubricType};

pub use args::{CreateArgs, ImportArgs, OnDuplicate};
pub use output::OutputFormat;
use parse::{parse_delivery, parse_rubric_type};

/// Rubrica - rubric versioning and grading store for course teaching staff
#[derive(Parser, Debug)]
#[command(name = "rubrica")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory for resolving the store
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit store root path
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report progress details
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new rubrica store
    Init {
        /// Use visible store directory (rubrica/ instead of .rubrica/)
        #[arg(long)]
        visible: bool,
    },

    /// Create a new draft rubric
    Create(CreateArgs),

    /// List rubrics
    List {
        /// Filter by course code
        #[arg(long, short)]
        course: Option<String>,

        /// Filter by rubric type
        #[arg(long, short = 'T', value_parser = parse_rubric_type)]
        r#type: Option<RubricType>,

        /// Filter by delivery
        #[arg(long, short, value_parser = parse_delivery)]
        delivery: Option<Delivery>,

        /// Only active versions
        #[arg(long)]
        active: bool,
    },

    /// Show a rubric
    Show {
        /// Rubric id or code
        id_or_code: String,
    },

    /// Import a rubric from a file (text or JSON format)
    Import(ImportArgs),

    /// Export a rubric to a file or stdout
    Export {
        /// Rubric id or code
        id_or_code: String,

        /// Interchange format (text or json)
        #[arg(long, default_value = "text")]
        to: String,

        /// Output file (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Compare two rubrics structurally
    Compare {
        /// First rubric id or code
        a: String,
        /// Second rubric id or code
        b: String,
    },

    /// Publish a draft rubric (assigns its code when missing)
    Publish {
        /// Rubric id or code
        id_or_code: String,
    },

    /// Create a sibling version of a rubric as a fresh draft
    NewVersion {
        /// Rubric id or code
        id_or_code: String,
    },

    /// Activate one version and deactivate its siblings
    Activate {
        /// Rubric id or code
        id_or_code: String,
    },

    /// Delete a rubric
    Delete {
        /// Rubric id or code
        id_or_code: String,
    },

    /// Evaluation records
    Eval {
        #[command(subcommand)]
        command: EvalCommands,
    },

    /// Course settings and associations
    Course {
        #[command(subcommand)]
        command: CourseCommands,
    },

    /// Canvas grade file operations
    Canvas {
        #[command(subcommand)]
        command: CanvasCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum EvalCommands {
    /// Save (or overwrite) an evaluation
    Save {
        /// Course code
        course: String,
        /// Delivery (E1, E2, EF)
        #[arg(value_parser = parse_delivery)]
        delivery: Delivery,
        /// Student or group identifier
        subject: String,

        /// Rubric id or code (defaults to the course association)
        #[arg(long)]
        rubric: Option<String>,

        /// Rubric type
        #[arg(long, short = 'T', value_parser = parse_rubric_type)]
        r#type: Option<RubricType>,

        /// Points per criterion: "1=30,2=50" or "Diseño=30,Pruebas=50"
        #[arg(long)]
        points: String,
    },

    /// Show an evaluation
    Show {
        course: String,
        #[arg(value_parser = parse_delivery)]
        delivery: Delivery,
        subject: String,

        /// Rubric type
        #[arg(long, short = 'T', value_parser = parse_rubric_type)]
        r#type: Option<RubricType>,
    },

    /// Delete an evaluation
    Delete {
        course: String,
        #[arg(value_parser = parse_delivery)]
        delivery: Delivery,
        subject: String,

        /// Rubric type
        #[arg(long, short = 'T', value_parser = parse_rubric_type)]
        r#type: Option<RubricType>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CourseCommands {
    /// Register a course
    Add {
        /// Course code
        code: String,
        /// Display name (used to derive rubric-code initials)
        #[arg(long)]
        name: Option<String>,
    },

    /// Associate a rubric with a (delivery, type) slot
    SetRubric {
        course: String,
        #[arg(value_parser = parse_delivery)]
        delivery: Delivery,
        #[arg(value_parser = parse_rubric_type)]
        r#type: RubricType,
        /// Rubric id or code
        rubric: String,
    },

    /// Attach a Canvas grade export to a course
    Attach {
        course: String,
        /// CSV file exported from Canvas
        file: PathBuf,
    },

    /// List registered courses
    List,

    /// Delete a course and its evaluations
    Delete { course: String },
}

#[derive(Subcommand, Debug)]
pub enum CanvasCommands {
    /// Show the attached grade file of a course
    Show { course: String },

    /// Overwrite one student's score for a delivery
    SetScore {
        course: String,
        /// Student name as it appears in the export
        student: String,
        #[arg(value_parser = parse_delivery)]
        delivery: Delivery,
        value: String,
    },

    /// Write the (possibly edited) grade file back out
    Export {
        course: String,
        /// Output file (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}
