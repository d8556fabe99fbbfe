//! Canvas LMS grade-export handling
//!
//! The export leads with a column-header row and a points row; student data
//! starts at the third row. Delivery scores live at fixed column positions
//! (see `CanvasConfig`). Edits re-render the whole file so every value stays
//! derivable from the stored text, with quoting applied wherever a cell
//! contains a comma, quote or newline.

use csv::{ReaderBuilder, WriterBuilder};

use crate::config::CanvasConfig;
use crate::error::{Result, RubricaError};
use crate::model::Delivery;
use crate::text::normalize_name;

/// Rows that precede student data: column headers plus the points row
pub const HEADER_ROWS: usize = 2;

/// A parsed Canvas grade file, kept row-oriented for re-rendering
#[derive(Debug, Clone)]
pub struct GradeFile {
    rows: Vec<Vec<String>>,
}

/// Column holding the score for a delivery
pub fn score_column(config: &CanvasConfig, delivery: Delivery) -> usize {
    match delivery {
        Delivery::First => config.e1_column,
        Delivery::Second => config.e2_column,
        Delivery::Final => config.ef_column,
    }
}

impl GradeFile {
    /// Parse CSV text into a grade file
    pub fn parse(content: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        if rows.len() < HEADER_ROWS {
            return Err(RubricaError::InvalidGradeFile {
                reason: format!(
                    "expected at least {} rows (headers and points), found {}",
                    HEADER_ROWS,
                    rows.len()
                ),
            });
        }
        Ok(GradeFile { rows })
    }

    /// Column-header row
    pub fn headers(&self) -> &[String] {
        &self.rows[0]
    }

    /// Student rows, header and points rows skipped
    pub fn students(&self) -> &[Vec<String>] {
        &self.rows[HEADER_ROWS..]
    }

    /// Locate a student row by name (first column, normalized comparison).
    /// Returns an index into `students()`.
    pub fn find_student(&self, name: &str) -> Option<usize> {
        let wanted = normalize_name(name);
        self.students()
            .iter()
            .position(|row| row.first().is_some_and(|cell| normalize_name(cell) == wanted))
    }

    /// Score cell for a student row and delivery, when present
    pub fn score(&self, student: usize, delivery: Delivery, config: &CanvasConfig) -> Option<&str> {
        self.students()
            .get(student)?
            .get(score_column(config, delivery))
            .map(String::as_str)
    }

    /// Overwrite a student's score for a delivery, padding short rows
    pub fn set_score(
        &mut self,
        student: usize,
        delivery: Delivery,
        config: &CanvasConfig,
        value: &str,
    ) -> Result<()> {
        let column = score_column(config, delivery);
        let row = self
            .rows
            .get_mut(HEADER_ROWS + student)
            .ok_or_else(|| RubricaError::InvalidGradeFile {
                reason: format!("no student row {}", student),
            })?;
        if row.len() <= column {
            row.resize(column + 1, String::new());
        }
        row[column] = value.to_string();
        Ok(())
    }

    /// Re-render the whole file as CSV text
    pub fn render(&self) -> Result<String> {
        let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| RubricaError::failed("render grade file", e))?;
        String::from_utf8(bytes).map_err(|e| RubricaError::failed("render grade file", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Student,ID,SIS User ID,SIS Login ID,Section,Entrega 1,Entrega 2,Entrega Final
Points Possible,,,,,100,100,100
\"Pérez, Ana\",101,a101,ana.perez,S1,80,90,85
Gómez Juan,102,a102,juan.gomez,S1,70,,\n";

    fn config() -> CanvasConfig {
        CanvasConfig::default()
    }

    #[test]
    fn test_parse_skips_two_header_rows() {
        let file = GradeFile::parse(SAMPLE).unwrap();
        assert_eq!(file.students().len(), 2);
        assert_eq!(file.headers()[5], "Entrega 1");
    }

    #[test]
    fn test_parse_too_short() {
        let err = GradeFile::parse("Student,ID\n").unwrap_err();
        assert!(matches!(err, RubricaError::InvalidGradeFile { .. }));
    }

    #[test]
    fn test_find_student_normalized() {
        let file = GradeFile::parse(SAMPLE).unwrap();
        assert_eq!(file.find_student("perez, ana"), Some(0));
        assert_eq!(file.find_student("GÓMEZ JUAN"), Some(1));
        assert_eq!(file.find_student("nadie"), None);
    }

    #[test]
    fn test_score_lookup() {
        let file = GradeFile::parse(SAMPLE).unwrap();
        assert_eq!(file.score(0, Delivery::First, &config()), Some("80"));
        assert_eq!(file.score(0, Delivery::Final, &config()), Some("85"));
        assert_eq!(file.score(1, Delivery::Second, &config()), Some(""));
    }

    #[test]
    fn test_set_score_and_render_roundtrip() {
        let mut file = GradeFile::parse(SAMPLE).unwrap();
        file.set_score(1, Delivery::Final, &config(), "95").unwrap();

        let rendered = file.render().unwrap();
        let reparsed = GradeFile::parse(&rendered).unwrap();
        assert_eq!(reparsed.score(1, Delivery::Final, &config()), Some("95"));
        // untouched values survive the rewrite
        assert_eq!(reparsed.score(0, Delivery::First, &config()), Some("80"));
    }

    #[test]
    fn test_render_quotes_commas() {
        let file = GradeFile::parse(SAMPLE).unwrap();
        let rendered = file.render().unwrap();
        assert!(rendered.contains("\"Pérez, Ana\""));

        let reparsed = GradeFile::parse(&rendered).unwrap();
        assert_eq!(reparsed.students()[0][0], "Pérez, Ana");
    }

    #[test]
    fn test_set_score_pads_short_row() {
        let mut file = GradeFile::parse(
            "Student,ID,SIS User ID,SIS Login ID,Section,E1\nPoints,,,,,100\nAna,1\n",
        )
        .unwrap();
        file.set_score(0, Delivery::Final, &config(), "50").unwrap();
        assert_eq!(file.score(0, Delivery::Final, &config()), Some("50"));
    }
}
