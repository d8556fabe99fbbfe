//! Sentinel-marker text format
//!
//! ```text
//! === RUBRICA ===
//! NOMBRE: Rúbrica Grupal E1 - Programación Móvil
//! TIPO: Grupal
//! ENTREGA: E1
//! CURSOS: EPM
//! PUNTUACION_TOTAL: 100
//! === CODIGO ===
//! RGE1-EPMV1
//! === CRITERIOS ===
//! CRITERIO_1: Diseño | 40
//! NIVEL_1: 0-20 | Insuficiente | No cumple el diseño acordado
//! NIVEL_2: 21-40 | Logrado | Cumple el diseño acordado
//! === ESCALA ===
//! ESCALA_1: 0-59 | Insuficiente
//! ESCALA_2: 60-100 | Aprobado
//! ===FIN===
//! ```
//!
//! The `CODIGO` section is informational on export; imports always produce a
//! fresh draft whose code is assigned at save time. Criterion and level
//! titles must not contain `|`.

use crate::error::{Result, RubricaError};
use crate::model::{Criterion, Delivery, GradeBand, Level, Rubric, RubricType};

const SECTION_RUBRIC: &str = "=== RUBRICA ===";
const SECTION_CODE: &str = "=== CODIGO ===";
const SECTION_CRITERIA: &str = "=== CRITERIOS ===";
const SECTION_SCALE: &str = "=== ESCALA ===";
const SECTION_END: &str = "===FIN===";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    None,
    Rubric,
    Code,
    Criteria,
    Scale,
    Done,
}

#[derive(Default)]
struct Draft {
    name: Option<String>,
    rubric_type: Option<RubricType>,
    delivery: Option<Delivery>,
    courses: Vec<String>,
    total_points: Option<f64>,
    criteria: Vec<Criterion>,
    scale: Vec<GradeBand>,
}

/// Parse the text format into a fresh draft rubric
pub fn parse(content: &str) -> Result<Rubric> {
    let mut section = Section::None;
    let mut draft = Draft::default();

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        let line_no = index + 1;
        if line.is_empty() || section == Section::Done {
            continue;
        }

        section = match line {
            SECTION_RUBRIC => Section::Rubric,
            SECTION_CODE => Section::Code,
            SECTION_CRITERIA => Section::Criteria,
            SECTION_SCALE => Section::Scale,
            SECTION_END => Section::Done,
            _ => {
                parse_line(section, line, line_no, &mut draft)?;
                section
            }
        };
    }

    if section != Section::Done {
        return Err(RubricaError::import(format!(
            "missing {} terminator",
            SECTION_END
        )));
    }
    finish(draft)
}

fn parse_line(section: Section, line: &str, line_no: usize, draft: &mut Draft) -> Result<()> {
    match section {
        Section::Rubric => parse_header_line(line, line_no, draft),
        Section::Code => Ok(()), // informational, ignored on import
        Section::Criteria => parse_criteria_line(line, line_no, draft),
        Section::Scale => parse_scale_line(line, line_no, draft),
        Section::None => Err(RubricaError::import(format!(
            "line {}: content before {}",
            line_no, SECTION_RUBRIC
        ))),
        Section::Done => Ok(()),
    }
}

fn parse_header_line(line: &str, line_no: usize, draft: &mut Draft) -> Result<()> {
    let (field, value) = line.split_once(':').ok_or_else(|| {
        RubricaError::import(format!("line {}: expected FIELD: value", line_no))
    })?;
    let value = value.trim();
    match field.trim() {
        "NOMBRE" => draft.name = Some(value.to_string()),
        "TIPO" => draft.rubric_type = Some(value.parse().map_err(|_| bad_value(line_no, value))?),
        "ENTREGA" => draft.delivery = Some(value.parse().map_err(|_| bad_value(line_no, value))?),
        "CURSOS" => {
            draft.courses = value
                .split(',')
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();
        }
        "PUNTUACION_TOTAL" => {
            draft.total_points = Some(
                value
                    .parse()
                    .map_err(|_| bad_value(line_no, value))?,
            );
        }
        other => {
            return Err(RubricaError::import(format!(
                "line {}: unknown field {}",
                line_no, other
            )))
        }
    }
    Ok(())
}

fn parse_criteria_line(line: &str, line_no: usize, draft: &mut Draft) -> Result<()> {
    if line.starts_with("CRITERIO_") {
        let body = after_colon(line, line_no)?;
        let (title, weight) = body.rsplit_once('|').ok_or_else(|| {
            RubricaError::import(format!("line {}: expected titulo | peso", line_no))
        })?;
        draft.criteria.push(Criterion {
            title: title.trim().to_string(),
            weight: weight
                .trim()
                .parse()
                .map_err(|_| bad_value(line_no, weight))?,
            levels: Vec::new(),
        });
        return Ok(());
    }
    if line.starts_with("NIVEL_") {
        let body = after_colon(line, line_no)?;
        let mut parts = body.splitn(3, '|');
        let range = parts.next().unwrap_or("").trim();
        let title = parts.next().map(str::trim).unwrap_or("");
        let description = parts.next().map(str::trim).unwrap_or("");
        let (min_points, max_points) = parse_range(range, line_no)?;

        let criterion = draft.criteria.last_mut().ok_or_else(|| {
            RubricaError::import(format!("line {}: NIVEL before any CRITERIO", line_no))
        })?;
        criterion.levels.push(Level {
            min_points,
            max_points,
            title: title.to_string(),
            description: description.to_string(),
        });
        return Ok(());
    }
    Err(RubricaError::import(format!(
        "line {}: expected CRITERIO_n or NIVEL_n",
        line_no
    )))
}

fn parse_scale_line(line: &str, line_no: usize, draft: &mut Draft) -> Result<()> {
    if !line.starts_with("ESCALA_") {
        return Err(RubricaError::import(format!(
            "line {}: expected ESCALA_n",
            line_no
        )));
    }
    let body = after_colon(line, line_no)?;
    let (range, label) = body.split_once('|').ok_or_else(|| {
        RubricaError::import(format!("line {}: expected rango | etiqueta", line_no))
    })?;
    let (min_percent, max_percent) = parse_range(range.trim(), line_no)?;
    draft.scale.push(GradeBand {
        min_percent,
        max_percent,
        label: label.trim().to_string(),
    });
    Ok(())
}

fn after_colon(line: &str, line_no: usize) -> Result<&str> {
    line.split_once(':')
        .map(|(_, rest)| rest.trim())
        .ok_or_else(|| RubricaError::import(format!("line {}: expected a colon", line_no)))
}

fn parse_range(range: &str, line_no: usize) -> Result<(f64, f64)> {
    let (min, max) = range
        .split_once('-')
        .ok_or_else(|| bad_value(line_no, range))?;
    let min = min.trim().parse().map_err(|_| bad_value(line_no, min))?;
    let max = max.trim().parse().map_err(|_| bad_value(line_no, max))?;
    Ok((min, max))
}

fn bad_value(line_no: usize, value: &str) -> RubricaError {
    RubricaError::import(format!("line {}: invalid value {:?}", line_no, value.trim()))
}

fn finish(draft: Draft) -> Result<Rubric> {
    let name = draft
        .name
        .ok_or_else(|| RubricaError::import("missing NOMBRE"))?;
    let rubric_type = draft
        .rubric_type
        .ok_or_else(|| RubricaError::import("missing TIPO"))?;
    let delivery = draft
        .delivery
        .ok_or_else(|| RubricaError::import("missing ENTREGA"))?;

    let mut rubric = Rubric::new(&name, rubric_type, delivery, "");
    rubric.courses = draft.courses.into_iter().collect();
    if let Some(total) = draft.total_points {
        rubric.total_points = total;
    }
    rubric.criteria = draft.criteria;
    rubric.grading_scale = draft.scale;
    Ok(rubric)
}

/// Render a rubric in the text format
pub fn export(rubric: &Rubric) -> String {
    let mut out = String::new();
    out.push_str(SECTION_RUBRIC);
    out.push('\n');
    out.push_str(&format!("NOMBRE: {}\n", rubric.name));
    out.push_str(&format!("TIPO: {}\n", rubric.rubric_type));
    out.push_str(&format!("ENTREGA: {}\n", rubric.delivery));
    if !rubric.courses.is_empty() {
        let courses: Vec<&str> = rubric.courses.iter().map(String::as_str).collect();
        out.push_str(&format!("CURSOS: {}\n", courses.join(", ")));
    }
    out.push_str(&format!("PUNTUACION_TOTAL: {}\n", rubric.total_points));

    if let Some(code) = &rubric.code {
        out.push_str(SECTION_CODE);
        out.push('\n');
        out.push_str(code);
        out.push('\n');
    }

    out.push_str(SECTION_CRITERIA);
    out.push('\n');
    for (c_index, criterion) in rubric.criteria.iter().enumerate() {
        out.push_str(&format!(
            "CRITERIO_{}: {} | {}\n",
            c_index + 1,
            criterion.title,
            criterion.weight
        ));
        for (l_index, level) in criterion.levels.iter().enumerate() {
            out.push_str(&format!(
                "NIVEL_{}: {}-{} | {} | {}\n",
                l_index + 1,
                level.min_points,
                level.max_points,
                level.title,
                level.description
            ));
        }
    }

    out.push_str(SECTION_SCALE);
    out.push('\n');
    for (index, band) in rubric.grading_scale.iter().enumerate() {
        out.push_str(&format!(
            "ESCALA_{}: {}-{} | {}\n",
            index + 1,
            band.min_percent,
            band.max_percent,
            band.label
        ));
    }

    out.push_str(SECTION_END);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare;

    fn sample() -> Rubric {
        let mut rubric = Rubric::new(
            "Rúbrica Grupal E1 - Programación Móvil",
            RubricType::Group,
            Delivery::First,
            "EPM",
        );
        rubric.code = Some("RGE1-EPMV1".to_string());
        rubric.version = Some(1);
        rubric.criteria = vec![
            Criterion {
                title: "Diseño".to_string(),
                weight: 40.0,
                levels: vec![
                    Level {
                        min_points: 0.0,
                        max_points: 20.0,
                        title: "Insuficiente".to_string(),
                        description: "No cumple el diseño acordado".to_string(),
                    },
                    Level {
                        min_points: 21.0,
                        max_points: 40.0,
                        title: "Logrado".to_string(),
                        description: "Cumple el diseño acordado".to_string(),
                    },
                ],
            },
            Criterion {
                title: "Pruebas".to_string(),
                weight: 60.0,
                levels: vec![],
            },
        ];
        rubric.grading_scale = vec![GradeBand {
            min_percent: 0.0,
            max_percent: 100.0,
            label: "Única".to_string(),
        }];
        rubric
    }

    #[test]
    fn test_export_contains_sentinels() {
        let text = export(&sample());
        assert!(text.starts_with("=== RUBRICA ===\n"));
        assert!(text.contains("=== CODIGO ===\nRGE1-EPMV1\n"));
        assert!(text.contains("CRITERIO_1: Diseño | 40\n"));
        assert!(text.contains("NIVEL_2: 21-40 | Logrado | Cumple el diseño acordado\n"));
        assert!(text.contains("ESCALA_1: 0-100 | Única\n"));
        assert!(text.ends_with("===FIN===\n"));
    }

    #[test]
    fn test_roundtrip_is_identical() {
        let original = sample();
        let parsed = parse(&export(&original)).unwrap();
        let result = compare(&original, &parsed);
        assert!(result.identical, "differences: {:?}", result.differences);
        assert_eq!(parsed.name, original.name);
        assert_eq!(parsed.rubric_type, original.rubric_type);
        assert_eq!(parsed.delivery, original.delivery);
        assert_eq!(parsed.courses, original.courses);
    }

    #[test]
    fn test_import_produces_fresh_draft() {
        let parsed = parse(&export(&sample())).unwrap();
        assert!(parsed.code.is_none());
        assert!(parsed.version.is_none());
        assert!(!parsed.active);
    }

    #[test]
    fn test_missing_terminator() {
        let text = "=== RUBRICA ===\nNOMBRE: X\nTIPO: Grupal\nENTREGA: E1\n";
        let err = parse(text).unwrap_err();
        assert!(err.to_string().contains("===FIN==="));
    }

    #[test]
    fn test_missing_required_field() {
        let text = "=== RUBRICA ===\nNOMBRE: X\nENTREGA: E1\n===FIN===\n";
        let err = parse(text).unwrap_err();
        assert!(err.to_string().contains("TIPO"));
    }

    #[test]
    fn test_nivel_before_criterio() {
        let text = "=== RUBRICA ===\nNOMBRE: X\nTIPO: Grupal\nENTREGA: E1\n\
                    === CRITERIOS ===\nNIVEL_1: 0-5 | A | B\n===FIN===\n";
        let err = parse(text).unwrap_err();
        assert!(err.to_string().contains("NIVEL"));
    }

    #[test]
    fn test_malformed_weight() {
        let text = "=== RUBRICA ===\nNOMBRE: X\nTIPO: Grupal\nENTREGA: E1\n\
                    === CRITERIOS ===\nCRITERIO_1: Diseño | cuarenta\n===FIN===\n";
        assert!(parse(text).is_err());
    }
}
