use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

use super::{Delivery, RubricStatus, RubricType};
use crate::error::{Result, RubricaError};
use crate::text::normalize_name;

/// One achievement band within a criterion, with a point range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    #[serde(rename = "puntuacionMinima")]
    pub min_points: f64,
    #[serde(rename = "puntuacionMaxima")]
    pub max_points: f64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
}

/// One weighted grading dimension within a rubric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "peso")]
    pub weight: f64,
    #[serde(rename = "niveles", default)]
    pub levels: Vec<Level>,
}

/// One percentage band of the grading scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeBand {
    #[serde(rename = "porcentajeMinimo")]
    pub min_percent: f64,
    #[serde(rename = "porcentajeMaximo")]
    pub max_percent: f64,
    #[serde(rename = "etiqueta")]
    pub label: String,
}

/// A grading template of weighted criteria and point-range levels.
///
/// Versions of "the same" rubric share a base code (code with the trailing
/// `V<n>` stripped); at most one version per family is active at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rubric {
    /// Opaque identifier, stable for the lifetime of one version
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    /// Structured code such as `RGE1-EPMV2`; assigned at first save
    #[serde(rename = "codigo", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Positive integer, monotonically increasing per base code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(rename = "tipoRubrica")]
    pub rubric_type: RubricType,
    #[serde(rename = "tipoEntrega")]
    pub delivery: Delivery,
    #[serde(rename = "cursosCodigos", default)]
    pub courses: BTreeSet<String>,
    #[serde(rename = "criterios", default)]
    pub criteria: Vec<Criterion>,
    #[serde(rename = "puntuacionTotal")]
    pub total_points: f64,
    #[serde(rename = "escalaCalificacion", default)]
    pub grading_scale: Vec<GradeBand>,
    #[serde(rename = "estado", default)]
    pub status: RubricStatus,
    #[serde(rename = "activa", default)]
    pub active: bool,
    #[serde(rename = "fechaCreacion")]
    pub created: DateTime<Utc>,
    #[serde(rename = "fechaModificacion", skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

impl Rubric {
    /// Create a new draft rubric with a fresh id and no code
    pub fn new(name: &str, rubric_type: RubricType, delivery: Delivery, course: &str) -> Self {
        let mut courses = BTreeSet::new();
        if !course.is_empty() {
            courses.insert(course.to_string());
        }
        Rubric {
            id: new_id(),
            name: name.to_string(),
            code: None,
            version: None,
            rubric_type,
            delivery,
            courses,
            criteria: Vec::new(),
            total_points: 100.0,
            grading_scale: Vec::new(),
            status: RubricStatus::Draft,
            active: false,
            created: Utc::now(),
            modified: None,
        }
    }

    /// Sibling version: fresh id, no code or version, inactive draft.
    /// The code and version are assigned at save time.
    pub fn new_version(&self) -> Self {
        Rubric {
            id: new_id(),
            code: None,
            version: None,
            status: RubricStatus::Draft,
            active: false,
            created: Utc::now(),
            modified: None,
            ..self.clone()
        }
    }

    /// Sum of criterion weights
    pub fn weights_total(&self) -> f64 {
        self.criteria.iter().map(|c| c.weight).sum()
    }

    /// Check that the rubric is complete enough to publish
    pub fn validate_for_publish(&self) -> Result<()> {
        if self.criteria.is_empty() {
            return Err(RubricaError::validation(
                "la rúbrica no tiene criterios".to_string(),
            ));
        }
        let weights = self.weights_total();
        if (weights - self.total_points).abs() > 1e-9 {
            return Err(RubricaError::validation(format!(
                "la suma de pesos ({}) no coincide con la puntuación total ({})",
                weights, self.total_points
            )));
        }
        Ok(())
    }

    /// SHA-256 fingerprint over the pedagogical content: criteria (matched by
    /// normalized title), weights, levels, grading scale and total points.
    /// Identity, code, version, courses, name and timestamps do not count.
    pub fn content_fingerprint(&self) -> String {
        let mut criteria: Vec<&Criterion> = self.criteria.iter().collect();
        criteria.sort_by_key(|c| normalize_name(&c.title));

        let mut hasher = Sha256::new();
        hasher.update(format!("total:{}\n", self.total_points));
        for criterion in criteria {
            hasher.update(format!(
                "criterio:{}|{}\n",
                normalize_name(&criterion.title),
                criterion.weight
            ));
            for level in &criterion.levels {
                hasher.update(format!(
                    "nivel:{}-{}|{}|{}\n",
                    level.min_points, level.max_points, level.title, level.description
                ));
            }
        }
        for band in &self.grading_scale {
            hasher.update(format!(
                "escala:{}-{}|{}\n",
                band.min_percent, band.max_percent, band.label
            ));
        }
        hex::encode(hasher.finalize())
    }

    /// Grade label for a raw score, resolved against the grading scale
    pub fn grade_label(&self, score: f64) -> Option<&str> {
        if self.total_points <= 0.0 {
            return None;
        }
        let percent = score / self.total_points * 100.0;
        self.grading_scale
            .iter()
            .find(|band| percent >= band.min_percent && percent <= band.max_percent)
            .map(|band| band.label.as_str())
    }
}

/// Generate a fresh rubric identifier
pub(crate) fn new_id() -> String {
    format!("rb-{}", ulid::Ulid::new().to_string().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Rubric {
        let mut rubric = Rubric::new(
            "Rúbrica Grupal E1 - Programación Móvil",
            RubricType::Group,
            Delivery::First,
            "EPM",
        );
        rubric.criteria = vec![
            Criterion {
                title: "Diseño".to_string(),
                weight: 40.0,
                levels: vec![Level {
                    min_points: 0.0,
                    max_points: 40.0,
                    title: "Logrado".to_string(),
                    description: "Cumple el diseño".to_string(),
                }],
            },
            Criterion {
                title: "Funcionalidad".to_string(),
                weight: 60.0,
                levels: vec![],
            },
        ];
        rubric.grading_scale = vec![
            GradeBand {
                min_percent: 0.0,
                max_percent: 59.0,
                label: "Insuficiente".to_string(),
            },
            GradeBand {
                min_percent: 60.0,
                max_percent: 100.0,
                label: "Aprobado".to_string(),
            },
        ];
        rubric
    }

    #[test]
    fn test_new_rubric_is_inactive_draft() {
        let rubric = sample();
        assert!(rubric.id.starts_with("rb-"));
        assert_eq!(rubric.status, RubricStatus::Draft);
        assert!(!rubric.active);
        assert!(rubric.code.is_none());
        assert!(rubric.version.is_none());
    }

    #[test]
    fn test_new_version_resets_identity() {
        let mut rubric = sample();
        rubric.code = Some("RGE1-EPMV1".to_string());
        rubric.version = Some(1);
        rubric.active = true;
        rubric.status = RubricStatus::Published;

        let sibling = rubric.new_version();
        assert_ne!(sibling.id, rubric.id);
        assert!(sibling.code.is_none());
        assert!(sibling.version.is_none());
        assert!(!sibling.active);
        assert_eq!(sibling.status, RubricStatus::Draft);
        assert_eq!(sibling.criteria, rubric.criteria);
    }

    #[test]
    fn test_validate_for_publish() {
        let rubric = sample();
        assert!(rubric.validate_for_publish().is_ok());

        let mut wrong = sample();
        wrong.criteria[0].weight = 50.0;
        assert!(wrong.validate_for_publish().is_err());

        let mut empty = sample();
        empty.criteria.clear();
        assert!(empty.validate_for_publish().is_err());
    }

    #[test]
    fn test_fingerprint_ignores_identity_fields() {
        let rubric = sample();
        let mut renamed = sample();
        renamed.name = "Otro nombre".to_string();
        renamed.code = Some("RGE1-XV9".to_string());
        renamed.version = Some(9);
        renamed.courses.insert("OTRO".to_string());
        assert_eq!(rubric.content_fingerprint(), renamed.content_fingerprint());
    }

    #[test]
    fn test_fingerprint_ignores_criterion_order() {
        let rubric = sample();
        let mut reordered = sample();
        reordered.criteria.reverse();
        assert_eq!(
            rubric.content_fingerprint(),
            reordered.content_fingerprint()
        );
    }

    #[test]
    fn test_fingerprint_changes_with_weight() {
        let rubric = sample();
        let mut changed = sample();
        changed.criteria[0].weight = 45.0;
        changed.criteria[1].weight = 55.0;
        assert_ne!(rubric.content_fingerprint(), changed.content_fingerprint());
    }

    #[test]
    fn test_grade_label() {
        let rubric = sample();
        assert_eq!(rubric.grade_label(30.0), Some("Insuficiente"));
        assert_eq!(rubric.grade_label(80.0), Some("Aprobado"));
        assert_eq!(rubric.grade_label(100.0), Some("Aprobado"));
    }

    #[test]
    fn test_persisted_field_names() {
        let rubric = sample();
        let json = serde_json::to_value(&rubric).unwrap();
        assert!(json.get("nombre").is_some());
        assert!(json.get("tipoRubrica").is_some());
        assert!(json.get("tipoEntrega").is_some());
        assert!(json.get("cursosCodigos").is_some());
        assert!(json.get("puntuacionTotal").is_some());
        assert!(json.get("escalaCalificacion").is_some());
        assert!(json.get("fechaCreacion").is_some());
        assert_eq!(json["criterios"][0]["titulo"], "Diseño");
        assert_eq!(json["criterios"][0]["peso"], 40.0);
        assert_eq!(
            json["criterios"][0]["niveles"][0]["puntuacionMinima"],
            0.0
        );
    }
}
