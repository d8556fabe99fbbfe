use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Delivery, RubricType};

/// A grading record for one student or group against one rubric.
///
/// Evaluations are keyed by the composite
/// `course|delivery|type|subject` string and overwritten whole on save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(rename = "curso")]
    pub course: String,
    #[serde(rename = "tipoEntrega")]
    pub delivery: Delivery,
    #[serde(rename = "tipoRubrica")]
    pub rubric_type: RubricType,
    /// Student or group identifier
    #[serde(rename = "sujeto")]
    pub subject: String,
    #[serde(rename = "rubricaId")]
    pub rubric_id: String,
    /// Points awarded per criterion title
    #[serde(rename = "puntuaciones", default)]
    pub points: BTreeMap<String, f64>,
    pub total: f64,
    #[serde(rename = "fechaModificacion")]
    pub modified: DateTime<Utc>,
}

impl Evaluation {
    pub fn new(
        course: &str,
        delivery: Delivery,
        rubric_type: RubricType,
        subject: &str,
        rubric_id: &str,
        points: BTreeMap<String, f64>,
    ) -> Self {
        let total = points.values().sum();
        Evaluation {
            course: course.to_string(),
            delivery,
            rubric_type,
            subject: subject.to_string(),
            rubric_id: rubric_id.to_string(),
            points,
            total,
            modified: Utc::now(),
        }
    }

    /// Composite storage key
    pub fn key(&self) -> String {
        Self::make_key(&self.course, self.delivery, self.rubric_type, &self.subject)
    }

    pub fn make_key(
        course: &str,
        delivery: Delivery,
        rubric_type: RubricType,
        subject: &str,
    ) -> String {
        format!("{}|{}|{}|{}", course, delivery.code(), rubric_type, subject)
    }
}
