use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Delivery, RubricType};

/// A Canvas grade export attached to a course, kept as raw text so the
/// file can be re-rendered after score edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasAttachment {
    #[serde(rename = "nombreArchivo")]
    pub file_name: String,
    #[serde(rename = "contenido")]
    pub content: String,
}

/// Per-course settings record: display name, rubric associations per
/// (delivery, type) slot, active list filters and an optional attached
/// Canvas grade file. A mutable settings bag, not a strongly-invariant
/// domain entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseState {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Rubric id per `delivery|type` slot
    #[serde(rename = "rubricasAsociadas", default)]
    pub rubric_slots: BTreeMap<String, String>,
    #[serde(rename = "filtrosActivos", default)]
    pub active_filters: BTreeMap<String, String>,
    #[serde(rename = "archivoCanvas", skip_serializing_if = "Option::is_none")]
    pub canvas_file: Option<CanvasAttachment>,
}

impl CourseState {
    pub fn new(code: &str) -> Self {
        CourseState {
            code: code.to_string(),
            ..Default::default()
        }
    }

    /// Name to derive rubric-code initials from: the display name when set,
    /// the course code otherwise.
    pub fn initials_source(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.code)
    }

    pub fn slot_key(delivery: Delivery, rubric_type: RubricType) -> String {
        format!("{}|{}", delivery.code(), rubric_type)
    }

    pub fn rubric_for(&self, delivery: Delivery, rubric_type: RubricType) -> Option<&str> {
        self.rubric_slots
            .get(&Self::slot_key(delivery, rubric_type))
            .map(String::as_str)
    }

    pub fn set_rubric(&mut self, delivery: Delivery, rubric_type: RubricType, rubric_id: &str) {
        self.rubric_slots
            .insert(Self::slot_key(delivery, rubric_type), rubric_id.to_string());
    }
}
