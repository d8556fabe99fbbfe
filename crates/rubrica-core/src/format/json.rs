//! Structured JSON interchange format
//!
//! Mirrors the text format with snake_case keys: `rubrica_id`, `nombre`,
//! `curso`, `tipo`, `entrega`, `puntuacion_total`, `criterios[]`,
//! `escala_calificacion[]`. Imports always produce a fresh draft.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RubricaError};
use crate::model::{Criterion, GradeBand, Level, Rubric};

#[derive(Debug, Serialize, Deserialize)]
struct RubricDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    rubrica_id: Option<String>,
    nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    curso: Option<String>,
    tipo: String,
    entrega: String,
    puntuacion_total: f64,
    #[serde(default)]
    criterios: Vec<CriterionDoc>,
    #[serde(default)]
    escala_calificacion: Vec<BandDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CriterionDoc {
    titulo: String,
    peso: f64,
    #[serde(default)]
    niveles: Vec<LevelDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LevelDoc {
    puntuacion_minima: f64,
    puntuacion_maxima: f64,
    titulo: String,
    #[serde(default)]
    descripcion: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct BandDoc {
    porcentaje_minimo: f64,
    porcentaje_maximo: f64,
    etiqueta: String,
}

/// Parse the JSON format into a fresh draft rubric
pub fn parse(content: &str) -> Result<Rubric> {
    let doc: RubricDoc = serde_json::from_str(content)
        .map_err(|e| RubricaError::import(format!("malformed JSON: {}", e)))?;

    let rubric_type = doc
        .tipo
        .parse()
        .map_err(|_| RubricaError::import(format!("unknown tipo: {}", doc.tipo)))?;
    let delivery = doc
        .entrega
        .parse()
        .map_err(|_| RubricaError::import(format!("unknown entrega: {}", doc.entrega)))?;

    let mut rubric = Rubric::new(
        &doc.nombre,
        rubric_type,
        delivery,
        doc.curso.as_deref().unwrap_or(""),
    );
    rubric.total_points = doc.puntuacion_total;
    rubric.criteria = doc
        .criterios
        .into_iter()
        .map(|c| Criterion {
            title: c.titulo,
            weight: c.peso,
            levels: c
                .niveles
                .into_iter()
                .map(|l| Level {
                    min_points: l.puntuacion_minima,
                    max_points: l.puntuacion_maxima,
                    title: l.titulo,
                    description: l.descripcion,
                })
                .collect(),
        })
        .collect();
    rubric.grading_scale = doc
        .escala_calificacion
        .into_iter()
        .map(|b| GradeBand {
            min_percent: b.porcentaje_minimo,
            max_percent: b.porcentaje_maximo,
            label: b.etiqueta,
        })
        .collect();
    Ok(rubric)
}

/// Render a rubric in the JSON format
pub fn export(rubric: &Rubric) -> Result<String> {
    let doc = RubricDoc {
        rubrica_id: rubric.code.clone().or_else(|| Some(rubric.id.clone())),
        nombre: rubric.name.clone(),
        curso: rubric.courses.iter().next().cloned(),
        tipo: rubric.rubric_type.to_string(),
        entrega: rubric.delivery.to_string(),
        puntuacion_total: rubric.total_points,
        criterios: rubric
            .criteria
            .iter()
            .map(|c| CriterionDoc {
                titulo: c.title.clone(),
                peso: c.weight,
                niveles: c
                    .levels
                    .iter()
                    .map(|l| LevelDoc {
                        puntuacion_minima: l.min_points,
                        puntuacion_maxima: l.max_points,
                        titulo: l.title.clone(),
                        descripcion: l.description.clone(),
                    })
                    .collect(),
            })
            .collect(),
        escala_calificacion: rubric
            .grading_scale
            .iter()
            .map(|b| BandDoc {
                porcentaje_minimo: b.min_percent,
                porcentaje_maximo: b.max_percent,
                etiqueta: b.label.clone(),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}
