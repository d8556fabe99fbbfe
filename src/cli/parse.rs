//! Value parsers for clap arguments

use rubrica_core::model::{Delivery, RubricType};

pub fn parse_rubric_type(value: &str) -> Result<RubricType, String> {
    value.parse().map_err(|e| format!("{}", e))
}

pub fn parse_delivery(value: &str) -> Result<Delivery, String> {
    value.parse().map_err(|e| format!("{}", e))
}

/// Parse a `--points` specification: comma-separated `key=value` pairs where
/// the key is a 1-based criterion index or a criterion title.
pub fn parse_points(spec: &str) -> Result<Vec<(String, f64)>, String> {
    let mut pairs = Vec::new();
    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| format!("expected key=points, got {:?}", part))?;
        let points: f64 = value
            .trim()
            .parse()
            .map_err(|_| format!("invalid points value {:?}", value.trim()))?;
        pairs.push((key.trim().to_string(), points));
    }
    if pairs.is_empty() {
        return Err("no points given".to_string());
    }
    Ok(pairs)
}
