//! Rubric code generation and version-suffix parsing
//!
//! Codes have the shape `R{G|I}{E1|E2|EF}-{INITIALS}V{n}`, e.g. `RGE1-EPMV2`.
//! The base code (trailing version suffix stripped) identifies a version
//! family. Older stores used a `-{n}` suffix instead of `V{n}`; both are
//! understood when reading.

use regex::Regex;
use std::sync::OnceLock;

use crate::model::{Delivery, RubricType};

static VERSION_SUFFIX: OnceLock<Regex> = OnceLock::new();

fn version_suffix_re() -> &'static Regex {
    VERSION_SUFFIX.get_or_init(|| Regex::new(r"(?:V|-)(\d+)$").expect("static regex"))
}

/// A generated code together with its version number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub code: String,
    pub version: u32,
}

/// Base code for a (type, delivery, course initials) triple
pub fn base_code(rubric_type: RubricType, delivery: Delivery, initials: &str) -> String {
    format!("R{}{}-{}", rubric_type.code_letter(), delivery.code(), initials)
}

/// Generate the next code for a rubric: base code plus `V{n}` where `n` is
/// one above the highest version among existing codes sharing the base code
/// prefix, or 1 when none exist. Pure over the provided snapshot.
pub fn generate<'a>(
    rubric_type: RubricType,
    delivery: Delivery,
    initials: &str,
    existing_codes: impl IntoIterator<Item = &'a str>,
) -> Generated {
    let base = base_code(rubric_type, delivery, initials);
    let version = next_version(&base, existing_codes);
    Generated {
        code: format!("{}V{}", base, version),
        version,
    }
}

/// Next free version for a base code over a snapshot of existing codes
pub fn next_version<'a>(base: &str, existing_codes: impl IntoIterator<Item = &'a str>) -> u32 {
    existing_codes
        .into_iter()
        .filter(|code| code.starts_with(base))
        .filter_map(version_of)
        .max()
        .unwrap_or(0)
        + 1
}

/// Base code of a full code: the trailing `V{n}` (or legacy `-{n}`) stripped
pub fn base_of(code: &str) -> &str {
    match version_suffix_re().find(code) {
        Some(m) => &code[..m.start()],
        None => code,
    }
}

/// Version number encoded in a code's trailing suffix, if any
pub fn version_of(code: &str) -> Option<u32> {
    version_suffix_re()
        .captures(code)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Whether `code` belongs to the version family of `base`: the base itself,
/// a `V{n}` sibling, or a legacy `-{n}` sibling.
pub fn in_family(code: &str, base: &str) -> bool {
    code == base
        || (code.starts_with(base)
            && code[base.len()..].starts_with('V')
            && version_of(code).is_some())
        || (code.starts_with(base)
            && code[base.len()..].starts_with('-')
            && version_of(code).is_some())
}
