//! Text normalization utilities for names, codes and course initials

use std::collections::HashSet;
use std::sync::OnceLock;

/// Spanish function words skipped when deriving course initials
static STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

fn get_stop_words() -> &'static HashSet<&'static str> {
    STOP_WORDS.get_or_init(|| {
        [
            "a", "al", "con", "de", "del", "e", "el", "en", "la", "las", "los", "o", "para",
            "por", "u", "un", "una", "y",
        ]
        .iter()
        .copied()
        .collect()
    })
}

/// Fold accented Spanish characters to their ASCII equivalents
pub fn fold_accents(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            'Á' | 'À' | 'Ä' | 'Â' => 'A',
            'É' | 'È' | 'Ë' | 'Ê' => 'E',
            'Í' | 'Ì' | 'Ï' | 'Î' => 'I',
            'Ó' | 'Ò' | 'Ö' | 'Ô' => 'O',
            'Ú' | 'Ù' | 'Ü' | 'Û' => 'U',
            'Ñ' => 'N',
            _ => c,
        })
        .collect()
}

/// Normalize a name for comparison: fold accents, case-fold, collapse whitespace
pub fn normalize_name(name: &str) -> String {
    fold_accents(name)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derive course initials by acronym rules: drop function words, take the
/// first letter of each significant word, uppercase ASCII.
///
/// Falls back to the first letter of the first word when every word is a
/// function word.
pub fn course_initials(course_name: &str) -> String {
    let folded = fold_accents(course_name);
    let stop_words = get_stop_words();

    let initials: String = folded
        .split_whitespace()
        .filter(|word| !stop_words.contains(word.to_lowercase().as_str()))
        .filter_map(|word| word.chars().find(|c| c.is_ascii_alphabetic()))
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if initials.is_empty() {
        folded
            .split_whitespace()
            .filter_map(|word| word.chars().find(|c| c.is_ascii_alphabetic()))
            .map(|c| c.to_ascii_uppercase())
            .take(1)
            .collect()
    } else {
        initials
    }
}
