//! Class-name and file-name derivation for exported widgets.

use once_cell::sync::Lazy;
use regex::Regex;

/// Stem used when the source name yields no usable words.
pub const FALLBACK_STEM: &str = "GeneratedNode";
const WIDGET_SUFFIX: &str = "Widget";
const DART_EXTENSION: &str = ".dart";

static NON_ALNUM_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]+").unwrap());
static CAMEL_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());
static SEPARATOR_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").unwrap());

/// Derive a Dart class name from a design-node name: non-alphanumeric runs
/// become word breaks, each word is capitalized, and the `Widget` suffix is
/// appended. Unusable names fall back to `GeneratedNodeWidget`.
pub fn class_name(raw: Option<&str>) -> String {
    let cleaned = NON_ALNUM_RUN.replace_all(raw.unwrap_or(FALLBACK_STEM), " ");
    let stem: String = cleaned.split_whitespace().map(capitalize_first).collect();
    let stem = if stem.is_empty() { FALLBACK_STEM.to_owned() } else { stem };
    format!("{stem}{WIDGET_SUFFIX}")
}

/// Snake-cased class name plus the Dart extension.
pub fn file_name(class_name: &str) -> String {
    let snake = CAMEL_BOUNDARY.replace_all(class_name, "${1}_${2}");
    let snake = SEPARATOR_RUN.replace_all(&snake, "_");
    format!("{}{DART_EXTENSION}", snake.to_lowercase())
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

// ------------------------------- Tests ------------------------------------ //
