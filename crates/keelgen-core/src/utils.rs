//! String transformation utilities for code generation

// External imports (alphabetized)
use once_cell::sync::Lazy;
use regex::Regex;

static TYPOGRAPHIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{2018}\x{2019}\x{201C}\x{201D}\x{2013}\x{2014}]").expect("valid regex"));
static TRAILING_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+$").expect("valid regex"));

/// Keywords that cannot be used as plain identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that are not allowed even as raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "Self", "super", "_"];

/// Split an identifier-ish string into words.
///
/// Boundaries are separators, lower-to-upper transitions, digit-to-upper
/// transitions and the end of an acronym (`APIError` -> `API`, `Error`).
fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if ch.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    }
}

/// Convert a string to snake_case
pub fn to_snake_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Convert a string to UpperCamelCase (PascalCase)
pub fn to_upper_camel_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert a string to lowerCamelCase
pub fn to_lower_camel_case(s: &str) -> String {
    let upper_camel = to_upper_camel_case(s);
    let mut chars = upper_camel.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Convert a string to SCREAMING_SNAKE_CASE
pub fn to_screaming_snake_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}

/// Make `name` usable as an identifier, escaping keywords.
pub fn escape_ident(name: &str) -> String {
    let name = if name.is_empty() { "_" } else { name };
    if NON_RAW_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else if KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name.to_string()
    }
}

/// A snake_case identifier for a field, function or module.
pub fn to_value_ident(name: &str) -> String {
    escape_ident(&to_snake_case(name))
}

/// An UpperCamelCase identifier for a type or variant.
pub fn to_type_ident(name: &str) -> String {
    let camel = to_upper_camel_case(name);
    if camel.is_empty() {
        "Unnamed".to_string()
    } else if camel.starts_with(|c: char| c.is_ascii_digit()) {
        format!("V{camel}")
    } else if NON_RAW_KEYWORDS.contains(&camel.as_str()) {
        format!("{camel}_")
    } else {
        camel
    }
}

/// The identifier with any raw prefix removed.
pub fn unraw(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

/// Quote `s` as a Rust string literal.
pub fn string_literal(s: &str) -> String {
    format!("{s:?}")
}

/// Normalize free text from the document into doc comment lines.
///
/// Typographic quotes and dashes become ASCII, trailing whitespace is dropped,
/// and leading or trailing blank lines are removed.
pub fn doc_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text
        .lines()
        .map(|line| {
            let line = TYPOGRAPHIC.replace_all(line, |caps: &regex::Captures| {
                match &caps[0] {
                    "\u{2018}" | "\u{2019}" => "'",
                    "\u{201C}" | "\u{201D}" => "\"",
                    _ => "-",
                }
            });
            TRAILING_WS.replace_all(&line.replace('\t', "    "), "").into_owned()
        })
        .collect();
    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}
