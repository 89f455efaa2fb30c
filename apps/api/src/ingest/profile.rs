//! Name and contact heuristics over the top of a résumé.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap()
});

static FILENAME_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)_resume|_cv|-resume|-cv|resume|cv").unwrap());

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[_-]+").unwrap());

/// Lines containing any of these are headings, not names.
const SECTION_KEYWORDS: &[&str] = &[
    "resume",
    "curriculum vitae",
    "cv",
    "profile",
    "objective",
    "summary",
    "experience",
    "education",
    "skills",
    "contact",
];

const CONTACT_SCAN_LINES: usize = 15;
const NAME_SCAN_LINES: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: Option<String>,
    /// E-mail if one was found, otherwise a phone number.
    pub contact: Option<String>,
}

pub fn extract_profile(text: &str) -> Profile {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let email = first_match(&EMAIL, &lines);
    let phone = first_match(&PHONE, &lines).map(|p| p.trim().to_string());

    Profile {
        name: lines
            .iter()
            .take(NAME_SCAN_LINES)
            .find(|line| looks_like_name(line))
            .map(|line| line.to_string()),
        contact: email.or(phone),
    }
}

fn first_match(pattern: &Regex, lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .take(CONTACT_SCAN_LINES)
        .find_map(|line| pattern.find(line))
        .map(|m| m.as_str().to_string())
}

fn looks_like_name(line: &str) -> bool {
    let lower = line.to_lowercase();
    if SECTION_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return false;
    }
    if EMAIL.is_match(line) || PHONE.is_match(line) {
        return false;
    }

    let words = line.split_whitespace().count();
    let chars = line.chars().count();
    if !(1..=4).contains(&words) || !(3..=50).contains(&chars) {
        return false;
    }

    let letters = line
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .count();
    letters as f64 / chars as f64 > 0.8
}

/// Best-effort display name from an upload's file name, e.g.
/// `John_Doe_Resume.pdf` → `John Doe`. Falls back to the file name itself.
pub fn name_from_filename(filename: &str) -> String {
    let stem = filename.rsplit_once('.').map_or(filename, |(stem, _)| stem);
    let stem = FILENAME_NOISE.replace_all(stem, "");
    let stem = SEPARATORS.replace_all(&stem, " ");

    let name = stem
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() {
        filename.to_string()
    } else {
        name
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
