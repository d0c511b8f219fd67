//! Slug derivation and validation.
//!
//! # Responsibility
//! - Derive a URL-safe slug from a note title (Cyrillic is transliterated).
//! - Validate slug format and system-wide uniqueness before persistence.
//!
//! # Invariants
//! - `derive_slug` is a pure function of the title.
//! - Derived slugs only contain `[a-z0-9_-]`, never start or end with `-`, and
//!   are at most `SLUG_MAX_CHARS` characters long.
//! - Uniqueness here is a pre-check; storage enforces it with `UNIQUE(slug)`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum slug length, counted in characters.
pub const SLUG_MAX_CHARS: usize = 100;

/// Suffix appended to a duplicate slug in the user-facing error.
pub const SLUG_WARNING: &str = " - такой slug уже существует, введите уникальное значение.";

const FALLBACK_SLUG: &str = "note";
const INVALID_SLUG_MESSAGE: &str =
    "Значение должно состоять только из латинских букв, цифр, знаков подчеркивания или дефиса.";

static SEPARATOR_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9_]+").expect("valid separator regex"));
static SLUG_FORMAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("valid slug format regex"));

/// Slug policy failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// Candidate is already used by another note.
    Duplicate(String),
    /// Candidate does not match the slug format; carries the message.
    Invalid(String),
}

impl Display for SlugError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicate(slug) => write!(f, "{slug}{SLUG_WARNING}"),
            Self::Invalid(message) => write!(f, "{message}"),
        }
    }
}

impl Error for SlugError {}

/// Derives a slug from `title`.
///
/// Lowercases, replaces `&` with `and`, transliterates Russian and Ukrainian
/// letters, and collapses every other run of non-alphanumeric characters into
/// one `-`. May return an empty string for titles without usable letters.
pub fn derive_slug(title: &str) -> String {
    let lowered = title
        .to_lowercase()
        .replace("&amp;", " and ")
        .replace('&', " and ");

    let mut latin = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        match transliterate(ch) {
            Some(replacement) => latin.push_str(replacement),
            None => latin.push(ch),
        }
    }

    let collapsed = SEPARATOR_RUN_RE.replace_all(&latin, "-");
    let truncated: String = collapsed
        .trim_matches('-')
        .chars()
        .take(SLUG_MAX_CHARS)
        .collect();
    truncated.trim_end_matches('-').to_string()
}

/// Picks the slug to persist: the supplied one when non-blank, otherwise one
/// derived from `title`.
pub fn resolve_slug(title: &str, supplied: &str) -> String {
    let supplied = supplied.trim();
    if !supplied.is_empty() {
        return supplied.to_string();
    }

    let derived = derive_slug(title);
    if derived.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        derived
    }
}

/// Checks that `candidate` is not present in `existing`.
pub fn validate_unique(candidate: &str, existing: &BTreeSet<String>) -> Result<(), SlugError> {
    if existing.contains(candidate) {
        return Err(SlugError::Duplicate(candidate.to_string()));
    }
    Ok(())
}

/// Checks slug length and alphabet.
pub fn validate_format(candidate: &str) -> Result<(), SlugError> {
    let length = candidate.chars().count();
    if length > SLUG_MAX_CHARS {
        return Err(SlugError::Invalid(format!(
            "Убедитесь, что это значение содержит не более {SLUG_MAX_CHARS} символов (сейчас {length})."
        )));
    }
    if !SLUG_FORMAT_RE.is_match(candidate) {
        return Err(SlugError::Invalid(INVALID_SLUG_MESSAGE.to_string()));
    }
    Ok(())
}

// Expects lowercase input. Hard and soft signs are dropped.
fn transliterate(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "yi",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'є' => "ye",
        'і' => "i",
        'ї' => "yi",
        'ґ' => "g",
        _ => return None,
    };
    Some(latin)
}

#[cfg(test)]
mod tests {
    use super::{
        derive_slug, resolve_slug, validate_format, validate_unique, SlugError, SLUG_MAX_CHARS,
    };
    use std::collections::BTreeSet;

    #[test]
    fn derive_transliterates_cyrillic_title() {
        assert_eq!(derive_slug("Новый заголовок"), "novyij-zagolovok");
        assert_eq!(derive_slug("Щука и ёж"), "schuka-i-yozh");
        assert_eq!(derive_slug("Подъезд, объявление"), "podezd-obyavlenie");
    }

    #[test]
    fn derive_collapses_separators_and_trims_edges() {
        assert_eq!(derive_slug("  Hello,   World!!  "), "hello-world");
        assert_eq!(derive_slug("--a---b--"), "a-b");
        assert_eq!(derive_slug("Tom & Jerry"), "tom-and-jerry");
        assert_eq!(derive_slug("snake_case 42"), "snake_case-42");
    }

    #[test]
    fn derive_is_deterministic_and_bounded() {
        let title = "Очень длинный заголовок ".repeat(20);
        let first = derive_slug(&title);
        assert_eq!(first, derive_slug(&title));
        assert!(first.chars().count() <= SLUG_MAX_CHARS);
        assert!(!first.ends_with('-'));
        assert!(validate_format(&first).is_ok());
    }

    #[test]
    fn derive_may_be_empty_and_resolve_falls_back() {
        assert_eq!(derive_slug("!!! ???"), "");
        assert_eq!(resolve_slug("!!! ???", ""), "note");
    }

    #[test]
    fn resolve_prefers_supplied_slug() {
        assert_eq!(resolve_slug("Новый заголовок", " new-slug "), "new-slug");
        assert_eq!(resolve_slug("Новый заголовок", "   "), "novyij-zagolovok");
    }

    #[test]
    fn fresh_derived_slug_never_collides_with_empty_set() {
        for title in ["Заголовок", "Title", "", "¿¡"] {
            assert!(validate_unique(&derive_slug(title), &BTreeSet::new()).is_ok());
        }
    }

    #[test]
    fn duplicate_error_carries_exact_message() {
        let existing = BTreeSet::from(["note-slug".to_string()]);
        let err = validate_unique("note-slug", &existing).unwrap_err();
        assert_eq!(err, SlugError::Duplicate("note-slug".to_string()));
        assert_eq!(
            err.to_string(),
            "note-slug - такой slug уже существует, введите уникальное значение."
        );
        assert!(validate_unique("other", &existing).is_ok());
    }

    #[test]
    fn format_rejects_foreign_characters_and_overlong_values() {
        assert!(validate_format("Valid_slug-1").is_ok());
        assert!(matches!(
            validate_format("с пробелом"),
            Err(SlugError::Invalid(_))
        ));
        assert!(matches!(validate_format(""), Err(SlugError::Invalid(_))));

        let err = validate_format(&"a".repeat(SLUG_MAX_CHARS + 1)).unwrap_err();
        assert!(err.to_string().contains("(сейчас 101)"));
    }
}
