use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BARE_NUMBER: Regex = Regex::new(r"^\d+\.?$").unwrap();
    static ref LETTER_MARKER: Regex = Regex::new(r"^[a-zA-Z]\.$").unwrap();
    static ref LOWER_UPPER: Regex = Regex::new(r"([a-z])([A-Z])").unwrap();
    static ref ACRONYM_WORD: Regex = Regex::new(r"([A-Z]+)([A-Z][a-z])").unwrap();
    static ref DIGIT_LETTER: Regex = Regex::new(r"([0-9])([A-Za-z])").unwrap();
    static ref LETTER_DIGIT: Regex = Regex::new(r"([A-Za-z])([0-9])").unwrap();
    static ref SPACES: Regex = Regex::new(r" +").unwrap();
}

/// Separator a free-text field is split on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Sentences, as in the `involvement` field.
    Period,
    /// Lines, as in the `points` field.
    Newline,
}

impl Delimiter {
    fn as_char(self) -> char {
        match self {
            Delimiter::Period => '.',
            Delimiter::Newline => '\n',
        }
    }
}

/// Upper-cases the first character, leaving the rest untouched.
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Trims and capitalizes unless the text already starts upper-case.
pub fn capitalize_sentence(sentence: &str) -> String {
    let trimmed = sentence.trim();
    match trimmed.chars().next() {
        Some(c) if c.is_uppercase() => trimmed.to_string(),
        _ => capitalize_first(trimmed),
    }
}

/// Leftovers of splitting on abbreviations or numbered markers.
fn is_split_artifact(fragment: &str) -> bool {
    fragment.chars().count() < 2
        || fragment.chars().all(|c| c.is_ascii_punctuation())
        || BARE_NUMBER.is_match(fragment)
        || LETTER_MARKER.is_match(fragment)
}

/// Cleaned, capitalized list items out of one delimiter-joined field.
pub fn format_list(text: Option<&str>, delimiter: Delimiter) -> Vec<String> {
    let Some(text) = text else {
        return Vec::new();
    };
    text.split(delimiter.as_char())
        .map(str::trim)
        .filter(|fragment| !is_split_artifact(fragment))
        .map(capitalize_sentence)
        .collect()
}

/// Human label for a JSON key: `keyEvents_2024` becomes `Key events 2024`.
pub fn format_key(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let spaced = LOWER_UPPER.replace_all(&spaced, "$1 $2");
    let spaced = ACRONYM_WORD.replace_all(&spaced, "$1 $2");
    let spaced = DIGIT_LETTER.replace_all(&spaced, "$1 $2");
    let spaced = LETTER_DIGIT.replace_all(&spaced, "$1 $2");
    let lowered = spaced.to_lowercase();
    let collapsed = SPACES.replace_all(lowered.trim(), " ");

    let mut padded = format!(" {} ", capitalize_first(&collapsed));
    for (word, acronym) in [(" id ", " ID "), (" url ", " URL "), (" api ", " API ")] {
        while padded.contains(word) {
            padded = padded.replace(word, acronym);
        }
    }
    padded.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_list_drops_artifacts() {
        let items = format_list(Some("Sentence one. 2. Sentence two."), Delimiter::Period);
        assert_eq!(items, vec!["Sentence one", "Sentence two"]);
    }

    #[test]
    fn test_format_list_capitalizes() {
        let items = format_list(Some("the centre. states agreed. U.S. trade"), Delimiter::Period);
        assert_eq!(items, vec!["The centre", "States agreed", "Trade"]);
    }

    #[test]
    fn test_format_list_newlines() {
        let items = format_list(Some("first point\n\n1.\na.\n  --- \nsecond point"), Delimiter::Newline);
        assert_eq!(items, vec!["First point", "Second point"]);
        assert!(format_list(None, Delimiter::Newline).is_empty());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize_first("économie"), "Économie");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_sentence("  already Fine "), "Already Fine");
        assert_eq!(capitalize_sentence("NITI Aayog"), "NITI Aayog");
    }

    #[test]
    fn test_format_key() {
        assert_eq!(format_key("keyEvents"), "Key events");
        assert_eq!(format_key("historical_context"), "Historical context");
        assert_eq!(format_key("GDPGrowth"), "Gdp growth");
        assert_eq!(format_key("phase2Targets"), "Phase 2 targets");
        assert_eq!(format_key("source_url"), "Source URL");
        assert_eq!(format_key("user_id_and_api_key"), "User ID and API key");
        assert_eq!(format_key("__weird__ key"), "Weird key");
    }
}
