use std::collections::HashMap;

use anyhow::{anyhow, Result};

/// Metadata keys understood when adding or editing a task.
pub const TASK_KEYS: [&str; 3] = ["description", "priority", "category"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub title: String,
    pub metadata: HashMap<String, String>,
}

/// Splits words into a title and `key:value` pairs.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut title_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() && !key.contains(char::is_whitespace) {
                metadata.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        title_parts.push(arg.as_str());
    }

    ParsedInput {
        title: title_parts.join(" ").trim().to_string(),
        metadata,
    }
}

/// Splits one typed line into words for `parse_args`. Words following a
/// `key:value` word are appended to its value until the next key, so
/// `desc:ask about Sunday` keeps the whole phrase.
pub fn split_line(line: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut in_value = false;
    for word in line.split_whitespace() {
        let is_key = word.split_once(':').is_some_and(|(key, _)| !key.is_empty());
        match words.last_mut() {
            Some(last) if in_value && !is_key => {
                last.push(' ');
                last.push_str(word);
            }
            _ => {
                words.push(word.to_string());
                in_value = is_key;
            }
        }
    }
    words
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Expands every metadata key against `candidates`. Keys that do not
/// resolve are returned as warnings instead of failing the whole input.
pub fn normalize_metadata(
    metadata: HashMap<String, String>,
    candidates: &[&str],
) -> (HashMap<String, String>, Vec<String>) {
    let mut normalized = HashMap::new();
    let mut warnings = Vec::new();
    for (key, value) in metadata {
        match expand_key(&key, candidates) {
            Ok(full_key) => {
                normalized.insert(full_key, value);
            }
            Err(e) => warnings.push(e.to_string()),
        }
    }
    (normalized, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_line_keeps_multi_word_values() {
        let words = split_line("Call mom desc:ask about Sunday pri:high");
        assert_eq!(words, vec!["Call", "mom", "desc:ask about Sunday", "pri:high"]);

        let parsed = parse_args(&words);
        assert_eq!(parsed.title, "Call mom");
        assert_eq!(parsed.metadata.get("desc").map(String::as_str), Some("ask about Sunday"));
    }

    #[test]
    fn test_parse_simple() {
        let args = vec![
            "Buy".to_string(),
            "milk".to_string(),
            "pri:low".to_string(),
            "category:Shopping".to_string(),
        ];
        let parsed = parse_args(&args);
        assert_eq!(parsed.title, "Buy milk");
        assert_eq!(parsed.metadata.get("pri"), Some(&"low".to_string()));
        assert_eq!(parsed.metadata.get("category"), Some(&"Shopping".to_string()));
    }

    #[test]
    fn test_parse_keeps_leading_colon_words() {
        let args = vec![":)".to_string(), "Smile".to_string()];
        let parsed = parse_args(&args);
        assert_eq!(parsed.title, ":) Smile");
        assert!(parsed.metadata.is_empty());
    }

    #[test]
    fn test_quoted_value_with_spaces() {
        let args = vec!["Call".to_string(), "description:ask about Sunday".to_string()];
        let parsed = parse_args(&args);
        assert_eq!(parsed.title, "Call");
        assert_eq!(parsed.metadata.get("description"), Some(&"ask about Sunday".to_string()));
    }

    #[test]
    fn test_expand_key() {
        let candidates = TASK_KEYS;

        assert_eq!(expand_key("d", &candidates).unwrap(), "description");
        assert_eq!(expand_key("desc", &candidates).unwrap(), "description");
        assert_eq!(expand_key("p", &candidates).unwrap(), "priority");
        assert_eq!(expand_key("c", &candidates).unwrap(), "category");
        assert_eq!(expand_key("category", &candidates).unwrap(), "category");

        // Unknown
        assert!(expand_key("due", &candidates).is_err());
        assert!(expand_key("x", &candidates).is_err());

        // Ambiguous
        assert!(expand_key("c", &["category", "color"]).is_err());
    }

    #[test]
    fn test_normalize_metadata() {
        let mut metadata = HashMap::new();
        metadata.insert("pri".to_string(), "h".to_string());
        metadata.insert("due".to_string(), "tomorrow".to_string());

        let (normalized, warnings) = normalize_metadata(metadata, &TASK_KEYS);
        assert_eq!(normalized.get("priority"), Some(&"h".to_string()));
        assert_eq!(normalized.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("due"));
    }
}
