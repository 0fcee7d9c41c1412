//! Key-value extraction from page text
//!
//! Best-effort heuristic over free text. False positives and negatives are
//! expected; the only hard requirement is determinism (same text in, same
//! map out).

use indexmap::IndexMap;
use regex::Regex;

/// Field name to field value mapping for a page or document. Insertion
/// order is significant: it drives column order in the tables-free
/// fallback dataset.
pub type KeyValueMap = IndexMap<String, String>;

/// Extracts `label: value` and `Label Value` style pairs from page text.
pub struct KeyValueExtractor {
    /// Applied in order; a later pattern's match overwrites an earlier
    /// one's value for the same key.
    patterns: Vec<Regex>,
}

impl KeyValueExtractor {
    pub fn new() -> Self {
        Self {
            patterns: vec![
                // `label: value` lines
                Regex::new(r"([A-Za-z\s]+?):\s*([^\n]+)").unwrap(),
                // `Label Value` with no colon, value starting uppercase/digit
                Regex::new(r"([A-Za-z\s]+?)\s+([A-Z0-9][^\s]+)").unwrap(),
            ],
        }
    }

    /// Extract key-value pairs from one page of text.
    ///
    /// A pair is discarded when the trimmed key is empty, the trimmed value
    /// is empty, or the key is 50 characters or longer (a long "key" is
    /// almost always a captured paragraph, not a field name).
    pub fn extract(&self, page_text: &str) -> KeyValueMap {
        let mut data = KeyValueMap::new();

        for pattern in &self.patterns {
            for captures in pattern.captures_iter(page_text) {
                let key = captures[1].trim();
                let value = captures[2].trim();
                if !key.is_empty() && !value.is_empty() && key.chars().count() < 50 {
                    data.insert(key.to_string(), value.to_string());
                }
            }
        }

        data
    }
}

impl Default for KeyValueExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge `from` into `into` with last-write-wins on key collision. A
/// replaced key keeps its original position; new keys append.
pub fn merge_key_values(into: &mut KeyValueMap, from: KeyValueMap) {
    for (key, value) in from {
        into.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_colon_pairs() {
        let extractor = KeyValueExtractor::new();
        let data = extractor.extract("Invoice Number: INV-1042\nCustomer: Acme Corp\n");

        assert_eq!(data.get("Invoice Number"), Some(&"INV-1042".to_string()));
        assert_eq!(data.get("Customer"), Some(&"Acme Corp".to_string()));
    }

    #[test]
    fn test_extracts_adjacent_pairs_without_colon() {
        let extractor = KeyValueExtractor::new();
        let data = extractor.extract("Order A1234\n");

        assert_eq!(data.get("Order"), Some(&"A1234".to_string()));
    }

    #[test]
    fn test_discards_long_keys() {
        let extractor = KeyValueExtractor::new();
        let long_key = "a".repeat(60);
        let data = extractor.extract(&format!("{}: value\n", long_key));

        assert!(!data.contains_key(long_key.as_str()));
    }

    #[test]
    fn test_later_pattern_wins_on_same_key() {
        let extractor = KeyValueExtractor::new();
        // The colon pattern captures "Total: 15", the adjacent pattern then
        // re-captures the same key from "Total 9100".
        let data = extractor.extract("Total: 15\nTotal 9100\n");

        assert_eq!(data.get("Total"), Some(&"9100".to_string()));
    }

    #[test]
    fn test_deterministic() {
        let extractor = KeyValueExtractor::new();
        let text = "Name: Alice\nDate 20240101\nRef: X-9\n";

        assert_eq!(extractor.extract(text), extractor.extract(text));
    }

    #[test]
    fn test_merge_last_write_wins() {
        let mut base = KeyValueMap::new();
        base.insert("Name".to_string(), "Alice".to_string());
        base.insert("City".to_string(), "Oslo".to_string());

        let mut update = KeyValueMap::new();
        update.insert("City".to_string(), "Bergen".to_string());
        update.insert("Zip".to_string(), "5003".to_string());

        merge_key_values(&mut base, update);

        assert_eq!(base.get("City"), Some(&"Bergen".to_string()));
        let keys: Vec<&String> = base.keys().collect();
        assert_eq!(keys, vec!["Name", "City", "Zip"]);
    }
}
