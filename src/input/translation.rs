//! Translation tables produced from source files.

use std::collections::BTreeMap;

use serde::Serialize;

/// Translation key to text, for exactly one locale.
///
/// Tables are only built by the parsers and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TranslationTable {
    entries: BTreeMap<String, String>,
}

impl TranslationTable {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Later duplicates overwrite earlier entries.
impl FromIterator<(String, String)> for TranslationTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut entries = BTreeMap::new();
        for (key, value) in iter {
            entries.insert(key, value);
        }
        Self { entries }
    }
}

/// Locale code to translation table, for every declared locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TranslationSet {
    tables: BTreeMap<String, TranslationTable>,
}

impl TranslationSet {
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&TranslationTable> {
        self.tables.get(code)
    }

    /// Looks up `key` in the table of `code`.
    #[must_use]
    pub fn lookup(&self, code: &str, key: &str) -> Option<&str> {
        self.get(code).and_then(|table| table.get(key))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TranslationTable)> {
        self.tables.iter().map(|(code, table)| (code.as_str(), table))
    }

    /// Keys present in `reference` but missing from the table of `code`.
    #[must_use]
    pub fn missing_keys(&self, code: &str, reference: &str) -> Vec<&str> {
        let Some(reference) = self.get(reference) else {
            return Vec::new();
        };
        let target = self.get(code);
        reference.keys().filter(|key| !target.is_some_and(|t| t.contains_key(key))).collect()
    }
}

impl FromIterator<(String, TranslationTable)> for TranslationSet {
    fn from_iter<I: IntoIterator<Item = (String, TranslationTable)>>(iter: I) -> Self {
        Self { tables: iter.into_iter().collect() }
    }
}
