//! Free-text location lookup.
//!
//! A reply like "CDMX", "Bogotá" or "vivo en Lima" is normalized and matched
//! against an ordered catalog: an exact pass over labels and aliases first,
//! then a substring pass. The first hit in catalog order wins.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::CatalogError;
use crate::types::Language;

mod catalog;
use catalog::{BUILTIN_LOCATIONS, QUICK_CODES};

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::new(
        BUILTIN_LOCATIONS
            .iter()
            .map(|(tz, label, label_en, country, country_en, aliases)| LocationEntry {
                timezone: tz.to_string(),
                label: label.to_string(),
                label_en: label_en.to_string(),
                country: country.to_string(),
                country_en: country_en.to_string(),
                aliases: aliases.iter().map(|a| a.to_string()).collect(),
            })
            .collect(),
    )
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub timezone: String,
    pub label: String,
    pub label_en: String,
    pub country: String,
    pub country_en: String,
    pub aliases: Vec<String>,
}

impl LocationEntry {
    pub fn display_name(&self, lang: Language) -> &str {
        match lang {
            Language::Es => &self.label,
            Language::En => &self.label_en,
        }
    }

    pub fn country_name(&self, lang: Language) -> &str {
        match lang {
            Language::Es => &self.country,
            Language::En => &self.country_en,
        }
    }
}

/// CSV shape for a catalog override; aliases are `;`-separated.
#[derive(Debug, Deserialize)]
struct CatalogCsvRow {
    timezone: String,
    label: String,
    label_en: String,
    country: String,
    country_en: String,
    #[serde(default)]
    aliases: String,
}

struct IndexedEntry {
    entry: LocationEntry,
    label: String,
    label_en: String,
    aliases: Vec<String>,
}

impl IndexedEntry {
    fn new(entry: LocationEntry) -> Self {
        Self {
            label: normalize(&entry.label),
            label_en: normalize(&entry.label_en),
            aliases: entry.aliases.iter().map(|a| normalize(a)).collect(),
            entry,
        }
    }

    fn matches_exactly(&self, input: &str) -> bool {
        self.label == input || self.label_en == input || self.aliases.iter().any(|a| a == input)
    }

    fn overlaps(&self, input: &str) -> bool {
        [&self.label, &self.label_en]
            .into_iter()
            .chain(self.aliases.iter())
            .filter(|key| !key.is_empty())
            .any(|key| key.contains(input) || input.contains(key.as_str()))
    }
}

/// Immutable, ordered location table.
pub struct Catalog {
    entries: Vec<IndexedEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<LocationEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(IndexedEntry::new).collect(),
        }
    }

    /// The compiled-in catalog, built on first use and shared for the life of the process.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn from_csv(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
        let mut rdr = csv::Reader::from_path(path)?;
        let mut entries = Vec::new();

        for result in rdr.deserialize() {
            let row: CatalogCsvRow = result?;
            entries.push(LocationEntry {
                timezone: row.timezone,
                label: row.label,
                label_en: row.label_en,
                country: row.country,
                country_en: row.country_en,
                aliases: row
                    .aliases
                    .split(';')
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .map(String::from)
                    .collect(),
            });
        }

        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Catalog::new(entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &LocationEntry> {
        self.entries.iter().map(|e| &e.entry)
    }

    /// Resolves free text to a catalog entry: exact pass, then substring pass.
    pub fn resolve(&self, input: &str) -> Option<&LocationEntry> {
        let normalized = normalize(input);
        if normalized.chars().count() < 2 {
            return None;
        }

        self.entries
            .iter()
            .find(|e| e.matches_exactly(&normalized))
            .or_else(|| self.entries.iter().find(|e| e.overlaps(&normalized)))
            .map(|e| &e.entry)
    }

    /// Maps a single-digit reply ("1".."4") to its fixed location.
    pub fn quick_pick(&self, code: &str) -> Option<&LocationEntry> {
        let (_, label) = QUICK_CODES.iter().find(|(c, _)| *c == code.trim())?;
        self.entries().find(|e| e.label == *label)
    }

    /// Quick code first, free-text resolution otherwise.
    pub fn lookup(&self, input: &str) -> Option<&LocationEntry> {
        self.quick_pick(input).or_else(|| self.resolve(input))
    }
}

/// Lowercases, strips diacritics and keeps only `[a-z0-9]` and whitespace.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}
