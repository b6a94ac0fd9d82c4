//! Abbreviation table consumed by the normalizer.
//!
//! The built-in table covers USPS street suffixes, compass directions and the
//! ordinals first through tenth. Configs may replace it wholesale.

use std::collections::HashMap;

use crate::error::LinkError;
use crate::normalize::clean;

const USPS: &[(&str, &str)] = &[
    ("aly", "alley"),
    ("ave", "avenue"),
    ("blvd", "boulevard"),
    ("byp", "bypass"),
    ("cir", "circle"),
    ("ct", "court"),
    ("dr", "drive"),
    ("expy", "expressway"),
    ("hwy", "highway"),
    ("ln", "lane"),
    ("pkwy", "parkway"),
    ("pl", "place"),
    ("pt", "point"),
    ("rd", "road"),
    ("sq", "square"),
    ("st", "street"),
    ("ter", "terrace"),
    ("trl", "trail"),
    ("ste", "suite"),
    ("e", "east"),
    ("w", "west"),
    ("s", "south"),
    ("n", "north"),
    ("bldg", "building"),
    ("mlk", "martin luther king"),
    ("jfk", "john f kennedy"),
    ("1st", "first"),
    ("2nd", "second"),
    ("3rd", "third"),
    ("4th", "fourth"),
    ("5th", "fifth"),
    ("6th", "sixth"),
    ("7th", "seventh"),
    ("8th", "eighth"),
    ("9th", "ninth"),
    ("10th", "tenth"),
];

/// Whole-token abbreviation -> expansion mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abbreviations {
    table: HashMap<String, String>,
}

impl Abbreviations {
    pub fn usps() -> Self {
        Self {
            table: USPS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Build a table, rejecting entries that would make normalization
    /// non-idempotent: keys must be one normalized token, expansions must
    /// already be normalized, and no expansion may contain a key as a token.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, LinkError> {
        let table: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        for (key, expansion) in &table {
            if key.is_empty() || key.chars().any(char::is_whitespace) || clean(key) != *key {
                return Err(LinkError::ConfigValidation(format!(
                    "abbreviation '{key}' must be a single lower-case token without punctuation"
                )));
            }
            if clean(expansion) != *expansion {
                return Err(LinkError::ConfigValidation(format!(
                    "expansion '{expansion}' for '{key}' must be lower-case without punctuation"
                )));
            }
            if let Some(token) = expansion
                .split_whitespace()
                .find(|t| table.contains_key(*t))
            {
                return Err(LinkError::ConfigValidation(format!(
                    "expansion '{expansion}' for '{key}' contains abbreviation '{token}'"
                )));
            }
        }

        Ok(Self { table })
    }

    pub fn expand(&self, token: &str) -> Option<&str> {
        self.table.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for Abbreviations {
    fn default() -> Self {
        Self::usps()
    }
}
