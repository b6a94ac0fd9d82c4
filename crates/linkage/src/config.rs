use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::abbreviations::Abbreviations;
use crate::error::LinkError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LinkConfig {
    pub name: String,
    pub left: DatasetConfig,
    pub right: DatasetConfig,
    #[serde(default)]
    pub blocking: BlockingConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Abbreviation token -> expansion. Replaces the built-in table when present.
    #[serde(default)]
    pub abbreviations: Option<HashMap<String, String>>,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    pub file: String,
    pub columns: ColumnMapping,
    #[serde(default)]
    pub postal_format: PostalFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMapping {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal: String,
}

impl ColumnMapping {
    fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("id", self.id.as_str()),
            ("name", self.name.as_str()),
            ("address", self.address.as_str()),
            ("city", self.city.as_str()),
            ("state", self.state.as_str()),
            ("postal", self.postal.as_str()),
        ]
    }
}

/// How a dataset serializes its postal column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostalFormat {
    /// `"primary-secondary"` ranges: keep the part before the first `-`.
    Range,
    /// Numbers written with a spurious fraction (`"15201.0"`): keep the integer part.
    Decimal,
    /// Range truncation followed by decimal truncation.
    #[default]
    Auto,
    /// Leave the value untouched.
    Raw,
}

// ---------------------------------------------------------------------------
// Blocking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockingConfig {
    /// Region allow-list. `None` blocks every region present in the data;
    /// records outside an explicit list never become candidates.
    #[serde(default)]
    pub regions: Option<Vec<String>>,
    #[serde(default)]
    pub key: BlockKey,
}

/// Normalized field both sides must share exactly within a region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKey {
    #[default]
    Address,
    City,
    Name,
    Postal,
}

impl std::fmt::Display for BlockKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::City => write!(f, "city"),
            Self::Name => write!(f, "name"),
            Self::Postal => write!(f, "postal"),
        }
    }
}

// ---------------------------------------------------------------------------
// Scoring + Output
// ---------------------------------------------------------------------------

pub const DEFAULT_THRESHOLD: u8 = 80;

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// A pair is accepted only when its score is strictly greater.
    #[serde(default = "default_threshold")]
    pub threshold: u8,
}

fn default_threshold() -> u8 {
    DEFAULT_THRESHOLD
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub file: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl LinkConfig {
    pub fn from_toml(input: &str) -> Result<Self, LinkError> {
        let config: LinkConfig =
            toml::from_str(input).map_err(|e| LinkError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LinkError> {
        for (side, dataset) in [("left", &self.left), ("right", &self.right)] {
            for (field, column) in dataset.columns.entries() {
                if column.trim().is_empty() {
                    return Err(LinkError::ConfigValidation(format!(
                        "{side}.columns.{field} must not be empty"
                    )));
                }
            }
        }

        if self.scoring.threshold > 100 {
            return Err(LinkError::ConfigValidation(format!(
                "scoring.threshold must be between 0 and 100, got {}",
                self.scoring.threshold
            )));
        }

        if let Some(ref regions) = self.blocking.regions {
            if regions.is_empty() {
                return Err(LinkError::ConfigValidation(
                    "blocking.regions is empty; omit it to block every region".into(),
                ));
            }
            let mut seen = HashSet::new();
            for region in regions {
                if !seen.insert(region.as_str()) {
                    return Err(LinkError::ConfigValidation(format!(
                        "blocking.regions lists '{region}' more than once"
                    )));
                }
            }
        }

        self.abbreviation_table()?;
        Ok(())
    }

    /// The configured abbreviation table, or the built-in one.
    pub fn abbreviation_table(&self) -> Result<Abbreviations, LinkError> {
        match self.abbreviations {
            Some(ref table) => Abbreviations::from_pairs(
                table.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            ),
            None => Ok(Abbreviations::usps()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
