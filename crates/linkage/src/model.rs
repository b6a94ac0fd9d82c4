use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::BlockKey;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Which of the two directories a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// A single row as read from either dataset's CSV.
///
/// `id` is `business_id` on the left and `entity_id` on the right; `postal` is
/// `zip_code` / `postal_code`. Columns the mapping doesn't name land in `extra`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    pub side: Side,
    pub id: String,
    pub name: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal: String,
    pub extra: BTreeMap<String, String>,
}

/// Pre-loaded records for both sides.
pub struct LinkInput {
    pub left: Vec<SourceRecord>,
    pub right: Vec<SourceRecord>,
}

// ---------------------------------------------------------------------------
// Sanitize + normalize
// ---------------------------------------------------------------------------

/// A record after structural cleanup: single primary postal value, no extra columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedRecord {
    pub side: Side,
    pub id: String,
    pub name: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal: String,
}

#[derive(Debug)]
pub struct Sanitized {
    pub records: Vec<SanitizedRecord>,
    /// Rows whose id already appeared earlier in the dataset.
    pub duplicate_ids: usize,
    /// Distinct extra column names removed from the records.
    pub dropped_columns: Vec<String>,
}

/// Canonical view of a sanitized record: `name`, `address` and `city` normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub side: Side,
    pub id: String,
    pub name: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal: String,
}

impl NormalizedRecord {
    /// Value of the field used as the within-region join key.
    pub fn block_value(&self, key: BlockKey) -> &str {
        match key {
            BlockKey::Address => &self.address,
            BlockKey::City => &self.city,
            BlockKey::Name => self.name.as_deref().unwrap_or(""),
            BlockKey::Postal => &self.postal,
        }
    }
}

// ---------------------------------------------------------------------------
// Blocking + scoring
// ---------------------------------------------------------------------------

/// A left/right combination sharing region and join key.
#[derive(Debug, Clone, Copy)]
pub struct CandidatePair<'a> {
    pub region: &'a str,
    pub left: &'a NormalizedRecord,
    pub right: &'a NormalizedRecord,
}

#[derive(Debug)]
pub struct Blocked<'a> {
    pub pairs: Vec<CandidatePair<'a>>,
    pub regions: Vec<RegionBlock>,
    pub excluded_left: usize,
    pub excluded_right: usize,
}

/// Per-region join statistics, in blocking order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionBlock {
    pub region: String,
    pub left_records: usize,
    pub right_records: usize,
    pub candidates: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct ScoredPair<'a> {
    pub pair: CandidatePair<'a>,
    pub score: u8,
}

/// An accepted match. Created once by the threshold filter, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub business_id: String,
    pub entity_id: String,
    pub confidence_score: u8,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct RegionSummary {
    pub region: String,
    pub left_records: usize,
    pub right_records: usize,
    pub candidates: usize,
    pub accepted: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub records: usize,
    pub duplicate_ids: usize,
    pub excluded_by_region: usize,
    pub dropped_columns: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkSummary {
    pub left: DatasetSummary,
    pub right: DatasetSummary,
    pub candidate_pairs: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub regions: Vec<RegionSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub threshold: u8,
    pub block_key: BlockKey,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkResult {
    pub meta: LinkMeta,
    pub summary: LinkSummary,
    pub matches: Vec<MatchResult>,
}
