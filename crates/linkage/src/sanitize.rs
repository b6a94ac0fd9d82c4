//! Structural cleanup of one dataset before normalization.

use std::collections::{BTreeSet, HashSet};

use crate::config::{DatasetConfig, PostalFormat};
use crate::model::{Sanitized, SanitizedRecord, SourceRecord};

const RANGE_SEPARATOR: char = '-';
const DECIMAL_SEPARATOR: char = '.';

/// Reduce a postal value to its primary form. Values without a separator pass through.
pub fn sanitize_postal(value: &str, format: PostalFormat) -> String {
    let before = |v: &str, sep: char| -> String {
        v.split(sep).next().unwrap_or_default().to_string()
    };
    match format {
        PostalFormat::Range => before(value, RANGE_SEPARATOR),
        PostalFormat::Decimal => before(value, DECIMAL_SEPARATOR),
        PostalFormat::Auto => before(&before(value, RANGE_SEPARATOR), DECIMAL_SEPARATOR),
        PostalFormat::Raw => value.to_string(),
    }
}

/// Drop extra columns, collapse postal values and count repeated ids.
///
/// Cardinality is preserved: duplicate ids are reported, not removed, so the
/// blocker will produce one candidate per duplicated row.
pub fn sanitize(records: Vec<SourceRecord>, dataset: &DatasetConfig) -> Sanitized {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    let mut duplicate_ids = 0;
    let mut dropped: BTreeSet<String> = BTreeSet::new();
    let mut out = Vec::with_capacity(records.len());

    for record in records {
        if !seen.insert(record.id.clone()) {
            duplicate_ids += 1;
        }
        dropped.extend(record.extra.into_keys());

        out.push(SanitizedRecord {
            side: record.side,
            postal: sanitize_postal(&record.postal, dataset.postal_format),
            id: record.id,
            name: record.name,
            address: record.address,
            city: record.city,
            state: record.state,
        });
    }

    Sanitized {
        records: out,
        duplicate_ids,
        dropped_columns: dropped.into_iter().collect(),
    }
}
