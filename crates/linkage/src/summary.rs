use std::collections::HashMap;

use crate::model::{
    Blocked, DatasetSummary, LinkSummary, MatchResult, RegionSummary, Sanitized, ScoredPair,
};

fn dataset_summary(sanitized: &Sanitized, excluded_by_region: usize) -> DatasetSummary {
    DatasetSummary {
        records: sanitized.records.len(),
        duplicate_ids: sanitized.duplicate_ids,
        excluded_by_region,
        dropped_columns: sanitized.dropped_columns.clone(),
    }
}

/// Compute run statistics from the intermediate stage outputs.
pub fn compute_summary(
    left: &Sanitized,
    right: &Sanitized,
    blocked: &Blocked<'_>,
    scored: &[ScoredPair<'_>],
    threshold: u8,
    accepted: &[MatchResult],
) -> LinkSummary {
    let mut accepted_by_region: HashMap<&str, usize> = HashMap::new();
    for s in scored.iter().filter(|s| s.score > threshold) {
        *accepted_by_region.entry(s.pair.region).or_insert(0) += 1;
    }

    let regions = blocked
        .regions
        .iter()
        .map(|r| RegionSummary {
            region: r.region.clone(),
            left_records: r.left_records,
            right_records: r.right_records,
            candidates: r.candidates,
            accepted: accepted_by_region
                .get(r.region.as_str())
                .copied()
                .unwrap_or(0),
        })
        .collect();

    LinkSummary {
        left: dataset_summary(left, blocked.excluded_left),
        right: dataset_summary(right, blocked.excluded_right),
        candidate_pairs: blocked.pairs.len(),
        accepted: accepted.len(),
        rejected: scored.len().saturating_sub(accepted.len()),
        regions,
    }
}
