//! Candidate generation: partition by region, equality-join on a normalized key.
//!
//! Within a region every left row is paired with every right row sharing the
//! join key, in input order. Pairs are not deduplicated, so duplicated ids on
//! either side yield repeated pairs. The join is exact string equality, so two
//! empty keys are equal and pair like any other value.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use rayon::prelude::*;

use crate::config::{BlockKey, BlockingConfig};
use crate::model::{Blocked, CandidatePair, NormalizedRecord, RegionBlock};

type Partition<'a> = BTreeMap<&'a str, Vec<&'a NormalizedRecord>>;

fn partition(records: &[NormalizedRecord]) -> Partition<'_> {
    let mut regions: Partition<'_> = BTreeMap::new();
    for record in records {
        regions.entry(record.state.as_str()).or_default().push(record);
    }
    regions
}

fn join_region<'a>(
    left: &[&'a NormalizedRecord],
    right: &[&'a NormalizedRecord],
    key: BlockKey,
) -> Vec<CandidatePair<'a>> {
    let mut index: HashMap<&'a str, Vec<&'a NormalizedRecord>> = HashMap::new();
    for &record in right {
        index.entry(record.block_value(key)).or_default().push(record);
    }

    let mut pairs = Vec::new();
    for &l in left {
        let Some(matches) = index.get(l.block_value(key)) else {
            continue;
        };
        for &r in matches {
            pairs.push(CandidatePair {
                region: l.state.as_str(),
                left: l,
                right: r,
            });
        }
    }
    pairs
}

/// Generate candidate pairs for the configured regions.
///
/// Regions are joined in parallel, one task each, and concatenated in region
/// order: allow-list order when configured, lexical order otherwise.
pub fn block<'a>(
    left: &'a [NormalizedRecord],
    right: &'a [NormalizedRecord],
    config: &BlockingConfig,
) -> Blocked<'a> {
    let left_regions = partition(left);
    let right_regions = partition(right);

    let regions: Vec<&str> = match config.regions {
        Some(ref allow) => allow.iter().map(String::as_str).collect(),
        None => left_regions
            .keys()
            .chain(right_regions.keys())
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
    };

    let allowed: HashSet<&str> = regions.iter().copied().collect();
    let excluded = |p: &Partition<'_>| -> usize {
        p.iter()
            .filter(|(region, _)| !allowed.contains(**region))
            .map(|(_, rows)| rows.len())
            .sum()
    };
    let excluded_left = excluded(&left_regions);
    let excluded_right = excluded(&right_regions);

    let key = config.key;
    let joined: Vec<(RegionBlock, Vec<CandidatePair<'a>>)> = regions
        .par_iter()
        .map(|region| {
            let l = left_regions.get(*region).map(Vec::as_slice).unwrap_or(&[]);
            let r = right_regions.get(*region).map(Vec::as_slice).unwrap_or(&[]);
            let pairs = join_region(l, r, key);
            log::debug!(
                "region {region}: {} left x {} right -> {} candidates",
                l.len(),
                r.len(),
                pairs.len()
            );
            let stats = RegionBlock {
                region: region.to_string(),
                left_records: l.len(),
                right_records: r.len(),
                candidates: pairs.len(),
            };
            (stats, pairs)
        })
        .collect();

    let mut pairs = Vec::with_capacity(joined.iter().map(|(s, _)| s.candidates).sum());
    let mut stats = Vec::with_capacity(joined.len());
    for (region_stats, region_pairs) in joined {
        stats.push(region_stats);
        pairs.extend(region_pairs);
    }

    Blocked {
        pairs,
        regions: stats,
        excluded_left,
        excluded_right,
    }
}
