use indicatif::ProgressBar;

use crate::block::block;
use crate::config::LinkConfig;
use crate::error::LinkError;
use crate::filter::filter_matches;
use crate::load::load_csv_records;
use crate::model::{LinkInput, LinkMeta, LinkResult, Side};
use crate::normalize::{normalize_records, Normalizer};
use crate::sanitize::sanitize;
use crate::score::score_pairs;
use crate::summary::compute_summary;

/// Parse both datasets' CSV text per config.
pub fn load_input(config: &LinkConfig, left_csv: &str, right_csv: &str) -> Result<LinkInput, LinkError> {
    Ok(LinkInput {
        left: load_csv_records(Side::Left, left_csv, &config.left)?,
        right: load_csv_records(Side::Right, right_csv, &config.right)?,
    })
}

/// Run sanitize -> normalize -> block -> score -> filter. Returns matches + summary.
pub fn run(config: &LinkConfig, input: LinkInput) -> Result<LinkResult, LinkError> {
    run_with_progress(config, input, &ProgressBar::hidden())
}

/// [`run`], reporting candidate scoring on `progress`. Its length is set
/// once blocking is done; it is finished when scoring completes.
pub fn run_with_progress(
    config: &LinkConfig,
    input: LinkInput,
    progress: &ProgressBar,
) -> Result<LinkResult, LinkError> {
    let normalizer = Normalizer::new(config.abbreviation_table()?);

    let left = sanitize(input.left, &config.left);
    let right = sanitize(input.right, &config.right);
    for (side, sanitized) in [(Side::Left, &left), (Side::Right, &right)] {
        if sanitized.duplicate_ids > 0 {
            log::warn!(
                "{side} dataset: {} row(s) repeat an earlier id; their candidate pairs will repeat",
                sanitized.duplicate_ids
            );
        }
    }

    let left_norm = normalize_records(&left.records, &normalizer);
    let right_norm = normalize_records(&right.records, &normalizer);
    log::debug!(
        "normalized {} left / {} right records",
        left_norm.len(),
        right_norm.len()
    );

    let blocked = block(&left_norm, &right_norm, &config.blocking);
    progress.set_length(blocked.pairs.len() as u64);
    let scored = score_pairs(&blocked.pairs, progress);
    progress.finish();
    let threshold = config.scoring.threshold;
    let matches = filter_matches(&scored, threshold);

    log::info!(
        "{} candidate pair(s) across {} region(s), {} accepted above {threshold}",
        blocked.pairs.len(),
        blocked.regions.len(),
        matches.len()
    );

    let summary = compute_summary(&left, &right, &blocked, &scored, threshold, &matches);

    Ok(LinkResult {
        meta: LinkMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            threshold,
            block_key: config.blocking.key,
        },
        summary,
        matches,
    })
}
