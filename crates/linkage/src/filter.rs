use crate::model::{MatchResult, ScoredPair};

/// Keep pairs scoring strictly above `threshold`, in candidate order.
///
/// No deduplication: a pair generated twice upstream (duplicated ids) is
/// accepted twice.
pub fn filter_matches(scored: &[ScoredPair<'_>], threshold: u8) -> Vec<MatchResult> {
    scored
        .iter()
        .filter(|s| s.score > threshold)
        .map(|s| MatchResult {
            business_id: s.pair.left.id.clone(),
            entity_id: s.pair.right.id.clone(),
            confidence_score: s.score,
        })
        .collect()
}
