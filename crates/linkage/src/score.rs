//! Partial-alignment name similarity.
//!
//! The shorter name is compared against windows of the longer one, so a name
//! carrying extra words ("joe's pizza and grill") still scores high against
//! its core ("joes pizza"). Windows are anchored at the matching blocks of the
//! two strings rather than tried at every offset. Each window is scored with
//! indel similarity `2 * LCS / (len_a + len_b)`, scaled to 0..=100 and rounded
//! half-to-even. Equal strings score 100, even when empty; otherwise an empty
//! side scores 0.

use std::collections::HashMap;

use indicatif::ProgressBar;
use rapidfuzz::distance::indel;
use rayon::prelude::*;

use crate::model::{CandidatePair, ScoredPair};

pub const MAX_SCORE: u8 = 100;

/// `100 * num / den` rounded half-to-even. `den` must be non-zero.
fn percent(num: usize, den: usize) -> u8 {
    let scaled = 100 * num;
    let (mut q, r) = (scaled / den, scaled % den);
    if 2 * r > den || (2 * r == den && q % 2 == 1) {
        q += 1;
    }
    q.min(MAX_SCORE as usize) as u8
}

/// Longest common run `(i, j, len)` of `a[alo..ahi]` and `b[blo..bhi]`,
/// earliest in `a` on ties.
fn longest_match(
    a: &[char],
    positions: &HashMap<char, Vec<usize>>,
    (alo, ahi): (usize, usize),
    (blo, bhi): (usize, usize),
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);
    let mut run_len: HashMap<usize, usize> = HashMap::new();
    for (offset, c) in a[alo..ahi].iter().enumerate() {
        let i = alo + offset;
        let mut next = HashMap::new();
        for &j in positions.get(c).map(Vec::as_slice).unwrap_or(&[]) {
            if j < blo {
                continue;
            }
            if j >= bhi {
                break;
            }
            let k = j
                .checked_sub(1)
                .and_then(|prev| run_len.get(&prev))
                .copied()
                .unwrap_or(0)
                + 1;
            next.insert(j, k);
            if k > best_len {
                (best_i, best_j, best_len) = (i + 1 - k, j + 1 - k, k);
            }
        }
        run_len = next;
    }
    (best_i, best_j, best_len)
}

/// Non-overlapping common runs of `a` and `b`, sorted, closed by the
/// `(a.len(), b.len(), 0)` sentinel. Longest run first, then recurse on
/// either side of it.
fn matching_blocks(a: &[char], b: &[char]) -> Vec<(usize, usize, usize)> {
    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        positions.entry(c).or_default().push(j);
    }

    let mut blocks = Vec::new();
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, &positions, (alo, ahi), (blo, bhi));
        if k == 0 {
            continue;
        }
        blocks.push((i, j, k));
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }
    blocks.sort_unstable();
    blocks.push((a.len(), b.len(), 0));
    blocks
}

/// Best indel similarity of the shorter string against windows of the longer.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return MAX_SCORE;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    if short.is_empty() {
        return 0;
    }

    let n = short.len();
    // (similar, total) of the best window so far
    let mut best = (0, 1);
    for (i, j, _) in matching_blocks(short, long) {
        let start = j.saturating_sub(i);
        let window = &long[start..(start + n).min(long.len())];
        let total = n + window.len();
        let similar = total - indel::distance(short.iter().copied(), window.iter().copied());
        if similar * best.1 > best.0 * total {
            best = (similar, total);
        }
        if similar == total {
            break;
        }
    }
    percent(best.0, best.1)
}

/// Score two possibly-absent names; absent reads as empty.
pub fn score(name_a: Option<&str>, name_b: Option<&str>) -> u8 {
    partial_ratio(name_a.unwrap_or(""), name_b.unwrap_or(""))
}

/// Score every candidate pair, ticking `progress` once per pair. Output
/// order matches input order.
pub fn score_pairs<'a>(pairs: &[CandidatePair<'a>], progress: &ProgressBar) -> Vec<ScoredPair<'a>> {
    pairs
        .par_iter()
        .map(|&pair| {
            let scored = ScoredPair {
                pair,
                score: score(pair.left.name.as_deref(), pair.right.name.as_deref()),
            };
            progress.inc(1);
            scored
        })
        .collect()
}
