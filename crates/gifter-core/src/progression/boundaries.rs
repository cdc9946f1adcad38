//! Level boundaries for bounded tiers.

/// Split `[start, end)` into `level_count` levels whose widths grow by
/// `growth_factor`.
///
/// Returns `level_count + 1` non-decreasing boundaries. The first is always
/// `start` and the last is always `end`; level `i` (1-indexed) spans
/// `[b[i - 1], b[i])`. Each level except the last receives
/// `floor(span * w_i / sum_w)` coins with `w_i = growth_factor^i`, and the
/// last level takes whatever is left.
pub fn level_boundaries(start: u64, end: u64, growth_factor: f64, level_count: u32) -> Vec<u64> {
    let levels = level_count.max(1) as usize;
    let end = end.max(start);
    let span = end - start;

    let weights: Vec<f64> = (0..levels).map(|i| growth_factor.powi(i as i32)).collect();
    let total_weight: f64 = weights.iter().sum();
    let usable = total_weight.is_finite() && total_weight > 0.0;

    let mut boundaries = Vec::with_capacity(levels + 1);
    boundaries.push(start);
    let mut allotted: u64 = 0;
    for weight in &weights[..levels - 1] {
        let increment = if usable {
            (span as f64 * weight / total_weight).floor() as u64
        } else {
            0
        };
        allotted = allotted.saturating_add(increment);
        boundaries.push(start.saturating_add(allotted).min(end));
    }
    // Last level absorbs the rounding remainder.
    boundaries.push(end);

    for i in 1..boundaries.len() {
        if boundaries[i] < boundaries[i - 1] {
            boundaries[i] = boundaries[i - 1];
        }
    }
    boundaries
}

/// Find the 1-indexed level of `coins` within `boundaries`.
///
/// Coins below the first boundary map to level 1 and coins at or past the
/// last interior boundary map to the final level. Zero-width levels are
/// skipped: coins equal to a repeated boundary land in the later level.
pub fn locate_level(coins: u64, boundaries: &[u64]) -> u32 {
    if boundaries.len() < 2 {
        return 1;
    }
    let level_count = boundaries.len() - 1;

    // Binary search over the interior boundaries b[1]..b[n-1] for how many
    // of them `coins` has reached.
    let interior = &boundaries[1..level_count];
    let crossed = interior.partition_point(|&b| b <= coins);

    (crossed + 1).clamp(1, level_count) as u32
}
