//! Local minimum detection
//!
//! Finds dips in a 1D signal whose value lies below a ceiling, keeping the
//! deepest dip when several lie closer together than a minimum distance.

use std::cmp::Ordering;

/// Find local minima in a signal
///
/// # Arguments
///
/// * `signal` - Signal to search
/// * `ceiling` - Maximum value of an accepted minimum (inclusive)
/// * `min_distance` - Minimum index distance between accepted minima
///
/// # Returns
///
/// Vector of (index, value) pairs, sorted by index
///
/// # Algorithm
///
/// 1. Find all local minima (value < left neighbour && value < right
///    neighbour); a flat bottom counts once, at its middle sample
/// 2. Keep minima with `0 <= value <= ceiling`
/// 3. Enforce minimum distance (keep the deepest minimum when too close)
/// 4. Sort by index
///
/// The first and last samples are never minima.
///
/// # Example
///
/// ```
/// use tape_quality::features::peaks::peak_picking::find_minima;
///
/// let signal = vec![100.0, 90.0, 40.0, 95.0, 100.0, 60.0, 100.0];
/// let minima = find_minima(&signal, 80.0, 2);
/// assert_eq!(minima, vec![(2, 40.0), (5, 60.0)]);
/// ```
pub fn find_minima(signal: &[f64], ceiling: f64, min_distance: usize) -> Vec<(usize, f64)> {
    log::debug!(
        "Finding minima in signal of length {}, ceiling={:.3}, min_distance={}",
        signal.len(),
        ceiling,
        min_distance
    );

    if signal.len() < 3 {
        // Need at least 3 points for a local minimum
        return vec![];
    }

    let mut minima = Vec::new();

    let mut i = 1;
    while i < signal.len() - 1 {
        if signal[i] < signal[i - 1] {
            // walk over a flat bottom
            let mut ahead = i + 1;
            while ahead < signal.len() - 1 && signal[ahead] == signal[i] {
                ahead += 1;
            }
            if signal[ahead] > signal[i] {
                let middle = (i + ahead - 1) / 2;
                let value = signal[middle];
                if (0.0..=ceiling).contains(&value) {
                    minima.push((middle, value));
                }
                i = ahead;
                continue;
            }
        }
        i += 1;
    }

    // Enforce minimum distance
    if min_distance > 1 && minima.len() > 1 {
        // Deepest first so that the strongest dips win
        minima.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        let mut filtered: Vec<(usize, f64)> = Vec::with_capacity(minima.len());
        for (idx, value) in minima {
            let too_close = filtered
                .iter()
                .any(|(existing, _)| idx.abs_diff(*existing) < min_distance);

            if !too_close {
                filtered.push((idx, value));
            }
        }

        minima = filtered;
    }

    minima.sort_by_key(|&(idx, _)| idx);

    log::debug!("Found {} minima", minima.len());

    minima
}
