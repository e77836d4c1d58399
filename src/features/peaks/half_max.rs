//! Half-maximum crossing interpolation

use crate::io::measurement::MeasurementSeries;

/// Scan direction away from a minimum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the first sample
    Backward,
    /// Towards the last sample
    Forward,
}

/// Position where the signal recovers above `half_max` next to a minimum
///
/// Scans from `peak_index` in `direction` to the first sample whose value
/// exceeds `half_max` and linearly interpolates the crossing between that
/// sample and its neighbour on the minimum side. Falls back to the position
/// of the series boundary if the signal never recovers.
pub fn half_max_position(
    series: &MeasurementSeries,
    peak_index: usize,
    half_max: f64,
    direction: Direction,
) -> f64 {
    let boundary = match direction {
        Direction::Backward => 0,
        Direction::Forward => series.last_index(),
    };

    let crossing = match direction {
        Direction::Backward => (0..peak_index)
            .rev()
            .find(|&j| series.value(j) > half_max)
            .map(|j| (j, j + 1)),
        Direction::Forward => ((peak_index + 1)..series.len())
            .find(|&j| series.value(j) > half_max)
            .map(|j| (j, j - 1)),
    };

    match crossing {
        Some((outer, inner)) => interpolate(
            (series.value(inner), series.position(inner)),
            (series.value(outer), series.position(outer)),
            half_max,
        ),
        None => series.position(boundary),
    }
}

/// Inverse linear interpolation: position at which the value reaches `target`
fn interpolate(inner: (f64, f64), outer: (f64, f64), target: f64) -> f64 {
    let (y0, x0) = inner;
    let (y1, x1) = outer;
    let dy = y1 - y0;
    if dy.abs() < f64::EPSILON {
        return x1;
    }
    x0 + (target - y0) * (x1 - x0) / dy
}
