//! Cycling, proportional distribution and float comparison helpers.

/// Fractions closer than this are considered the same.
pub const FLOAT_TOLERANCE: f32 = 1e-4;

#[must_use]
pub fn float_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < FLOAT_TOLERANCE
}

/// Returns the first value in `sorted` that is strictly greater than `value`,
/// wrapping around to the first element.
///
/// ## Example
/// ```
/// use scrollwm_core::utils::helpers::find_next;
/// assert_eq!(find_next(500, &[100, 300, 900]), Some(900));
/// assert_eq!(find_next(900, &[100, 300, 900]), Some(100));
/// ```
pub fn find_next<T>(value: T, sorted: &[T]) -> Option<T>
where
    T: PartialOrd + Copy,
{
    sorted
        .iter()
        .copied()
        .find(|&candidate| candidate > value)
        .or_else(|| sorted.first().copied())
}

/// Returns the last value in `sorted` that is strictly smaller than `value`,
/// wrapping around to the last element.
pub fn find_prev<T>(value: T, sorted: &[T]) -> Option<T>
where
    T: PartialOrd + Copy,
{
    sorted
        .iter()
        .rev()
        .copied()
        .find(|&candidate| candidate < value)
        .or_else(|| sorted.last().copied())
}

/// Split `total` between slots in proportion to `weights`.
///
/// Every slot receives the floor of its share, the rounding remainder is added
/// to the last slot so the result always sums to `total`. When all weights are
/// zero the split is even.
#[must_use]
pub fn proportional_fit(total: i32, weights: &[f64]) -> Vec<i32> {
    if weights.is_empty() {
        return vec![];
    }
    let sum: f64 = weights.iter().map(|w| w.max(0.0)).sum();
    let mut parts: Vec<i32> = if sum > 0.0 {
        weights
            .iter()
            .map(|w| (f64::from(total) * w.max(0.0) / sum).floor() as i32)
            .collect()
    } else {
        let even = total / weights.len() as i32;
        vec![even; weights.len()]
    };
    let remainder = total - parts.iter().sum::<i32>();
    if let Some(last) = parts.last_mut() {
        *last += remainder;
    }
    parts
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    #[test]
    fn find_next_picks_the_first_larger_value() {
        assert_eq!(find_next(500, &[100, 300, 900]), Some(900));
        assert_eq!(find_next(100, &[100, 300, 900]), Some(300));
    }

    #[test]
    fn find_next_wraps_around() {
        assert_eq!(find_next(900, &[100, 300, 900]), Some(100));
        assert_eq!(find_next(2000, &[100, 300, 900]), Some(100));
    }

    #[test]
    fn find_prev_mirrors_find_next() {
        assert_eq!(find_prev(500, &[100, 300, 900]), Some(300));
        assert_eq!(find_prev(100, &[100, 300, 900]), Some(900));
    }

    #[test]
    fn cycling_an_empty_list_yields_nothing() {
        assert_eq!(find_next(1, &[]), None::<i32>);
        assert_eq!(find_prev(1, &[]), None::<i32>);
    }

    #[test]
    fn proportional_fit_always_sums_to_total() {
        let parts = proportional_fit(1000, &[1.0, 1.0, 1.0]);
        assert_eq!(parts, vec![333, 333, 334]);
        let parts = proportional_fit(997, &[300.0, 200.0, 100.0]);
        assert_eq!(parts.iter().sum::<i32>(), 997);
        assert_eq!(parts[0], 498);
    }

    #[test]
    fn floats_within_tolerance_are_equal() {
        assert!(float_eq(0.618_04, 0.618_034));
        assert!(!float_eq(0.5, 0.501));
    }

    #[test]
    fn proportional_fit_splits_evenly_without_weights() {
        assert_eq!(proportional_fit(10, &[0.0, 0.0]), vec![5, 5]);
    }
}
