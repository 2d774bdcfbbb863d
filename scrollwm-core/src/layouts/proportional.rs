/// Keep the selected window's height and share the rest in proportion to
/// the current heights of the other windows.
///
/// Every window gets at least `min_height` while the column has room for it.
/// An overfull column lowers the minimum to an even share of its height.
/// Whatever a window is raised by is taken from the windows above the
/// minimum, in proportion to how far above they are. The rounding remainder
/// goes to a single window, the selected one if any, else the last, so the
/// heights and gaps always add up to `available`.
pub fn allocate(
    available: i32,
    gap: i32,
    current: &[i32],
    selected: Option<usize>,
    min_height: i32,
) -> Vec<i32> {
    let count = current.len();
    match count {
        0 => return vec![],
        1 => return vec![available],
        _ => {}
    }
    let usable = (available - gap * (count as i32 - 1)).max(0);
    let min_height = min_height.min(usable / count as i32);
    let selected = selected.filter(|s| *s < count);

    let reserved = selected.map_or(0, |s| current[s].clamp(0, usable));
    let others: Vec<usize> = (0..count).filter(|i| Some(*i) != selected).collect();
    let weights: Vec<f64> = others.iter().map(|i| f64::from(current[*i].max(0))).collect();
    let shares = floor_shares(usable - reserved, &weights);

    let mut heights = vec![0; count];
    if let Some(s) = selected {
        heights[s] = reserved;
    }
    for (i, share) in others.iter().zip(shares) {
        heights[*i] = share;
    }

    enforce_minimum(&mut heights, min_height);

    let remainder = usable - heights.iter().sum::<i32>();
    if remainder < 0 {
        shave(&mut heights, -remainder);
    } else {
        let receiver = selected.unwrap_or(count - 1);
        heights[receiver] += remainder;
    }
    heights
}

/// Take `amount` pixels away, one at a time from the tallest window.
fn shave(heights: &mut [i32], amount: i32) {
    for _ in 0..amount {
        let Some(tallest) = (0..heights.len()).max_by_key(|i| heights[*i]) else {
            return;
        };
        if heights[tallest] <= 0 {
            return;
        }
        heights[tallest] -= 1;
    }
}

/// Floor of each window's share of `total`. Even shares when all weights are zero.
fn floor_shares(total: i32, weights: &[f64]) -> Vec<i32> {
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        return vec![total / weights.len().max(1) as i32; weights.len()];
    }
    weights
        .iter()
        .map(|w| (f64::from(total) * w / sum).floor() as i32)
        .collect()
}

fn enforce_minimum(heights: &mut [i32], min_height: i32) {
    let deficit: i32 = heights.iter().map(|h| (min_height - h).max(0)).sum();
    if deficit == 0 {
        return;
    }
    let excess: Vec<f64> = heights
        .iter()
        .map(|h| f64::from((h - min_height).max(0)))
        .collect();
    let available_excess: f64 = excess.iter().sum();
    let taken = floor_shares(deficit.min(available_excess as i32), &excess);
    for (h, take) in heights.iter_mut().zip(taken) {
        *h = (*h).max(min_height) - take;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(heights: &[i32], gap: i32) -> i32 {
        heights.iter().sum::<i32>() + gap * (heights.len() as i32 - 1)
    }

    #[test]
    fn single_window_gets_the_full_height() {
        assert_eq!(allocate(900, 10, &[300], Some(0), 50), vec![900]);
    }

    #[test]
    fn selected_window_keeps_its_height() {
        let heights = allocate(1000, 10, &[600, 300, 100], Some(0), 50);
        assert_eq!(heights[0], 600);
        assert_eq!(heights[1], 285);
        assert_eq!(heights[2], 95);
        assert_eq!(total(&heights, 10), 1000);
    }

    #[test]
    fn rounding_remainder_goes_to_the_selected_window() {
        let heights = allocate(1001, 10, &[100, 100, 100, 100], Some(1), 50);
        assert_eq!(heights, vec![290, 101, 290, 290]);
        let heights = allocate(1000, 0, &[1, 1, 1], None, 50);
        assert_eq!(heights, vec![333, 333, 334]);
    }

    #[test]
    fn minimum_height_is_enforced() {
        let heights = allocate(1000, 10, &[950, 5, 500], Some(0), 100);
        assert!(heights.iter().all(|h| *h >= 100), "{heights:?}");
        assert_eq!(total(&heights, 10), 1000);
    }

    #[test]
    fn deficit_is_taken_from_windows_above_the_minimum() {
        let heights = allocate(1000, 0, &[900, 100], Some(0), 200);
        assert_eq!(heights, vec![800, 200]);
    }

    #[test]
    fn overfull_columns_still_add_up() {
        let heights = allocate(600, 10, &[50; 12], Some(0), 50);
        assert_eq!(heights[0], 50);
        assert!(heights[1..].iter().all(|h| *h == 40), "{heights:?}");
        assert_eq!(total(&heights, 10), 600);

        let heights = allocate(100, 10, &[100, 100, 100], Some(0), 100);
        assert_eq!(heights, vec![28, 26, 26]);
        assert_eq!(total(&heights, 10), 100);
    }

    #[test]
    fn stable_heights_stay_stable() {
        let first = allocate(1000, 10, &[480, 300, 400], Some(1), 50);
        let second = allocate(1000, 10, &first, Some(1), 50);
        assert_eq!(first, second);
    }
}
