use crate::utils::helpers::proportional_fit;

/// Split the column height by fixed weights. Windows without a weight count as 1.
pub fn allocate(available: i32, gap: i32, count: usize, weights: &[f64]) -> Vec<i32> {
    if count == 0 {
        return vec![];
    }
    let usable = available - gap * (count as i32 - 1);
    let weights: Vec<f64> = (0..count)
        .map(|i| weights.get(i).copied().unwrap_or(1.0))
        .collect();
    proportional_fit(usable, &weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_shape_the_split() {
        assert_eq!(allocate(1010, 10, 2, &[3.0, 1.0]), vec![750, 250]);
    }

    #[test]
    fn missing_weights_default_to_one() {
        assert_eq!(allocate(1020, 10, 3, &[2.0]), vec![500, 250, 250]);
    }
}
