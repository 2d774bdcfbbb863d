use crate::utils::helpers::proportional_fit;

/// Split the column height evenly, the rounding remainder goes to the last window.
pub fn allocate(available: i32, gap: i32, count: usize) -> Vec<i32> {
    if count == 0 {
        return vec![];
    }
    let usable = available - gap * (count as i32 - 1);
    proportional_fit(usable, &vec![1.0; count])
}
