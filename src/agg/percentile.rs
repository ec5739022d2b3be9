use crate::Value;

/// Nearest-rank percentile over the given values.
///
/// Values are sorted numerically (ascending), then the sample at index
/// `floor(p / 100 * (len - 1))` is returned. `p` is clamped to `0..=100`.
///
/// Returns `None` if there are no values.
///
/// ```
/// use telechart::percentile;
///
/// let mut values = vec![1.0, 5.0, 3.0, 9.0, 7.0];
/// assert_eq!(Some(5.0), percentile(&mut values, 50));
/// ```
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn percentile(values: &mut [Value], p: u8) -> Option<Value> {
    let last_idx = values.len().checked_sub(1)?;

    values.sort_unstable_by(Value::total_cmp);

    let rank = f64::from(p.min(100)) / 100.0;
    let idx = ((rank * last_idx as f64).floor() as usize).min(last_idx);

    values.get(idx).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn percentile_empty() {
        assert_eq!(None, percentile(&mut [], 50));
    }

    #[test]
    fn percentile_single() {
        assert_eq!(Some(4.0), percentile(&mut [4.0], 0));
        assert_eq!(Some(4.0), percentile(&mut [4.0], 99));
    }

    #[test]
    fn percentile_median() {
        assert_eq!(Some(5.0), percentile(&mut [1.0, 5.0, 3.0, 9.0, 7.0], 50));
    }

    #[test]
    fn percentile_numeric_order() {
        // Lexicographic ordering would put 100 before 9
        let mut values = [9.0, 100.0, 20.0, 3.0];
        assert_eq!(Some(100.0), percentile(&mut values, 100));
        assert_eq!(Some(3.0), percentile(&mut values, 0));
        assert_eq!(Some(9.0), percentile(&mut values, 50));
    }

    #[test]
    fn percentile_rounds_down() {
        // floor(0.95 * 9) = 8
        let mut values = (1..=10).map(f64::from).collect::<Vec<_>>();
        assert_eq!(Some(9.0), percentile(&mut values, 95));
        assert_eq!(Some(10.0), percentile(&mut values, 100));
    }

    #[test]
    fn percentile_ties() {
        let mut values = [2.0, 2.0, 2.0, 1.0];
        assert_eq!(Some(2.0), percentile(&mut values, 50));
    }
}
