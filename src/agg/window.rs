use crate::{DeriveMode, Timestamp, Value};

/// Computes a derived value from the trailing window of a source series' raw history.
///
/// The window ends at `now` and includes every sample whose timestamp is
/// `>= now - window` (inclusive lower bound). Empty slots (`None`) are skipped.
///
/// `timeline` and `raw_history` are aligned by position; timestamps are
/// expected to be non-decreasing.
///
/// Returns `None` if the window holds no samples, or if the mode is unknown.
#[must_use]
pub fn derive(
    timeline: &[Timestamp],
    raw_history: &[Option<Value>],
    mode: &DeriveMode,
    now: Timestamp,
    window: f64,
) -> Option<Value> {
    let cutoff = now - window;

    let mut values = timeline
        .iter()
        .zip(raw_history)
        .rev()
        .skip_while(|&(&ts, _)| ts > now)
        .take_while(|&(&ts, _)| ts >= cutoff)
        .filter_map(|(_, &value)| value)
        .collect::<Vec<_>>();

    match mode {
        DeriveMode::Percentile(p) => super::percentile(&mut values, *p),
        DeriveMode::Mean => super::fold::<super::Avg>(values),
        DeriveMode::Unknown(name) => {
            log::trace!("Unknown derive mode {name:?}, skipping derived value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn derive_mean() {
        let timeline = [0.0, 1.0, 2.0];
        let history = [Some(2.0), Some(4.0), Some(6.0)];

        assert_eq!(
            Some(4.0),
            derive(&timeline, &history, &DeriveMode::Mean, 2.0, 120.0)
        );
    }

    #[test]
    fn derive_percentile() {
        let timeline = [0.0, 1.0, 2.0, 3.0, 4.0];
        let history = [Some(1.0), Some(5.0), Some(3.0), Some(9.0), Some(7.0)];

        assert_eq!(
            Some(5.0),
            derive(&timeline, &history, &DeriveMode::Percentile(50), 4.0, 120.0)
        );
    }

    #[test]
    fn derive_skips_empty_slots() {
        let timeline = [0.0, 1.0, 2.0, 3.0];
        let history = [Some(2.0), None, None, Some(6.0)];

        assert_eq!(
            Some(4.0),
            derive(&timeline, &history, &DeriveMode::Mean, 3.0, 120.0)
        );
    }

    #[test]
    fn derive_window_lower_bound_inclusive() {
        let timeline = [0.0, 10.0, 20.0];
        let history = [Some(100.0), Some(10.0), Some(20.0)];

        // 20 - 10 = 10 is still inside, 0 is not
        assert_eq!(
            Some(15.0),
            derive(&timeline, &history, &DeriveMode::Mean, 20.0, 10.0)
        );

        // 20 - 20 = 0, so everything is inside
        assert_eq!(
            Some(130.0 / 3.0),
            derive(&timeline, &history, &DeriveMode::Mean, 20.0, 20.0)
        );
    }

    #[test]
    fn derive_empty_window() {
        let timeline = [0.0, 1.0];
        let history = [None, None];

        assert_eq!(
            None,
            derive(&timeline, &history, &DeriveMode::Mean, 1.0, 120.0)
        );
        assert_eq!(None, derive(&[], &[], &DeriveMode::Percentile(95), 1.0, 120.0));
    }

    #[test]
    fn derive_unknown_mode() {
        let timeline = [0.0];
        let history = [Some(1.0)];

        assert_eq!(
            None,
            derive(
                &timeline,
                &history,
                &DeriveMode::Unknown("p95x".into()),
                0.0,
                120.0
            )
        );
    }

    #[test]
    fn derive_ignores_future_samples() {
        let timeline = [0.0, 1.0, 5.0];
        let history = [Some(1.0), Some(3.0), Some(100.0)];

        assert_eq!(
            Some(2.0),
            derive(&timeline, &history, &DeriveMode::Mean, 1.0, 120.0)
        );
    }
}
