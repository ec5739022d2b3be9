use crate::SeriesStore;

/// Cuts every positional column back to the last `threshold` positions,
/// once the timeline has grown past `threshold`.
///
/// Lifetime totals and counts are kept. Running extrema are recovered from
/// the retained columns, so history before the window no longer counts.
///
/// Returns `true` if anything was pruned.
pub fn maybe_prune(store: &mut SeriesStore, threshold: usize) -> bool {
    let len = store.timeline.len();

    if len <= threshold {
        return false;
    }

    let excess = len - threshold;

    log::debug!(
        "pruning {excess} of {len} positions in {} series",
        store.series.len()
    );

    store.timeline.drain(..excess);

    for series in &mut store.series {
        series.truncate_front(excess);
    }

    true
}
