use crate::agg::{Aggregation, Max, Min};
use crate::{DeriveMode, SeriesIndex, Timestamp, Value};

/// Running statistics of a series.
///
/// `total` and `count` cover the whole lifetime of the series,
/// the running columns are positional and get pruned.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Aggregate {
    /// Sum of all values
    pub total: Value,

    /// Number of values
    pub count: u64,

    /// Running minimum at each timeline position
    pub running_min: Vec<Option<Value>>,

    /// Running maximum at each timeline position
    pub running_max: Vec<Option<Value>>,

    /// Running average at each timeline position
    pub running_avg: Vec<Option<Value>>,
}

impl Aggregate {
    fn with_len(len: usize) -> Self {
        Self {
            total: 0.0,
            count: 0,
            running_min: vec![None; len],
            running_max: vec![None; len],
            running_avg: vec![None; len],
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn record(&mut self, last: &mut Last, value: Value) {
        self.count += 1;
        self.total += value;

        let min = Min::transform(last.min.unwrap_or(value), value);
        let max = Max::transform(last.max.unwrap_or(value), value);
        last.min = Some(min);
        last.max = Some(max);

        self.running_min.push(Some(min));
        self.running_max.push(Some(max));
        self.running_avg.push(Some(self.total / self.count as Value));
    }

    fn skip(&mut self) {
        self.running_min.push(None);
        self.running_max.push(None);
        self.running_avg.push(None);
    }
}

/// Most recent state of a series, independent of its columns.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Last {
    /// Current running minimum
    pub min: Option<Value>,

    /// Current running maximum
    pub max: Option<Value>,

    /// Last value written to the data column
    pub value: Option<Value>,
}

/// Describes how a derived series is computed.
#[derive(Clone, Debug, PartialEq)]
pub struct Derivation {
    /// The raw series this one is derived from, never changes
    pub source: SeriesIndex,

    /// Windowed function
    pub mode: DeriveMode,

    /// Untransformed measurements of the source, aligned to the timeline
    pub raw_history: Vec<Option<Value>>,
}

/// A raw or derived series.
#[derive(Clone, Debug)]
pub struct Series {
    pub(crate) key: String,
    pub(crate) derivation: Option<Derivation>,
    pub(crate) data: Vec<Option<Value>>,
    pub(crate) aggregate: Aggregate,
    pub(crate) last: Last,
    pub(crate) column: usize,
}

impl Series {
    fn new(key: String, derivation: Option<(SeriesIndex, DeriveMode)>, len: usize) -> Self {
        Self {
            key,
            derivation: derivation.map(|(source, mode)| Derivation {
                source,
                mode,
                raw_history: vec![None; len],
            }),
            data: vec![None; len],
            aggregate: Aggregate::with_len(len),
            last: Last::default(),
            column: 0,
        }
    }

    /// Unique label of the series.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Data column, aligned to the timeline.
    #[must_use]
    pub fn data(&self) -> &[Option<Value>] {
        &self.data
    }

    /// Running statistics.
    #[must_use]
    pub fn aggregate(&self) -> &Aggregate {
        &self.aggregate
    }

    /// Current running extrema and last value.
    #[must_use]
    pub fn last(&self) -> &Last {
        &self.last
    }

    /// Derivation, if this is a derived series.
    #[must_use]
    pub fn derivation(&self) -> Option<&Derivation> {
        self.derivation.as_ref()
    }

    /// Whether this series is computed from another one.
    #[must_use]
    pub fn is_derived(&self) -> bool {
        self.derivation.is_some()
    }

    /// Visual column of the series' data in a rendered frame.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Number of timeline positions held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the series holds no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Appends a value, with `sample` feeding the running statistics.
    ///
    /// For raw series `sample` is the untransformed measurement,
    /// `datum` its projection.
    pub(crate) fn push_value(&mut self, datum: Value, sample: Value) {
        self.data.push(Some(datum));
        self.last.value = Some(datum);
        self.aggregate.record(&mut self.last, sample);
    }

    /// Appends an empty slot to every positional column.
    pub(crate) fn push_empty(&mut self) {
        self.data.push(None);
        self.aggregate.skip();
    }

    /// Drops the oldest `n` positions.
    ///
    /// The running extrema and last value are recovered from what is left,
    /// so anything before the retained window is forgotten.
    pub(crate) fn truncate_front(&mut self, n: usize) {
        fn drain_front<T>(vec: &mut Vec<T>, n: usize) {
            vec.drain(..n.min(vec.len()));
        }

        fn last_some(vec: &[Option<Value>]) -> Option<Value> {
            vec.iter().rev().find_map(|x| *x)
        }

        drain_front(&mut self.data, n);
        drain_front(&mut self.aggregate.running_min, n);
        drain_front(&mut self.aggregate.running_max, n);
        drain_front(&mut self.aggregate.running_avg, n);

        if let Some(derivation) = &mut self.derivation {
            drain_front(&mut derivation.raw_history, n);
        }

        self.last = Last {
            min: last_some(&self.aggregate.running_min),
            max: last_some(&self.aggregate.running_max),
            value: last_some(&self.data),
        };
    }
}

/// Holds the shared timeline and all series of a chart.
///
/// Every series holds exactly as many positions as the timeline.
#[derive(Clone, Debug)]
pub struct SeriesStore {
    pub(crate) timeline: Vec<Timestamp>,
    pub(crate) series: Vec<Series>,

    /// Raw series by label
    index: crate::HashMap<String, SeriesIndex>,

    /// Derived series by source and mode, so a tag can never alias a derived label
    derived: crate::HashMap<(SeriesIndex, DeriveMode), SeriesIndex>,

    /// Raw series draw min/max/avg bands next to their data
    bands: bool,

    next_column: usize,
}

impl SeriesStore {
    /// Creates an empty store.
    ///
    /// If `bands` is set, raw series take up four visual columns (value, min, max, avg).
    #[must_use]
    pub fn new(bands: bool) -> Self {
        Self {
            timeline: Vec::new(),
            series: Vec::new(),
            index: crate::HashMap::default(),
            derived: crate::HashMap::default(),
            bands,
            next_column: 1,
        }
    }

    /// Returns the index of the series labelled `label`, creating it if needed.
    ///
    /// New series are raw if `derivation` is `None`, and are back-filled with
    /// empty slots for all existing timeline positions.
    ///
    /// The boolean is `true` if the series was created.
    pub fn find_or_create(
        &mut self,
        label: &str,
        derivation: Option<(SeriesIndex, DeriveMode)>,
    ) -> (SeriesIndex, bool) {
        let existing = match &derivation {
            Some(key) => self.derived.get(key),
            None => self.index.get(label),
        };

        if let Some(&idx) = existing {
            return (idx, false);
        }

        let idx = self.series.len() + 1;

        log::trace!(
            "creating series {idx} for {label:?} (back-filled {} positions)",
            self.timeline.len()
        );

        match &derivation {
            Some(key) => self.derived.insert(key.clone(), idx),
            None => self.index.insert(label.to_owned(), idx),
        };

        let mut series = Series::new(label.to_owned(), derivation, self.timeline.len());
        series.column = self.next_column;
        self.next_column += self.width(&series);

        self.series.push(series);

        (idx, true)
    }

    /// Number of visual columns a series takes up.
    #[must_use]
    pub fn width(&self, series: &Series) -> usize {
        if self.bands && !series.is_derived() {
            4
        } else {
            1
        }
    }

    /// Whether raw series draw min/max/avg bands.
    #[must_use]
    pub fn has_bands(&self) -> bool {
        self.bands
    }

    /// Looks up a series by label, raw series first.
    #[must_use]
    pub fn find(&self, label: &str) -> Option<SeriesIndex> {
        self.index.get(label).copied().or_else(|| {
            self.iter()
                .find(|(_, s)| s.is_derived() && s.key == label)
                .map(|(idx, _)| idx)
        })
    }

    /// Looks up the series derived from `source` with `mode`.
    #[must_use]
    pub fn find_derived(&self, source: SeriesIndex, mode: &DeriveMode) -> Option<SeriesIndex> {
        self.derived.get(&(source, mode.clone())).copied()
    }

    /// Returns the series at `idx`.
    #[must_use]
    pub fn get(&self, idx: SeriesIndex) -> Option<&Series> {
        self.series.get(idx.checked_sub(1)?)
    }

    /// Iterates over all series with their index, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (SeriesIndex, &Series)> + '_ {
        self.series.iter().enumerate().map(|(pos, s)| (pos + 1, s))
    }

    /// Iterates over the series derived from `source`.
    pub fn derived_from(&self, source: SeriesIndex) -> impl Iterator<Item = (SeriesIndex, &Series)> + '_ {
        self.iter()
            .filter(move |(_, s)| s.derivation.as_ref().is_some_and(|d| d.source == source))
    }

    /// The shared timeline.
    #[must_use]
    pub fn timeline(&self) -> &[Timestamp] {
        &self.timeline
    }

    /// Number of series (the timeline not included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns `true` if no series exists yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn store_find_or_create() {
        let mut store = SeriesStore::new(false);

        assert_eq!((1, true), store.find_or_create("a", None));
        assert_eq!((2, true), store.find_or_create("b", None));
        assert_eq!((1, false), store.find_or_create("a", None));
        assert_eq!(2, store.len());
        assert_eq!(Some(2), store.find("b"));
        assert_eq!(None, store.find("c"));
    }

    #[test]
    fn store_index_zero_is_timeline() {
        let mut store = SeriesStore::new(false);
        store.find_or_create("a", None);

        assert!(store.get(0).is_none());
        assert_eq!("a", store.get(1).unwrap().key());
    }

    #[test]
    fn store_backfill() {
        let mut store = SeriesStore::new(false);
        store.timeline.extend([0.0, 1.0, 2.0]);

        let (idx, _) = store.find_or_create("late", None);
        let series = store.get(idx).unwrap();

        assert_eq!(vec![None; 3], series.data());
        assert_eq!(3, series.aggregate().running_min.len());
        assert_eq!(3, series.aggregate().running_max.len());
        assert_eq!(3, series.aggregate().running_avg.len());
    }

    #[test]
    fn store_derived_series() {
        let mut store = SeriesStore::new(false);
        store.timeline.push(0.0);

        let (src, _) = store.find_or_create("a", None);
        let (idx, _) = store.find_or_create("a p95", Some((src, DeriveMode::Percentile(95))));

        let series = store.get(idx).unwrap();
        assert!(series.is_derived());

        let derivation = series.derivation().unwrap();
        assert_eq!(src, derivation.source);
        assert_eq!(DeriveMode::Percentile(95), derivation.mode);
        assert_eq!(vec![None], derivation.raw_history);

        assert_eq!(vec![idx], store.derived_from(src).map(|(i, _)| i).collect::<Vec<_>>());
    }

    #[test]
    fn store_tag_cannot_alias_derived() {
        let mut store = SeriesStore::new(false);

        let (a, _) = store.find_or_create("a", None);
        let (a_mean, _) = store.find_or_create("a mean", Some((a, DeriveMode::Mean)));
        let (tag, created) = store.find_or_create("a mean", None);

        assert!(created);
        assert_ne!(a_mean, tag);
        assert!(!store.get(tag).unwrap().is_derived());
        assert_eq!(Some(a_mean), store.find_derived(a, &DeriveMode::Mean));
        assert_eq!(Some(tag), store.find("a mean"));
    }

    #[test]
    fn store_columns_with_bands() {
        let mut store = SeriesStore::new(true);

        let (a, _) = store.find_or_create("a", None);
        let (a_mean, _) = store.find_or_create("a mean", Some((a, DeriveMode::Mean)));
        let (b, _) = store.find_or_create("b", None);

        assert_eq!(1, store.get(a).unwrap().column());
        assert_eq!(5, store.get(a_mean).unwrap().column());
        assert_eq!(6, store.get(b).unwrap().column());
    }

    #[test]
    fn series_running_stats() {
        let mut series = Series::new("a".into(), None, 0);

        for v in [3.0, 1.0, 4.0, 1.0, 5.0] {
            series.push_value(v, v);
        }

        let agg = series.aggregate();
        assert_eq!(5, agg.count);
        assert_eq!(14.0, agg.total);
        assert_eq!(
            vec![Some(3.0), Some(1.0), Some(1.0), Some(1.0), Some(1.0)],
            agg.running_min
        );
        assert_eq!(
            vec![Some(3.0), Some(3.0), Some(4.0), Some(4.0), Some(5.0)],
            agg.running_max
        );
        assert_eq!(
            vec![Some(3.0), Some(2.0), Some(8.0 / 3.0), Some(2.25), Some(2.8)],
            agg.running_avg
        );
    }

    #[test]
    fn series_truncate_front() {
        let mut series = Series::new("a".into(), None, 0);

        series.push_value(1.0, 1.0);
        series.push_value(9.0, 9.0);
        series.push_empty();
        series.push_value(5.0, 5.0);
        series.push_empty();

        series.truncate_front(2);

        assert_eq!(vec![None, Some(5.0), None], series.data());
        assert_eq!(Some(1.0), series.last().min);
        assert_eq!(Some(9.0), series.last().max);
        assert_eq!(Some(5.0), series.last().value);
        assert_eq!(3, series.aggregate().count);
        assert_eq!(15.0, series.aggregate().total);
    }

    #[test]
    fn series_truncate_front_forgets_extrema() {
        let mut series = Series::new("a".into(), None, 0);

        series.push_value(1.0, 1.0);
        series.push_empty();
        series.push_empty();

        series.truncate_front(1);

        assert_eq!(None, series.last().min);
        assert_eq!(None, series.last().max);
        assert_eq!(None, series.last().value);
        assert_eq!(1, series.aggregate().count);
    }
}
