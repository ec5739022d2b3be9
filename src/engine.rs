use crate::render::{Frame, SeriesConfig, SeriesRole};
use crate::{agg::derive, prune, Measurement, Options, SeriesIndex, SeriesKey, SeriesStore};

/// The aggregation engine of a single chart.
///
/// Folds measurements into a [`SeriesStore`], creating raw series per tag
/// (and their derived series) on first sight, and keeping every series
/// aligned to the shared timeline.
pub struct Engine {
    options: Options,
    store: SeriesStore,

    /// Series of untagged charts
    untagged: Option<SeriesIndex>,

    /// Visual series created since they were last taken
    added: Vec<(SeriesConfig, usize)>,
}

impl Engine {
    /// Creates an engine.
    ///
    /// Untagged charts get their series (and derived series) right away,
    /// tagged charts start without any.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let mut engine = Self {
            store: SeriesStore::new(options.metric.has_bands()),
            options,
            untagged: None,
            added: Vec::new(),
        };

        if !engine.options.tagged {
            let label = engine.options.label.clone();
            engine.untagged = Some(engine.find_or_create_raw(&label));
        }

        engine
    }

    /// The engine's configuration.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The series store.
    #[must_use]
    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    fn find_or_create_raw(&mut self, label: &str) -> SeriesIndex {
        let (idx, created) = self.store.find_or_create(label, None);

        if created {
            self.announce(idx);

            for mode in self.options.derive_modes.clone() {
                let key = SeriesKey::derived(label, &mode);
                let (derived_idx, _) = self.store.find_or_create(&key, Some((idx, mode)));
                self.announce(derived_idx);
            }
        }

        idx
    }

    /// Queues the visual series of a newly created series.
    fn announce(&mut self, idx: SeriesIndex) {
        let Some(series) = self.store.get(idx) else {
            return;
        };

        let config = |role| SeriesConfig {
            label: series.key().to_owned(),
            unit: self.options.unit.clone(),
            role,
        };

        let column = series.column();

        if let Some(derivation) = series.derivation() {
            self.added
                .push((config(SeriesRole::Derived(derivation.mode.clone())), column));
        } else if self.store.width(series) > 1 {
            self.added.extend([
                (config(SeriesRole::Value), column),
                (config(SeriesRole::Min), column + 1),
                (config(SeriesRole::Max), column + 2),
                (config(SeriesRole::Avg), column + 3),
            ]);
        } else {
            self.added.push((config(SeriesRole::Value), column));
        }
    }

    /// Takes the visual series created since the last call, with their column index.
    pub fn take_added(&mut self) -> Vec<(SeriesConfig, usize)> {
        std::mem::take(&mut self.added)
    }

    /// Applies a single measurement.
    ///
    /// The timeline grows by one position, and so does every series:
    /// the measurement's series gets its (projected) value, its derived series
    /// get a value computed over the derive window, all others an empty slot.
    ///
    /// Measurements with a non-finite value or timestamp are dropped.
    pub fn ingest(&mut self, measurement: &Measurement) {
        if !measurement.timestamp.is_finite() {
            log::warn!(
                "Dropping measurement with non-finite timestamp {} for {:?}",
                measurement.timestamp,
                measurement.tag
            );
            return;
        }

        if !measurement.value.is_finite() {
            log::warn!(
                "Dropping non-finite value {} for {:?}",
                measurement.value,
                measurement.tag
            );
            return;
        }

        if self
            .store
            .timeline
            .last()
            .is_some_and(|&ts| measurement.timestamp < ts)
        {
            log::debug!(
                "Out-of-order timestamp {} for {:?}, derived values may be off",
                measurement.timestamp,
                measurement.tag
            );
        }

        let target = match self.untagged {
            Some(idx) => idx,
            None => self.find_or_create_raw(&measurement.tag),
        };

        let metric = self.options.metric;
        let window = self.options.derive_window;

        let SeriesStore {
            timeline, series, ..
        } = &mut self.store;

        timeline.push(measurement.timestamp);

        for (idx, series) in (1..).zip(series.iter_mut()) {
            if idx == target {
                let datum = metric.project(measurement.value, series.last.value);
                series.push_value(datum, measurement.value);
                continue;
            }

            let Some(derivation) = &mut series.derivation else {
                series.push_empty();
                continue;
            };

            if derivation.source == target {
                derivation.raw_history.push(Some(measurement.value));

                match derive(
                    timeline,
                    &derivation.raw_history,
                    &derivation.mode,
                    measurement.timestamp,
                    window,
                ) {
                    Some(value) => series.push_value(value, value),
                    None => series.push_empty(),
                }
            } else {
                derivation.raw_history.push(None);
                series.push_empty();
            }
        }
    }

    /// Prunes history if the timeline exceeds the prune threshold.
    ///
    /// Returns `true` if anything was pruned.
    pub fn maybe_prune(&mut self) -> bool {
        prune::maybe_prune(&mut self.store, self.options.prune_threshold)
    }

    /// Returns the current columns: the timeline, then every visual series in column order.
    #[must_use]
    pub fn frame(&self) -> Frame<'_> {
        let mut columns = Vec::with_capacity(self.store.len());

        for (_, series) in self.store.iter() {
            columns.push(series.data());

            if self.store.width(series) > 1 {
                let agg = series.aggregate();
                columns.push(&agg.running_min[..]);
                columns.push(&agg.running_max[..]);
                columns.push(&agg.running_avg[..]);
            }
        }

        Frame {
            timeline: self.store.timeline(),
            columns,
        }
    }
}
