//! A streaming aggregation engine for live telemetry charts.
//!
//! Measurements (a tag, a value and a timestamp) are folded into a set of
//! series that share one timeline, so every column handed to the chart has
//! the same length. Series are created the first time their tag shows up.
//!
//! For each series, the engine keeps running statistics (count, total, min, max, average),
//! and it can derive synthetic series from a rolling window over the raw values
//! (nearest-rank percentiles such as `p95`, or `mean`).
//!
//! History is bounded: once the timeline grows past the prune threshold,
//! every positional column is cut back to the most recent entries.
//!
//! Arriving batches can be buffered and applied on a fixed refresh interval,
//! so the chart is redrawn at most once per tick.
//!
//! ```
//! use telechart::{Chart, Frame, Measurement, Renderer, SeriesConfig, Size};
//!
//! #[derive(Default)]
//! struct Columns(Vec<Vec<Option<f64>>>);
//!
//! impl Renderer for Columns {
//!     fn add_series(&mut self, _: SeriesConfig, _: usize) {}
//!     fn remove_series(&mut self, _: usize) {}
//!     fn set_size(&mut self, _: Size) {}
//!
//!     fn set_data(&mut self, frame: &Frame) {
//!         self.0 = frame.to_columns();
//!     }
//! }
//!
//! let mut chart = Chart::builder()
//!     .metric("summary")
//!     .tagged(true)
//!     .derive_modes("p50, mean")
//!     .open(Columns::default())?;
//!
//! chart.push_data(vec![
//!     Measurement::new("h-1", 25.42, 0.0),
//!     Measurement::new("h-2", 42.42, 1.0),
//! ]);
//!
//! // timeline + 2 hosts * (value, min, max, avg, p50, mean)
//! assert_eq!(13, chart.renderer().0.len());
//!
//! # Ok::<(), telechart::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, missing_docs)]
#![deny(clippy::unwrap_used)]
#![warn(clippy::cargo)]
#![warn(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![warn(clippy::multiple_crate_versions)]
#![warn(clippy::result_unit_err)]

mod agg;
mod buffer;
mod chart;
mod duration;
mod engine;
mod error;
mod measurement;
mod metric;
mod mode;
mod options;
mod prune;
mod render;
mod series_key;
mod store;
mod time;
mod timer;

/// Position of a series in the store.
///
/// `0` is reserved for the timeline, data series start at `1`.
pub type SeriesIndex = usize;

type HashMap<K, V> = std::collections::HashMap<K, V, rustc_hash::FxBuildHasher>;

pub use agg::{derive, percentile};
pub use buffer::IngestBuffer;
pub use chart::Chart;
pub use duration::Duration;
pub use engine::Engine;
pub use error::{Error, Result};
pub use measurement::Measurement;
pub use metric::MetricKind;
pub use mode::DeriveMode;
pub use options::{Builder, Options, ShutdownPolicy};
pub use render::{Frame, Renderer, SeriesConfig, SeriesRole, Size};
pub use store::{Aggregate, Derivation, Last, Series, SeriesStore};
pub use time::timestamp;
pub use timer::RefreshTimer;

#[doc(hidden)]
pub use series_key::SeriesKey;

/// Value used in series
pub type Value = f64;

/// Seconds since the Unix epoch, fractional
pub type Timestamp = f64;
