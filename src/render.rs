use crate::{DeriveMode, Timestamp, Value};

/// What a visual series shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeriesRole {
    /// Data of a raw series
    Value,

    /// Running minimum band of a raw series
    Min,

    /// Running maximum band of a raw series
    Max,

    /// Running average of a raw series
    Avg,

    /// Data of a derived series
    Derived(DeriveMode),
}

/// Configuration of a visual series, handed to [`Renderer::add_series`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeriesConfig {
    /// Legend label
    pub label: String,

    /// Display unit of values, if any
    pub unit: Option<String>,

    /// What the series shows
    pub role: SeriesRole,
}

/// Viewport dimensions in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    /// Width
    pub width: u32,

    /// Height
    pub height: u32,
}

/// A column-aligned snapshot of a chart's data.
///
/// Column `0` is the timeline, followed by one column per visual series,
/// all of the same length.
#[derive(Debug)]
pub struct Frame<'a> {
    pub(crate) timeline: &'a [Timestamp],
    pub(crate) columns: Vec<&'a [Option<Value>]>,
}

impl<'a> Frame<'a> {
    /// The shared timeline.
    #[must_use]
    pub fn timeline(&self) -> &'a [Timestamp] {
        self.timeline
    }

    /// Columns of the visual series, in column order (starting at column `1`).
    #[must_use]
    pub fn columns(&self) -> &[&'a [Option<Value>]] {
        &self.columns
    }

    /// Returns the value column at `idx`.
    ///
    /// `0` is the timeline, use [`Frame::timeline`] for it.
    #[must_use]
    pub fn column(&self, idx: usize) -> Option<&'a [Option<Value>]> {
        self.columns.get(idx.checked_sub(1)?).copied()
    }

    /// Number of columns, timeline included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len() + 1
    }

    /// Number of rows (timeline positions).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.timeline.len()
    }

    /// Returns `true` if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }

    /// Copies the frame into owned columns, the timeline first.
    #[must_use]
    pub fn to_columns(&self) -> Vec<Vec<Option<Value>>> {
        std::iter::once(self.timeline.iter().copied().map(Some).collect::<Vec<_>>())
            .chain(self.columns.iter().map(|column| column.to_vec()))
            .collect()
    }
}

/// The chart surface a [`crate::Chart`] draws on.
///
/// Visual series indices follow frame columns, so the first series is at `1`.
pub trait Renderer {
    /// Adds a visual series at `index`.
    fn add_series(&mut self, config: SeriesConfig, index: usize);

    /// Removes the visual series at `index`.
    fn remove_series(&mut self, index: usize);

    /// Redraws with new data.
    fn set_data(&mut self, frame: &Frame);

    /// Resizes the viewport.
    fn set_size(&mut self, size: Size);

    /// Sets the chart title, called once when the chart is opened.
    fn set_title(&mut self, title: &str) {
        let _ = title;
    }
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn add_series(&mut self, config: SeriesConfig, index: usize) {
        (**self).add_series(config, index);
    }

    fn remove_series(&mut self, index: usize) {
        (**self).remove_series(index);
    }

    fn set_data(&mut self, frame: &Frame) {
        (**self).set_data(frame);
    }

    fn set_size(&mut self, size: Size) {
        (**self).set_size(size);
    }

    fn set_title(&mut self, title: &str) {
        (**self).set_title(title);
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn add_series(&mut self, config: SeriesConfig, index: usize) {
        (**self).add_series(config, index);
    }

    fn remove_series(&mut self, index: usize) {
        (**self).remove_series(index);
    }

    fn set_data(&mut self, frame: &Frame) {
        (**self).set_data(frame);
    }

    fn set_size(&mut self, size: Size) {
        (**self).set_size(size);
    }

    fn set_title(&mut self, title: &str) {
        (**self).set_title(title);
    }
}
