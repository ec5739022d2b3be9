/// Helpers for calculating time frames, in seconds
///
/// ```
/// use telechart::{Chart, Duration};
/// # use telechart::{Frame, Renderer, SeriesConfig, Size};
/// #
/// # struct Noop;
/// #
/// # impl Renderer for Noop {
/// #     fn add_series(&mut self, _: SeriesConfig, _: usize) {}
/// #     fn remove_series(&mut self, _: usize) {}
/// #     fn set_data(&mut self, _: &Frame) {}
/// #     fn set_size(&mut self, _: Size) {}
/// # }
///
/// let chart = Chart::builder()
///     .metric("last_value")
///     .derive_modes("p99")
///     .derive_window(Duration::minutes(5.0))
///     .open(Noop)?;
///
/// assert_eq!(300.0, chart.options().derive_window);
///
/// # Ok::<(), telechart::Error>(())
/// ```
pub struct Duration;

impl Duration {
    /// Formats N weeks as seconds.
    #[must_use]
    pub fn weeks(n: f64) -> f64 {
        Self::days(n) * 7.0
    }

    /// Formats N days as seconds.
    #[must_use]
    pub fn days(n: f64) -> f64 {
        Self::hours(n) * 24.0
    }

    /// Formats N hours as seconds.
    #[must_use]
    pub fn hours(n: f64) -> f64 {
        Self::minutes(n) * 60.0
    }

    /// Formats N minutes as seconds.
    #[must_use]
    pub fn minutes(n: f64) -> f64 {
        Self::seconds(n) * 60.0
    }

    /// Formats N seconds as seconds.
    #[must_use]
    pub const fn seconds(n: f64) -> f64 {
        n
    }

    /// Formats N milliseconds as seconds.
    #[must_use]
    pub fn millis(n: f64) -> f64 {
        n / 1_000.0
    }
}
