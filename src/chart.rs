use crate::{
    Builder, Engine, IngestBuffer, Measurement, Options, RefreshTimer, Renderer, ShutdownPolicy,
    Size,
};
use std::time::Instant;

/// A live chart: an aggregation engine wired to a [`Renderer`].
///
/// Everything happens on the caller's thread. The host feeds batches through
/// [`Chart::push_data`] and, if a refresh interval is configured, drives the
/// refresh timer through [`Chart::poll`] (or calls [`Chart::tick`] from its
/// own timer).
pub struct Chart<R: Renderer> {
    engine: Engine,
    buffer: IngestBuffer,
    timer: Option<RefreshTimer>,
    renderer: R,
}

impl Chart<Box<dyn Renderer>> {
    /// Creates a new chart builder.
    ///
    /// The renderer type is picked by [`Builder::open`].
    #[must_use]
    pub fn builder() -> Builder {
        Builder::new()
    }
}

impl<R: Renderer> Chart<R> {
    /// Creates a chart from validated options.
    ///
    /// Series that exist from the start (untagged charts) are added to the renderer right away.
    pub fn new(options: Options, renderer: R) -> Self {
        let timer = options
            .refresh_interval
            .map(|interval| RefreshTimer::new(interval, Instant::now()));

        let mut chart = Self {
            engine: Engine::new(options),
            buffer: IngestBuffer::new(),
            timer,
            renderer,
        };

        if let Some(title) = &chart.engine.options().title {
            chart.renderer.set_title(title);
        }

        chart.add_new_series();

        chart
    }

    /// The chart's configuration.
    #[must_use]
    pub fn options(&self) -> &Options {
        self.engine.options()
    }

    /// The aggregation engine.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Number of measurements waiting for the next tick.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Hands a batch of measurements to the chart.
    ///
    /// With a refresh interval, the batch is buffered until the next tick.
    /// Otherwise it is applied, pruned and rendered immediately.
    pub fn push_data(&mut self, measurements: Vec<Measurement>) {
        if measurements.is_empty() {
            return;
        }

        if self.timer.is_some() {
            self.buffer.push(measurements);
        } else {
            self.apply(&measurements);
        }
    }

    /// Runs a tick if the refresh timer is due at `now`.
    ///
    /// Returns `true` if a tick ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = self.timer.as_mut().is_some_and(|timer| timer.poll(now));

        if due {
            self.tick();
        }

        due
    }

    /// Applies all buffered measurements as one batch.
    ///
    /// Nothing is rendered if the buffer is empty.
    pub fn tick(&mut self) {
        let batch = self.buffer.flush();

        if !batch.is_empty() {
            self.apply(&batch);
        }
    }

    /// Resizes the chart; data is unaffected.
    pub fn resize(&mut self, size: Size) {
        self.renderer.set_size(size);
    }

    fn add_new_series(&mut self) {
        for (config, index) in self.engine.take_added() {
            self.renderer.add_series(config, index);
        }
    }

    fn apply(&mut self, batch: &[Measurement]) {
        for measurement in batch {
            self.engine.ingest(measurement);
        }

        self.engine.maybe_prune();

        log::debug!(
            "applied batch of {}, {} positions",
            batch.len(),
            self.engine.store().timeline().len()
        );

        self.add_new_series();
        self.renderer.set_data(&self.engine.frame());
    }

    /// Tears the chart down, returning its renderer.
    ///
    /// Cancels the refresh timer and applies the shutdown policy to buffered
    /// measurements, then removes all visual series from the renderer.
    pub fn close(mut self) -> R {
        if let Some(timer) = &mut self.timer {
            timer.cancel();
        }

        let policy = self.options().shutdown_policy;

        match policy {
            ShutdownPolicy::Flush => self.tick(),
            ShutdownPolicy::Discard => {
                let dropped = self.buffer.flush().len();

                if dropped > 0 {
                    log::info!("discarding {dropped} buffered measurements on close");
                }
            }
        }

        let columns = self.engine.frame().len();

        for index in (1..columns).rev() {
            self.renderer.remove_series(index);
        }

        self.renderer
    }
}
