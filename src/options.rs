use crate::{Chart, DeriveMode, Error, MetricKind, Renderer, SeriesKey};

/// What happens to buffered measurements when a chart is closed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShutdownPolicy {
    #[default]
    /// Buffered measurements are dropped.
    Discard,

    /// Buffered measurements are applied and rendered one last time.
    Flush,
}

impl TryFrom<&str> for ShutdownPolicy {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "discard" => Ok(Self::Discard),
            "flush" => Ok(Self::Flush),
            _ => Err(()),
        }
    }
}

/// Validated chart configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// Metric kind
    pub metric: MetricKind,

    /// If `true`, every tag gets its own series.
    pub tagged: bool,

    /// Label of the single series of untagged charts
    pub label: String,

    /// Display unit of values
    pub unit: Option<String>,

    /// Chart title
    pub title: Option<String>,

    /// Number of timeline positions retained after pruning
    pub prune_threshold: usize,

    /// Derived series created alongside every raw series
    pub derive_modes: Vec<DeriveMode>,

    /// Width of the rolling window of derived series, in seconds
    pub derive_window: f64,

    /// If set, arriving measurements are buffered and applied on this interval.
    pub refresh_interval: Option<std::time::Duration>,

    /// What happens to buffered measurements on close
    pub shutdown_policy: ShutdownPolicy,
}

impl Options {
    /// Default number of retained timeline positions.
    pub const DEFAULT_PRUNE_THRESHOLD: usize = 1_000;

    /// Default derive window, in seconds.
    pub const DEFAULT_DERIVE_WINDOW: f64 = 120.0;

    /// Default options for the given metric kind.
    #[must_use]
    pub fn new(metric: MetricKind) -> Self {
        Self {
            metric,
            tagged: false,
            label: SeriesKey::UNTAGGED.to_owned(),
            unit: None,
            title: None,
            prune_threshold: Self::DEFAULT_PRUNE_THRESHOLD,
            derive_modes: Vec::new(),
            derive_window: Self::DEFAULT_DERIVE_WINDOW,
            refresh_interval: None,
            shutdown_policy: ShutdownPolicy::default(),
        }
    }
}

/// Builder for [`Chart`].
#[derive(Clone, Debug)]
pub struct Builder {
    metric: Option<String>,
    tagged: bool,
    label: Option<String>,
    unit: Option<String>,
    title: Option<String>,
    prune_threshold: usize,
    derive_modes: Vec<DeriveMode>,
    derive_window: f64,
    refresh_interval: Option<std::time::Duration>,
    shutdown_policy: ShutdownPolicy,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(key: &str, value: &str) -> Error {
    Error::InvalidOption {
        key: key.to_owned(),
        value: value.to_owned(),
    }
}

impl Builder {
    pub(crate) fn new() -> Self {
        Self {
            metric: None,
            tagged: false,
            label: None,
            unit: None,
            title: None,
            prune_threshold: Options::DEFAULT_PRUNE_THRESHOLD,
            derive_modes: Vec::new(),
            derive_window: Options::DEFAULT_DERIVE_WINDOW,
            refresh_interval: None,
            shutdown_policy: ShutdownPolicy::default(),
        }
    }

    /// Reads options from string key/value pairs, as found in data attributes.
    ///
    /// Recognized keys: `metric`, `tagged`, `tags`, `label`, `unit`, `title`,
    /// `pruneThreshold`, `deriveModes`, `deriveWindowSeconds`,
    /// `refreshInterval` (milliseconds), `shutdownPolicy` (`discard` or `flush`).
    ///
    /// A non-empty `tags` value enables tagged mode. Other keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns error if a recognized key has a malformed value.
    pub fn from_attributes<'a, I>(pairs: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut builder = Self::new();

        for (key, value) in pairs {
            builder = match key {
                "metric" => builder.metric(value),
                "tagged" => builder.tagged(value.parse().map_err(|_| invalid(key, value))?),
                "tags" => builder.tagged(!value.trim().is_empty()),
                "label" => builder.label(value),
                "unit" => builder.unit(value),
                "title" => builder.title(value),
                "pruneThreshold" => {
                    builder.prune_threshold(value.parse().map_err(|_| invalid(key, value))?)
                }
                "deriveModes" => builder.derive_modes(value),
                "deriveWindowSeconds" => {
                    builder.derive_window(value.parse().map_err(|_| invalid(key, value))?)
                }
                "refreshInterval" => builder.refresh_interval(std::time::Duration::from_millis(
                    value.parse().map_err(|_| invalid(key, value))?,
                )),
                "shutdownPolicy" => builder.shutdown_policy(
                    ShutdownPolicy::try_from(value).map_err(|()| invalid(key, value))?,
                ),
                _ => {
                    log::trace!("ignoring chart attribute {key:?}");
                    builder
                }
            };
        }

        Ok(builder)
    }

    /// Sets the metric kind: `counter`, `last_value`, `sum` or `summary`.
    ///
    /// Required.
    #[must_use]
    pub fn metric(mut self, name: &str) -> Self {
        self.metric = Some(name.to_owned());
        self
    }

    /// If `true`, every tag gets its own series.
    ///
    /// Default = false
    #[must_use]
    pub fn tagged(mut self, tagged: bool) -> Self {
        self.tagged = tagged;
        self
    }

    /// Sets the label of the series of an untagged chart.
    #[must_use]
    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_owned());
        self
    }

    /// Sets the display unit of values.
    #[must_use]
    pub fn unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_owned()).filter(|unit| !unit.is_empty());
        self
    }

    /// Sets the chart title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_owned());
        self
    }

    /// Sets the number of timeline positions retained after pruning.
    ///
    /// Default = 1000
    #[must_use]
    pub fn prune_threshold(mut self, n: usize) -> Self {
        self.prune_threshold = n;
        self
    }

    /// Sets the derive modes, e.g. `"p50, p95, mean"`.
    ///
    /// Unknown modes are not an error; their series stay empty.
    #[must_use]
    pub fn derive_modes(mut self, list: &str) -> Self {
        self.derive_modes = DeriveMode::parse_list(list);
        self
    }

    /// Sets the width of the rolling window of derived series, in seconds.
    ///
    /// Default = 120
    #[must_use]
    pub fn derive_window(mut self, seconds: f64) -> Self {
        self.derive_window = seconds;
        self
    }

    /// Enables buffering, applying measurements once per interval.
    #[must_use]
    pub fn refresh_interval(mut self, interval: std::time::Duration) -> Self {
        self.refresh_interval = Some(interval);
        self
    }

    /// Sets what happens to buffered measurements on close.
    ///
    /// Default = [`ShutdownPolicy::Discard`]
    #[must_use]
    pub fn shutdown_policy(mut self, policy: ShutdownPolicy) -> Self {
        self.shutdown_policy = policy;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if no metric, or an unknown metric, was configured,
    /// or if a numeric option is out of range.
    pub fn build(self) -> crate::Result<Options> {
        let metric = MetricKind::try_from(self.metric.as_deref().unwrap_or_default())?;

        if self.prune_threshold == 0 {
            return Err(invalid("pruneThreshold", "0"));
        }

        if !self.derive_window.is_finite() || self.derive_window <= 0.0 {
            return Err(invalid(
                "deriveWindowSeconds",
                &self.derive_window.to_string(),
            ));
        }

        if let Some(interval) = self.refresh_interval.filter(std::time::Duration::is_zero) {
            return Err(invalid(
                "refreshInterval",
                &interval.as_millis().to_string(),
            ));
        }

        Ok(Options {
            metric,
            tagged: self.tagged,
            label: self
                .label
                .unwrap_or_else(|| SeriesKey::UNTAGGED.to_owned()),
            unit: self.unit,
            title: self.title,
            prune_threshold: self.prune_threshold,
            derive_modes: self.derive_modes,
            derive_window: self.derive_window,
            refresh_interval: self.refresh_interval,
            shutdown_policy: self.shutdown_policy,
        })
    }

    /// Builds a chart drawing on `renderer`.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid, see [`Builder::build`].
    pub fn open<R: Renderer>(self, renderer: R) -> crate::Result<Chart<R>> {
        Ok(Chart::new(self.build()?, renderer))
    }
}
