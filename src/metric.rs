use crate::agg::{Aggregation, Count, LastValue, Sum};
use crate::Value;

/// The kind of metric a chart displays.
///
/// Names supported: `counter`, `last_value`, `sum`, `summary`
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MetricKind {
    /// Counts measurements, ignoring their value.
    Counter,

    /// Shows the most recent value.
    LastValue,

    /// Accumulates values.
    Sum,

    /// Shows values together with running min, max and average bands.
    Summary,
}

impl MetricKind {
    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Counter => "counter",
            Self::LastValue => "last_value",
            Self::Sum => "sum",
            Self::Summary => "summary",
        }
    }

    /// Projects a new measurement onto the previous value of its series.
    ///
    /// A series without a previous value starts at `0`.
    #[must_use]
    pub fn project(self, y: Value, previous: Option<Value>) -> Value {
        let previous = previous.unwrap_or_default();

        match self {
            Self::Counter => Count::transform(previous, y),
            Self::Sum => Sum::transform(previous, y),
            Self::LastValue | Self::Summary => LastValue::transform(previous, y),
        }
    }

    /// Whether raw series of this kind draw min/max/avg bands.
    #[must_use]
    pub fn has_bands(self) -> bool {
        self == Self::Summary
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for MetricKind {
    type Error = crate::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "counter" => Ok(Self::Counter),
            "last_value" => Ok(Self::LastValue),
            "sum" => Ok(Self::Sum),
            "summary" => Ok(Self::Summary),
            "" => Err(crate::Error::MissingMetric),
            other => Err(crate::Error::UnknownMetric(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn metric_kind_parse() {
        assert_eq!(Ok(MetricKind::Counter), MetricKind::try_from("counter"));
        assert_eq!(Ok(MetricKind::LastValue), MetricKind::try_from("last_value"));
        assert_eq!(Ok(MetricKind::Sum), MetricKind::try_from("sum"));
        assert_eq!(Ok(MetricKind::Summary), MetricKind::try_from("summary"));
    }

    #[test]
    fn metric_kind_parse_fail() {
        assert_eq!(Err(crate::Error::MissingMetric), MetricKind::try_from(""));
        assert_eq!(
            Err(crate::Error::UnknownMetric("distribution".into())),
            MetricKind::try_from("distribution"),
        );
    }

    #[test]
    fn metric_kind_project() {
        assert_eq!(1.0, MetricKind::Counter.project(7.0, None));
        assert_eq!(4.0, MetricKind::Counter.project(7.0, Some(3.0)));
        assert_eq!(7.0, MetricKind::LastValue.project(7.0, Some(3.0)));
        assert_eq!(10.0, MetricKind::Sum.project(7.0, Some(3.0)));
        assert_eq!(7.0, MetricKind::Sum.project(7.0, None));
        assert_eq!(7.0, MetricKind::Summary.project(7.0, Some(3.0)));
    }
}
