use crate::{Timestamp, Value};

/// A single tagged data point.
#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
    /// Selects the series in tagged charts (ignored otherwise)
    pub tag: String,

    /// Measured value, must be finite
    pub value: Value,

    /// Seconds since the Unix epoch
    pub timestamp: Timestamp,
}

impl Measurement {
    /// Creates a measurement.
    #[must_use]
    pub fn new<S: Into<String>>(tag: S, value: Value, timestamp: Timestamp) -> Self {
        Self {
            tag: tag.into(),
            value,
            timestamp,
        }
    }
}
