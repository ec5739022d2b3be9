/// Error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No metric type was configured.
    MissingMetric,

    /// The configured metric type is not supported.
    UnknownMetric(String),

    /// A configuration option had a malformed or out-of-range value.
    InvalidOption {
        /// Option name
        key: String,

        /// Rejected value
        value: String,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingMetric => {
                write!(f, "No metric type was provided")
            }
            Self::UnknownMetric(name) => {
                write!(f, "No metric defined for type {name:?}")
            }
            Self::InvalidOption { key, value } => {
                write!(f, "Invalid value {value:?} for option {key:?}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result helper type
pub type Result<T> = std::result::Result<T, Error>;
