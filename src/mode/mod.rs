mod lexer;
mod parser;

use lexer::{tokenize_mode_list, Token};

/// A function deriving a synthetic series from a rolling window.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeriveMode {
    /// Nearest-rank percentile, written `p0`..`p100` (e.g. `p95`)
    Percentile(u8),

    /// Arithmetic mean, written `mean`
    Mean,

    /// Anything else
    ///
    /// Kept so that the derived series still exists, but never gets a value.
    Unknown(String),
}

impl DeriveMode {
    /// Parses a list of derive modes, delimited by commas, semicolons, pipes or whitespace.
    ///
    /// Unrecognized modes are kept as [`DeriveMode::Unknown`]; duplicates are dropped.
    ///
    /// ```
    /// use telechart::DeriveMode;
    ///
    /// assert_eq!(
    ///     vec![DeriveMode::Percentile(50), DeriveMode::Percentile(95), DeriveMode::Mean],
    ///     DeriveMode::parse_list("p50, p95 mean"),
    /// );
    /// ```
    #[must_use]
    pub fn parse_list(s: &str) -> Vec<Self> {
        let mut modes: Vec<Self> = Vec::new();

        for (tok, span) in tokenize_mode_list(s) {
            let word = match tok {
                Ok(Token::Word(word)) => word,
                Err(()) => {
                    log::warn!("Skipping unreadable derive mode at {span:?} in {s:?}");
                    continue;
                }
            };

            let mode = parser::parse_mode(&word);

            if let Self::Unknown(name) = &mode {
                log::warn!("Unknown derive mode {name:?} at {span:?}, its series will stay empty");
            }

            if !modes.contains(&mode) {
                modes.push(mode);
            }
        }

        modes
    }
}

impl std::fmt::Display for DeriveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Percentile(p) => write!(f, "p{p}"),
            Self::Mean => write!(f, "mean"),
            Self::Unknown(name) => write!(f, "{name}"),
        }
    }
}
