use crate::DeriveMode;

#[doc(hidden)]
pub struct SeriesKey;

impl SeriesKey {
    /// Label of the series in untagged charts, if none is configured.
    pub const UNTAGGED: &'static str = "value";

    #[doc(hidden)]
    #[must_use]
    pub fn allocate_string_for_derived(source: &str, mode: &DeriveMode, extra_len: usize) -> String {
        let mode_len = match mode {
            DeriveMode::Percentile(_) | DeriveMode::Mean => 4,
            DeriveMode::Unknown(name) => name.len(),
        };

        // +1 for the space between source and mode
        String::with_capacity(source.len() + 1 + mode_len + extra_len)
    }

    /// Formats the label of a series derived from `source`.
    #[must_use]
    pub fn derived(source: &str, mode: &DeriveMode) -> String {
        use std::fmt::Write;

        let mut str = Self::allocate_string_for_derived(source, mode, 0);
        str.push_str(source);
        str.push(' ');

        // NOTE: Writing into a String cannot fail
        let _ = write!(str, "{mode}");

        str
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn create_derived_key() {
        assert_eq!(
            "h-1 p95",
            SeriesKey::derived("h-1", &DeriveMode::Percentile(95)),
        );
    }

    #[test]
    fn create_derived_key_2() {
        assert_eq!("db.query mean", SeriesKey::derived("db.query", &DeriveMode::Mean));
    }

    #[test]
    fn create_derived_key_3() {
        assert_eq!(
            "value median",
            SeriesKey::derived(SeriesKey::UNTAGGED, &DeriveMode::Unknown("median".into())),
        );
    }
}
