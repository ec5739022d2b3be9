use super::DeriveMode;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::digit1,
    combinator::{all_consuming, map, map_res, verify},
    sequence::preceded,
    IResult,
};

fn parse_percentile(input: &str) -> IResult<&str, DeriveMode> {
    let (input, p) = verify(
        map_res(preceded(tag("p"), digit1), str::parse::<u8>),
        |p| *p <= 100,
    )(input)?;

    Ok((input, DeriveMode::Percentile(p)))
}

fn parse_mean(input: &str) -> IResult<&str, DeriveMode> {
    map(tag("mean"), |_| DeriveMode::Mean)(input)
}

/// Parses a single derive mode token, falling back to [`DeriveMode::Unknown`].
pub fn parse_mode(word: &str) -> DeriveMode {
    match all_consuming(alt((parse_percentile, parse_mean)))(word) {
        Ok((_, mode)) => mode,
        Err(_) => DeriveMode::Unknown(word.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn parse_percentile_simple() {
        assert_eq!(DeriveMode::Percentile(95), parse_mode("p95"));
        assert_eq!(DeriveMode::Percentile(0), parse_mode("p0"));
        assert_eq!(DeriveMode::Percentile(100), parse_mode("p100"));
        assert_eq!(DeriveMode::Percentile(5), parse_mode("p05"));
    }

    #[test]
    fn parse_mean_simple() {
        assert_eq!(DeriveMode::Mean, parse_mode("mean"));
    }

    #[test]
    fn parse_mode_fail() {
        assert_eq!(DeriveMode::Unknown("p".into()), parse_mode("p"));
        assert_eq!(DeriveMode::Unknown("p101".into()), parse_mode("p101"));
        assert_eq!(DeriveMode::Unknown("p999".into()), parse_mode("p999"));
        assert_eq!(DeriveMode::Unknown("p95x".into()), parse_mode("p95x"));
        assert_eq!(DeriveMode::Unknown("means".into()), parse_mode("means"));
        assert_eq!(DeriveMode::Unknown("P95".into()), parse_mode("P95"));
    }
}
