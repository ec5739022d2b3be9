mod avg;
mod count;
mod last;
mod max;
mod min;
mod percentile;
mod sum;
mod window;

pub use avg::Avg;
pub use count::Count;
pub use last::LastValue;
pub use max::Max;
pub use min::Min;
pub use percentile::percentile;
pub use sum::Sum;
pub use window::derive;

use crate::Value;

/// Defines an aggregation.
///
/// - `init` seeds the accumulator from the first value (default: Identity)
///
/// - `transform` defines what to do with each further value (default: Add)
///
/// - `finish` can transform the result value given the number of folded values (default: Identity)
pub trait Aggregation {
    fn init(value: Value) -> Value {
        value
    }

    fn transform(accu: Value, x: Value) -> Value {
        accu + x
    }

    fn finish(accu: Value, _len: usize) -> Value {
        accu
    }
}

/// Folds a sequence of values, returning `None` if it is empty.
pub fn fold<A: Aggregation>(values: impl IntoIterator<Item = Value>) -> Option<Value> {
    let mut values = values.into_iter();

    let mut accu = A::init(values.next()?);
    let mut len = 1;

    for x in values {
        accu = A::transform(accu, x);
        len += 1;
    }

    Some(A::finish(accu, len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn fold_empty() {
        assert_eq!(None, fold::<Sum>([]));
        assert_eq!(None, fold::<Avg>([]));
    }

    #[test]
    fn fold_builtin() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];

        assert_eq!(Some(5.0), fold::<Count>(values));
        assert_eq!(Some(14.0), fold::<Sum>(values));
        assert_eq!(Some(1.0), fold::<Min>(values));
        assert_eq!(Some(5.0), fold::<Max>(values));
        assert_eq!(Some(5.0), fold::<LastValue>(values));
        assert_eq!(Some(2.8), fold::<Avg>(values));
    }
}
