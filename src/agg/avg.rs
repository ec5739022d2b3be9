pub struct Avg;

impl super::Aggregation for Avg {
    #[allow(clippy::cast_precision_loss)]
    fn finish(accu: crate::Value, len: usize) -> crate::Value {
        accu / len as crate::Value
    }
}
