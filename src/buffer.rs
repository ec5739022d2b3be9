use crate::Measurement;

/// Queues arriving batches until they are flushed as one.
///
/// Single producer, single consumer: batches are appended as they arrive,
/// and a flush always takes the whole queue.
#[derive(Debug, Default)]
pub struct IngestBuffer {
    batches: Vec<Vec<Measurement>>,
    len: usize,
}

impl IngestBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a batch.
    pub fn push(&mut self, batch: Vec<Measurement>) {
        if batch.is_empty() {
            return;
        }

        self.len += batch.len();
        self.batches.push(batch);
    }

    /// Takes all buffered measurements, in arrival order.
    #[must_use]
    pub fn flush(&mut self) -> Vec<Measurement> {
        let mut measurements = Vec::with_capacity(self.len);

        for batch in std::mem::take(&mut self.batches) {
            measurements.extend(batch);
        }

        self.len = 0;

        measurements
    }

    /// Number of buffered measurements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
