/// Accepts the finished object sequence for bulk insertion.
///
/// The engine makes no assumption about the sink's durability or batching
/// behavior beyond it accepting every record handed to it, in order.
pub trait Sink<T> {
    type Error: std::error::Error + Send + Sync + 'static;

    fn insert_all(&mut self, records: Vec<T>) -> Result<(), Self::Error>;
}

/// In-memory sink for tests and demos.
#[derive(Debug)]
pub struct MemorySink<T> {
    records: Vec<T>,
}

impl<T> MemorySink<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

impl<T> Default for MemorySink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Sink<T> for MemorySink<T> {
    type Error = std::convert::Infallible;

    fn insert_all(&mut self, mut records: Vec<T>) -> Result<(), Self::Error> {
        self.records.append(&mut records);
        Ok(())
    }
}
