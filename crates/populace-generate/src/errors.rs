use thiserror::Error;

/// Errors emitted by the generation engine.
///
/// All variants are terminal for the run that produced them: a failed spec
/// aborts the whole run and no partial output is returned.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The spec set cannot be executed as configured. Never retried.
    #[error("invalid spec: {0}")]
    Configuration(String),
    /// An exclusive pool cannot satisfy the distinct draws demanded across
    /// the run.
    #[error("exclusive values for field '{field}' exhausted after {attempts} attempts")]
    Exhaustion { field: String, attempts: u64 },
    /// A generated value could not be bound onto the target instance.
    #[error("materialization failed: {0}")]
    Materialization(#[from] populace_core::Error),
    /// The downstream sink rejected a batch.
    #[error("sink error: {0}")]
    Sink(Box<dyn std::error::Error + Send + Sync>),
}
