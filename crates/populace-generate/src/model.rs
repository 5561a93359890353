use serde::{Deserialize, Serialize};

/// Options for a runner run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOptions {
    /// Seed for the run's RNG; a random seed is drawn when unset. Fixing the
    /// seed makes runs bit-for-bit reproducible.
    pub seed: Option<u64>,
    /// Multiplier on the remaining exclusive pool when budgeting claim
    /// retries.
    pub retry_factor: u32,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            seed: None,
            retry_factor: 8,
        }
    }
}

/// Summary of one executed spec.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecReport {
    pub label: String,
    pub requested: u64,
    pub generated: u64,
    pub retries: u64,
}

/// Report for one aggregation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    /// Seed the run's RNG was created from; feed it back through
    /// [`RunOptions`] to reproduce the run.
    pub seed: u64,
    pub specs: Vec<SpecReport>,
    pub records_total: u64,
    pub retries_total: u64,
    pub duration_ms: u64,
}

impl RunReport {
    pub(crate) fn new(run_id: String, seed: u64) -> Self {
        Self {
            run_id,
            seed,
            specs: Vec::new(),
            records_total: 0,
            retries_total: 0,
            duration_ms: 0,
        }
    }
}
