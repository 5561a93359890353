//! Declarative synthetic-population generation engine.
//!
//! Builder specs describe, per field, how values are produced: fixed choice
//! sets, half-open numeric/temporal ranges, or pools whose values are handed
//! out at most once across a whole run. A runner executes the registered
//! specs in order and materializes their requested counts into one ordered
//! sequence suitable for bulk insertion.

pub mod errors;
pub mod exclusion;
pub mod model;
pub mod runner;
pub mod sink;
pub mod spec;
pub mod strategy;

pub use errors::GenerationError;
pub use exclusion::ExclusionRegistry;
pub use model::{RunOptions, RunReport, SpecReport};
pub use runner::{PopulationRun, PopulationRunner};
pub use sink::{MemorySink, Sink};
pub use spec::{FieldSpec, RecordSpec};
pub use strategy::Strategy;
