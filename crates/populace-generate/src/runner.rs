use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use populace_core::FieldTable;

use crate::errors::GenerationError;
use crate::exclusion::ExclusionRegistry;
use crate::model::{RunOptions, RunReport, SpecReport};
use crate::sink::Sink;
use crate::spec::RecordSpec;

/// Result of one aggregation run.
#[derive(Debug)]
pub struct PopulationRun<T> {
    /// All specs' outputs concatenated, preserving per-spec generation order
    /// and inter-spec registration order.
    pub records: Vec<T>,
    pub report: RunReport,
}

/// Executes registered specs, in order, against one shared exclusion
/// registry, and aggregates their outputs.
pub struct PopulationRunner<T> {
    table: FieldTable<T>,
    specs: Vec<RecordSpec>,
    options: RunOptions,
}

impl<T: Default> PopulationRunner<T> {
    pub fn new(table: FieldTable<T>) -> Self {
        Self::with_options(table, RunOptions::default())
    }

    pub fn with_options(table: FieldTable<T>, options: RunOptions) -> Self {
        Self {
            table,
            specs: Vec::new(),
            options,
        }
    }

    /// Registers a spec. Registration order is a contract: exclusivity is
    /// resolved claim-on-first-success, so earlier specs get first pick of a
    /// shared exclusive pool. A spec needing guaranteed-unique values must be
    /// registered before any spec drawing on the same field's pool.
    pub fn add_spec(&mut self, spec: RecordSpec) -> &mut Self {
        self.specs.push(spec);
        self
    }

    /// Runs every spec and returns the concatenated output.
    pub fn run(&self) -> Result<PopulationRun<T>, GenerationError> {
        let mut records = Vec::new();
        let report = self.execute(|batch: Vec<T>| {
            records.extend(batch);
            Ok(())
        })?;
        Ok(PopulationRun { records, report })
    }

    /// Streaming variant of [`run`](Self::run): hands each spec's batch to
    /// `sink` as soon as it is materialized, so peak memory is bounded by
    /// the largest single spec instead of the whole population.
    pub fn run_into<S: Sink<T>>(&self, sink: &mut S) -> Result<RunReport, GenerationError> {
        self.execute(|batch| {
            sink.insert_all(batch)
                .map_err(|err| GenerationError::Sink(Box::new(err)))
        })
    }

    fn execute(
        &self,
        mut deliver: impl FnMut(Vec<T>) -> Result<(), GenerationError>,
    ) -> Result<RunReport, GenerationError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let seed = self.options.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut registry = ExclusionRegistry::new();
        let mut report = RunReport::new(run_id, seed);

        info!(
            run_id = %report.run_id,
            specs = self.specs.len(),
            seed,
            target = self.table.type_name(),
            "population run started"
        );

        match self.execute_specs(&mut rng, &mut registry, &mut report, &mut deliver) {
            Ok(()) => {
                report.duration_ms = start.elapsed().as_millis() as u64;
                info!(
                    run_id = %report.run_id,
                    records = report.records_total,
                    retries = report.retries_total,
                    duration_ms = report.duration_ms,
                    "population run completed"
                );
                Ok(report)
            }
            Err(err) => {
                warn!(run_id = %report.run_id, error = %err, "population run failed");
                Err(err)
            }
        }
    }

    fn execute_specs(
        &self,
        rng: &mut ChaCha8Rng,
        registry: &mut ExclusionRegistry,
        report: &mut RunReport,
        deliver: &mut impl FnMut(Vec<T>) -> Result<(), GenerationError>,
    ) -> Result<(), GenerationError> {
        for spec in &self.specs {
            let spec_start = Instant::now();
            let count = self.validate_spec(spec)?;
            let mut retries = 0_u64;
            let mut batch = Vec::with_capacity(count as usize);

            for _ in 0..count {
                let mut resolved = Vec::with_capacity(spec.fields().len());
                for field in spec.fields() {
                    let value = field.strategy.draw(
                        &field.name,
                        registry,
                        rng,
                        self.options.retry_factor,
                        &mut retries,
                    )?;
                    resolved.push((field.name.clone(), value));
                }
                batch.push(self.table.materialize(&resolved)?);
            }

            let generated = batch.len() as u64;
            deliver(batch)?;

            report.specs.push(SpecReport {
                label: spec.label().to_string(),
                requested: count,
                generated,
                retries,
            });
            report.records_total += generated;
            report.retries_total += retries;

            info!(
                label = %spec.label(),
                records = generated,
                retries,
                duration_ms = spec_start.elapsed().as_millis() as u64,
                "spec generated"
            );
        }

        Ok(())
    }

    /// Execution-time validation; configuration is pure data until here.
    fn validate_spec(&self, spec: &RecordSpec) -> Result<u64, GenerationError> {
        let count = spec.requested().ok_or_else(|| {
            GenerationError::Configuration(format!("spec '{}': count is not set", spec.label()))
        })?;
        if count == 0 {
            return Err(GenerationError::Configuration(format!(
                "spec '{}': count must be positive",
                spec.label()
            )));
        }
        for field in spec.fields() {
            if self.table.kind_of(&field.name).is_none() {
                return Err(GenerationError::Configuration(format!(
                    "spec '{}': field '{}' not present on '{}'",
                    spec.label(),
                    field.name,
                    self.table.type_name()
                )));
            }
            field.strategy.validate(&field.name)?;
        }
        Ok(count)
    }
}
