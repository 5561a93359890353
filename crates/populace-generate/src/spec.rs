use serde::{Deserialize, Serialize};

use populace_core::Value;

use crate::strategy::Strategy;

/// One field's configured generation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub strategy: Strategy,
}

/// A named set of field-generation rules plus a target object count: the
/// unit of one homogeneous sub-population.
///
/// Pure configuration data. Nothing is validated or generated until the spec
/// is executed by a [`PopulationRunner`](crate::PopulationRunner); invalid
/// configuration surfaces there as a `Configuration` error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSpec {
    label: String,
    fields: Vec<FieldSpec>,
    count: Option<u64>,
}

impl RecordSpec {
    /// `label` names the sub-population in logs and run reports.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            fields: Vec::new(),
            count: None,
        }
    }

    /// Samples uniformly from `values`, with replacement.
    pub fn fixed_values<V: Into<Value>>(
        self,
        field: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.with_strategy(
            field,
            Strategy::FixedSet {
                values: values.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Samples uniformly in `[low, high)`.
    pub fn range_values(self, field: &str, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        self.with_strategy(
            field,
            Strategy::Range {
                low: low.into(),
                high: high.into(),
            },
        )
    }

    /// Like [`fixed_values`](Self::fixed_values), but each distinct value is
    /// handed out at most once across the whole run, including to other
    /// specs drawing on the same field.
    pub fn exclusive_fixed_values<V: Into<Value>>(
        self,
        field: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.with_strategy(
            field,
            Strategy::ExclusiveSet {
                values: values.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Like [`range_values`](Self::range_values), with the same run-wide
    /// exclusivity guarantee.
    pub fn exclusive_range_values(
        self,
        field: &str,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        self.with_strategy(
            field,
            Strategy::ExclusiveRange {
                low: low.into(),
                high: high.into(),
            },
        )
    }

    /// Number of objects this spec materializes. Mandatory; the runner
    /// rejects specs without a positive count.
    pub fn count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub(crate) fn requested(&self) -> Option<u64> {
        self.count
    }

    // Last write wins: reconfiguring a field replaces its prior strategy.
    fn with_strategy(mut self, field: &str, strategy: Strategy) -> Self {
        if let Some(existing) = self.fields.iter_mut().find(|f| f.name == field) {
            existing.strategy = strategy;
        } else {
            self.fields.push(FieldSpec {
                name: field.to_string(),
                strategy,
            });
        }
        self
    }
}
