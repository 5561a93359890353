use std::collections::HashSet;

use chrono::DateTime;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use populace_core::{FieldKind, Value};

use crate::errors::GenerationError;
use crate::exclusion::ExclusionRegistry;

/// Floor for the random redraw budget on exclusive draws.
const MIN_CLAIM_ATTEMPTS: u64 = 32;

/// How one field's values are produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Strategy {
    /// Uniform replacement sampling from a fixed value set.
    FixedSet { values: Vec<Value> },
    /// Uniform draw in `[low, high)`.
    Range { low: Value, high: Value },
    /// Like `FixedSet`, but each distinct value is claimed by at most one
    /// generated object across the whole run.
    ExclusiveSet { values: Vec<Value> },
    /// Like `Range`, with the same run-wide exclusivity guarantee.
    ExclusiveRange { low: Value, high: Value },
}

impl Strategy {
    pub fn is_exclusive(&self) -> bool {
        matches!(
            self,
            Strategy::ExclusiveSet { .. } | Strategy::ExclusiveRange { .. }
        )
    }

    /// Structural validation, performed once per spec before any draw.
    pub(crate) fn validate(&self, field: &str) -> Result<(), GenerationError> {
        match self {
            Strategy::FixedSet { values } | Strategy::ExclusiveSet { values } => {
                if values.is_empty() {
                    return Err(GenerationError::Configuration(format!(
                        "field '{field}': value set is empty"
                    )));
                }
                Ok(())
            }
            Strategy::Range { low, high } | Strategy::ExclusiveRange { low, high } => {
                linear_bounds(field, low, high).map(|_| ())
            }
        }
    }

    /// Draws one value, consulting and updating the registry for exclusive
    /// strategies. Redraws forced by exclusivity collisions are added to
    /// `retries`.
    pub(crate) fn draw(
        &self,
        field: &str,
        registry: &mut ExclusionRegistry,
        rng: &mut ChaCha8Rng,
        retry_factor: u32,
        retries: &mut u64,
    ) -> Result<Value, GenerationError> {
        match self {
            Strategy::FixedSet { values } => Ok(pick(values, rng)),
            Strategy::Range { low, high } => {
                let (lo, hi, kind) = linear_bounds(field, low, high)?;
                from_linear(field, kind, rng.random_range(lo..hi))
            }
            Strategy::ExclusiveSet { values } => {
                let remaining = remaining_in_set(field, values, registry);
                let (value, spent) = draw_exclusive(
                    field,
                    registry,
                    rng,
                    remaining,
                    retry_factor,
                    |rng| Ok(pick(values, rng)),
                    |registry| {
                        values
                            .iter()
                            .find(|value| !registry.is_claimed(field, value))
                            .cloned()
                    },
                )?;
                *retries += spent;
                Ok(value)
            }
            Strategy::ExclusiveRange { low, high } => {
                let (lo, hi, kind) = linear_bounds(field, low, high)?;
                let remaining = remaining_in_range(field, lo, hi, registry);
                let (value, spent) = draw_exclusive(
                    field,
                    registry,
                    rng,
                    remaining,
                    retry_factor,
                    |rng| from_linear(field, kind, rng.random_range(lo..hi)),
                    |registry| {
                        (lo..hi)
                            .filter_map(|raw| from_linear(field, kind, raw).ok())
                            .find(|value| !registry.is_claimed(field, value))
                    },
                )?;
                *retries += spent;
                Ok(value)
            }
        }
    }
}

fn pick(values: &[Value], rng: &mut ChaCha8Rng) -> Value {
    values[rng.random_range(0..values.len())].clone()
}

/// Draws candidates until one can be claimed, returning the value and the
/// number of redraws spent. The random redraw budget is proportional to the
/// remaining pool; once it is spent, an ordered scan of the pool picks the
/// next unclaimed value, so exhaustion is only reported when the pool truly
/// cannot cover the demand.
fn draw_exclusive(
    field: &str,
    registry: &mut ExclusionRegistry,
    rng: &mut ChaCha8Rng,
    remaining: u64,
    retry_factor: u32,
    mut candidate: impl FnMut(&mut ChaCha8Rng) -> Result<Value, GenerationError>,
    fallback: impl FnOnce(&ExclusionRegistry) -> Option<Value>,
) -> Result<(Value, u64), GenerationError> {
    if remaining == 0 {
        return Err(GenerationError::Exhaustion {
            field: field.to_string(),
            attempts: 0,
        });
    }
    let budget = remaining
        .saturating_mul(retry_factor as u64)
        .max(MIN_CLAIM_ATTEMPTS);
    for attempt in 0..budget {
        let value = candidate(rng)?;
        if registry.try_claim(field, value.clone()) {
            return Ok((value, attempt));
        }
    }
    // The scan stops at the first unclaimed value, so its cost tracks the
    // number of claims made so far, not the pool size.
    if let Some(value) = fallback(registry) {
        if registry.try_claim(field, value.clone()) {
            return Ok((value, budget));
        }
    }
    Err(GenerationError::Exhaustion {
        field: field.to_string(),
        attempts: budget,
    })
}

/// Distinct set members not yet claimed for `field`.
fn remaining_in_set(field: &str, values: &[Value], registry: &ExclusionRegistry) -> u64 {
    let mut distinct: HashSet<&Value> = values.iter().collect();
    if let Some(claimed) = registry.claimed_for(field) {
        distinct.retain(|value| !claimed.contains(*value));
    }
    distinct.len() as u64
}

/// Range span minus the claims that fall inside it.
fn remaining_in_range(field: &str, lo: i64, hi: i64, registry: &ExclusionRegistry) -> u64 {
    let span = (hi - lo) as u64;
    let claimed_inside = registry
        .claimed_for(field)
        .map(|claimed| {
            claimed
                .iter()
                .filter(|value| {
                    to_linear(value)
                        .map(|raw| raw >= lo && raw < hi)
                        .unwrap_or(false)
                })
                .count() as u64
        })
        .unwrap_or(0);
    span.saturating_sub(claimed_inside)
}

/// Maps range bounds onto the shared linear scale, validating kind and order.
///
/// `low` is inclusive and `high` exclusive for every rangeable kind;
/// timestamps scale to epoch milliseconds.
fn linear_bounds(
    field: &str,
    low: &Value,
    high: &Value,
) -> Result<(i64, i64, FieldKind), GenerationError> {
    let kind = low.kind();
    if high.kind() != kind {
        return Err(GenerationError::Configuration(format!(
            "field '{field}': range bounds mix {} and {}",
            kind,
            high.kind()
        )));
    }
    let (Some(lo), Some(hi)) = (to_linear(low), to_linear(high)) else {
        return Err(GenerationError::Configuration(format!(
            "field '{field}': {kind} values cannot form a range"
        )));
    };
    if lo >= hi {
        return Err(GenerationError::Configuration(format!(
            "field '{field}': range low must be below high"
        )));
    }
    Ok((lo, hi, kind))
}

fn to_linear(value: &Value) -> Option<i64> {
    match value {
        Value::Short(value) => Some(*value as i64),
        Value::Int(value) => Some(*value as i64),
        Value::Long(value) => Some(*value),
        Value::Timestamp(value) => Some(value.and_utc().timestamp_millis()),
        Value::Bool(_) | Value::Text(_) => None,
    }
}

fn from_linear(field: &str, kind: FieldKind, raw: i64) -> Result<Value, GenerationError> {
    match kind {
        FieldKind::Short => Ok(Value::Short(raw as i16)),
        FieldKind::Int => Ok(Value::Int(raw as i32)),
        FieldKind::Long => Ok(Value::Long(raw)),
        FieldKind::Timestamp => DateTime::from_timestamp_millis(raw)
            .map(|ts| Value::Timestamp(ts.naive_utc()))
            .ok_or_else(|| {
                GenerationError::Configuration(format!(
                    "field '{field}': timestamp out of representable range"
                ))
            }),
        FieldKind::Bool | FieldKind::Text => Err(GenerationError::Configuration(format!(
            "field '{field}': {kind} values cannot form a range"
        ))),
    }
}
