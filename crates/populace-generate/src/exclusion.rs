use std::collections::{HashMap, HashSet};

use populace_core::Value;

/// Run-scoped record of values already claimed by exclusive strategies.
///
/// Created fresh at the start of every runner run and discarded with it. The
/// registry is shared by every spec participating in the run, keyed by field
/// name, so exclusivity holds across spec boundaries.
#[derive(Debug, Default)]
pub struct ExclusionRegistry {
    claimed: HashMap<String, HashSet<Value>>,
}

impl ExclusionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `value` for `field`. Returns `false` when the value was
    /// already claimed earlier in the run.
    pub fn try_claim(&mut self, field: &str, value: Value) -> bool {
        self.claimed.entry(field.to_string()).or_default().insert(value)
    }

    pub fn is_claimed(&self, field: &str, value: &Value) -> bool {
        self.claimed
            .get(field)
            .map(|values| values.contains(value))
            .unwrap_or(false)
    }

    /// Values claimed so far for `field`, if any.
    pub fn claimed_for(&self, field: &str) -> Option<&HashSet<Value>> {
        self.claimed.get(field)
    }
}
