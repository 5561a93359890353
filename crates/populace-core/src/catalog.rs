use std::fmt;

use crate::error::Error;
use crate::value::{FieldKind, Scalar, Value};

/// One named, typed assignment slot on the target type.
struct FieldSlot<T> {
    name: String,
    kind: FieldKind,
    assign: Box<dyn Fn(&mut T, &Value) -> Result<(), Error>>,
}

/// Field-assignment table for one target type.
///
/// Maps field names to typed setter closures plus the field's declared kind.
/// Built once per type and reused across runs; it doubles as the field
/// catalog builder specs are validated against.
pub struct FieldTable<T> {
    type_name: String,
    slots: Vec<FieldSlot<T>>,
}

impl<T: Default> FieldTable<T> {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            slots: Vec::new(),
        }
    }

    /// Declares a field of kind `V::KIND` written through `write`.
    ///
    /// Re-declaring a name replaces the prior slot.
    pub fn field<V: Scalar + 'static>(
        mut self,
        name: &str,
        write: impl Fn(&mut T, V) + 'static,
    ) -> Self {
        let field = name.to_string();
        let assign = Box::new(move |target: &mut T, value: &Value| {
            let typed = V::from_value(value).ok_or_else(|| Error::Mismatch {
                field: field.clone(),
                expected: V::KIND,
                actual: value.kind(),
            })?;
            write(target, typed);
            Ok(())
        });
        let slot = FieldSlot {
            name: name.to_string(),
            kind: V::KIND,
            assign,
        };
        if let Some(existing) = self.slots.iter_mut().find(|s| s.name == name) {
            *existing = slot;
        } else {
            self.slots.push(slot);
        }
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Declared kind of `field`, or `None` when the field is not in the
    /// catalog.
    pub fn kind_of(&self, field: &str) -> Option<FieldKind> {
        self.slots
            .iter()
            .find(|slot| slot.name == field)
            .map(|slot| slot.kind)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.name.as_str())
    }

    /// Builds one instance from resolved field values.
    ///
    /// Starts from `T::default()`, so fields absent from `values` keep the
    /// type's default. No partial object escapes on failure.
    pub fn materialize(&self, values: &[(String, Value)]) -> Result<T, Error> {
        let mut target = T::default();
        for (name, value) in values {
            let slot = self
                .slots
                .iter()
                .find(|slot| slot.name == *name)
                .ok_or_else(|| Error::UnknownField(name.clone()))?;
            (slot.assign)(&mut target, value)?;
        }
        Ok(target)
    }
}

impl<T> fmt::Debug for FieldTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldTable")
            .field("type_name", &self.type_name)
            .field(
                "fields",
                &self.slots.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
