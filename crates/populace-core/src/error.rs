use thiserror::Error;

use crate::value::FieldKind;

/// Errors raised by the materialization contract.
#[derive(Debug, Error)]
pub enum Error {
    /// The field is not declared on the target type's field table.
    #[error("unknown field '{0}'")]
    UnknownField(String),
    /// A value's kind cannot be assigned to the field's declared kind.
    #[error("cannot assign {actual} value to {expected} field '{field}'")]
    Mismatch {
        field: String,
        expected: FieldKind,
        actual: FieldKind,
    },
}

/// Convenience alias for results returned by Populace core.
pub type Result<T> = std::result::Result<T, Error>;
