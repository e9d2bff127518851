use crate::ring::RingKind;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompassError {
    #[error("{ring}: expected {expected} labels, found {found}")]
    LabelCountMismatch {
        ring: RingKind,
        expected: usize,
        found: usize,
    },
    #[error("{ring}: a ring needs at least one sector")]
    EmptyRing { ring: RingKind },
    #[error("{ring}: {table} table has {found} entries, expected {expected}")]
    TableLengthMismatch {
        ring: RingKind,
        table: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{0} cannot be selected as the primary ring")]
    NotPrimary(RingKind),
    #[error("Unknown ring: {0}")]
    UnknownRing(String),
}
