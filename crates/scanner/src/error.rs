use crate::criterion::ScanCriterion;
use crate::filter::FilterOperator;

/// Malformed scan configuration. Always a caller error; the scan does not
/// start.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScanError {
    #[error("Unknown scan criterion: {0}")]
    UnknownCriterion(String),
    #[error("Unknown filter operator: {0}")]
    UnknownOperator(String),
    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),
    #[error("Operator {operator} on {criterion} requires a {expected} value")]
    ValueShapeMismatch {
        criterion: ScanCriterion,
        operator: FilterOperator,
        expected: &'static str,
    },
    #[error("Criterion {criterion} compares {expected} values")]
    ValueKindMismatch {
        criterion: ScanCriterion,
        expected: &'static str,
    },
    #[error("Result limit must be greater than zero")]
    ZeroLimit,
}
