use crate::data::SlotRef;
use thiserror::Error;

/// Structural input errors. Solve outcomes (infeasible, unknown) are not
/// errors; they are reported through `SolveStatus`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SolverError {
    /// Malformed dimensions or an unusable employee list, caught before any
    /// decision variable is created.
    #[error("invalid configuration: {reason}")]
    Configuration { reason: String },

    /// A forced assignment coincides with an unavailability entry.
    #[error("conflict for {employee}: {slot} is forced but marked unavailable")]
    Conflict { employee: String, slot: SlotRef },
}

impl SolverError {
    pub fn configuration(reason: impl Into<String>) -> Self {
        SolverError::Configuration {
            reason: reason.into(),
        }
    }
}
