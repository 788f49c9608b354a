use crate::plan::{OracleFailure, SolverFailureKind};
use fleet_core::DataIntegrityError;
use thiserror::Error;

/// Planning failure. No partial plan accompanies any of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("data integrity error: {0}")]
    DataIntegrity(#[from] DataIntegrityError),

    #[error("infeasible: {reason}")]
    Infeasible { reason: String },

    #[error("unbounded: total cost can decrease without limit")]
    Unbounded,

    #[error("solver internal error ({kind}): {message}")]
    SolverInternal {
        kind: SolverFailureKind,
        message: String,
    },
}

impl PlanError {
    /// Stable machine-readable label of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            PlanError::DataIntegrity(_) => "data_integrity",
            PlanError::Infeasible { .. } => "infeasible",
            PlanError::Unbounded => "unbounded",
            PlanError::SolverInternal { .. } => "solver_internal",
        }
    }

    pub(crate) fn numerical(message: impl Into<String>) -> Self {
        PlanError::SolverInternal {
            kind: SolverFailureKind::Numerical,
            message: message.into(),
        }
    }
}

impl From<OracleFailure> for PlanError {
    fn from(failure: OracleFailure) -> Self {
        match failure {
            OracleFailure::Infeasible => PlanError::Infeasible {
                reason: "the solver proved that no plan meets every demand and emission row"
                    .to_string(),
            },
            OracleFailure::Unbounded => PlanError::Unbounded,
            OracleFailure::Internal { kind, message } => PlanError::SolverInternal { kind, message },
        }
    }
}

pub type PlanResult<T> = Result<T, PlanError>;
