//! LP oracle seam
//!
//! The planner hands a fully built [`LinearProgram`] to an [`LpOracle`] and
//! receives either a primal vector in canonical order or a classified
//! failure. [`GoodLpOracle`] drives the `good_lp` backends.

use super::LinearProgram;
use anyhow::anyhow;
use clarabel::solver::SolverStatus;
use good_lp::solvers::clarabel::clarabel as clarabel_solver;
#[cfg(feature = "solver-highs")]
use good_lp::solvers::highs::highs as highs_solver;
use good_lp::{
    constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel, Variable,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Primal solution returned by an oracle.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleSolution {
    /// Values in canonical variable order
    pub values: Vec<f64>,
    pub objective: f64,
}

/// Coarse reason for a solver failure that is neither infeasible nor unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverFailureKind {
    Timeout,
    IterationLimit,
    Numerical,
    Other,
}

impl SolverFailureKind {
    /// Classify a backend message.
    pub fn classify(message: &str) -> Self {
        let message = message.to_ascii_lowercase();
        if message.contains("time") {
            SolverFailureKind::Timeout
        } else if message.contains("iteration") {
            SolverFailureKind::IterationLimit
        } else if message.contains("numeric") || message.contains("insufficient progress") {
            SolverFailureKind::Numerical
        } else {
            SolverFailureKind::Other
        }
    }
}

impl fmt::Display for SolverFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SolverFailureKind::Timeout => "timeout",
            SolverFailureKind::IterationLimit => "iteration limit",
            SolverFailureKind::Numerical => "numerical",
            SolverFailureKind::Other => "other",
        };
        f.write_str(label)
    }
}

/// Failure reported by an oracle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OracleFailure {
    #[error("problem is infeasible")]
    Infeasible,

    #[error("problem is unbounded")]
    Unbounded,

    #[error("solver failed ({kind}): {message}")]
    Internal {
        kind: SolverFailureKind,
        message: String,
    },
}

impl OracleFailure {
    pub fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        OracleFailure::Internal {
            kind: SolverFailureKind::classify(&message),
            message,
        }
    }
}

impl From<ResolutionError> for OracleFailure {
    fn from(err: ResolutionError) -> Self {
        match err {
            ResolutionError::Infeasible => OracleFailure::Infeasible,
            ResolutionError::Unbounded => OracleFailure::Unbounded,
            other => OracleFailure::internal(other.to_string()),
        }
    }
}

/// Anything that can minimise `cᵀx` subject to `A x ≤ b`, `x ≥ 0`.
pub trait LpOracle {
    fn name(&self) -> &'static str;

    fn solve(&self, program: &LinearProgram) -> Result<OracleSolution, OracleFailure>;
}

/// LP backends compiled into this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LpSolverKind {
    #[default]
    Clarabel,
    #[cfg(feature = "solver-highs")]
    Highs,
}

const AVAILABLE_LP_SOLVERS: &[&str] = &[
    "clarabel",
    #[cfg(feature = "solver-highs")]
    "highs",
];

impl LpSolverKind {
    pub fn available() -> &'static [&'static str] {
        AVAILABLE_LP_SOLVERS
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LpSolverKind::Clarabel => "clarabel",
            #[cfg(feature = "solver-highs")]
            LpSolverKind::Highs => "highs",
        }
    }
}

impl fmt::Display for LpSolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn unknown_solver_error(label: &str) -> anyhow::Error {
    anyhow!(
        "unknown lp solver '{}'; supported values: {}",
        label,
        LpSolverKind::available().join(", ")
    )
}

impl FromStr for LpSolverKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.to_ascii_lowercase();
        match normalized.as_str() {
            "clarabel" => Ok(LpSolverKind::Clarabel),
            "highs" => {
                #[cfg(feature = "solver-highs")]
                {
                    Ok(LpSolverKind::Highs)
                }
                #[cfg(not(feature = "solver-highs"))]
                {
                    Err(unknown_solver_error(&normalized))
                }
            }
            other => Err(unknown_solver_error(other)),
        }
    }
}

/// Oracle backed by a `good_lp` solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoodLpOracle {
    kind: LpSolverKind,
}

impl GoodLpOracle {
    pub fn new(kind: LpSolverKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> LpSolverKind {
        self.kind
    }
}

impl LpOracle for GoodLpOracle {
    fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    fn solve(&self, program: &LinearProgram) -> Result<OracleSolution, OracleFailure> {
        let mut vars = variables!();
        let xs: Vec<Variable> = (0..program.num_variables())
            .map(|_| vars.add(variable().min(0.0)))
            .collect();

        let objective = linear_expression(
            xs.iter()
                .zip(program.objective())
                .map(|(&x, &c)| (x, c)),
        );
        let problem = vars.minimise(objective);

        match self.kind {
            LpSolverKind::Clarabel => {
                let solution = with_rows(problem.using(clarabel_solver), program, &xs).solve()?;
                // good_lp hands back dual-infeasible runs as solved.
                if let Some(failure) = clarabel_failure(&solution.inner().status) {
                    return Err(failure);
                }
                primal(program, &solution, &xs)
            }
            #[cfg(feature = "solver-highs")]
            LpSolverKind::Highs => {
                let solution = with_rows(problem.using(highs_solver), program, &xs).solve()?;
                primal(program, &solution, &xs)
            }
        }
    }
}

/// Statuses that good_lp's clarabel driver returns as `Ok` but are not optima.
fn clarabel_failure(status: &SolverStatus) -> Option<OracleFailure> {
    match status {
        SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
            Some(OracleFailure::Unbounded)
        }
        _ => None,
    }
}

/// Sum of `c · x` over the non-zero terms.
fn linear_expression(terms: impl Iterator<Item = (Variable, f64)>) -> Expression {
    terms
        .filter(|(_, c)| *c != 0.0)
        .fold(Expression::from(0.0), |acc, (x, c)| acc + c * x)
}

fn with_rows<M: SolverModel>(mut model: M, program: &LinearProgram, xs: &[Variable]) -> M {
    let constraints = program.constraints();
    for i in 0..constraints.num_rows() {
        let terms = constraints.row_terms(i);
        // Rows without terms were screened for feasibility before solving.
        if terms.is_empty() {
            continue;
        }
        let lhs = linear_expression(terms.into_iter().map(|(j, c)| (xs[j], c)));
        let bound = constraints.row(i).canonical_bound();
        model = model.with(constraint!(lhs <= bound));
    }
    model
}

/// Read the primal vector; a non-finite objective means the run diverged.
fn primal(
    program: &LinearProgram,
    solution: &impl Solution,
    xs: &[Variable],
) -> Result<OracleSolution, OracleFailure> {
    let values: Vec<f64> = xs.iter().map(|&x| solution.value(x)).collect();
    finish(program, values)
}

fn finish(program: &LinearProgram, values: Vec<f64>) -> Result<OracleSolution, OracleFailure> {
    let objective = program.objective_value(&values);
    if !objective.is_finite() {
        return Err(OracleFailure::Unbounded);
    }
    Ok(OracleSolution { values, objective })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::ModelOptions;
    use crate::test_utils::two_vehicle_reference;
    use fleet_core::Horizon;

    #[test]
    fn test_failure_messages_are_classified() {
        assert_eq!(
            SolverFailureKind::classify("Time limit reached"),
            SolverFailureKind::Timeout
        );
        assert_eq!(
            SolverFailureKind::classify("MaxIterations"),
            SolverFailureKind::IterationLimit
        );
        assert_eq!(
            SolverFailureKind::classify("NumericalError"),
            SolverFailureKind::Numerical
        );
        assert_eq!(
            SolverFailureKind::classify("something odd"),
            SolverFailureKind::Other
        );
    }

    #[test]
    fn test_resolution_errors_map_to_failures() {
        assert_eq!(
            OracleFailure::from(ResolutionError::Infeasible),
            OracleFailure::Infeasible
        );
        assert_eq!(
            OracleFailure::from(ResolutionError::Unbounded),
            OracleFailure::Unbounded
        );
        assert!(matches!(
            OracleFailure::from(ResolutionError::Other("numerical trouble")),
            OracleFailure::Internal {
                kind: SolverFailureKind::Numerical,
                ..
            }
        ));
    }

    #[test]
    fn test_solver_kind_parsing() {
        assert_eq!("Clarabel".parse::<LpSolverKind>().unwrap(), LpSolverKind::Clarabel);
        let err = "gurobi".parse::<LpSolverKind>().unwrap_err();
        assert!(err.to_string().contains("supported values: clarabel"));
        assert!(LpSolverKind::available().contains(&"clarabel"));
    }

    #[test]
    fn test_dual_infeasible_clarabel_run_is_unbounded() {
        assert_eq!(
            clarabel_failure(&SolverStatus::DualInfeasible),
            Some(OracleFailure::Unbounded)
        );
        assert_eq!(
            clarabel_failure(&SolverStatus::AlmostDualInfeasible),
            Some(OracleFailure::Unbounded)
        );
        assert_eq!(clarabel_failure(&SolverStatus::Solved), None);
    }

    #[test]
    fn test_diverged_values_are_unbounded() {
        let reference = two_vehicle_reference(100_000.0, 1e9);
        let program =
            LinearProgram::build(&reference, Horizon::single(2030), &ModelOptions::default())
                .unwrap();
        let diverged = vec![f64::INFINITY; program.num_variables()];
        assert_eq!(finish(&program, diverged), Err(OracleFailure::Unbounded));

        let values = vec![0.0; program.num_variables()];
        assert_eq!(finish(&program, values).unwrap().objective, 0.0);
    }
}
