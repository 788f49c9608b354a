use super::{
    extract_plan, FleetPlan, GoodLpOracle, LinearProgram, LpOracle, LpSolverKind, ModelOptions,
    ZeroTolerance,
};
use crate::error::{PlanError, PlanResult};
use fleet_core::{Horizon, ReferenceData};
use std::time::Instant;

/// Bound slack below which an empty row counts as satisfiable.
const FEASIBILITY_EPS: f64 = 1e-9;

/// Fleet planning run configuration
#[derive(Debug, Clone)]
pub struct FleetSolverConfig {
    /// Contiguous planning window
    pub horizon: Horizon,
    pub model: ModelOptions,
    pub solver: LpSolverKind,
    /// Resolved values at or below these magnitudes are treated as zero
    pub zero_tolerance: ZeroTolerance,
}

impl Default for FleetSolverConfig {
    fn default() -> Self {
        Self {
            horizon: Horizon::default(),
            model: ModelOptions::default(),
            solver: LpSolverKind::default(),
            zero_tolerance: ZeroTolerance::default(),
        }
    }
}

impl FleetSolverConfig {
    pub fn with_horizon(mut self, horizon: Horizon) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_model(mut self, model: ModelOptions) -> Self {
        self.model = model;
        self
    }

    pub fn with_solver(mut self, solver: LpSolverKind) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_zero_tolerance(mut self, zero_tolerance: ZeroTolerance) -> Self {
        self.zero_tolerance = zero_tolerance;
        self
    }
}

/// Solve the fleet plan with the configured `good_lp` backend.
pub fn solve_fleet(reference: &ReferenceData, config: &FleetSolverConfig) -> PlanResult<FleetPlan> {
    solve_fleet_with(reference, config, &GoodLpOracle::new(config.solver))
}

/// Solve the fleet plan with an arbitrary oracle.
///
/// Data integrity problems and rows that cannot hold for any assignment are
/// reported before the oracle is called.
pub fn solve_fleet_with(
    reference: &ReferenceData,
    config: &FleetSolverConfig,
    oracle: &dyn LpOracle,
) -> PlanResult<FleetPlan> {
    let start = Instant::now();
    let program = LinearProgram::build(reference, config.horizon, &config.model)?;

    tracing::debug!(
        years = program.index().num_years(),
        vehicles = program.index().num_vehicles(),
        variables = program.num_variables(),
        constraints = program.num_constraints(),
        nonzeros = program.constraints().nnz(),
        "built fleet program"
    );

    screen_empty_rows(&program)?;

    let solution = oracle.solve(&program).inspect_err(|failure| {
        tracing::info!(solver = oracle.name(), %failure, "fleet program not solved");
    })?;

    let plan = extract_plan(
        &program,
        reference,
        &solution,
        config.zero_tolerance,
        oracle.name(),
        start.elapsed(),
    )?;

    tracing::info!(
        solver = oracle.name(),
        objective = plan.objective,
        entries = plan.entries.len(),
        elapsed = ?plan.solve_time,
        "fleet plan solved"
    );
    Ok(plan)
}

fn screen_empty_rows(program: &LinearProgram) -> PlanResult<()> {
    let constraints = program.constraints();
    let rows = constraints.trivially_infeasible(FEASIBILITY_EPS);
    for &i in &rows {
        let row = constraints.row(i);
        tracing::warn!(row = %row.kind, bound = row.bound, "constraint has no variables to satisfy it");
    }
    match rows.first() {
        None => Ok(()),
        Some(&i) => {
            let row = constraints.row(i);
            Err(PlanError::Infeasible {
                reason: format!(
                    "{} requires {} but no vehicle type contributes to it",
                    row.kind, row.bound
                ),
            })
        }
    }
}
