pub mod cli;
pub mod config;

pub use cli::{build_cli_command, Cli, Commands, DataArgs, SolveArgs};
pub use config::FleetConfig;

use fleet_algo::PlanError;
use fleet_io::IoError;

/// Process exit code for a failed command.
///
/// | code | meaning |
/// |------|---------|
/// | 1 | any other error |
/// | 2 | data integrity |
/// | 3 | infeasible |
/// | 4 | unbounded |
/// | 5 | solver internal |
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(plan) = err.downcast_ref::<PlanError>() {
        return match plan {
            PlanError::DataIntegrity(_) => 2,
            PlanError::Infeasible { .. } => 3,
            PlanError::Unbounded => 4,
            PlanError::SolverInternal { .. } => 5,
        };
    }
    match err.downcast_ref::<IoError>() {
        Some(IoError::Integrity(_)) => 2,
        _ if err.downcast_ref::<fleet_core::DataIntegrityError>().is_some() => 2,
        _ => 1,
    }
}
