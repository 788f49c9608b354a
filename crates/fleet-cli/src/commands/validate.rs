use anyhow::{Context, Result};
use fleet_algo::LinearProgram;
use fleet_cli::DataArgs;

use super::{load_config, load_reference};

pub fn handle(args: &DataArgs) -> Result<()> {
    let config = load_config(args)?;
    let solver_config = config.solver_config()?;
    let reference = load_reference(args, &config)?;

    // Building the program resolves every demand and cap lookup of the horizon.
    let program = LinearProgram::build(&reference, solver_config.horizon, &solver_config.model)
        .context("building fleet program")?;

    let horizon = solver_config.horizon;
    println!("Reference data is valid");
    println!("  Vehicles    : {}", reference.num_vehicles());
    println!(
        "  Horizon     : {}..={} ({} years)",
        horizon.start(),
        horizon.end(),
        horizon.len()
    );
    println!("  Variables   : {}", program.num_variables());
    println!("  Constraints : {}", program.num_constraints());

    let empty = program.constraints().trivially_infeasible(0.0);
    for &row in &empty {
        println!(
            "  Warning: {} has no vehicle type able to serve it",
            program.constraints().row(row).kind
        );
    }
    for year in reference
        .increasing_caps()
        .into_iter()
        .filter(|&year| horizon.contains(year))
    {
        println!("  Warning: emission cap rises in {year}");
    }
    Ok(())
}
