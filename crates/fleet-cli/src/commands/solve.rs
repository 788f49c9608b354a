use anyhow::{Context, Result};
use fleet_algo::{solve_fleet, verify_plan, FleetPlan};
use fleet_cli::SolveArgs;
use fleet_io::write_rows;
use std::fs;
use std::io::{self, Write};
use tabwriter::TabWriter;
use tracing::{info, warn};

use super::util::{configure_threads, write_output};
use super::{load_config, load_reference};

/// Relative slack for the post-solve feasibility re-check.
const VERIFY_TOLERANCE: f64 = 1e-4;

pub fn handle(args: &SolveArgs) -> Result<()> {
    let threads = configure_threads(&args.threads)?;

    let mut config = load_config(&args.data)?;
    if let Some(solver) = &args.solver {
        config.solver.backend = solver.clone();
    }
    if args.no_utilization_limits {
        config.model.utilization_limits = false;
    }
    let solver_config = config.solver_config()?;
    let reference = load_reference(&args.data, &config)?;

    info!(
        threads,
        start = solver_config.horizon.start(),
        end = solver_config.horizon.end(),
        solver = %solver_config.solver,
        "solving fleet plan"
    );
    let plan = solve_fleet(&reference, &solver_config).context("solving fleet plan")?;

    for violation in verify_plan(&plan, &reference, &solver_config.model, VERIFY_TOLERANCE) {
        warn!(%violation, "plan re-check failed");
    }

    // Render every output before any file is touched.
    let mut table = Vec::new();
    write_rows(&mut table, &plan.entries, &args.out).context("rendering plan table")?;
    let json = match &args.json {
        Some(path) => Some((path, serde_json::to_string_pretty(&plan).context("serializing plan")?)),
        None => None,
    };

    if let Some((path, json)) = &json {
        write_output(path, json.as_bytes())?;
    }
    if let Err(err) = write_output(&args.out, &table) {
        if let Some((path, _)) = &json {
            if let Err(cleanup) = fs::remove_file(path) {
                warn!(path = %path.display(), %cleanup, "could not remove partial output");
            }
        }
        return Err(err);
    }

    print!("{}", plan.summary());
    print_entries(&plan)?;
    println!("\nPlan written to {}", args.out.display());
    Ok(())
}

fn print_entries(plan: &FleetPlan) -> Result<()> {
    if plan.entries.is_empty() {
        println!("\nNo vehicles owned in any year.");
        return Ok(());
    }
    let mut tw = TabWriter::new(io::stdout());
    writeln!(tw, "\nYEAR\tVEHICLE\tCOUNT\tTYPE\tFUEL\tBUCKET\tKM/VEHICLE")?;
    for entry in &plan.entries {
        writeln!(
            tw,
            "{}\t{}\t{:.3}\t{}\t{}\t{}\t{:.1}",
            entry.year,
            entry.vehicle_id,
            entry.vehicle_count,
            entry.activity,
            entry.fuel_type,
            entry.distance_bucket,
            entry.distance_per_vehicle_km
        )?;
    }
    tw.flush()?;
    Ok(())
}
