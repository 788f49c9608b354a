pub mod completions;
pub mod solve;
pub mod util;
pub mod validate;

use anyhow::{Context, Result};
use fleet_cli::{DataArgs, FleetConfig};
use fleet_core::ReferenceData;
use fleet_io::load_reference_data;

/// Configuration with command-line year overrides applied.
fn load_config(args: &DataArgs) -> Result<FleetConfig> {
    let mut config = FleetConfig::load(args.config.as_deref())?;
    if let Some(start) = args.start_year {
        config.horizon.start_year = start;
    }
    if let Some(end) = args.end_year {
        config.horizon.end_year = end;
    }
    Ok(config)
}

fn load_reference(args: &DataArgs, config: &FleetConfig) -> Result<ReferenceData> {
    load_reference_data(&args.data, &config.data)
        .with_context(|| format!("loading reference data from {}", args.data.display()))
}
