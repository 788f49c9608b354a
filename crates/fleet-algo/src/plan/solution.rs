//! Solved fleet plan

use fleet_core::{DistanceBucket, FuelType, SizeClass, VehicleId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Activity label of a plan entry.
///
/// `Use` when the vehicle type drives a positive distance in the year,
/// otherwise `Buy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activity {
    Buy,
    Use,
}

impl Activity {
    pub fn from_distance(distance_km: f64) -> Self {
        if distance_km > 0.0 {
            Activity::Use
        } else {
            Activity::Buy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Buy => "Buy",
            Activity::Use => "Use",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the output plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetPlanEntry {
    pub year: u32,
    pub vehicle_id: VehicleId,
    pub vehicle_count: f64,
    #[serde(rename = "activity_label")]
    pub activity: Activity,
    pub fuel_type: FuelType,
    pub distance_bucket: DistanceBucket,
    pub distance_per_vehicle_km: f64,
}

/// Resolved value of both variables of one (year, vehicle) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedVehicleYear {
    pub year: u32,
    pub vehicle_id: VehicleId,
    pub count: f64,
    pub distance_km: f64,
}

/// Demand against covered distance for one size class in one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeCoverage {
    pub size_class: SizeClass,
    pub demand_km: f64,
    pub covered_km: f64,
}

/// Cost and emission breakdown of one planning year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: u32,
    pub vehicles_owned: f64,
    pub ownership_cost: f64,
    pub fuel_cost: f64,
    pub emissions: f64,
    pub emission_cap: f64,
    pub coverage: Vec<SizeCoverage>,
}

impl YearSummary {
    pub fn total_cost(&self) -> f64 {
        self.ownership_cost + self.fuel_cost
    }

    /// Fraction of the emission cap used; 0 for a zero cap with no emissions.
    pub fn cap_utilization(&self) -> f64 {
        if self.emission_cap > 0.0 {
            self.emissions / self.emission_cap
        } else if self.emissions > 0.0 {
            f64::INFINITY
        } else {
            0.0
        }
    }
}

/// Optimal fleet plan over the horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetPlan {
    /// Vehicle types with a positive count, in canonical order
    pub entries: Vec<FleetPlanEntry>,
    /// Every (year, vehicle) pair, including zero rows
    pub resolved: Vec<ResolvedVehicleYear>,
    pub years: Vec<YearSummary>,
    /// Total cost at the resolved values
    pub objective: f64,
    pub solver: String,
    pub solve_time: Duration,
}

impl FleetPlan {
    pub fn ownership_cost(&self) -> f64 {
        self.years.iter().map(|y| y.ownership_cost).sum()
    }

    pub fn fuel_cost(&self) -> f64 {
        self.years.iter().map(|y| y.fuel_cost).sum()
    }

    pub fn total_emissions(&self) -> f64 {
        self.years.iter().map(|y| y.emissions).sum()
    }

    /// Entries for a single year.
    pub fn entries_for(&self, year: u32) -> impl Iterator<Item = &FleetPlanEntry> + '_ {
        self.entries.iter().filter(move |e| e.year == year)
    }

    /// Resolved (count, distance) of a vehicle in a year.
    pub fn resolved_for(&self, year: u32, vehicle: &VehicleId) -> Option<&ResolvedVehicleYear> {
        self.resolved
            .iter()
            .find(|r| r.year == year && &r.vehicle_id == vehicle)
    }

    /// Human-readable report.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Fleet Plan Summary\n{}\n", "=".repeat(40)));
        s.push_str(&format!("Solver: {}\n", self.solver));
        s.push_str(&format!("Total Cost: ${:.2}\n", self.objective));
        s.push_str(&format!("  Ownership: ${:.2}\n", self.ownership_cost()));
        s.push_str(&format!("  Fuel: ${:.2}\n", self.fuel_cost()));
        s.push_str(&format!("Total Emissions: {:.2}\n", self.total_emissions()));
        s.push_str(&format!("Plan Entries: {}\n", self.entries.len()));
        s.push_str(&format!("Solve Time: {:.2?}\n", self.solve_time));

        if !self.years.is_empty() {
            s.push_str("\nYears:\n");
            for year in &self.years {
                s.push_str(&format!(
                    "  {}  vehicles {:>10.2}  cost ${:>14.2}  emissions {:>12.2} / {:.2} ({:.1}%)\n",
                    year.year,
                    year.vehicles_owned,
                    year.total_cost(),
                    year.emissions,
                    year.emission_cap,
                    year.cap_utilization() * 100.0
                ));
            }
        }
        s
    }
}
