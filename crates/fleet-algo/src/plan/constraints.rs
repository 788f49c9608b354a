//! Constraint rows in canonical ≤ form
//!
//! ```text
//! demand       Σ_{v: size(v)=s} distance[y][v]            ≥ Σ_buckets demand(y, s)
//! emissions    Σ_v ef(fuel_v) · cons_v · distance[y][v]    ≤ cap(y)
//! utilization  distance[y][v] - range_v · count[y][v]      ≤ 0
//! ```
//!
//! Demand rows are indexed by (year, size class), never by distance bucket.
//! Rows are laid out demand first (year-major, sizes ascending), then one
//! emission row per year, then the optional utilization rows. The layout and
//! the number of non-zeros are fixed before any coefficient is written.

use super::VariableIndex;
use fleet_core::{DataIntegrityError, ReferenceData, SizeClass, VehicleId};
use sprs::{CsMat, TriMat};
use std::fmt;

/// Direction of a constraint as stated in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    LessEq,
    GreaterEq,
}

impl ConstraintSense {
    /// Factor turning the stated row into its canonical ≤ form.
    pub fn canonical_sign(self) -> f64 {
        match self {
            ConstraintSense::LessEq => 1.0,
            ConstraintSense::GreaterEq => -1.0,
        }
    }
}

/// What a constraint row models.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Distance driven by one size class covers its demand
    Demand { year: u32, size: SizeClass },
    /// Fleet emissions stay under the yearly cap
    Emission { year: u32 },
    /// Distance driven is bounded by the range of the owned vehicles
    Utilization { year: u32, vehicle: VehicleId },
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::Demand { year, size } => write!(f, "demand[{year}][{size}]"),
            ConstraintKind::Emission { year } => write!(f, "emissions[{year}]"),
            ConstraintKind::Utilization { year, vehicle } => {
                write!(f, "utilization[{year}][{vehicle}]")
            }
        }
    }
}

/// Row metadata: kind, stated direction and stated right-hand side.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintRow {
    pub kind: ConstraintKind,
    pub sense: ConstraintSense,
    pub bound: f64,
}

impl ConstraintRow {
    /// Right-hand side in canonical ≤ form.
    pub fn canonical_bound(&self) -> f64 {
        self.sense.canonical_sign() * self.bound
    }
}

/// Sparse constraint system `A x ≤ b` over the decision variables.
#[derive(Debug, Clone)]
pub struct ConstraintMatrix {
    rows: Vec<ConstraintRow>,
    coefficients: CsMat<f64>,
}

impl ConstraintMatrix {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.coefficients.cols()
    }

    pub fn nnz(&self) -> usize {
        self.coefficients.nnz()
    }

    pub fn rows(&self) -> &[ConstraintRow] {
        &self.rows
    }

    pub fn row(&self, i: usize) -> &ConstraintRow {
        &self.rows[i]
    }

    /// Canonical coefficient at (row, column); zero if not stored.
    pub fn coefficient(&self, row: usize, col: usize) -> f64 {
        self.coefficients.get(row, col).copied().unwrap_or(0.0)
    }

    /// Canonical non-zero terms `(column, coefficient)` of row `i`.
    pub fn row_terms(&self, i: usize) -> Vec<(usize, f64)> {
        self.coefficients
            .outer_view(i)
            .map(|row| row.iter().map(|(j, &c)| (j, c)).collect())
            .unwrap_or_default()
    }

    /// Canonical left-hand side of row `i` at `x`.
    pub fn canonical_lhs(&self, i: usize, x: &[f64]) -> f64 {
        self.coefficients
            .outer_view(i)
            .map(|row| row.iter().map(|(j, &c)| c * x[j]).sum())
            .unwrap_or(0.0)
    }

    /// Left-hand side of row `i` at `x`, in the row's stated direction.
    pub fn stated_lhs(&self, i: usize, x: &[f64]) -> f64 {
        self.rows[i].sense.canonical_sign() * self.canonical_lhs(i, x)
    }

    /// Rows with no terms whose canonical bound is below `-tolerance`:
    /// `0 ≤ b` with `b < 0` can never hold.
    pub fn trivially_infeasible(&self, tolerance: f64) -> Vec<usize> {
        (0..self.num_rows())
            .filter(|&i| {
                let empty = self
                    .coefficients
                    .outer_view(i)
                    .map_or(true, |row| row.nnz() == 0);
                empty && self.rows[i].canonical_bound() < -tolerance
            })
            .collect()
    }
}

/// Per-vehicle terms resolved once from the reference data.
#[derive(Debug, Clone)]
struct VehicleTerms {
    size: SizeClass,
    emissions_per_km: f64,
    yearly_range_km: Option<f64>,
}

/// Build the demand, emission and (optionally) utilization rows.
///
/// A missing demand row for a requested (year, size) or a missing emission
/// cap for a horizon year fails here, before any solver is involved.
pub fn build_constraints(
    reference: &ReferenceData,
    index: &VariableIndex,
    utilization_limits: bool,
) -> Result<ConstraintMatrix, DataIntegrityError> {
    let horizon = index.horizon();
    let terms: Vec<VehicleTerms> = index
        .vehicles()
        .iter()
        .map(|id| {
            let spec = reference.vehicle(id)?;
            let (profile, fuel) = reference.fuel_for(id)?;
            Ok(VehicleTerms {
                size: spec.size_class,
                emissions_per_km: fuel.emissions_per_km(profile.fuel_consumption_per_km),
                yearly_range_km: spec.yearly_range_km,
            })
        })
        .collect::<Result<_, DataIntegrityError>>()?;

    let sizes = reference.requested_size_classes();
    let ranged = if utilization_limits {
        terms.iter().filter(|t| t.yearly_range_km.is_some()).count()
    } else {
        0
    };
    let num_rows = horizon.len() * (sizes.len() + 1 + ranged);

    // Layout and right-hand sides first: every lookup failure surfaces here.
    let mut rows = Vec::with_capacity(num_rows);
    for year in horizon.years() {
        for &size in &sizes {
            rows.push(ConstraintRow {
                kind: ConstraintKind::Demand { year, size },
                sense: ConstraintSense::GreaterEq,
                bound: reference.demand(year, size)?,
            });
        }
    }
    for year in horizon.years() {
        rows.push(ConstraintRow {
            kind: ConstraintKind::Emission { year },
            sense: ConstraintSense::LessEq,
            bound: reference.emission_cap(year)?,
        });
    }
    if utilization_limits {
        for year in horizon.years() {
            for (id, vehicle) in index.vehicles().iter().zip(&terms) {
                if vehicle.yearly_range_km.is_some() {
                    rows.push(ConstraintRow {
                        kind: ConstraintKind::Utilization {
                            year,
                            vehicle: id.clone(),
                        },
                        sense: ConstraintSense::LessEq,
                        bound: 0.0,
                    });
                }
            }
        }
    }
    debug_assert_eq!(rows.len(), num_rows);

    let nnz: usize = rows
        .iter()
        .map(|row| match &row.kind {
            ConstraintKind::Demand { size, .. } => terms.iter().filter(|t| t.size == *size).count(),
            ConstraintKind::Emission { .. } => terms.len(),
            ConstraintKind::Utilization { .. } => 2,
        })
        .sum();

    let mut triplets = TriMat::with_capacity((num_rows, index.len()), nnz);
    for (i, row) in rows.iter().enumerate() {
        let sign = row.sense.canonical_sign();
        let mut add = |col: usize, value: f64| {
            if value != 0.0 {
                triplets.add_triplet(i, col, sign * value);
            }
        };
        match &row.kind {
            ConstraintKind::Demand { year, size } => {
                let y = year_index(index, *year);
                for (v, vehicle) in terms.iter().enumerate() {
                    if vehicle.size == *size {
                        add(index.distance_at(y, v), 1.0);
                    }
                }
            }
            ConstraintKind::Emission { year } => {
                let y = year_index(index, *year);
                for (v, vehicle) in terms.iter().enumerate() {
                    add(index.distance_at(y, v), vehicle.emissions_per_km);
                }
            }
            ConstraintKind::Utilization { year, vehicle } => {
                let y = year_index(index, *year);
                let v = index
                    .vehicle_position(vehicle)
                    .ok_or_else(|| DataIntegrityError::UnknownVehicle {
                        vehicle: vehicle.clone(),
                        table: "decision variables",
                    })?;
                let range = terms[v].yearly_range_km.unwrap_or(0.0);
                add(index.count_at(y, v), -range);
                add(index.distance_at(y, v), 1.0);
            }
        }
    }

    Ok(ConstraintMatrix {
        rows,
        coefficients: triplets.to_csr(),
    })
}

/// Rows are only laid out for horizon years.
fn year_index(index: &VariableIndex, year: u32) -> usize {
    index.horizon().index_of(year).unwrap_or_default()
}
