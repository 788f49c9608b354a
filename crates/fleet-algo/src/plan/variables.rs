//! Decision variable index space
//!
//! Every vector handed to or returned by the solver is laid out in the same
//! canonical order:
//!
//! ```text
//! position = family_offset + year_index * V + vehicle_index
//!
//! family_offset = 0      for count[year][vehicle]
//! family_offset = Y * V  for distance[year][vehicle]
//! ```
//!
//! with years ascending and vehicle ids ascending. [`VariableIndex::key`] and
//! [`VariableIndex::position`] are inverse to each other.

use fleet_core::{DataIntegrityError, Horizon, VehicleId};
use std::collections::HashMap;
use std::fmt;

/// The two families of decision variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariableFamily {
    /// Number of vehicles owned in a year
    Count,
    /// Total km driven by a vehicle type in a year
    Distance,
}

impl VariableFamily {
    pub const ALL: [VariableFamily; 2] = [VariableFamily::Count, VariableFamily::Distance];

    fn ordinal(self) -> usize {
        match self {
            VariableFamily::Count => 0,
            VariableFamily::Distance => 1,
        }
    }
}

impl fmt::Display for VariableFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableFamily::Count => write!(f, "count"),
            VariableFamily::Distance => write!(f, "distance"),
        }
    }
}

/// Semantic identity of one decision variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableKey {
    pub family: VariableFamily,
    pub year: u32,
    pub vehicle: VehicleId,
}

impl fmt::Display for VariableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}][{}]", self.family, self.year, self.vehicle)
    }
}

/// Bijection between flat solver positions and [`VariableKey`]s.
///
/// Built once per run and never mutated.
#[derive(Debug, Clone)]
pub struct VariableIndex {
    horizon: Horizon,
    vehicles: Vec<VehicleId>,
    vehicle_positions: HashMap<VehicleId, usize>,
}

impl VariableIndex {
    /// Build the index space for `horizon` x `vehicles`.
    ///
    /// Vehicle ids are sorted; duplicates and an empty set are rejected.
    pub fn new<I>(horizon: Horizon, vehicles: I) -> Result<Self, DataIntegrityError>
    where
        I: IntoIterator<Item = VehicleId>,
    {
        let mut vehicles: Vec<VehicleId> = vehicles.into_iter().collect();
        if vehicles.is_empty() {
            return Err(DataIntegrityError::NoVehicles);
        }
        vehicles.sort();

        let mut vehicle_positions = HashMap::with_capacity(vehicles.len());
        for (position, id) in vehicles.iter().enumerate() {
            if vehicle_positions.insert(id.clone(), position).is_some() {
                return Err(DataIntegrityError::DuplicateVehicle {
                    vehicle: id.clone(),
                    table: "decision variables",
                });
            }
        }

        Ok(Self {
            horizon,
            vehicles,
            vehicle_positions,
        })
    }

    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// Vehicle ids in canonical order.
    pub fn vehicles(&self) -> &[VehicleId] {
        &self.vehicles
    }

    pub fn num_years(&self) -> usize {
        self.horizon.len()
    }

    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    /// Number of variables in one family (`Y * V`).
    pub fn family_len(&self) -> usize {
        self.num_years() * self.num_vehicles()
    }

    /// Total number of variables (`2 * Y * V`).
    pub fn len(&self) -> usize {
        2 * self.family_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position in canonical order of a vehicle id.
    pub fn vehicle_position(&self, vehicle: &VehicleId) -> Option<usize> {
        self.vehicle_positions.get(vehicle).copied()
    }

    /// Flat position from dense indices; the caller guarantees bounds.
    #[inline]
    pub fn position_at(&self, family: VariableFamily, year_index: usize, vehicle_index: usize) -> usize {
        debug_assert!(year_index < self.num_years());
        debug_assert!(vehicle_index < self.num_vehicles());
        family.ordinal() * self.family_len() + year_index * self.num_vehicles() + vehicle_index
    }

    #[inline]
    pub fn count_at(&self, year_index: usize, vehicle_index: usize) -> usize {
        self.position_at(VariableFamily::Count, year_index, vehicle_index)
    }

    #[inline]
    pub fn distance_at(&self, year_index: usize, vehicle_index: usize) -> usize {
        self.position_at(VariableFamily::Distance, year_index, vehicle_index)
    }

    /// Encode a semantic key into its flat position.
    pub fn position(&self, family: VariableFamily, year: u32, vehicle: &VehicleId) -> Option<usize> {
        let year_index = self.horizon.index_of(year)?;
        let vehicle_index = self.vehicle_position(vehicle)?;
        Some(self.position_at(family, year_index, vehicle_index))
    }

    /// Decode a flat position into its semantic key.
    pub fn key(&self, position: usize) -> Option<VariableKey> {
        if position >= self.len() {
            return None;
        }
        let family_len = self.family_len();
        let family = if position < family_len {
            VariableFamily::Count
        } else {
            VariableFamily::Distance
        };
        let within = position % family_len;
        let year_index = within / self.num_vehicles();
        let vehicle_index = within % self.num_vehicles();
        Some(VariableKey {
            family,
            year: self.horizon.year_at(year_index)?,
            vehicle: self.vehicles[vehicle_index].clone(),
        })
    }

    /// All keys in canonical order.
    pub fn keys(&self) -> impl Iterator<Item = VariableKey> + '_ {
        (0..self.len()).filter_map(move |position| self.key(position))
    }
}
