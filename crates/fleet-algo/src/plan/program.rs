use super::{build_constraints, objective_coefficients, ConstraintMatrix, CostRates, VariableIndex};
use crate::parallel;
use fleet_core::{DataIntegrityError, Horizon, ReferenceData};
use serde::{Deserialize, Serialize};

/// Knobs that change the shape or coefficients of the program.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelOptions {
    /// Ownership cost rates applied to vehicle counts
    pub rates: CostRates,
    /// Add `distance ≤ range · count` rows for vehicles with a yearly range
    pub utilization_limits: bool,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            rates: CostRates::default(),
            utilization_limits: true,
        }
    }
}

/// Fully assembled program: `min cᵀx  s.t.  A x ≤ b, x ≥ 0`.
#[derive(Debug, Clone)]
pub struct LinearProgram {
    index: VariableIndex,
    objective: Vec<f64>,
    constraints: ConstraintMatrix,
}

impl LinearProgram {
    /// Assemble the program over `horizon`.
    ///
    /// The cost and constraint models are built independently (concurrently
    /// with the `parallel` feature). Any missing or inconsistent reference row
    /// fails here.
    pub fn build(
        reference: &ReferenceData,
        horizon: Horizon,
        options: &ModelOptions,
    ) -> Result<Self, DataIntegrityError> {
        let index = VariableIndex::new(horizon, reference.vehicle_ids().cloned())?;

        for year in reference
            .increasing_caps()
            .into_iter()
            .filter(|&year| horizon.contains(year))
        {
            tracing::warn!(year, "emission cap rises relative to the previous year");
        }

        let (objective, constraints) = parallel::join(
            || objective_coefficients(reference, &index, &options.rates),
            || build_constraints(reference, &index, options.utilization_limits),
        );

        Ok(Self {
            objective: objective?,
            constraints: constraints?,
            index,
        })
    }

    pub fn index(&self) -> &VariableIndex {
        &self.index
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn constraints(&self) -> &ConstraintMatrix {
        &self.constraints
    }

    pub fn num_variables(&self) -> usize {
        self.index.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.num_rows()
    }

    /// `cᵀx` for a vector in canonical order.
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective.iter().zip(values).map(|(c, x)| c * x).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::two_vehicle_reference;

    #[test]
    fn test_dimensions_agree() {
        let reference = two_vehicle_reference(100_000.0, 1e9);
        let program =
            LinearProgram::build(&reference, Horizon::single(2030), &ModelOptions::default())
                .unwrap();
        assert_eq!(program.num_variables(), 4);
        assert_eq!(program.objective().len(), program.num_variables());
        assert_eq!(program.constraints().num_cols(), program.num_variables());
        // demand + emissions + two utilization rows
        assert_eq!(program.num_constraints(), 4);
    }

    #[test]
    fn test_utilization_rows_are_optional() {
        let reference = two_vehicle_reference(100_000.0, 1e9);
        let options = ModelOptions {
            utilization_limits: false,
            ..ModelOptions::default()
        };
        let program = LinearProgram::build(&reference, Horizon::single(2030), &options).unwrap();
        assert_eq!(program.num_constraints(), 2);
    }

    #[test]
    fn test_objective_value_is_dot_product() {
        let reference = two_vehicle_reference(100_000.0, 1e9);
        let program =
            LinearProgram::build(&reference, Horizon::single(2030), &ModelOptions::default())
                .unwrap();
        let ones = vec![1.0; program.num_variables()];
        let expected: f64 = program.objective().iter().sum();
        assert!((program.objective_value(&ones) - expected).abs() < 1e-9);
    }
}
