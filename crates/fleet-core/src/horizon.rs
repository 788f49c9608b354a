//! Contiguous planning horizon.

use crate::DataIntegrityError;
use std::ops::RangeInclusive;

/// An inclusive, non-empty range of planning years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Horizon {
    start: u32,
    end: u32,
}

impl Horizon {
    /// Create a horizon covering `start..=end`.
    pub fn new(start: u32, end: u32) -> Result<Self, DataIntegrityError> {
        if end < start {
            return Err(DataIntegrityError::InvalidHorizon { start, end });
        }
        Ok(Self { start, end })
    }

    /// A horizon containing a single year.
    pub fn single(year: u32) -> Self {
        Self {
            start: year,
            end: year,
        }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of years in the horizon (always at least one).
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn years(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    pub fn contains(&self, year: u32) -> bool {
        self.years().contains(&year)
    }

    /// Position of `year` within the horizon.
    pub fn index_of(&self, year: u32) -> Option<usize> {
        self.contains(year).then(|| (year - self.start) as usize)
    }

    /// Year at position `index`.
    pub fn year_at(&self, index: usize) -> Option<u32> {
        (index < self.len()).then(|| self.start + index as u32)
    }
}

impl Default for Horizon {
    /// Sixteen-year window starting in 2023.
    fn default() -> Self {
        Self {
            start: 2023,
            end: 2038,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_horizon_spans_sixteen_years() {
        let horizon = Horizon::default();
        assert_eq!(horizon.len(), 16);
        assert_eq!(horizon.years().next(), Some(2023));
        assert_eq!(horizon.years().last(), Some(2038));
    }

    #[test]
    fn test_reversed_horizon_is_rejected() {
        assert_eq!(
            Horizon::new(2030, 2029),
            Err(DataIntegrityError::InvalidHorizon {
                start: 2030,
                end: 2029
            })
        );
    }

    #[test]
    fn test_index_round_trip() {
        let horizon = Horizon::new(2025, 2028).unwrap();
        assert_eq!(horizon.index_of(2027), Some(2));
        assert_eq!(horizon.year_at(2), Some(2027));
        assert_eq!(horizon.index_of(2024), None);
        assert_eq!(horizon.year_at(4), None);
    }
}
