//! Fixed vehicle categories: size classes and nominal distance buckets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DataIntegrityError;

/// Vehicle size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SizeClass {
    S1,
    S2,
    S3,
    S4,
}

/// Nominal operating-distance bucket of a vehicle type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DistanceBucket {
    D1,
    D2,
    D3,
    D4,
}

impl SizeClass {
    pub const ALL: [SizeClass; 4] = [SizeClass::S1, SizeClass::S2, SizeClass::S3, SizeClass::S4];

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeClass::S1 => "S1",
            SizeClass::S2 => "S2",
            SizeClass::S3 => "S3",
            SizeClass::S4 => "S4",
        }
    }
}

impl DistanceBucket {
    pub const ALL: [DistanceBucket; 4] = [
        DistanceBucket::D1,
        DistanceBucket::D2,
        DistanceBucket::D3,
        DistanceBucket::D4,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceBucket::D1 => "D1",
            DistanceBucket::D2 => "D2",
            DistanceBucket::D3 => "D3",
            DistanceBucket::D4 => "D4",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DistanceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeClass {
    type Err = DataIntegrityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S1" => Ok(SizeClass::S1),
            "S2" => Ok(SizeClass::S2),
            "S3" => Ok(SizeClass::S3),
            "S4" => Ok(SizeClass::S4),
            _ => Err(DataIntegrityError::UnknownCategory {
                category: "size class",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for DistanceBucket {
    type Err = DataIntegrityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "D1" => Ok(DistanceBucket::D1),
            "D2" => Ok(DistanceBucket::D2),
            "D3" => Ok(DistanceBucket::D3),
            "D4" => Ok(DistanceBucket::D4),
            _ => Err(DataIntegrityError::UnknownCategory {
                category: "distance bucket",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("s3".parse::<SizeClass>().unwrap(), SizeClass::S3);
        assert_eq!(" D2 ".parse::<DistanceBucket>().unwrap(), DistanceBucket::D2);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = "S9".parse::<SizeClass>().unwrap_err();
        assert!(err.to_string().contains("size class"));
        assert!(err.to_string().contains("S9"));
    }

    #[test]
    fn test_display_matches_table_spelling() {
        for size in SizeClass::ALL {
            assert_eq!(size.to_string().parse::<SizeClass>().unwrap(), size);
        }
        assert_eq!(DistanceBucket::D4.to_string(), "D4");
    }
}
