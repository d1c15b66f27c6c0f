use crate::error::{CropwiseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropType {
    Wheat,
    Rice,
    Cotton,
    Sugarcane,
    Vegetables,
}

impl CropType {
    pub const ALL: [CropType; 5] = [
        CropType::Wheat,
        CropType::Rice,
        CropType::Cotton,
        CropType::Sugarcane,
        CropType::Vegetables,
    ];

    /// Identifier used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Wheat => "wheat",
            CropType::Rice => "rice",
            CropType::Cotton => "cotton",
            CropType::Sugarcane => "sugarcane",
            CropType::Vegetables => "vegetables",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CropType::Wheat => "Wheat",
            CropType::Rice => "Rice",
            CropType::Cotton => "Cotton",
            CropType::Sugarcane => "Sugarcane",
            CropType::Vegetables => "Vegetables",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "wheat" => Some(CropType::Wheat),
            "rice" => Some(CropType::Rice),
            "cotton" => Some(CropType::Cotton),
            "sugarcane" => Some(CropType::Sugarcane),
            "vegetables" => Some(CropType::Vegetables),
            _ => None,
        }
    }
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Tolerable and optimal ranges for a crop.
///
/// `*_optimal` pairs are `(low, high)` and are expected to sit inside the
/// matching `*_min..=*_max` bounds. Rainfall is in mm over the planning
/// horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    pub temp_min: f64,
    pub temp_max: f64,
    pub temp_optimal: (f64, f64),
    pub humidity_min: f64,
    pub humidity_max: f64,
    pub humidity_optimal: (f64, f64),
    pub rainfall_min: f64,
    pub rainfall_max: f64,
    pub rainfall_optimal: (f64, f64),
    pub wind_max: f64,
    pub uv_index_max: f64,
}

impl CropProfile {
    pub fn builtin(crop: CropType) -> Self {
        match crop {
            CropType::Wheat => CropProfile {
                temp_min: 10.0,
                temp_max: 25.0,
                temp_optimal: (15.0, 20.0),
                humidity_min: 40.0,
                humidity_max: 70.0,
                humidity_optimal: (50.0, 60.0),
                rainfall_min: 25.0,
                rainfall_max: 75.0,
                rainfall_optimal: (40.0, 60.0),
                wind_max: 30.0,
                uv_index_max: 8.0,
            },
            CropType::Rice => CropProfile {
                temp_min: 20.0,
                temp_max: 35.0,
                temp_optimal: (25.0, 30.0),
                humidity_min: 70.0,
                humidity_max: 90.0,
                humidity_optimal: (75.0, 85.0),
                rainfall_min: 100.0,
                rainfall_max: 200.0,
                rainfall_optimal: (120.0, 180.0),
                wind_max: 20.0,
                uv_index_max: 7.0,
            },
            CropType::Cotton => CropProfile {
                temp_min: 21.0,
                temp_max: 30.0,
                temp_optimal: (24.0, 28.0),
                humidity_min: 50.0,
                humidity_max: 80.0,
                humidity_optimal: (60.0, 70.0),
                rainfall_min: 50.0,
                rainfall_max: 100.0,
                rainfall_optimal: (60.0, 80.0),
                wind_max: 25.0,
                uv_index_max: 9.0,
            },
            CropType::Sugarcane => CropProfile {
                temp_min: 20.0,
                temp_max: 35.0,
                temp_optimal: (26.0, 32.0),
                humidity_min: 60.0,
                humidity_max: 85.0,
                humidity_optimal: (70.0, 80.0),
                rainfall_min: 75.0,
                rainfall_max: 150.0,
                rainfall_optimal: (100.0, 130.0),
                wind_max: 30.0,
                uv_index_max: 8.0,
            },
            CropType::Vegetables => CropProfile {
                temp_min: 15.0,
                temp_max: 28.0,
                temp_optimal: (18.0, 24.0),
                humidity_min: 50.0,
                humidity_max: 75.0,
                humidity_optimal: (60.0, 70.0),
                rainfall_min: 30.0,
                rainfall_max: 80.0,
                rainfall_optimal: (40.0, 60.0),
                wind_max: 25.0,
                uv_index_max: 7.0,
            },
        }
    }

    pub fn temp_in_optimal(&self, t: f64) -> bool {
        t >= self.temp_optimal.0 && t <= self.temp_optimal.1
    }

    pub fn temp_in_bounds(&self, t: f64) -> bool {
        t >= self.temp_min && t <= self.temp_max
    }

    pub fn humidity_in_bounds(&self, h: f64) -> bool {
        h >= self.humidity_min && h <= self.humidity_max
    }

    /// Check that every range is ordered and that the optimal sub-ranges for
    /// temperature and humidity sit inside the absolute bounds.
    pub fn validate(&self) -> Result<()> {
        let ranges = [
            ("temperature", self.temp_min, self.temp_max, self.temp_optimal),
            (
                "humidity",
                self.humidity_min,
                self.humidity_max,
                self.humidity_optimal,
            ),
            (
                "rainfall",
                self.rainfall_min,
                self.rainfall_max,
                self.rainfall_optimal,
            ),
        ];

        for (metric, min, max, (lo, hi)) in ranges {
            if !(min <= max) {
                return Err(CropwiseError::InvalidProfile(format!(
                    "{} min {} exceeds max {}",
                    metric, min, max
                )));
            }
            if !(lo <= hi) {
                return Err(CropwiseError::InvalidProfile(format!(
                    "{} optimal range {}-{} is inverted",
                    metric, lo, hi
                )));
            }
        }

        // Rainfall optimal is compared against weekly totals, not the min/max
        // bounds, so only temperature and humidity need containment.
        for (metric, min, max, (lo, hi)) in ranges.iter().take(2) {
            if lo < min || hi > max {
                return Err(CropwiseError::InvalidProfile(format!(
                    "{} optimal range {}-{} lies outside {}-{}",
                    metric, lo, hi, min, max
                )));
            }
        }

        if !(self.wind_max > 0.0) {
            return Err(CropwiseError::InvalidProfile(
                "wind_max must be positive".into(),
            ));
        }

        Ok(())
    }
}

/// Immutable lookup from crop type to its profile.
#[derive(Debug, Clone, PartialEq)]
pub struct CropProfileTable {
    profiles: BTreeMap<CropType, CropProfile>,
}

impl CropProfileTable {
    pub fn builtin() -> Self {
        let profiles = CropType::ALL
            .iter()
            .map(|&crop| (crop, CropProfile::builtin(crop)))
            .collect();
        Self { profiles }
    }

    /// Replace built-in profiles with validated overrides.
    pub fn with_overrides(mut self, overrides: &BTreeMap<CropType, CropProfile>) -> Result<Self> {
        for (crop, profile) in overrides {
            profile.validate().map_err(|e| match e {
                CropwiseError::InvalidProfile(msg) => {
                    CropwiseError::InvalidProfile(format!("{}: {}", crop.as_str(), msg))
                }
                other => other,
            })?;
            tracing::debug!(crop = crop.as_str(), "Using configured crop profile override");
            self.profiles.insert(*crop, *profile);
        }
        Ok(self)
    }

    pub fn get(&self, crop: CropType) -> Option<&CropProfile> {
        self.profiles.get(&crop)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CropType, &CropProfile)> {
        self.profiles.iter().map(|(c, p)| (*c, p))
    }
}

impl Default for CropProfileTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_type_from_str_valid() {
        assert_eq!(CropType::from_str("wheat"), Some(CropType::Wheat));
        assert_eq!(CropType::from_str("Rice"), Some(CropType::Rice));
        assert_eq!(CropType::from_str("COTTON"), Some(CropType::Cotton));
        assert_eq!(CropType::from_str(" Sugarcane "), Some(CropType::Sugarcane));
        assert_eq!(CropType::from_str("VEGETABLES"), Some(CropType::Vegetables));
    }

    #[test]
    fn crop_type_from_str_invalid() {
        assert_eq!(CropType::from_str("barley"), None);
        assert_eq!(CropType::from_str(""), None);
        for alias in ["paddy", "veg", "vegetable", "sugar cane"] {
            assert_eq!(CropType::from_str(alias), None, "{} is not a crop type", alias);
        }
    }

    #[test]
    fn crop_type_round_trip() {
        for crop in CropType::ALL {
            assert_eq!(CropType::from_str(crop.as_str()), Some(crop));
            assert_eq!(CropType::from_str(crop.display_name()), Some(crop));
        }
    }

    #[test]
    fn builtin_profiles_are_consistent() {
        // Optimal sub-ranges must stay inside the absolute bounds, otherwise
        // the condition analyzer could report "warning" for temperature or
        // humidity.
        for (crop, profile) in CropProfileTable::builtin().iter() {
            assert!(profile.validate().is_ok(), "{:?} profile invalid", crop);
            assert!(profile.temp_optimal.0 >= profile.temp_min);
            assert!(profile.temp_optimal.1 <= profile.temp_max);
            assert!(profile.humidity_optimal.0 >= profile.humidity_min);
            assert!(profile.humidity_optimal.1 <= profile.humidity_max);
        }
    }

    #[test]
    fn builtin_table_covers_every_crop() {
        let table = CropProfileTable::builtin();
        for crop in CropType::ALL {
            assert!(table.get(crop).is_some());
        }
        assert_eq!(table.get(CropType::Wheat).unwrap().temp_min, 10.0);
        assert_eq!(table.get(CropType::Rice).unwrap().rainfall_optimal, (120.0, 180.0));
    }

    #[test]
    fn override_replaces_profile() {
        let mut custom = CropProfile::builtin(CropType::Wheat);
        custom.wind_max = 40.0;
        let overrides = BTreeMap::from([(CropType::Wheat, custom)]);

        let table = CropProfileTable::builtin().with_overrides(&overrides).unwrap();
        assert_eq!(table.get(CropType::Wheat).unwrap().wind_max, 40.0);
        assert_eq!(table.get(CropType::Rice).unwrap().wind_max, 20.0);
    }

    #[test]
    fn override_outside_bounds_rejected() {
        let mut custom = CropProfile::builtin(CropType::Cotton);
        custom.temp_optimal = (18.0, 28.0);
        let overrides = BTreeMap::from([(CropType::Cotton, custom)]);

        let err = CropProfileTable::builtin()
            .with_overrides(&overrides)
            .unwrap_err();
        assert!(matches!(err, CropwiseError::InvalidProfile(_)));
        assert_eq!(
            err.to_string(),
            "Invalid crop profile: cotton: temperature optimal range 18-28 lies outside 21-30"
        );
    }

    #[test]
    fn inverted_range_rejected() {
        let mut custom = CropProfile::builtin(CropType::Rice);
        custom.humidity_min = 95.0;
        assert!(custom.validate().is_err());
    }
}
