use super::calculations::total_precipitation;
use crate::models::{CropProfile, ForecastDay, PestDiseaseRisk, WeatherSnapshot};

const PEST_WEIGHT: f64 = 0.3;

/// Composite 0-100 crop-loss risk from additive penalties.
///
/// `pest_risk` must be the pest/disease assessment for the same inputs; it is
/// taken as an argument so a request evaluates it only once.
pub fn score(
    current: &WeatherSnapshot,
    forecast: &[ForecastDay],
    profile: &CropProfile,
    pest_risk: &PestDiseaseRisk,
) -> u8 {
    let mut risk = 0.0;

    if !profile.temp_in_bounds(current.temperature) {
        risk += 30.0;
    } else if !profile.temp_in_optimal(current.temperature) {
        risk += 15.0;
    }

    if !profile.humidity_in_bounds(current.humidity) {
        risk += 20.0;
    }

    let weekly_precip = current.precipitation + total_precipitation(forecast);
    if weekly_precip > profile.rainfall_optimal.1 * 2.0 {
        // flooding
        risk += 25.0;
    } else if weekly_precip < profile.rainfall_optimal.0 * 0.5 {
        // drought
        risk += 20.0;
    }

    if current.wind_speed > profile.wind_max {
        risk += 15.0;
    }

    risk += f64::from(pest_risk.risk_score) * PEST_WEIGHT;

    tracing::debug!(risk, weekly_precip, "Crop loss risk");

    // NaN inputs saturate to 0 in the cast
    risk.round().clamp(0.0, 100.0) as u8
}
