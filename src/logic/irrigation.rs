use super::calculations::{day_name, mean_precipitation};
use crate::models::{CropProfile, ForecastDay, IrrigationRecommendation, Urgency, WeatherSnapshot};

/// Heat above this adds a penalty when choosing the irrigation day
const HOT_DAY_C: f64 = 30.0;
const HOT_DAY_PENALTY: f64 = 10.0;

/// Irrigation plan from the rainfall deficit over the forecast horizon.
///
/// The weekly need is always `rainfall_optimal.1 * 7`, independent of how
/// many forecast days are present.
pub fn plan(
    current: &WeatherSnapshot,
    forecast: &[ForecastDay],
    profile: &CropProfile,
) -> IrrigationRecommendation {
    let total_precip =
        current.precipitation + mean_precipitation(forecast) * forecast.len() as f64;
    let weekly_need = profile.rainfall_optimal.1 * 7.0;
    let deficit = weekly_need - total_precip;

    tracing::debug!(total_precip, weekly_need, deficit, "Irrigation deficit");

    if deficit <= 0.0 || deficit.is_nan() {
        return IrrigationRecommendation {
            needed: false,
            urgency: Urgency::Low,
            amount: 0,
            timing: "Not needed".to_string(),
            message: "Natural rainfall is sufficient".to_string(),
        };
    }

    let amount = deficit.round() as u32;
    let timing = best_irrigation_time(forecast);

    let (urgency, message) = if deficit > 20.0 {
        let urgency = if deficit > 50.0 {
            Urgency::High
        } else {
            Urgency::Medium
        };
        (
            urgency,
            format!(
                "Irrigation recommended: {}mm needed. Best time: {}",
                amount, timing
            ),
        )
    } else {
        (
            Urgency::Low,
            format!(
                "Light irrigation may be beneficial: {}mm. Best time: {}",
                amount, timing
            ),
        )
    };

    IrrigationRecommendation {
        needed: true,
        urgency,
        amount,
        timing,
        message,
    }
}

/// Calmest, coolest forecast day; earliest wins ties.
pub fn best_irrigation_time(forecast: &[ForecastDay]) -> String {
    let score = |day: &ForecastDay| {
        day.wind_speed
            + if day.max_temp > HOT_DAY_C {
                HOT_DAY_PENALTY
            } else {
                0.0
            }
    };

    let best = forecast
        .iter()
        .enumerate()
        .fold(None::<(usize, f64)>, |best, (i, day)| {
            let s = score(day);
            match best {
                Some((_, best_score)) if s >= best_score => best,
                _ => Some((i, s)),
            }
        });

    match best {
        Some((index, _)) => format!("{} (6-8 AM)", day_name(index)),
        None => "Early morning (6-8 AM)".to_string(),
    }
}
