use super::calculations::day_name;
use crate::models::{ActivityDay, ActivityPlan, CropProfile, ForecastDay};

/// Baseline score used for every activity when there is no forecast at all
const NO_FORECAST_SCORE: u32 = 70;

/// Pick the best forecast day for harvesting, spraying and fertilizing.
///
/// Each activity starts from a synthetic "Today" with no rain, no wind and
/// 25°C; a forecast day only replaces it with a strictly higher score.
pub fn plan(forecast: &[ForecastDay], profile: &CropProfile) -> ActivityPlan {
    if forecast.is_empty() {
        return ActivityPlan {
            harvest: today(NO_FORECAST_SCORE, "Current conditions are suitable"),
            spray: today(NO_FORECAST_SCORE, "Weather is favorable"),
            fertilize: today(NO_FORECAST_SCORE, "Good conditions for application"),
        };
    }

    let neutral = ForecastDay::new(25.0, 0.0, 0.0);

    let harvest = best_day(
        forecast,
        harvest_score(&neutral, profile),
        |_, day| harvest_score(day, profile),
        harvest_reason,
    );
    let spray = best_day(
        forecast,
        spray_score(&neutral, None),
        |i, day| spray_score(day, forecast.get(i + 1)),
        spray_reason,
    );
    let fertilize = best_day(
        forecast,
        fertilize_score(&neutral),
        |_, day| fertilize_score(day),
        fertilize_reason,
    );

    ActivityPlan {
        harvest,
        spray,
        fertilize,
    }
}

fn today(score: u32, reason: &str) -> ActivityDay {
    ActivityDay {
        day: "Today".to_string(),
        score,
        reason: reason.to_string(),
        forecast_index: None,
    }
}

fn best_day<S, R>(forecast: &[ForecastDay], baseline: u32, score: S, reason: R) -> ActivityDay
where
    S: Fn(usize, &ForecastDay) -> u32,
    R: Fn(&ForecastDay) -> &'static str,
{
    forecast
        .iter()
        .enumerate()
        .fold(today(baseline, "Current conditions"), |best, (i, day)| {
            let s = score(i, day);
            if s > best.score {
                ActivityDay {
                    day: day_name(i),
                    score: s,
                    reason: reason(day).to_string(),
                    forecast_index: Some(i),
                }
            } else {
                best
            }
        })
}

pub fn harvest_score(day: &ForecastDay, profile: &CropProfile) -> u32 {
    let mut score: i32 = 100;
    if day.precipitation > 5.0 {
        score -= 40;
    }
    if day.wind_speed > profile.wind_max * 0.7 {
        score -= 20;
    }
    if day.max_temp > profile.temp_max {
        score -= 15;
    }
    if day.max_temp < profile.temp_min {
        score -= 15;
    }
    score.max(0) as u32
}

/// `next_day` is the following forecast day, if any; rain there washes the
/// spray off.
pub fn spray_score(day: &ForecastDay, next_day: Option<&ForecastDay>) -> u32 {
    let mut score: i32 = 100;
    if day.precipitation > 2.0 {
        score -= 50;
    }
    if next_day.is_some_and(|next| next.precipitation > 5.0) {
        score -= 30;
    }
    if day.wind_speed > 15.0 {
        score -= 30;
    }
    if day.max_temp > 30.0 {
        score -= 15;
    }
    score.max(0) as u32
}

pub fn fertilize_score(day: &ForecastDay) -> u32 {
    let mut score: i32 = 100;
    if day.precipitation > 0.0 && day.precipitation < 10.0 {
        score += 20;
    }
    if day.precipitation > 20.0 {
        score -= 30;
    }
    if day.max_temp > 32.0 {
        score -= 15;
    }
    score.clamp(0, 100) as u32
}

fn harvest_reason(day: &ForecastDay) -> &'static str {
    if day.precipitation < 2.0 && day.wind_speed < 15.0 {
        "Dry and calm conditions"
    } else if day.precipitation < 5.0 {
        "Minimal rain expected"
    } else {
        "Moderate conditions"
    }
}

fn spray_reason(day: &ForecastDay) -> &'static str {
    if day.precipitation < 1.0 && day.wind_speed < 10.0 {
        "Dry and calm - ideal for spraying"
    } else if day.precipitation < 2.0 {
        "Minimal rain - suitable for spraying"
    } else {
        "Moderate conditions"
    }
}

fn fertilize_reason(day: &ForecastDay) -> &'static str {
    if day.precipitation > 0.0 && day.precipitation < 10.0 {
        "Light rain expected - perfect for fertilizer"
    } else if day.precipitation < 2.0 {
        "Dry conditions - water after application"
    } else if day.precipitation > 20.0 {
        "Heavy rain expected - fertilizer may wash away"
    } else {
        "Moderate conditions"
    }
}
