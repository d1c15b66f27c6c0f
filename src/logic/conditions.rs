use crate::models::{ConditionReport, ConditionStatus, CropProfile, MetricAssessment, WeatherSnapshot};

/// Classify each current-weather metric against the crop's ranges.
pub fn analyze(weather: &WeatherSnapshot, profile: &CropProfile) -> ConditionReport {
    let temp = weather.temperature;
    let humidity = weather.humidity;
    let precip = weather.precipitation;
    let wind = weather.wind_speed;
    let uv = weather.uv_index;

    ConditionReport {
        temperature: MetricAssessment::new(
            temp,
            range_status(
                temp,
                profile.temp_optimal,
                profile.temp_min,
                profile.temp_max,
            ),
            temperature_message(temp, profile),
        ),
        humidity: MetricAssessment::new(
            humidity,
            range_status(
                humidity,
                profile.humidity_optimal,
                profile.humidity_min,
                profile.humidity_max,
            ),
            humidity_message(humidity, profile),
        ),
        precipitation: MetricAssessment::new(
            precip,
            precipitation_status(precip, profile),
            precipitation_message(precip, profile),
        ),
        wind_speed: wind_assessment(wind, profile),
        uv_index: uv_assessment(uv, profile),
    }
}

/// Optimal sub-range first, then absolute bounds. The trailing `Warning`
/// only triggers when neither comparison holds (NaN input).
pub fn range_status(value: f64, optimal: (f64, f64), min: f64, max: f64) -> ConditionStatus {
    if value >= optimal.0 && value <= optimal.1 {
        ConditionStatus::Optimal
    } else if value >= min && value <= max {
        ConditionStatus::Good
    } else if value < min || value > max {
        ConditionStatus::Critical
    } else {
        ConditionStatus::Warning
    }
}

fn temperature_message(temp: f64, p: &CropProfile) -> String {
    let (lo, hi) = p.temp_optimal;
    if temp < p.temp_min {
        format!("Too cold for optimal growth (min: {}°C)", p.temp_min)
    } else if temp > p.temp_max {
        format!("Too hot for optimal growth (max: {}°C)", p.temp_max)
    } else if temp < lo {
        format!("Slightly below optimal (optimal: {}-{}°C)", lo, hi)
    } else if temp > hi {
        format!("Slightly above optimal (optimal: {}-{}°C)", lo, hi)
    } else {
        "Ideal temperature for growth".to_string()
    }
}

fn humidity_message(humidity: f64, p: &CropProfile) -> &'static str {
    if humidity < p.humidity_min {
        "Low humidity - may need irrigation"
    } else if humidity > p.humidity_max {
        "High humidity - risk of fungal diseases"
    } else if humidity < p.humidity_optimal.0 {
        "Slightly low humidity"
    } else if humidity > p.humidity_optimal.1 {
        "Slightly high humidity"
    } else {
        "Optimal humidity level"
    }
}

pub fn precipitation_status(precip: f64, p: &CropProfile) -> ConditionStatus {
    let (lo, hi) = p.rainfall_optimal;
    if precip >= lo && precip <= hi {
        ConditionStatus::Optimal
    } else if precip < lo {
        ConditionStatus::Low
    } else if precip > hi * 1.5 {
        ConditionStatus::Excessive
    } else {
        ConditionStatus::Good
    }
}

fn precipitation_message(precip: f64, p: &CropProfile) -> &'static str {
    if precip < p.rainfall_optimal.0 {
        "Low rainfall - irrigation may be needed"
    } else if precip > p.rainfall_optimal.1 * 1.5 {
        "Excessive rainfall - ensure proper drainage"
    } else {
        "Adequate rainfall for crop needs"
    }
}

fn wind_assessment(wind: f64, p: &CropProfile) -> MetricAssessment {
    let (status, message) = if wind > p.wind_max {
        (ConditionStatus::Critical, "High wind may damage crops")
    } else if wind > p.wind_max * 0.8 {
        (ConditionStatus::Warning, "Moderate wind - monitor closely")
    } else {
        (ConditionStatus::Good, "Wind conditions are favorable")
    };
    MetricAssessment::new(wind, status, message)
}

fn uv_assessment(uv: f64, p: &CropProfile) -> MetricAssessment {
    let (status, message) = if uv > p.uv_index_max {
        (ConditionStatus::Warning, "High UV - protect crops from sunburn")
    } else {
        (ConditionStatus::Good, "UV levels are safe")
    };
    MetricAssessment::new(uv, status, message)
}
