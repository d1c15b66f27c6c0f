use crate::models::ForecastDay;

const DAY_NAMES: [&str; 5] = ["Today", "Tomorrow", "Day 3", "Day 4", "Day 5"];

/// Total forecast precipitation in mm
pub fn total_precipitation(forecast: &[ForecastDay]) -> f64 {
    forecast.iter().map(|d| d.precipitation).sum()
}

/// Mean daily forecast precipitation; zero for an empty forecast
pub fn mean_precipitation(forecast: &[ForecastDay]) -> f64 {
    if forecast.is_empty() {
        0.0
    } else {
        total_precipitation(forecast) / forecast.len() as f64
    }
}

/// Label for a forecast position. Past the fifth day the label continues
/// as "Day N".
pub fn day_name(index: usize) -> String {
    DAY_NAMES
        .get(index)
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("Day {}", index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_forecast_is_zero() {
        assert_eq!(mean_precipitation(&[]), 0.0);
        assert_eq!(total_precipitation(&[]), 0.0);
    }

    #[test]
    fn mean_and_total() {
        let forecast = vec![
            ForecastDay::new(25.0, 2.0, 5.0),
            ForecastDay::new(25.0, 4.0, 5.0),
            ForecastDay::new(25.0, 0.0, 5.0),
        ];
        assert!((total_precipitation(&forecast) - 6.0).abs() < 1e-9);
        assert!((mean_precipitation(&forecast) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn day_names() {
        assert_eq!(day_name(0), "Today");
        assert_eq!(day_name(1), "Tomorrow");
        assert_eq!(day_name(4), "Day 5");
        assert_eq!(day_name(5), "Day 6");
    }
}
