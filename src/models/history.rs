use super::crop::CropType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Daily summary recorded after each advisory run, one per date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub recorded_at: DateTime<Utc>,
    pub crop_type: CropType,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub precipitation: f64,
    pub rain_probability: f64,
    pub uv_index: f64,
    pub crop_loss_risk: Option<u8>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Rising,
    Falling,
    #[default]
    Stable,
    Unknown,
}

impl Trend {
    /// Compare the first and last value of a chronological series. Changes
    /// smaller than `tolerance` count as stable.
    pub fn from_series(values: &[f64], tolerance: f64) -> Self {
        match (values.first(), values.last()) {
            (Some(first), Some(last)) if values.len() >= 2 => {
                let delta = last - first;
                if delta > tolerance {
                    Trend::Rising
                } else if delta < -tolerance {
                    Trend::Falling
                } else {
                    Trend::Stable
                }
            }
            _ => Trend::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Rising => "↑ Rising",
            Trend::Falling => "↓ Falling",
            Trend::Stable => "→ Stable",
            Trend::Unknown => "? Unknown",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregates over a window of history points.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySummary {
    pub points: usize,
    pub avg_temperature: Option<f64>,
    pub total_precipitation: f64,
    pub days_with_rain: usize,
    pub temperature_trend: Trend,
    pub risk_trend: Trend,
}

impl HistorySummary {
    /// `points` must be ordered oldest first.
    pub fn from_points(points: &[HistoryPoint]) -> Self {
        let temps: Vec<f64> = points.iter().map(|p| p.temperature).collect();
        let risks: Vec<f64> = points
            .iter()
            .filter_map(|p| p.crop_loss_risk.map(f64::from))
            .collect();

        let avg_temperature = if temps.is_empty() {
            None
        } else {
            Some(temps.iter().sum::<f64>() / temps.len() as f64)
        };

        Self {
            points: points.len(),
            avg_temperature,
            total_precipitation: points.iter().map(|p| p.precipitation.max(0.0)).sum(),
            days_with_rain: points.iter().filter(|p| p.precipitation > 0.0).count(),
            temperature_trend: Trend::from_series(&temps, 1.0),
            risk_trend: Trend::from_series(&risks, 5.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(day: u32, temp: f64, precip: f64, risk: Option<u8>) -> HistoryPoint {
        HistoryPoint {
            date: NaiveDate::from_ymd_opt(2026, 7, day).unwrap(),
            recorded_at: Utc::now(),
            crop_type: CropType::Wheat,
            temperature: temp,
            humidity: 55.0,
            wind_speed: 8.0,
            precipitation: precip,
            rain_probability: 20.0,
            uv_index: 5.0,
            crop_loss_risk: risk,
        }
    }

    #[test]
    fn trend_from_series() {
        assert_eq!(Trend::from_series(&[10.0, 12.0, 15.0], 1.0), Trend::Rising);
        assert_eq!(Trend::from_series(&[15.0, 12.0, 10.0], 1.0), Trend::Falling);
        assert_eq!(Trend::from_series(&[15.0, 15.5], 1.0), Trend::Stable);
        assert_eq!(Trend::from_series(&[15.0], 1.0), Trend::Unknown);
        assert_eq!(Trend::from_series(&[], 1.0), Trend::Unknown);
    }

    #[test]
    fn summary_over_points() {
        let points = vec![
            point(1, 18.0, 0.0, Some(20)),
            point(2, 20.0, 4.5, None),
            point(3, 22.0, 1.5, Some(45)),
        ];
        let summary = HistorySummary::from_points(&points);

        assert_eq!(summary.points, 3);
        assert_eq!(summary.avg_temperature, Some(20.0));
        assert!((summary.total_precipitation - 6.0).abs() < 1e-9);
        assert_eq!(summary.days_with_rain, 2);
        assert_eq!(summary.temperature_trend, Trend::Rising);
        assert_eq!(summary.risk_trend, Trend::Rising);
    }

    #[test]
    fn summary_of_empty_history() {
        let summary = HistorySummary::from_points(&[]);
        assert_eq!(summary.points, 0);
        assert!(summary.avg_temperature.is_none());
        assert_eq!(summary.temperature_trend, Trend::Unknown);
    }
}
