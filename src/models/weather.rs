use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Current conditions, already normalized to °C, %, mm and km/h.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub humidity: f64,
    #[serde(default)]
    pub precipitation: f64,
    #[serde(default)]
    pub wind_speed: f64,
    #[serde(default)]
    pub uv_index: f64,
}

impl WeatherSnapshot {
    pub fn new(temperature: f64, humidity: f64) -> Self {
        Self {
            temperature,
            humidity,
            precipitation: 0.0,
            wind_speed: 0.0,
            uv_index: 0.0,
        }
    }

    pub fn with_precipitation(mut self, mm: f64) -> Self {
        self.precipitation = mm;
        self
    }

    pub fn with_wind(mut self, kmh: f64) -> Self {
        self.wind_speed = kmh;
        self
    }

    pub fn with_uv(mut self, uv_index: f64) -> Self {
        self.uv_index = uv_index;
        self
    }
}

/// One day of the forecast horizon. Missing values deserialize as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForecastDay {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub max_temp: f64,
    pub min_temp: f64,
    pub precipitation: f64,
    pub rain_probability: f64,
    pub wind_speed: f64,
}

impl ForecastDay {
    pub fn new(max_temp: f64, precipitation: f64, wind_speed: f64) -> Self {
        Self {
            max_temp,
            precipitation,
            wind_speed,
            ..Default::default()
        }
    }
}

/// Current conditions plus forecast, as read from input files or the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: WeatherSnapshot,
    #[serde(default)]
    pub forecast: Vec<ForecastDay>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_day_missing_fields_default_to_zero() {
        let day: ForecastDay = serde_json::from_str(r#"{"maxTemp": 31.0}"#).unwrap();
        assert_eq!(day.max_temp, 31.0);
        assert_eq!(day.precipitation, 0.0);
        assert_eq!(day.wind_speed, 0.0);
        assert!(day.date.is_none());
    }

    #[test]
    fn snapshot_optional_fields_default_to_zero() {
        let snap: WeatherSnapshot =
            serde_json::from_str(r#"{"temperature": 18.5, "humidity": 55}"#).unwrap();
        assert_eq!(snap, WeatherSnapshot::new(18.5, 55.0));
    }

    #[test]
    fn snapshot_requires_temperature() {
        let res: Result<WeatherSnapshot, _> = serde_json::from_str(r#"{"humidity": 55}"#);
        assert!(res.is_err());
    }

    #[test]
    fn weather_report_from_yaml() {
        let yaml = r#"
current:
  temperature: 27
  humidity: 80
  windSpeed: 5
  uvIndex: 4
forecast:
  - date: 2026-06-02
    maxTemp: 30
    precipitation: 1.5
  - maxTemp: 29
"#;
        let report: WeatherReport = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(report.current.wind_speed, 5.0);
        assert_eq!(report.forecast.len(), 2);
        assert_eq!(
            report.forecast[0].date,
            NaiveDate::from_ymd_opt(2026, 6, 2)
        );
        assert_eq!(report.forecast[1].precipitation, 0.0);
    }
}
