use crate::config::{LocationConfig, OpenMeteoConfig};
use crate::error::{CropwiseError, Result};
use crate::models::{ForecastDay, WeatherReport, WeatherSnapshot};
use chrono::NaiveDate;
use serde::Deserialize;

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,precipitation,wind_speed_10m,uv_index";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,\
                            precipitation_probability_max,wind_speed_10m_max";
/// Today plus the five days the advisor looks at
const FORECAST_DAYS: usize = 6;
const MAX_FORECAST_DAYS: usize = 5;

pub struct OpenMeteoClient {
    client: reqwest::Client,
    config: OpenMeteoConfig,
    location: LocationConfig,
}

// Open-Meteo API response structures
#[derive(Debug, Deserialize)]
struct OmResponse {
    current: Option<OmCurrent>,
    daily: Option<OmDaily>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OmCurrent {
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    precipitation: Option<f64>,
    wind_speed_10m: Option<f64>,
    uv_index: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OmDaily {
    time: Vec<String>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    precipitation_sum: Vec<Option<f64>>,
    precipitation_probability_max: Vec<Option<f64>>,
    wind_speed_10m_max: Vec<Option<f64>>,
}

impl OmDaily {
    fn value(series: &[Option<f64>], i: usize) -> f64 {
        series.get(i).copied().flatten().unwrap_or(0.0)
    }
}

impl OpenMeteoClient {
    pub fn new(config: OpenMeteoConfig, location: LocationConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            location,
        }
    }

    fn forecast_url(&self) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&timezone={}&current={}&daily={}&forecast_days={}",
            self.config.base_url.trim_end_matches('/'),
            self.location.latitude,
            self.location.longitude,
            self.location.timezone,
            CURRENT_FIELDS,
            DAILY_FIELDS,
            FORECAST_DAYS
        )
    }

    /// Fetch current conditions and the next five days
    pub async fn fetch_weather(&self) -> Result<WeatherReport> {
        let url = self.forecast_url();
        tracing::debug!(%url, "Fetching Open-Meteo forecast");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CropwiseError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CropwiseError::DataSourceUnavailable(format!(
                "Open-Meteo returned {}: {}",
                status, body
            )));
        }

        let om_response: OmResponse = response.json().await?;
        normalize(om_response)
    }

    /// Test connection to the Open-Meteo API
    pub async fn test_connection(&self) -> Result<bool> {
        let response = self
            .client
            .get(self.forecast_url())
            .send()
            .await
            .map_err(|e| CropwiseError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        Ok(response.status().is_success())
    }
}

/// Round to the nearest integer with halves towards positive infinity.
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Normalize a forecast response into the advisor's weather report.
///
/// The first daily entry is today and is skipped; up to five following days
/// are kept. Missing values become 0.
fn normalize(response: OmResponse) -> Result<WeatherReport> {
    let (Some(current), Some(daily)) = (response.current, response.daily) else {
        return Err(CropwiseError::InvalidData(
            "Open-Meteo response is missing current or daily data".into(),
        ));
    };

    if daily.time.len() < 2 {
        return Err(CropwiseError::InvalidData(format!(
            "Open-Meteo returned {} daily entries, need at least 2",
            daily.time.len()
        )));
    }

    let current = WeatherSnapshot {
        temperature: round_half_up(current.temperature_2m.unwrap_or(0.0)),
        humidity: current.relative_humidity_2m.unwrap_or(0.0),
        precipitation: current.precipitation.unwrap_or(0.0),
        wind_speed: round_half_up(current.wind_speed_10m.unwrap_or(0.0)),
        uv_index: round_half_up(current.uv_index.unwrap_or(0.0)),
    };

    let forecast = daily
        .time
        .iter()
        .enumerate()
        .skip(1)
        .take(MAX_FORECAST_DAYS)
        .map(|(i, date)| ForecastDay {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            max_temp: round_half_up(OmDaily::value(&daily.temperature_2m_max, i)),
            min_temp: round_half_up(OmDaily::value(&daily.temperature_2m_min, i)),
            precipitation: OmDaily::value(&daily.precipitation_sum, i),
            rain_probability: OmDaily::value(&daily.precipitation_probability_max, i),
            wind_speed: round_half_up(OmDaily::value(&daily.wind_speed_10m_max, i)),
        })
        .collect();

    Ok(WeatherReport { current, forecast })
}
