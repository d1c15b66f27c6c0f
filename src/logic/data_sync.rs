use crate::config::Config;
use crate::datasources::OpenMeteoClient;
use crate::db::Database;
use crate::error::{CropwiseError, Result};
use crate::logic::CropAdvisor;
use crate::models::{CropType, HistoryPoint, Insights, WeatherReport};
use chrono::Utc;

/// Fetches weather, keeps the cache and history current and runs the advisor.
pub struct DataSyncService {
    config: Config,
    db: Database,
    client: Option<OpenMeteoClient>,
    advisor: CropAdvisor,
}

impl DataSyncService {
    pub fn new(config: Config, db: Database, advisor: CropAdvisor) -> Self {
        let client = if config.openmeteo.enabled {
            Some(OpenMeteoClient::new(
                config.openmeteo.clone(),
                config.location.clone(),
            ))
        } else {
            tracing::warn!("Open-Meteo disabled - only cached weather will be available");
            None
        };

        Self {
            config,
            db,
            client,
            advisor,
        }
    }

    fn location_key(&self) -> String {
        format!(
            "{:.4},{:.4}",
            self.config.location.latitude, self.config.location.longitude
        )
    }

    /// Current weather and forecast, from cache while it is fresh.
    ///
    /// Provider failures fall back to a stale cache entry when one exists.
    pub async fn current_weather(&self) -> Result<WeatherReport> {
        let key = self.location_key();
        let now = Utc::now();

        if let Some(cached) =
            self.db
                .get_fresh_weather(&key, self.config.history.cache_minutes, now)?
        {
            tracing::debug!(age_minutes = cached.age_minutes(now), "Using cached weather");
            return Ok(cached.report);
        }

        let fetched = match self.client {
            Some(ref client) => client.fetch_weather().await,
            None => Err(CropwiseError::DataSourceUnavailable(
                "Open-Meteo is disabled".into(),
            )),
        };

        match fetched {
            Ok(report) => {
                self.db.cache_weather(&key, &report, now)?;
                tracing::info!(days = report.forecast.len(), "Weather refreshed from Open-Meteo");
                Ok(report)
            }
            Err(e) => match self.db.get_cached_weather(&key)? {
                Some(stale) => {
                    tracing::warn!(
                        age_minutes = stale.age_minutes(now),
                        "Failed to fetch weather, using stale cache: {}",
                        e
                    );
                    Ok(stale.report)
                }
                None => Err(e),
            },
        }
    }

    /// Run the advisor on current weather and record the day's history point
    pub async fn advise(&self, crop: CropType) -> Result<Insights> {
        let report = self.current_weather().await?;

        let insights = self
            .advisor
            .insights_for(crop, &report.current, &report.forecast)
            .ok_or_else(|| {
                CropwiseError::NotFound(format!("No profile for crop {}", crop.as_str()))
            })?;

        self.record_history(crop, &report, &insights)?;

        Ok(insights)
    }

    fn record_history(
        &self,
        crop: CropType,
        report: &WeatherReport,
        insights: &Insights,
    ) -> Result<()> {
        let now = Utc::now();
        let point = HistoryPoint {
            date: now.date_naive(),
            recorded_at: now,
            crop_type: crop,
            temperature: report.current.temperature,
            humidity: report.current.humidity,
            wind_speed: report.current.wind_speed,
            precipitation: report.current.precipitation,
            rain_probability: report
                .forecast
                .first()
                .map(|d| d.rain_probability)
                .unwrap_or(0.0),
            uv_index: report.current.uv_index,
            crop_loss_risk: Some(insights.crop_loss_risk),
        };

        self.db
            .save_history_point(&point, self.config.history.max_days)
    }

    /// History for the last `days` days, capped at the retention window
    pub fn history(&self, days: u32) -> Result<Vec<HistoryPoint>> {
        self.db
            .get_history(days.min(self.config.history.max_days))
    }

    pub async fn check_connection(&self) -> ConnectionStatus {
        let openmeteo = match self.client {
            Some(ref client) => client.test_connection().await.unwrap_or(false),
            None => false,
        };

        ConnectionStatus {
            openmeteo,
            enabled: self.client.is_some(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConnectionStatus {
    pub openmeteo: bool,
    pub enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForecastDay, WeatherSnapshot};
    use chrono::Duration;

    fn offline_service() -> DataSyncService {
        let mut config = Config::default();
        config.openmeteo.enabled = false;
        DataSyncService::new(config, Database::open_in_memory().unwrap(), CropAdvisor::default())
    }

    fn report() -> WeatherReport {
        WeatherReport {
            current: WeatherSnapshot::new(18.0, 55.0).with_wind(6.0).with_uv(5.0),
            forecast: vec![
                ForecastDay {
                    rain_probability: 35.0,
                    ..ForecastDay::new(21.0, 4.0, 10.0)
                };
                5
            ],
        }
    }

    #[tokio::test]
    async fn no_provider_and_no_cache_is_unavailable() {
        let service = offline_service();
        assert!(matches!(
            service.current_weather().await,
            Err(CropwiseError::DataSourceUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn stale_cache_is_used_when_provider_fails() {
        let service = offline_service();
        let key = service.location_key();
        service
            .db
            .cache_weather(&key, &report(), Utc::now() - Duration::hours(6))
            .unwrap();

        let weather = service.current_weather().await.unwrap();
        assert_eq!(weather, report());
    }

    #[tokio::test]
    async fn advise_records_history() {
        let service = offline_service();
        let key = service.location_key();
        service.db.cache_weather(&key, &report(), Utc::now()).unwrap();

        let insights = service.advise(CropType::Wheat).await.unwrap();
        let history = service.history(30).unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].crop_type, CropType::Wheat);
        assert_eq!(history[0].rain_probability, 35.0);
        assert_eq!(history[0].crop_loss_risk, Some(insights.crop_loss_risk));
    }

    #[tokio::test]
    async fn disabled_provider_reports_not_connected() {
        let status = offline_service().check_connection().await;
        assert!(!status.enabled);
        assert!(!status.openmeteo);
    }
}
