use crate::db::Database;
use crate::error::Result;
use crate::models::{CropType, HistoryPoint, WeatherReport};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rusqlite::{params, Row};
use tracing::warn;

/// A weather report as stored in the cache, with the time it was fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedWeather {
    pub report: WeatherReport,
    pub fetched_at: DateTime<Utc>,
}

impl CachedWeather {
    pub fn age_minutes(&self, now: DateTime<Utc>) -> i64 {
        (now - self.fetched_at).num_minutes()
    }

    pub fn is_fresh(&self, max_age_minutes: u32, now: DateTime<Utc>) -> bool {
        self.age_minutes(now) < i64::from(max_age_minutes)
    }
}

// Weather Cache Queries

impl Database {
    pub fn cache_weather(
        &self,
        location_key: &str,
        report: &WeatherReport,
        fetched_at: DateTime<Utc>,
    ) -> Result<()> {
        let json = serde_json::to_string(report)?;
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT OR REPLACE INTO weather_cache (location_key, report_json, fetched_at)
                VALUES (?1, ?2, ?3)
                "#,
                params![location_key, json, fetched_at.to_rfc3339()],
            )?;
            Ok(())
        })
    }

    /// Latest cached report for a location regardless of age
    pub fn get_cached_weather(&self, location_key: &str) -> Result<Option<CachedWeather>> {
        let row: Option<(String, String)> = self.with_conn(|conn| {
            conn.query_row(
                "SELECT report_json, fetched_at FROM weather_cache WHERE location_key = ?1",
                [location_key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(Into::into)
        })?;

        let Some((json, fetched_at_str)) = row else {
            return Ok(None);
        };

        let report: WeatherReport = match serde_json::from_str(&json) {
            Ok(r) => r,
            Err(e) => {
                warn!(location_key, error = %e, "Discarding unreadable weather cache entry");
                return Ok(None);
            }
        };

        let fetched_at = DateTime::parse_from_rfc3339(&fetched_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        Ok(Some(CachedWeather { report, fetched_at }))
    }

    /// Cached report no older than `max_age_minutes`
    pub fn get_fresh_weather(
        &self,
        location_key: &str,
        max_age_minutes: u32,
        now: DateTime<Utc>,
    ) -> Result<Option<CachedWeather>> {
        Ok(self
            .get_cached_weather(location_key)?
            .filter(|c| c.is_fresh(max_age_minutes, now)))
    }
}

// History Queries

impl Database {
    /// Record the day's summary, replacing any earlier entry for the same
    /// date, and keep only the newest `max_days` rows.
    pub fn save_history_point(&self, point: &HistoryPoint, max_days: u32) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                r#"
                INSERT OR REPLACE INTO history
                    (date, crop_type, temperature, humidity, wind_speed, precipitation,
                     rain_probability, uv_index, crop_loss_risk, recorded_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
                params![
                    point.date.format("%Y-%m-%d").to_string(),
                    point.crop_type.as_str(),
                    point.temperature,
                    point.humidity,
                    point.wind_speed,
                    point.precipitation,
                    point.rain_probability,
                    point.uv_index,
                    point.crop_loss_risk,
                    point.recorded_at.to_rfc3339(),
                ],
            )?;
            let pruned = tx.execute(
                r#"
                DELETE FROM history WHERE date NOT IN (
                    SELECT date FROM history ORDER BY date DESC LIMIT ?1
                )
                "#,
                [max_days],
            )?;
            tx.commit()?;

            if pruned > 0 {
                tracing::debug!(pruned, "Pruned old history rows");
            }
            Ok(())
        })
    }

    /// History for the last `days` days including today, oldest first
    pub fn get_history(&self, days: u32) -> Result<Vec<HistoryPoint>> {
        let today = Utc::now().date_naive();
        let since = today - Duration::days(i64::from(days.saturating_sub(1)));
        self.get_history_since(since)
    }

    pub fn get_history_since(&self, since: NaiveDate) -> Result<Vec<HistoryPoint>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT * FROM history WHERE date >= ?1 ORDER BY date ASC")?;
            let rows =
                stmt.query_map([since.format("%Y-%m-%d").to_string()], row_to_history_point)?;

            let mut points = Vec::new();
            for row in rows {
                match row {
                    Ok(point) => points.push(point),
                    Err(e) => warn!(error = %e, "Skipping unreadable history row"),
                }
            }
            Ok(points)
        })
    }
}

fn row_to_history_point(row: &Row) -> rusqlite::Result<HistoryPoint> {
    let date_str: String = row.get("date")?;
    let crop_str: String = row.get("crop_type")?;
    let recorded_at_str: String = row.get("recorded_at")?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let crop_type = CropType::from_str(&crop_str).unwrap_or_else(|| {
        warn!(crop_type = %crop_str, "Unknown crop_type in history, defaulting to wheat");
        CropType::Wheat
    });

    Ok(HistoryPoint {
        date,
        recorded_at: DateTime::parse_from_rfc3339(&recorded_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
        crop_type,
        temperature: row.get("temperature")?,
        humidity: row.get("humidity")?,
        wind_speed: row.get("wind_speed")?,
        precipitation: row.get("precipitation")?,
        rain_probability: row.get("rain_probability")?,
        uv_index: row.get("uv_index")?,
        crop_loss_risk: row.get("crop_loss_risk")?,
    })
}

trait OptionalExt<T> {
    fn optional(self) -> rusqlite::Result<Option<T>>;
}

impl<T> OptionalExt<T> for rusqlite::Result<T> {
    fn optional(self) -> rusqlite::Result<Option<T>> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForecastDay, WeatherSnapshot};

    fn report() -> WeatherReport {
        WeatherReport {
            current: WeatherSnapshot::new(24.0, 60.0).with_wind(10.0),
            forecast: vec![ForecastDay::new(27.0, 3.5, 12.0); 5],
        }
    }

    fn point(date: NaiveDate, temp: f64) -> HistoryPoint {
        HistoryPoint {
            date,
            recorded_at: Utc::now(),
            crop_type: CropType::Rice,
            temperature: temp,
            humidity: 70.0,
            wind_speed: 6.0,
            precipitation: 2.0,
            rain_probability: 40.0,
            uv_index: 6.0,
            crop_loss_risk: Some(25),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn cache_round_trip_and_freshness() {
        let db = Database::open_in_memory().unwrap();
        let fetched_at = Utc::now() - Duration::minutes(45);
        db.cache_weather("28.6100,77.2100", &report(), fetched_at)
            .unwrap();

        let cached = db.get_cached_weather("28.6100,77.2100").unwrap().unwrap();
        assert_eq!(cached.report, report());

        let now = Utc::now();
        assert!(db
            .get_fresh_weather("28.6100,77.2100", 30, now)
            .unwrap()
            .is_none());
        assert!(db
            .get_fresh_weather("28.6100,77.2100", 60, now)
            .unwrap()
            .is_some());
    }

    #[test]
    fn missing_cache_entry_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_cached_weather("0.0000,0.0000").unwrap().is_none());
    }

    #[test]
    fn history_upserts_by_date() {
        let db = Database::open_in_memory().unwrap();
        db.save_history_point(&point(day(1), 20.0), 30).unwrap();
        db.save_history_point(&point(day(1), 23.0), 30).unwrap();

        let points = db.get_history_since(day(1)).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].temperature, 23.0);
        assert_eq!(points[0].crop_type, CropType::Rice);
        assert_eq!(points[0].crop_loss_risk, Some(25));
    }

    #[test]
    fn history_keeps_newest_rows_only() {
        let db = Database::open_in_memory().unwrap();
        for d in 1..=10 {
            db.save_history_point(&point(day(d), d as f64), 7).unwrap();
        }

        let points = db.get_history_since(day(1)).unwrap();
        assert_eq!(points.len(), 7);
        assert_eq!(points.first().unwrap().date, day(4));
        assert_eq!(points.last().unwrap().date, day(10));
    }

    #[test]
    fn history_is_oldest_first_and_windowed() {
        let db = Database::open_in_memory().unwrap();
        for d in [5, 2, 8, 3] {
            db.save_history_point(&point(day(d), d as f64), 30).unwrap();
        }

        let dates: Vec<_> = db
            .get_history_since(day(3))
            .unwrap()
            .into_iter()
            .map(|p| p.date)
            .collect();
        assert_eq!(dates, vec![day(3), day(5), day(8)]);
    }

    #[test]
    fn recent_history_includes_today() {
        let db = Database::open_in_memory().unwrap();
        let today = Utc::now().date_naive();
        db.save_history_point(&point(today, 21.0), 30).unwrap();
        db.save_history_point(&point(today - Duration::days(10), 19.0), 30)
            .unwrap();

        assert_eq!(db.get_history(1).unwrap().len(), 1);
        assert_eq!(db.get_history(30).unwrap().len(), 2);
    }

    #[test]
    fn unreadable_history_rows_are_skipped() {
        let db = Database::open_in_memory().unwrap();
        db.save_history_point(&point(day(2), 20.0), 30).unwrap();
        db.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO history
                    (date, crop_type, temperature, humidity, wind_speed, precipitation,
                     rain_probability, uv_index, crop_loss_risk, recorded_at)
                VALUES ('2026-03-99', 'rice', 1, 1, 1, 1, 1, 1, NULL, '2026-03-09T00:00:00Z')
                "#,
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let points = db.get_history_since(day(1)).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, day(2));
    }
}
