use super::rules::{RuleContext, RulesEngine};
use super::{activity, conditions, crop_loss, irrigation, pest_disease};
use crate::models::{CropProfileTable, CropType, ForecastDay, Insights, WeatherSnapshot};

/// Combines the analyzers into a single advisory for one crop.
pub struct CropAdvisor {
    table: CropProfileTable,
    rules: RulesEngine,
}

impl CropAdvisor {
    pub fn new(table: CropProfileTable) -> Self {
        Self {
            table,
            rules: RulesEngine::new(),
        }
    }

    pub fn rules(&self) -> &RulesEngine {
        &self.rules
    }

    /// Advisory for a crop named by string.
    ///
    /// Returns `None` for an unknown crop or when no current weather is
    /// available.
    pub fn insights(
        &self,
        crop: &str,
        current: Option<&WeatherSnapshot>,
        forecast: &[ForecastDay],
    ) -> Option<Insights> {
        let Some(crop_type) = CropType::from_str(crop) else {
            tracing::debug!(crop, "Unknown crop type");
            return None;
        };
        let current = current?;
        self.insights_for(crop_type, current, forecast)
    }

    pub fn insights_for(
        &self,
        crop: CropType,
        current: &WeatherSnapshot,
        forecast: &[ForecastDay],
    ) -> Option<Insights> {
        let profile = self.table.get(crop)?;

        let current_conditions = conditions::analyze(current, profile);
        let irrigation_recommendation = irrigation::plan(current, forecast, profile);
        let pest_disease_risk = pest_disease::assess(current, forecast, profile);
        let activity_planner = activity::plan(forecast, profile);
        let crop_loss_risk = crop_loss::score(current, forecast, profile, &pest_disease_risk);

        let recommendations = self.rules.evaluate(&RuleContext {
            current,
            forecast,
            profile,
            irrigation: &irrigation_recommendation,
        });

        tracing::debug!(
            crop = crop.as_str(),
            crop_loss_risk,
            pest_score = pest_disease_risk.risk_score,
            recommendations = recommendations.len(),
            "Generated insights"
        );

        Some(Insights {
            crop_type: crop,
            crop_name: crop.display_name().to_string(),
            current_conditions,
            irrigation_recommendation,
            pest_disease_risk,
            activity_planner,
            crop_loss_risk,
            recommendations,
        })
    }
}

impl Default for CropAdvisor {
    fn default() -> Self {
        Self::new(CropProfileTable::builtin())
    }
}
