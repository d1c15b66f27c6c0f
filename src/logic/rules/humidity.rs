use super::{Rule, RuleContext};
use crate::models::{Priority, Recommendation, RecommendationCategory};

/// Humidity outside the crop's absolute bounds
pub struct HumidityRule;

impl Rule for HumidityRule {
    fn id(&self) -> &'static str {
        "humidity"
    }

    fn name(&self) -> &'static str {
        "Humidity Management"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        let humidity = ctx.current.humidity;

        let message = if humidity < ctx.profile.humidity_min {
            "Low humidity detected. Increase irrigation frequency or use misting systems."
        } else if humidity > ctx.profile.humidity_max {
            "High humidity detected. Ensure good air circulation and avoid overhead watering."
        } else {
            return None;
        };

        Some(Recommendation::new(
            RecommendationCategory::Humidity,
            Priority::Medium,
            message,
        ))
    }
}
