use super::{Rule, RuleContext};
use crate::models::{Priority, Recommendation, RecommendationCategory};

/// Temperature outside the crop's absolute bounds.
///
/// Only the tolerable min/max are checked here; drifting out of the optimal
/// sub-range is reported by the condition analyzer instead.
pub struct TemperatureRule;

impl Rule for TemperatureRule {
    fn id(&self) -> &'static str {
        "temperature"
    }

    fn name(&self) -> &'static str {
        "Temperature Protection"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        let temp = ctx.current.temperature;
        let profile = ctx.profile;

        let message = if temp < profile.temp_min {
            format!(
                "Temperature is below optimal range ({}°C). Consider using row covers or \
                 greenhouses to protect crops.",
                profile.temp_min
            )
        } else if temp > profile.temp_max {
            format!(
                "Temperature is above optimal range ({}°C). Provide shade and increase \
                 irrigation frequency.",
                profile.temp_max
            )
        } else {
            return None;
        };

        Some(Recommendation::new(
            RecommendationCategory::Temperature,
            Priority::High,
            message,
        ))
    }
}
