use super::{Rule, RuleContext};
use crate::models::{Priority, Recommendation, RecommendationCategory, Urgency};

/// Surfaces the irrigation plan as an action item when the deficit is large
pub struct IrrigationRule;

impl Rule for IrrigationRule {
    fn id(&self) -> &'static str {
        "irrigation"
    }

    fn name(&self) -> &'static str {
        "Irrigation Deficit"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        let plan = ctx.irrigation;
        if !plan.needed || plan.urgency != Urgency::High {
            return None;
        }

        Some(Recommendation::new(
            RecommendationCategory::Irrigation,
            Priority::High,
            plan.message.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::irrigation;
    use crate::models::{CropProfile, CropType, WeatherSnapshot};

    fn eval(current_precip: f64) -> Option<Recommendation> {
        let profile = CropProfile::builtin(CropType::Wheat);
        let current = WeatherSnapshot::new(18.0, 55.0).with_precipitation(current_precip);
        let plan = irrigation::plan(&current, &[], &profile);
        IrrigationRule.evaluate(&RuleContext {
            current: &current,
            forecast: &[],
            profile: &profile,
            irrigation: &plan,
        })
    }

    #[test]
    fn high_urgency_is_reported() {
        let rec = eval(0.0).unwrap();
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(
            rec.message,
            "Irrigation recommended: 420mm needed. Best time: Early morning (6-8 AM)"
        );
    }

    #[test]
    fn medium_and_low_are_not_reported() {
        assert!(eval(380.0).is_none());
        assert!(eval(410.0).is_none());
        assert!(eval(500.0).is_none());
    }
}
