//! Plain-text rendering for the CLI.

use crate::models::{CropProfileTable, HistoryPoint, HistorySummary, Insights, RiskBand};
use std::fmt::Write;

fn risk_label(score: u8) -> &'static str {
    RiskBand::from_score(u32::from(score)).as_str()
}

pub fn render_insights(insights: &Insights) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} Advisory", insights.crop_name);
    let _ = writeln!(out, "{}", "=".repeat(insights.crop_name.len() + 9));
    let _ = writeln!(
        out,
        "Crop loss risk: {}/100 ({})",
        insights.crop_loss_risk,
        risk_label(insights.crop_loss_risk)
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Current Conditions");
    for (label, metric) in insights.current_conditions.entries() {
        let _ = writeln!(
            out,
            "  {} {:<14} {:>6.1}  {:<9} {}",
            metric.status.symbol(),
            label,
            metric.value,
            metric.status.as_str(),
            metric.message
        );
    }
    let _ = writeln!(out);

    let irrigation = &insights.irrigation_recommendation;
    let _ = writeln!(out, "Irrigation");
    if irrigation.needed {
        let _ = writeln!(
            out,
            "  {} urgency, {}mm, {}",
            irrigation.urgency, irrigation.amount, irrigation.timing
        );
    }
    let _ = writeln!(out, "  {}", irrigation.message);
    let _ = writeln!(out);

    let pest = &insights.pest_disease_risk;
    let _ = writeln!(
        out,
        "Pest & Disease Risk: {} (score {})",
        pest.overall_risk, pest.risk_score
    );
    for risk in &pest.risks {
        let _ = writeln!(out, "  [{}] {}: {}", risk.severity.as_str(), risk.kind, risk.message);
        let _ = writeln!(out, "      Prevention: {}", risk.prevention);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Activity Planner");
    for (activity, day) in insights.activity_planner.entries() {
        let _ = writeln!(
            out,
            "  {:<10} {:<9} {:>3}  {}",
            activity, day.day, day.score, day.reason
        );
    }

    if !insights.recommendations.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Recommendations");
        for rec in &insights.recommendations {
            let _ = writeln!(
                out,
                "  {} [{}] {}",
                rec.priority.symbol(),
                rec.category,
                rec.message
            );
        }
    }

    out
}

pub fn render_profiles(table: &CropProfileTable) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<11} {:>13} {:>11} {:>13} {:>11} {:>15} {:>11} {:>5} {:>4}",
        "Crop", "Temp °C", "Optimal", "Humidity %", "Optimal", "Rainfall mm", "Optimal", "Wind", "UV"
    );
    for (crop, p) in table.iter() {
        let _ = writeln!(
            out,
            "{:<11} {:>13} {:>11} {:>13} {:>11} {:>15} {:>11} {:>5} {:>4}",
            crop.display_name(),
            format!("{}-{}", p.temp_min, p.temp_max),
            format!("{}-{}", p.temp_optimal.0, p.temp_optimal.1),
            format!("{}-{}", p.humidity_min, p.humidity_max),
            format!("{}-{}", p.humidity_optimal.0, p.humidity_optimal.1),
            format!("{}-{}", p.rainfall_min, p.rainfall_max),
            format!("{}-{}", p.rainfall_optimal.0, p.rainfall_optimal.1),
            p.wind_max,
            p.uv_index_max
        );
    }

    out
}

pub fn render_history(points: &[HistoryPoint]) -> String {
    let mut out = String::new();

    if points.is_empty() {
        let _ = writeln!(out, "No history recorded yet. Run `cropwise advise` first.");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<10}  {:<10} {:>7} {:>6} {:>7} {:>7} {:>5} {:>4} {:>5}",
        "Date", "Crop", "Temp", "Hum%", "Wind", "Rain", "Pop%", "UV", "Risk"
    );
    for p in points {
        let risk = p
            .crop_loss_risk
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".into());
        let _ = writeln!(
            out,
            "{:<10}  {:<10} {:>7.1} {:>6.0} {:>7.1} {:>7.1} {:>5.0} {:>4.0} {:>5}",
            p.date.format("%Y-%m-%d"),
            p.crop_type.display_name(),
            p.temperature,
            p.humidity,
            p.wind_speed,
            p.precipitation,
            p.rain_probability,
            p.uv_index,
            risk
        );
    }

    let summary = HistorySummary::from_points(points);
    let _ = writeln!(out);
    let _ = writeln!(out, "{} days recorded", summary.points);
    if let Some(avg) = summary.avg_temperature {
        let _ = writeln!(
            out,
            "Average temperature: {:.1}°C ({})",
            avg, summary.temperature_trend
        );
    }
    let _ = writeln!(
        out,
        "Rainfall: {:.1}mm over {} rainy days",
        summary.total_precipitation, summary.days_with_rain
    );
    let _ = writeln!(out, "Crop loss risk: {}", summary.risk_trend);

    out
}
