use crate::domain::model::ScoreLabel;

/// Calculate the livability score from solar radiation and AQI.
/// Returns (score_label, estimated_habitable_years).
///
/// Solar is normalized from its nominal 0-5 range onto 0-100 and clamped on
/// both ends. AQI is inverted (lower is better) and clamped at zero only:
/// there is intentionally no upper clamp, so a negative AQI can push the
/// combined score past 100. Downstream consumers depend on that behavior.
pub fn calculate_livability_score(solar: f64, aqi: f64) -> (ScoreLabel, u32) {
    let solar_score = (solar / 5.0 * 100.0).clamp(0.0, 100.0);
    let aqi_score = (100.0 - aqi).max(0.0);

    let combined_score = 0.5 * solar_score + 0.5 * aqi_score;

    if combined_score >= 70.0 {
        (ScoreLabel::High, 80)
    } else if combined_score >= 40.0 {
        (ScoreLabel::Medium, 50)
    } else {
        (ScoreLabel::Low, 20)
    }
}
