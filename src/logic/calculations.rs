use crate::models::DailyForecast;

/// Sum of daily precipitation over the forecast
pub fn total_precipitation(days: &[DailyForecast]) -> f64 {
    days.iter().map(|d| d.precipitation_mm).sum()
}

/// Mean of the daily midpoint temperatures, `None` for an empty forecast
pub fn average_temperature(days: &[DailyForecast]) -> Option<f64> {
    if days.is_empty() {
        None
    } else {
        Some(days.iter().map(|d| d.avg_temp_c()).sum::<f64>() / days.len() as f64)
    }
}

/// Any day whose low drops below the threshold
pub fn any_low_below(days: &[DailyForecast], threshold_c: f64) -> bool {
    days.iter().any(|d| d.min_temp_c < threshold_c)
}

/// Any day whose high exceeds the threshold
pub fn any_high_above(days: &[DailyForecast], threshold_c: f64) -> bool {
    days.iter().any(|d| d.max_temp_c > threshold_c)
}

/// Any day with precipitation above the threshold
pub fn any_precipitation_above(days: &[DailyForecast], threshold_mm: f64) -> bool {
    days.iter().any(|d| d.precipitation_mm > threshold_mm)
}

/// Average relative humidity across the forecast
pub fn average_humidity(days: &[DailyForecast]) -> Option<f64> {
    if days.is_empty() {
        None
    } else {
        Some(days.iter().map(|d| d.humidity_percent).sum::<f64>() / days.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn days() -> Vec<DailyForecast> {
        let d = |n| NaiveDate::from_ymd_opt(2025, 3, n).unwrap();
        vec![
            DailyForecast::new(d(1), 20.0, 10.0, 2.0, 50.0),
            DailyForecast::new(d(2), 36.0, 22.0, 0.0, 30.0),
            DailyForecast::new(d(3), 12.0, -2.0, 55.0, 90.0),
        ]
    }

    #[test]
    fn totals_and_averages() {
        let days = days();
        assert!((total_precipitation(&days) - 57.0).abs() < 1e-9);
        // (15 + 29 + 5) / 3
        assert!((average_temperature(&days).unwrap() - 49.0 / 3.0).abs() < 1e-9);
        assert!((average_humidity(&days).unwrap() - 170.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_forecast_has_no_average() {
        assert_eq!(average_temperature(&[]), None);
        assert_eq!(average_humidity(&[]), None);
        assert_eq!(total_precipitation(&[]), 0.0);
    }

    #[test]
    fn threshold_checks_are_strict() {
        let days = days();
        assert!(any_low_below(&days, 0.0));
        assert!(!any_low_below(&days, -2.0));
        assert!(any_high_above(&days, 35.0));
        assert!(!any_high_above(&days, 36.0));
        assert!(any_precipitation_above(&days, 50.0));
        assert!(!any_precipitation_above(&days, 55.0));
    }
}
