//! Collapses the 3-hourly forecast stream into at most 5 per-day summaries.

use chrono::{DateTime, Utc};

use crate::model::{DaySummary, Forecast};

/// The dashboard shows at most 5 forecast days.
pub const MAX_DAYS: usize = 5;

struct DayGroup {
    label: String,
    temps: Vec<f64>,
    conditions: Vec<String>,
}

/// Group samples by the short weekday name of their local calendar day and
/// reduce each group to min/max temperature plus the dominant condition.
///
/// Output order follows first appearance of each day label in the sample
/// stream, truncated to the first [`MAX_DAYS`] distinct labels. Absent
/// sample fields are skipped rather than failing the whole aggregation; a
/// group left with no temperatures or no conditions produces no summary.
pub fn summarize(forecast: &Forecast) -> Vec<DaySummary> {
    let offset = i64::from(forecast.timezone_offset_secs);
    let mut groups: Vec<DayGroup> = Vec::new();

    for sample in &forecast.samples {
        let Some(label) = day_label(sample.epoch_time, offset) else {
            continue;
        };

        let index = match groups.iter().position(|g| g.label == label) {
            Some(index) => index,
            None => {
                groups.push(DayGroup {
                    label,
                    temps: Vec::new(),
                    conditions: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[index];

        if let Some(temp) = sample.temperature_c {
            group.temps.push(temp);
        }
        if let Some(condition) = &sample.condition {
            group.conditions.push(condition.clone());
        }
    }

    groups
        .into_iter()
        .take(MAX_DAYS)
        .filter_map(|group| {
            let max_temp_c = group.temps.iter().copied().reduce(f64::max)?;
            let min_temp_c = group.temps.iter().copied().reduce(f64::min)?;
            let dominant_condition = dominant_condition(group.conditions)?;

            Some(DaySummary {
                day_label: group.label,
                max_temp_c,
                min_temp_c,
                dominant_condition,
            })
        })
        .collect()
}

/// Most frequent condition; ties are broken by whichever element ends up
/// last after a stable ascending-frequency sort. Characterization tests pin
/// this down; do not "simplify" the tie-break.
fn dominant_condition(conditions: Vec<String>) -> Option<String> {
    let mut sorted = conditions.clone();
    sorted.sort_by_key(|c| conditions.iter().filter(|v| *v == c).count());
    sorted.pop()
}

/// Short weekday name ("Mon".."Sun") of the sample's local calendar day,
/// computed from the shifted epoch interpreted as UTC. Fixed English names;
/// no process-local timezone is consulted.
fn day_label(epoch: i64, offset_secs: i64) -> Option<String> {
    let shifted = DateTime::<Utc>::from_timestamp(epoch.checked_add(offset_secs)?, 0)?;
    Some(shifted.format("%a").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ForecastSample;

    const DAY: i64 = 86_400;
    // 2023-11-13 00:00:00 UTC, a Monday.
    const MONDAY: i64 = 1_699_833_600;

    fn sample(epoch: i64, temp: f64, condition: &str) -> ForecastSample {
        ForecastSample {
            epoch_time: epoch,
            temperature_c: Some(temp),
            condition: Some(condition.to_string()),
        }
    }

    fn forecast(samples: Vec<ForecastSample>) -> Forecast {
        Forecast {
            timezone_offset_secs: 0,
            samples,
        }
    }

    #[test]
    fn empty_input_produces_empty_output() {
        assert!(summarize(&forecast(Vec::new())).is_empty());
    }

    #[test]
    fn full_stream_is_capped_at_five_days() {
        // 40 entries at 3-hour resolution: the usual upstream shape,
        // spanning 6 calendar days when the stream starts mid-day.
        let start = MONDAY + 12 * 3600;
        let samples = (0..40)
            .map(|i| sample(start + i * 3 * 3600, 20.0 + (i % 8) as f64, "Clear"))
            .collect();

        let summaries = summarize(&forecast(samples));
        assert_eq!(summaries.len(), MAX_DAYS);
        for day in &summaries {
            assert!(day.min_temp_c <= day.max_temp_c);
        }
        assert_eq!(summaries[0].day_label, "Mon");
        assert_eq!(summaries[1].day_label, "Tue");
    }

    #[test]
    fn min_and_max_come_from_the_same_day() {
        let summaries = summarize(&forecast(vec![
            sample(MONDAY, 4.0, "Clouds"),
            sample(MONDAY + 3 * 3600, 9.5, "Clouds"),
            sample(MONDAY + 6 * 3600, -1.0, "Clouds"),
            sample(MONDAY + DAY, 30.0, "Clear"),
        ]));

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].max_temp_c, 9.5);
        assert_eq!(summaries[0].min_temp_c, -1.0);
        assert_eq!(summaries[1].max_temp_c, 30.0);
        assert_eq!(summaries[1].min_temp_c, 30.0);
    }

    #[test]
    fn majority_condition_wins() {
        let summaries = summarize(&forecast(vec![
            sample(MONDAY, 10.0, "Clear"),
            sample(MONDAY + 3 * 3600, 10.0, "Rain"),
            sample(MONDAY + 6 * 3600, 10.0, "Rain"),
        ]));

        assert_eq!(summaries[0].dominant_condition, "Rain");
    }

    #[test]
    fn tie_break_prefers_later_survivor() {
        // Two conditions with equal counts: the stable ascending-frequency
        // sort leaves the sequence untouched, and the last element wins.
        let summaries = summarize(&forecast(vec![
            sample(MONDAY, 10.0, "Rain"),
            sample(MONDAY + 3 * 3600, 10.0, "Clear"),
            sample(MONDAY + 6 * 3600, 10.0, "Rain"),
            sample(MONDAY + 9 * 3600, 10.0, "Clear"),
        ]));

        assert_eq!(summaries[0].dominant_condition, "Clear");
    }

    #[test]
    fn missing_fields_are_skipped_not_fatal() {
        let summaries = summarize(&forecast(vec![
            ForecastSample {
                epoch_time: MONDAY,
                temperature_c: None,
                condition: Some("Snow".to_string()),
            },
            sample(MONDAY + 3 * 3600, 2.0, "Clear"),
            ForecastSample {
                epoch_time: MONDAY + 6 * 3600,
                temperature_c: Some(5.0),
                condition: None,
            },
        ]));

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].max_temp_c, 5.0);
        assert_eq!(summaries[0].min_temp_c, 2.0);
        // Snow and Clear each appear once; the tie-break picks Clear.
        assert_eq!(summaries[0].dominant_condition, "Clear");
    }

    #[test]
    fn day_with_no_usable_temperatures_is_dropped() {
        let summaries = summarize(&forecast(vec![
            ForecastSample {
                epoch_time: MONDAY,
                temperature_c: None,
                condition: Some("Rain".to_string()),
            },
            sample(MONDAY + DAY, 12.0, "Clear"),
        ]));

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].day_label, "Tue");
    }

    #[test]
    fn ordering_follows_first_appearance_not_calendar() {
        let summaries = summarize(&forecast(vec![
            sample(MONDAY + DAY, 15.0, "Clear"),
            sample(MONDAY, 10.0, "Rain"),
            sample(MONDAY + DAY + 3 * 3600, 16.0, "Clear"),
        ]));

        assert_eq!(summaries[0].day_label, "Tue");
        assert_eq!(summaries[1].day_label, "Mon");
    }

    #[test]
    fn timezone_offset_shifts_day_boundaries() {
        // 23:00 UTC Monday is already Tuesday at UTC+5:30.
        let late_monday = MONDAY + 23 * 3600;
        let shifted = Forecast {
            timezone_offset_secs: 19_800,
            samples: vec![sample(late_monday, 20.0, "Clear")],
        };

        assert_eq!(summarize(&shifted)[0].day_label, "Tue");
    }
}
