use chrono::{NaiveDateTime, Timelike};

use crate::constants::{MAX_FORECAST_DAYS, MIDDAY_HOUR};
use crate::models::{timestamp, utc_offset, ForecastDay, ForecastResponse, ForecastSample};

const SAMPLE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reduces a 3-hourly forecast series to one midday sample per day.
///
/// A sample qualifies when its decoded time of day is exactly
/// `MIDDAY_HOUR:00`. Days without such a sample are skipped rather than
/// filled from a neighbouring hour, so a series with no midday entries
/// yields an empty list. At most `MAX_FORECAST_DAYS` days are returned,
/// oldest first.
pub fn select_midday(forecast: &ForecastResponse) -> Vec<ForecastDay> {
    let offset = utc_offset(forecast.city.as_ref().map_or(0, |city| city.timezone));

    let mut samples: Vec<(&ForecastSample, NaiveDateTime)> = forecast
        .list
        .iter()
        .map(|sample| {
            let local = sample_time(sample)
                .unwrap_or_else(|| timestamp(sample.dt).with_timezone(&offset).naive_local());
            (sample, local)
        })
        .filter(|(_, local)| local.hour() == MIDDAY_HOUR && local.minute() == 0)
        .collect();
    samples.sort_by_key(|(sample, _)| sample.dt);

    let mut days: Vec<ForecastDay> = Vec::with_capacity(MAX_FORECAST_DAYS);
    for (sample, local) in samples {
        if days.len() == MAX_FORECAST_DAYS {
            break;
        }
        let date = local.date();
        if days.last().is_some_and(|day| day.date == date) {
            continue;
        }
        let condition = sample.weather.first().cloned().unwrap_or_default();
        days.push(ForecastDay {
            date,
            timestamp: timestamp(sample.dt),
            temperature: sample.main.temp,
            condition: condition.main,
            description: condition.description,
        });
    }
    days
}

fn sample_time(sample: &ForecastSample) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(sample.dt_txt.trim(), SAMPLE_TIME_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    const DAY: i64 = 86_400;
    // 2024-06-15 00:00:00 UTC
    const START: i64 = 1_718_409_600;

    fn series(days: i64, hours: &[u32]) -> serde_json::Value {
        let mut list = Vec::new();
        for d in 0..days {
            for &h in hours {
                let dt = START + d * DAY + i64::from(h) * 3600;
                let txt = timestamp(dt).format(SAMPLE_TIME_FORMAT).to_string();
                list.push(json!({
                    "dt": dt,
                    "dt_txt": txt,
                    "main": {"temp": 10.0 + d as f64, "humidity": 50},
                    "weather": [{"main": "Clouds", "description": format!("day {d}")}]
                }));
            }
        }
        json!({"cod": "200", "list": list, "city": {"name": "Test", "timezone": 0}})
    }

    fn parse(value: serde_json::Value) -> ForecastResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn picks_one_midday_sample_per_day_capped_at_five() {
        let hours = [0, 3, 6, 9, 12, 15, 18, 21];
        let days = select_midday(&parse(series(6, &hours)));

        assert_eq!(days.len(), 5);
        for (i, day) in days.iter().enumerate() {
            let expected = NaiveDate::from_ymd_opt(2024, 6, 15 + i as u32).unwrap();
            assert_eq!(day.date, expected);
            assert_eq!(day.temperature, 10.0 + i as f64);
            assert_eq!(day.description, format!("day {i}"));
        }
        assert!(days.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn fewer_midday_samples_are_not_padded() {
        let days = select_midday(&parse(series(3, &[9, 12, 15])));
        assert_eq!(days.len(), 3);
    }

    #[test]
    fn no_midday_samples_yield_empty_forecast() {
        let days = select_midday(&parse(series(5, &[0, 3, 6, 9, 15, 18, 21])));
        assert!(days.is_empty());
    }

    #[test]
    fn out_of_order_samples_are_returned_chronologically() {
        let mut value = series(3, &[12]);
        value["list"].as_array_mut().unwrap().reverse();
        let days = select_midday(&parse(value));
        let dates: Vec<_> = days.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, ["2024-06-15", "2024-06-16", "2024-06-17"]);
    }

    #[test]
    fn duplicate_midday_entries_keep_the_first() {
        let mut value = series(1, &[12]);
        let copy = value["list"][0].clone();
        value["list"].as_array_mut().unwrap().push(copy);
        assert_eq!(select_midday(&parse(value)).len(), 1);
    }

    #[test]
    fn unparseable_text_falls_back_to_local_timestamp() {
        // 10:00 UTC is midday at UTC+2
        let dt = START + 10 * 3600;
        let value = json!({
            "list": [{"dt": dt, "dt_txt": "", "main": {"temp": 18.0}, "weather": []}],
            "city": {"timezone": 7200}
        });
        let days = select_midday(&parse(value));
        assert_eq!(days.len(), 1);
        assert!(days[0].condition.is_empty());
    }

    #[test]
    fn empty_series_is_fine() {
        assert!(select_midday(&parse(json!({"list": []}))).is_empty());
    }
}
