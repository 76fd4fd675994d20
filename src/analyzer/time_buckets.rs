// Calendar bucketing of response timestamps in a fixed reference zone
use crate::analyzer::report::{DateCount, DayCount, HourCount, MonthCount};
use chrono::{DateTime, Datelike, Duration, FixedOffset, Timelike, Utc};

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// One bucket per calendar day for the `days` days ending today, oldest first.
/// Responses outside the window are ignored.
pub fn by_date(stamps: &[DateTime<FixedOffset>], now: DateTime<FixedOffset>, days: u32) -> Vec<DateCount> {
    if days == 0 {
        return Vec::new();
    }
    let today = now.date_naive();
    let start = today - Duration::days(i64::from(days) - 1);
    let mut counts = vec![0usize; days as usize];

    for stamp in stamps {
        let offset = (stamp.date_naive() - start).num_days();
        if (0..i64::from(days)).contains(&offset) {
            counts[offset as usize] += 1;
        }
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| DateCount { date: start + Duration::days(i as i64), count })
        .collect()
}

/// 24 buckets by hour of day, regardless of date.
pub fn by_hour(stamps: &[DateTime<FixedOffset>]) -> Vec<HourCount> {
    let mut counts = [0usize; 24];
    for stamp in stamps {
        counts[stamp.hour() as usize] += 1;
    }
    counts
        .iter()
        .enumerate()
        .map(|(hour, &count)| HourCount { hour: hour as u32, count })
        .collect()
}

/// 7 buckets, Sunday first.
pub fn by_day_of_week(stamps: &[DateTime<FixedOffset>]) -> Vec<DayCount> {
    let mut counts = [0usize; 7];
    for stamp in stamps {
        counts[stamp.weekday().num_days_from_sunday() as usize] += 1;
    }
    DAY_NAMES
        .iter()
        .zip(counts)
        .map(|(&day, count)| DayCount { day, count })
        .collect()
}

/// One bucket per calendar month for the `months` months ending with the current one.
pub fn by_month(stamps: &[DateTime<FixedOffset>], now: DateTime<FixedOffset>, months: u32) -> Vec<MonthCount> {
    if months == 0 {
        return Vec::new();
    }
    let month_index = |stamp: &DateTime<FixedOffset>| i64::from(stamp.year()) * 12 + i64::from(stamp.month0());
    let current = month_index(&now);
    let first = current - i64::from(months) + 1;
    let mut counts = vec![0usize; months as usize];

    for stamp in stamps {
        let idx = month_index(stamp) - first;
        if (0..i64::from(months)).contains(&idx) {
            counts[idx as usize] += 1;
        }
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let idx = first + i as i64;
            MonthCount {
                month: format!("{:04}-{:02}", idx.div_euclid(12), idx.rem_euclid(12) + 1),
                count,
            }
        })
        .collect()
}

pub fn to_local(stamp: &DateTime<Utc>, zone: &FixedOffset) -> DateTime<FixedOffset> {
    stamp.with_timezone(zone)
}
