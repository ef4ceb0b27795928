//! Analysis dashboard datasets

use chrono::NaiveDate;
use serde::Serialize;

/// One point of the daily activity chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySample {
    pub date: NaiveDate,
    pub uv: u32,
}

/// One slice of the severity distribution chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeveritySlice {
    pub name: &'static str,
    pub value: u32,
    pub color: &'static str,
}

pub fn daily_samples() -> Vec<DailySample> {
    const VALUES: [u32; 12] = [400, 300, 200, 278, 189, 239, 349, 410, 310, 250, 290, 320];

    VALUES
        .iter()
        .zip(1u32..)
        .filter_map(|(&uv, day)| {
            NaiveDate::from_ymd_opt(2023, 10, day).map(|date| DailySample { date, uv })
        })
        .collect()
}

pub fn severity_distribution() -> Vec<SeveritySlice> {
    vec![
        SeveritySlice {
            name: "Low",
            value: 400,
            color: "#22c55e",
        },
        SeveritySlice {
            name: "Moderate",
            value: 300,
            color: "#3b82f6",
        },
        SeveritySlice {
            name: "High",
            value: 300,
            color: "#f97316",
        },
        SeveritySlice {
            name: "Crucial",
            value: 200,
            color: "#ef4444",
        },
    ]
}

/// Samples between `start` and `end`, both inclusive and both optional
pub fn filter_by_range(
    samples: &[DailySample],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<DailySample> {
    samples
        .iter()
        .filter(|s| start.map_or(true, |d| s.date >= d))
        .filter(|s| end.map_or(true, |d| s.date <= d))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 10, d).unwrap()
    }

    #[test]
    fn test_samples_cover_twelve_days() {
        let samples = daily_samples();
        assert_eq!(samples.len(), 12);
        assert_eq!(samples[0].date, day(1));
        assert_eq!(samples[11].uv, 320);
    }

    #[test]
    fn test_range_is_inclusive() {
        let samples = daily_samples();
        let hits = filter_by_range(&samples, Some(day(3)), Some(day(5)));
        let uvs: Vec<_> = hits.iter().map(|s| s.uv).collect();
        assert_eq!(uvs, vec![200, 278, 189]);

        assert_eq!(filter_by_range(&samples, None, Some(day(2))).len(), 2);
        assert_eq!(filter_by_range(&samples, Some(day(11)), None).len(), 2);
        assert!(filter_by_range(&samples, Some(day(6)), Some(day(5))).is_empty());
    }
}
