//! Derived run metrics for table rows, charts and the top list.
//!
//! # Responsibility
//! - Compute pace from distance and elapsed time.
//! - Rank runs by distance and extract chronological chart series.
//! - Map feelings to display glyphs and labels.
//!
//! # Invariants
//! - Pace never divides by zero; non-positive distance yields `00:00`.
//! - Pace seconds are rounded before splitting into minutes, so the seconds
//!   part is always in `0..60`.

use crate::model::run::{Feeling, RunId, RunRecord, RunTime};

/// Entries shown in the longest-runs list.
pub const DEFAULT_TOP_N: usize = 5;

const ZERO_PACE: &str = "00:00";
const UNKNOWN_FEELING_ICON: &str = "-";
const UNKNOWN_FEELING_LABEL: &str = "Sin datos";

/// Chart input arrays in chronological (ascending date) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub distances: Vec<f64>,
    pub pace_minutes: Vec<f64>,
    pub calories: Vec<u32>,
}

/// Display projection of one run for the history table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRow {
    pub id: RunId,
    pub date: String,
    pub distance: String,
    pub time: String,
    pub pace: String,
    /// `N/A` when no calories were recorded.
    pub calories: String,
    pub kind: String,
    pub feeling_icon: &'static str,
    pub feeling_label: &'static str,
}

/// Display projection of one entry in the longest-runs list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopRun {
    pub id: RunId,
    pub date: String,
    pub distance: String,
    pub calories: String,
}

/// Metrics derived once per recompute cycle from the filtered set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedMetrics {
    pub chart: ChartSeries,
    pub top_runs: Vec<TopRun>,
}

impl DerivedMetrics {
    pub fn derive(filtered: &[&RunRecord]) -> Self {
        Self {
            chart: chart_series(filtered),
            top_runs: top_n(filtered, DEFAULT_TOP_N)
                .into_iter()
                .map(top_run)
                .collect(),
        }
    }
}

/// Formats pace as `MM:SS` per kilometer.
pub fn pace(distance_km: f64, time: &RunTime) -> String {
    match pace_seconds(distance_km, time) {
        Some(seconds) => format!("{:02}:{:02}", seconds / 60, seconds % 60),
        None => ZERO_PACE.to_string(),
    }
}

/// Pace as fractional minutes per kilometer, for charting.
pub fn pace_minutes(distance_km: f64, time: &RunTime) -> f64 {
    pace_seconds(distance_km, time).map_or(0.0, |seconds| seconds as f64 / 60.0)
}

fn pace_seconds(distance_km: f64, time: &RunTime) -> Option<u64> {
    if !(distance_km > 0.0) {
        return None;
    }
    Some((time.total_seconds() as f64 / distance_km).round() as u64)
}

/// Returns up to `n` runs by descending distance; ties keep input order.
pub fn top_n<'a>(filtered: &[&'a RunRecord], n: usize) -> Vec<&'a RunRecord> {
    let mut ranked = filtered.to_vec();
    ranked.sort_by(|a, b| b.distance.total_cmp(&a.distance));
    ranked.truncate(n);
    ranked
}

/// Extracts chart arrays from a newest-first set, oldest point first.
pub fn chart_series(filtered: &[&RunRecord]) -> ChartSeries {
    let mut series = ChartSeries::default();
    for record in filtered.iter().rev() {
        series.labels.push(record.date_label());
        series.distances.push(record.distance);
        series
            .pace_minutes
            .push(pace_minutes(record.distance, &record.time));
        series.calories.push(record.calories);
    }
    series
}

pub fn feeling_icon(feeling: Option<Feeling>) -> &'static str {
    match feeling {
        Some(Feeling::Excellent) => "🤩",
        Some(Feeling::Good) => "😊",
        Some(Feeling::Normal) => "🙂",
        Some(Feeling::Poor) => "😟",
        Some(Feeling::Awful) => "🤢",
        None => UNKNOWN_FEELING_ICON,
    }
}

pub fn feeling_label(feeling: Option<Feeling>) -> &'static str {
    match feeling {
        Some(Feeling::Excellent) => "Excelente",
        Some(Feeling::Good) => "Buena",
        Some(Feeling::Normal) => "Normal",
        Some(Feeling::Poor) => "Regular",
        Some(Feeling::Awful) => "Mala",
        None => UNKNOWN_FEELING_LABEL,
    }
}

/// Derives the history table row for one run.
pub fn run_row(record: &RunRecord) -> RunRow {
    RunRow {
        id: record.id,
        date: record.date_label(),
        distance: format!("{:.2} km", record.distance),
        time: record.time.to_string(),
        pace: pace(record.distance, &record.time),
        calories: if record.calories == 0 {
            "N/A".to_string()
        } else {
            record.calories.to_string()
        },
        kind: record.kind.clone(),
        feeling_icon: feeling_icon(record.feeling),
        feeling_label: feeling_label(record.feeling),
    }
}

/// Derives the longest-runs list entry for one run.
pub fn top_run(record: &RunRecord) -> TopRun {
    TopRun {
        id: record.id,
        date: record.date_label(),
        distance: format!("{:.2} km", record.distance),
        calories: format!("{} kcal", record.calories),
    }
}

#[cfg(test)]
mod tests {
    use super::{pace, pace_minutes};
    use crate::model::run::RunTime;

    fn time(text: &str) -> RunTime {
        RunTime::parse(text).expect("valid time")
    }

    #[test]
    fn pace_rounds_total_seconds_before_splitting() {
        // 1798 s / 5 km = 359.6 s/km
        assert_eq!(pace(5.0, &time("00:29:58")), "06:00");
        // 1797 s / 5 km = 359.4 s/km
        assert_eq!(pace(5.0, &time("00:29:57")), "05:59");
    }

    #[test]
    fn pace_minutes_matches_formatted_pace() {
        assert_eq!(pace_minutes(10.0, &time("00:55:00")), 5.5);
        assert_eq!(pace_minutes(0.0, &time("00:55:00")), 0.0);
    }

    #[test]
    fn pace_handles_nan_distance() {
        assert_eq!(pace(f64::NAN, &time("00:30:00")), "00:00");
    }
}
