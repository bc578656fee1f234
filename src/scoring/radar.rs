use serde::Serialize;

use super::normalize::normalize_to_scale;
use crate::table::ReferenceTable;

/// Radar axes, in drawing order
pub const RADAR_CATEGORIES: [&str; 3] = ["Reliability", "Scalability", "Security"];

/// One polygon of the radar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSeries {
    pub name: String,
    /// Values in [`RADAR_CATEGORIES`] order, each on a 0-5 scale
    pub values: [f64; 3],
}

impl RadarSeries {
    pub fn reliability(&self) -> f64 {
        self.values[0]
    }
}

/// MTBF column normalized onto 1-5, with 0 for technologies without MTBF
pub fn reliability_scores(table: &ReferenceTable) -> Vec<f64> {
    normalize_to_scale(&table.column(|r| r.mtbf_hours))
}

/// Build one radar polygon per technology, in table order.
pub fn radar_series(table: &ReferenceTable) -> Vec<RadarSeries> {
    table
        .iter()
        .zip(reliability_scores(table))
        .map(|(record, reliability)| RadarSeries {
            name: record.name.clone(),
            values: [reliability, record.scalability_score, record.security_score],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::default_table;

    #[test]
    fn test_radar_series_default_table() {
        let series = radar_series(&default_table());
        assert_eq!(series.len(), 4);

        assert_eq!(series[0].name, "HDD");
        assert_eq!(series[0].values, [1.0, 3.0, 3.0]);

        assert_eq!(series[2].name, "Tape");
        assert_eq!(series[2].values, [5.0, 2.0, 2.0]);

        // Cloud has no MTBF, so it sits at the centre on the reliability axis
        assert_eq!(series[3].name, "Cloud");
        assert_eq!(series[3].reliability(), 0.0);
        assert_eq!(&series[3].values[1..], &[5.0, 5.0]);
    }

    #[test]
    fn test_reliability_scores_match_table_order() {
        let scores = reliability_scores(&default_table());
        assert_eq!(scores.len(), 4);
        assert!((scores[1] - 2.5).abs() < 1e-9);
    }
}
