use serde::Serialize;

use super::params::{SimulationParams, MAX_HORIZON_YEARS};
use crate::table::ReferenceTable;

/// Decimal terabyte: 1 TB = 1,000,000 MB
pub const MB_PER_TB: f64 = 1_000_000.0;
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Time to read one year's volume with one technology.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferTime {
    pub technology: String,
    /// `None` when the technology has no usable throughput
    pub hours: Option<f64>,
}

/// One simulated year.
///
/// Values are kept unrounded; use [`round2`] when displaying them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionRow {
    pub year: u32,
    pub volume_tb: f64,
    /// One entry per technology, in table order
    pub transfer: Vec<TransferTime>,
}

impl ProjectionRow {
    /// Transfer time for a technology; `None` if unknown or not applicable
    pub fn hours_for(&self, technology: &str) -> Option<f64> {
        self.transfer
            .iter()
            .find(|t| t.technology == technology)
            .and_then(|t| t.hours)
    }
}

/// Round to two decimal places for display
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Hours to read `volume_tb` at `speed_mb_s`; `None` if the speed is not positive.
pub fn transfer_hours(volume_tb: f64, speed_mb_s: f64) -> Option<f64> {
    if speed_mb_s <= 0.0 || speed_mb_s.is_nan() {
        return None;
    }
    Some(volume_tb * MB_PER_TB / speed_mb_s / SECONDS_PER_HOUR)
}

/// Project data volume and per-technology read time for each year.
///
/// Year 1 holds `initial_volume_tb`; every following year multiplies the
/// previous one by `1 + growth_rate`. Callers must pass a positive volume,
/// a non-negative rate and a horizon of at least one year; a horizon of
/// zero yields no rows.
pub fn project_growth(
    initial_volume_tb: f64,
    growth_rate: f64,
    horizon_years: u32,
    table: &ReferenceTable,
) -> Vec<ProjectionRow> {
    let factor = 1.0 + growth_rate;
    // Capacity is only a hint; unchecked callers may pass any horizon
    let mut rows = Vec::with_capacity(horizon_years.min(MAX_HORIZON_YEARS) as usize);
    let mut volume = initial_volume_tb;

    for year in 1..=horizon_years {
        if year > 1 {
            volume *= factor;
        }

        let transfer = table
            .iter()
            .map(|record| TransferTime {
                technology: record.name.clone(),
                hours: transfer_hours(volume, record.read_speed),
            })
            .collect();

        rows.push(ProjectionRow {
            year,
            volume_tb: volume,
            transfer,
        });
    }

    tracing::debug!(
        initial_volume_tb,
        growth_rate,
        horizon_years,
        technologies = table.len(),
        "projected growth"
    );

    rows
}

/// [`project_growth`] driven by a parameter set
pub fn project(params: &SimulationParams, table: &ReferenceTable) -> Vec<ProjectionRow> {
    project_growth(
        params.initial_volume_tb,
        params.growth_rate(),
        params.horizon_years,
        table,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{default_records, default_table, ReferenceTable};
    use proptest::prelude::*;

    #[test]
    fn test_single_year_no_growth() {
        let rows = project_growth(100.0, 0.0, 1, &default_table());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].year, 1);
        assert_eq!(round2(rows[0].volume_tb), 100.0);
        assert_eq!(rows[0].hours_for("HDD").map(round2), Some(138.89));
    }

    #[test]
    fn test_second_year_compounds() {
        let rows = project_growth(100.0, 0.20, 2, &default_table());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].volume_tb, 100.0);
        assert_eq!(round2(rows[1].volume_tb), 120.0);
    }

    #[test]
    fn test_default_params_five_years() {
        let rows = project(&SimulationParams::default(), &default_table());
        let years: Vec<u32> = rows.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![1, 2, 3, 4, 5]);
        // 100 * 1.2^4
        assert_eq!(round2(rows[4].volume_tb), 207.36);
    }

    #[test]
    fn test_transfer_follows_table_order() {
        let rows = project_growth(10.0, 0.0, 1, &default_table());
        let names: Vec<&str> = rows[0].transfer.iter().map(|t| t.technology.as_str()).collect();
        assert_eq!(names, vec!["HDD", "SSD", "Tape", "Cloud"]);
    }

    #[test]
    fn test_default_table_transfer_times() {
        let rows = project_growth(100.0, 0.0, 1, &default_table());
        let row = &rows[0];
        assert_eq!(row.hours_for("SSD").map(round2), Some(11.11));
        assert_eq!(row.hours_for("Tape").map(round2), Some(111.11));
        assert_eq!(row.hours_for("Cloud").map(round2), Some(92.59));
    }

    #[test]
    fn test_zero_throughput_is_not_applicable() {
        let mut records = default_records();
        records[1].read_speed = 0.0;
        let table = ReferenceTable::new(records).unwrap();

        let rows = project_growth(100.0, 0.2, 4, &table);
        for row in &rows {
            assert_eq!(row.transfer[1].technology, "SSD");
            assert!(row.transfer[1].hours.is_none());
            assert!(row.transfer[0].hours.is_some());
        }
    }

    #[test]
    fn test_zero_horizon_yields_nothing() {
        assert!(project_growth(100.0, 0.2, 0, &default_table()).is_empty());
    }

    #[test]
    fn test_horizon_beyond_parameter_range_still_projects() {
        let horizon = MAX_HORIZON_YEARS * 4;
        let rows = project_growth(1.0, 0.0, horizon, &default_table());
        assert_eq!(rows.len(), horizon as usize);
        assert_eq!(rows.last().map(|row| row.year), Some(horizon));
    }

    #[test]
    fn test_transfer_hours_guards() {
        assert_eq!(transfer_hours(1.0, 0.0), None);
        assert_eq!(transfer_hours(1.0, -5.0), None);
        assert_eq!(transfer_hours(1.0, f64::NAN), None);
        assert_eq!(transfer_hours(36.0, 10_000.0), Some(1.0));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(138.888_888), 138.89);
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(round2(120.0), 120.0);
    }

    proptest! {
        #[test]
        fn prop_first_year_is_initial_volume(
            v0 in 1.0f64..1e6,
            g in 0.0f64..2.0,
            h in 1u32..=15,
        ) {
            let rows = project_growth(v0, g, h, &default_table());
            prop_assert_eq!(rows.len(), h as usize);
            prop_assert_eq!(rows[0].volume_tb, v0);
        }

        #[test]
        fn prop_volume_compounds(
            v0 in 1.0f64..1e6,
            g in 0.0f64..2.0,
            h in 2u32..=15,
        ) {
            let rows = project_growth(v0, g, h, &default_table());
            for pair in rows.windows(2) {
                prop_assert_eq!(pair[1].volume_tb, pair[0].volume_tb * (1.0 + g));
                prop_assert_eq!(pair[1].year, pair[0].year + 1);
            }
        }

        #[test]
        fn prop_time_increases_with_volume(
            a in 1.0f64..1e6,
            extra in 1.0f64..1e6,
            speed in 1.0f64..10_000.0,
        ) {
            let small = transfer_hours(a, speed).unwrap();
            let large = transfer_hours(a + extra, speed).unwrap();
            prop_assert!(large > small);
        }

        #[test]
        fn prop_time_non_increasing_in_speed(
            volume in 1.0f64..1e6,
            slow in 1.0f64..10_000.0,
            extra in 0.0f64..10_000.0,
        ) {
            let slow_time = transfer_hours(volume, slow).unwrap();
            let fast_time = transfer_hours(volume, slow + extra).unwrap();
            prop_assert!(fast_time <= slow_time);
        }
    }
}
