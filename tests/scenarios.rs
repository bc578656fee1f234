use std::fs;

use proptest::prelude::*;
use storage_report::advisory::AdvisoryLevel;
use storage_report::output::{format_hours, format_json, format_tsv};
use storage_report::report::Report;
use storage_report::scoring::{normalize_to_scale, reliability_scores};
use storage_report::simulation::{project, project_growth, round2, SimulationParams};
use storage_report::table::{default_table, load_table, ReferenceTable, TechnologyRecord};

fn params(initial_volume_tb: f64, growth_pct: f64, horizon_years: u32) -> SimulationParams {
    SimulationParams {
        initial_volume_tb,
        growth_pct,
        horizon_years,
    }
}

#[test]
fn flat_growth_single_year() {
    let rows = project(&params(100.0, 0.0, 1), &default_table());

    assert_eq!(rows.len(), 1);
    assert_eq!(round2(rows[0].volume_tb), 100.00);
    assert_eq!(format_hours(rows[0].hours_for("HDD")), "138.89");
    assert_eq!(format_hours(rows[0].hours_for("SSD")), "11.11");
}

#[test]
fn twenty_percent_growth_second_year() {
    let rows = project(&params(100.0, 20.0, 2), &default_table());

    assert_eq!(rows.len(), 2);
    assert_eq!(round2(rows[1].volume_tb), 120.00);
    assert_eq!(rows[1].year, 2);
}

#[test]
fn default_mtbf_column_normalizes() {
    let scores = reliability_scores(&default_table());
    // HDD, SSD, Tape, Cloud
    assert_eq!(scores, vec![1.0, 2.5, 5.0, 0.0]);
}

#[test]
fn missing_table_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_table(&dir.path().join("assumptions.csv"));

    assert_eq!(loaded.value, default_table());
    assert_eq!(loaded.advisory.unwrap().level, AdvisoryLevel::Info);
}

#[test]
fn malformed_table_file_uses_defaults_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("assumptions.csv");
    fs::write(&path, "name,read_speed\nHDD,200\n").unwrap();

    let loaded = load_table(&path);

    assert_eq!(loaded.value, default_table());
    let advisory = loaded.advisory.unwrap();
    assert_eq!(advisory.level, AdvisoryLevel::Warning);
    assert!(advisory.message.contains("built-in defaults"));
}

#[test]
fn custom_table_flows_into_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("assumptions.csv");
    fs::write(
        &path,
        "name,read_speed,write_speed,capacity,cost_per_gb,mtbf_hours,power_watts,security_score,scalability_score\n\
         NVMe,7000,5000,4,0.2,2000000,6,4,3\n\
         Optical,0,0,0.1,0.1,0,1,3,1\n",
    )
    .unwrap();

    let loaded = load_table(&path);
    assert!(loaded.advisory.is_none());

    let report = Report::build(loaded.value, String::new(), params(10.0, 0.0, 1));
    assert_eq!(report.table.names(), vec!["NVMe", "Optical"]);
    assert_eq!(report.projection[0].hours_for("Optical"), None);
    // A single applicable MTBF cannot be ranked
    assert_eq!(report.radar[0].values[0], 3.0);
    assert_eq!(report.radar[1].values[0], 0.0);

    let tsv = format_tsv(&report.projection);
    assert_eq!(
        tsv,
        "year\tvolume_tb\tNVMe_hours\tOptical_hours\n1\t10.00\t0.40\tN/A"
    );
}

#[test]
fn json_report_is_stable_for_identical_inputs() {
    let at = chrono::DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    let first = Report::build(default_table(), String::new(), SimulationParams::default());
    let second = Report::build(default_table(), String::new(), SimulationParams::default());

    assert_eq!(
        format_json(&first, at).unwrap(),
        format_json(&second, at).unwrap()
    );
}

fn record(name: &str, read_speed: f64, mtbf_hours: f64) -> TechnologyRecord {
    TechnologyRecord {
        name: name.to_string(),
        read_speed,
        write_speed: read_speed,
        capacity: 1.0,
        cost_per_gb: 0.1,
        mtbf_hours,
        power_watts: 1.0,
        security_score: 3.0,
        scalability_score: 3.0,
    }
}

proptest! {
    #[test]
    fn normalized_scores_stay_in_range(values in prop::collection::vec(
        prop_oneof![Just(0.0), 1.0f64..1e7],
        1..12,
    )) {
        let scores = normalize_to_scale(&values);
        prop_assert_eq!(scores.len(), values.len());
        for (v, s) in values.iter().zip(&scores) {
            if *v == 0.0 {
                prop_assert_eq!(*s, 0.0);
            } else {
                prop_assert!((1.0..=5.0).contains(s));
            }
        }
    }

    #[test]
    fn projection_has_one_row_per_year(
        volume in 1.0f64..1e4,
        growth in 0.0f64..2.0,
        horizon in 1u32..=15,
    ) {
        let table = default_table();
        let rows = project_growth(volume, growth, horizon, &table);

        prop_assert_eq!(rows.len(), horizon as usize);
        prop_assert_eq!(rows[0].volume_tb, volume);
        for pair in rows.windows(2) {
            prop_assert_eq!(pair[1].year, pair[0].year + 1);
            prop_assert!(pair[1].volume_tb >= pair[0].volume_tb);
        }
        for row in &rows {
            prop_assert_eq!(row.transfer.len(), table.len());
        }
    }

    #[test]
    fn faster_reads_never_take_longer(
        slow in 1.0f64..1e4,
        extra in 0.0f64..1e4,
        volume in 1.0f64..1e4,
    ) {
        let table = ReferenceTable::new(vec![
            record("slow", slow, 1.0),
            record("fast", slow + extra, 2.0),
        ])
        .unwrap();
        let rows = project_growth(volume, 0.0, 1, &table);
        let slow_hours = rows[0].hours_for("slow").unwrap();
        let fast_hours = rows[0].hours_for("fast").unwrap();
        prop_assert!(fast_hours <= slow_hours);
    }
}
