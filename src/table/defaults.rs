use super::types::{ReferenceTable, TechnologyRecord};

/// Built-in reference values used when no table file is available.
pub fn default_records() -> Vec<TechnologyRecord> {
    vec![
        tech("HDD", 200.0, 170.0, 20.0, 0.035, 1_200_000.0, 8.0, 3.0, 3.0),
        tech("SSD", 2500.0, 1800.0, 8.0, 0.15, 1_500_000.0, 4.0, 4.0, 3.0),
        tech("Tape", 250.0, 200.0, 30.0, 0.008, 2_000_000.0, 7.0, 2.0, 2.0),
        // No device-level MTBF or power draw for cloud storage
        tech("Cloud", 300.0, 250.0, 1_000_000.0, 0.025, 0.0, 0.0, 5.0, 5.0),
    ]
}

/// The built-in table (HDD, SSD, Tape, Cloud)
pub fn default_table() -> ReferenceTable {
    ReferenceTable::from_trusted(default_records())
}

#[allow(clippy::too_many_arguments)]
fn tech(
    name: &str,
    read_speed: f64,
    write_speed: f64,
    capacity: f64,
    cost_per_gb: f64,
    mtbf_hours: f64,
    power_watts: f64,
    security_score: f64,
    scalability_score: f64,
) -> TechnologyRecord {
    TechnologyRecord {
        name: name.to_string(),
        read_speed,
        write_speed,
        capacity,
        cost_per_gb,
        mtbf_hours,
        power_watts,
        security_score,
        scalability_score,
    }
}
