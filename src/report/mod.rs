//! Everything a display needs, derived once from the table and parameters.

use serde::Serialize;

use crate::scoring::{radar_series, RadarSeries};
use crate::simulation::{project, ProjectionRow, SimulationParams};
use crate::table::{ReferenceTable, TechnologyRecord};

/// Executive reading of the projection table
pub const INTERPRETATION: &str = "As volume grows, sequential-read transfer times grow with it. \
SSD keeps the lowest times, HDD and tape degrade first, and cloud additionally depends on network connectivity.";

/// Closing recommendations, one per bullet
pub const CONCLUSIONS: [&str; 2] = [
    "Favour a hybrid architecture: SSD (critical), HDD (active), Tape (archive), Cloud (elasticity/DR).",
    "Run a proof of concept, validate real costs with vendors, load-test, and define metrics (SLA, TCO, RPO/RTO).",
];

/// Metrics shown as single-value bar comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    ReadSpeed,
    WriteSpeed,
    CostPerGb,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::ReadSpeed, Metric::WriteSpeed, Metric::CostPerGb];

    pub fn title(&self) -> &'static str {
        match self {
            Metric::ReadSpeed => "Read speed (MB/s)",
            Metric::WriteSpeed => "Write speed (MB/s)",
            Metric::CostPerGb => "Cost per GB (USD)",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::ReadSpeed | Metric::WriteSpeed => "MB/s",
            Metric::CostPerGb => "USD/GB",
        }
    }

    pub fn value(&self, record: &TechnologyRecord) -> f64 {
        match self {
            Metric::ReadSpeed => record.read_speed,
            Metric::WriteSpeed => record.write_speed,
            Metric::CostPerGb => record.cost_per_gb,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarPoint {
    pub technology: String,
    pub value: f64,
}

/// One bar chart: a metric across all technologies, in table order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub metric: Metric,
    pub points: Vec<BarPoint>,
}

impl BarSeries {
    pub fn from_table(metric: Metric, table: &ReferenceTable) -> Self {
        Self {
            metric,
            points: table
                .iter()
                .map(|record| BarPoint {
                    technology: record.name.clone(),
                    value: metric.value(record),
                })
                .collect(),
        }
    }

    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0_f64, f64::max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub table: ReferenceTable,
    pub params: SimulationParams,
    pub bars: Vec<BarSeries>,
    pub radar: Vec<RadarSeries>,
    pub projection: Vec<ProjectionRow>,
    #[serde(skip)]
    pub narrative: String,
}

impl Report {
    pub fn build(table: ReferenceTable, narrative: String, params: SimulationParams) -> Self {
        let bars = Metric::ALL
            .iter()
            .map(|metric| BarSeries::from_table(*metric, &table))
            .collect();
        let radar = radar_series(&table);
        let projection = project(&params, &table);

        Self {
            table,
            params,
            bars,
            radar,
            projection,
            narrative,
        }
    }

    /// Re-run the projection for new parameters. The table-derived parts
    /// do not depend on them and are kept.
    pub fn set_params(&mut self, params: SimulationParams) {
        self.params = params;
        self.projection = project(&params, &self.table);
    }

    pub fn bar(&self, metric: Metric) -> Option<&BarSeries> {
        self.bars.iter().find(|b| b.metric == metric)
    }
}
