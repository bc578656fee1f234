pub mod config;
pub mod params;
pub mod projection;
pub mod validation;

pub use config::SimulationConfig;
pub use params::{Adjusted, ParamField, SimulationParams};
pub use projection::{
    project, project_growth, round2, transfer_hours, ProjectionRow, TransferTime, MB_PER_TB,
};
pub use validation::validate_simulation;
