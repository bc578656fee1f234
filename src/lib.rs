pub mod advisory;
pub mod config;
pub mod logging;
pub mod narrative;
pub mod output;
pub mod report;
pub mod scoring;
pub mod simulation;
pub mod stderr_buffer;
pub mod table;
pub mod tui;
