//! Survey CLI - loads a mission file, runs the planner and writes
//! plan artifacts (JSON report, segment CSV or a text summary).

pub mod config;
pub mod mission;
pub mod render;

pub use config::{Config, OutputFormat};
pub use mission::{load_mission, resolve_options, MissionFile, MissionOptions};
pub use render::{render, PlanReport};
