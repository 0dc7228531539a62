//! Mission file loading and option resolution.

use crate::config::Config;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use survey_core::{CameraModel, CaptureMode, FlightSpec, GridAlignment, PlannerOptions};

/// Mission description as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct MissionFile {
    pub camera: CameraModel,
    pub flight: FlightSpec,
    #[serde(default)]
    pub options: MissionOptions,
}

/// Partially specified planner options, from the mission file or the
/// command line. Unset fields fall through to the next source.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MissionOptions {
    pub blur_px_budget: Option<f64>,
    pub alignment: Option<GridAlignment>,
    pub capture_mode: Option<CaptureMode>,
}

pub fn load_mission(path: &Path) -> Result<MissionFile> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mission file {}", path.display()))?;
    parse_mission(&data).with_context(|| format!("Invalid mission file {}", path.display()))
}

pub fn parse_mission(data: &str) -> Result<MissionFile> {
    Ok(serde_json::from_str(data)?)
}

/// Merge option sources: flags, then mission file, then environment, then defaults.
pub fn resolve_options(
    mission: &MissionOptions,
    overrides: &MissionOptions,
    config: &Config,
) -> PlannerOptions {
    let defaults = PlannerOptions::default();
    PlannerOptions {
        blur_px_budget: overrides
            .blur_px_budget
            .or(mission.blur_px_budget)
            .or(config.blur_px_budget)
            .unwrap_or(defaults.blur_px_budget),
        alignment: overrides
            .alignment
            .or(mission.alignment)
            .unwrap_or(defaults.alignment),
        capture_mode: overrides
            .capture_mode
            .or(mission.capture_mode)
            .unwrap_or(defaults.capture_mode),
    }
}
