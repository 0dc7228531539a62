//! Mission file to rendered artifact, end to end.

use std::path::PathBuf;
use survey_cli::{load_mission, render, resolve_options, Config, MissionOptions, OutputFormat};
use survey_core::{CaptureMode, ConfigError, SurveyPlanner};

fn demo_mission() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/full_frame_mission.json")
}

fn config() -> Config {
    Config {
        blur_px_budget: None,
        output_format: OutputFormat::Json,
    }
}

#[test]
fn demo_mission_plans_and_renders() {
    let mission = load_mission(&demo_mission()).unwrap();
    let options = resolve_options(&mission.options, &MissionOptions::default(), &config());
    let plan = SurveyPlanner::new(mission.camera, mission.flight, options)
        .unwrap()
        .plan()
        .unwrap();

    // ceil(140/30) + 1 = 6 columns, ceil(100/15) + 1 = 8 rows
    assert_eq!(plan.grid.columns, 6);
    assert_eq!(plan.grid.rows, 8);

    let mut sink = Vec::new();
    render(&plan, OutputFormat::Csv, &mut sink).unwrap();
    let csv = String::from_utf8(sink).unwrap();
    assert_eq!(csv.lines().count(), plan.timeline.segments.len() + 1);
}

#[test]
fn fly_through_override_shortens_mission() {
    let mission = load_mission(&demo_mission()).unwrap();
    let base = resolve_options(&mission.options, &MissionOptions::default(), &config());
    let fast = resolve_options(
        &mission.options,
        &MissionOptions {
            capture_mode: Some(CaptureMode::FlyThrough),
            ..MissionOptions::default()
        },
        &config(),
    );

    let stop = SurveyPlanner::new(mission.camera.clone(), mission.flight.clone(), base)
        .unwrap()
        .plan()
        .unwrap();
    let fly = SurveyPlanner::new(mission.camera, mission.flight, fast)
        .unwrap()
        .plan()
        .unwrap();
    assert!(fly.summary.total_time_s < stop.summary.total_time_s);
}

#[test]
fn invalid_mission_surfaces_config_error() {
    let mut mission = load_mission(&demo_mission()).unwrap();
    mission.flight.overlap = 1.0;
    let options = resolve_options(&mission.options, &MissionOptions::default(), &config());
    let err = SurveyPlanner::new(mission.camera, mission.flight, options).unwrap_err();
    assert!(matches!(err, ConfigError::RatioOutOfRange { field: "overlap", .. }));
}

#[test]
fn missing_file_reports_path() {
    let err = load_mission(&PathBuf::from("does/not/exist.json")).unwrap_err();
    assert!(format!("{err:#}").contains("does/not/exist.json"));
}
