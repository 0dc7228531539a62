//! Plan artifacts written to a caller-supplied sink.

use crate::config::OutputFormat;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use survey_core::SurveyPlan;

/// JSON envelope around a plan.
#[derive(Debug, Serialize)]
pub struct PlanReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub tool_version: &'static str,
    pub plan: &'a SurveyPlan,
}

impl<'a> PlanReport<'a> {
    pub fn new(plan: &'a SurveyPlan) -> Self {
        Self {
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION"),
            plan,
        }
    }
}

pub fn render<W: Write>(plan: &SurveyPlan, format: OutputFormat, sink: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(plan, sink),
        OutputFormat::Csv => write_csv(plan, sink),
        OutputFormat::Summary => write_summary(plan, sink),
    }
}

pub fn write_json<W: Write>(plan: &SurveyPlan, sink: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *sink, &PlanReport::new(plan))?;
    writeln!(sink)?;
    Ok(())
}

pub fn write_csv<W: Write>(plan: &SurveyPlan, sink: &mut W) -> Result<()> {
    writeln!(
        sink,
        "index,from_x,from_y,to_x,to_y,distance_m,shape,peak_velocity_mps,accel_s,cruise_s,decel_s,start_s,end_s"
    )?;
    for segment in &plan.timeline.segments {
        let p = &segment.profile;
        writeln!(
            sink,
            "{},{:.3},{:.3},{:.3},{:.3},{:.3},{},{:.3},{:.3},{:.3},{:.3},{:.3},{:.3}",
            segment.index,
            segment.from.x,
            segment.from.y,
            segment.to.x,
            segment.to.y,
            p.distance_m,
            p.shape,
            p.peak_velocity_mps,
            p.accel_duration_s,
            p.cruise_duration_s,
            p.decel_duration_s,
            segment.start_time_s,
            segment.end_time_s,
        )?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(plan: &SurveyPlan, sink: &mut W) -> Result<()> {
    let summary = &plan.summary;
    let limits = &plan.speed_limits;
    writeln!(sink, "Survey plan ({}, {})", plan.options.capture_mode, plan.options.alignment)?;
    writeln!(
        sink,
        "  Footprint:   {:.2} m x {:.2} m (GSD {:.2} cm/px)",
        plan.footprint.width_m,
        plan.footprint.height_m,
        plan.gsd_m * 100.0
    )?;
    writeln!(
        sink,
        "  Spacing:     dx {:.2} m, dy {:.2} m",
        plan.spacing.dx_m, plan.spacing.dy_m
    )?;
    writeln!(
        sink,
        "  Grid:        {} rows x {} columns = {} waypoints",
        summary.rows, summary.columns, summary.waypoint_count
    )?;
    writeln!(
        sink,
        "  Speed:       blur {:.2} m/s, airframe {:.2} m/s, cruise {:.2} m/s",
        limits.blur_limit_mps, limits.airframe_limit_mps, limits.cruise_speed_mps
    )?;
    writeln!(
        sink,
        "  Segments:    {} trapezoid, {} triangle",
        summary.trapezoid_segments, summary.triangle_segments
    )?;
    writeln!(
        sink,
        "  Total:       {:.1} m in {:.1} s",
        summary.total_distance_m, summary.total_time_s
    )?;
    Ok(())
}
