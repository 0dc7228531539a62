//! End-to-end survey planning.
//!
//! Chains camera geometry, grid layout, the blur speed limit and the motion
//! profiler. Inputs are validated once when the planner is built.

use crate::camera::{footprint, Footprint};
use crate::error::PlanResult;
use crate::grid::{layout_grid, spacing, GridLayout, Spacing};
use crate::models::{CameraModel, FlightSpec, PlannerOptions};
use crate::profile::{build_timeline_with_boundary, ProfileShape, Timeline};
use crate::speed::{max_speed, SpeedLimits};
use serde::{Deserialize, Serialize};

/// Validated planning inputs.
#[derive(Debug, Clone)]
pub struct SurveyPlanner {
    camera: CameraModel,
    flight: FlightSpec,
    options: PlannerOptions,
}

/// Headline numbers for a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub waypoint_count: usize,
    pub rows: usize,
    pub columns: usize,
    pub total_distance_m: f64,
    pub total_time_s: f64,
    pub trapezoid_segments: usize,
    pub triangle_segments: usize,
}

/// Everything derived for one survey flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyPlan {
    pub options: PlannerOptions,
    pub footprint: Footprint,
    pub gsd_m: f64,
    pub spacing: Spacing,
    pub speed_limits: SpeedLimits,
    pub grid: GridLayout,
    pub timeline: Timeline,
    pub summary: PlanSummary,
}

impl SurveyPlanner {
    pub fn new(camera: CameraModel, flight: FlightSpec, options: PlannerOptions) -> PlanResult<Self> {
        camera.validate()?;
        flight.validate()?;
        options.validate()?;
        Ok(Self {
            camera,
            flight,
            options,
        })
    }

    pub fn camera(&self) -> &CameraModel {
        &self.camera
    }

    pub fn flight(&self) -> &FlightSpec {
        &self.flight
    }

    pub fn options(&self) -> &PlannerOptions {
        &self.options
    }

    /// Run the full pipeline.
    pub fn plan(&self) -> PlanResult<SurveyPlan> {
        let flight = &self.flight;

        let footprint = footprint(&self.camera, flight.height_m)?;
        let gsd_m = footprint.gsd();
        tracing::debug!(
            width_m = footprint.width_m,
            height_m = footprint.height_m,
            gsd_m,
            "Derived frame footprint"
        );

        let spacing = spacing(&footprint, flight.overlap, flight.sidelap)?;
        let mut grid = layout_grid(
            flight.area_width_m,
            flight.area_height_m,
            &spacing,
            self.options.alignment,
        )?;
        tracing::debug!(
            dx_m = spacing.dx_m,
            dy_m = spacing.dy_m,
            rows = grid.rows,
            columns = grid.columns,
            "Laid out capture grid"
        );

        let blur_limit = max_speed(gsd_m, flight.exposure_time_s, self.options.blur_px_budget)?;
        let speed_limits =
            SpeedLimits::resolve(blur_limit, flight.max_speed_mps, self.options.capture_mode);
        if speed_limits.is_blur_limited() {
            tracing::warn!(
                blur_limit_mps = speed_limits.blur_limit_mps,
                airframe_limit_mps = speed_limits.airframe_limit_mps,
                "Capture speed limited by motion blur"
            );
        }
        for waypoint in &mut grid.waypoints {
            waypoint.z_m = flight.height_m;
            waypoint.capture_speed_mps = speed_limits.boundary_speed_mps;
        }

        let timeline = build_timeline_with_boundary(
            &grid.waypoints,
            speed_limits.boundary_speed_mps,
            speed_limits.cruise_speed_mps,
            flight.max_accel_mps2,
        )?;

        let summary = PlanSummary {
            waypoint_count: grid.waypoints.len(),
            rows: grid.rows,
            columns: grid.columns,
            total_distance_m: timeline.total_distance_m(),
            total_time_s: timeline.total_time_s(),
            trapezoid_segments: timeline.count_shape(ProfileShape::Trapezoid),
            triangle_segments: timeline.count_shape(ProfileShape::Triangle),
        };
        tracing::info!(
            waypoints = summary.waypoint_count,
            distance_m = summary.total_distance_m,
            time_s = summary.total_time_s,
            mode = %self.options.capture_mode,
            "Survey plan ready"
        );

        Ok(SurveyPlan {
            options: self.options.clone(),
            footprint,
            gsd_m,
            spacing,
            speed_limits,
            grid,
            timeline,
            summary,
        })
    }
}

/// Plan a survey in one call.
pub fn plan_survey(
    camera: &CameraModel,
    flight: &FlightSpec,
    options: &PlannerOptions,
) -> PlanResult<SurveyPlan> {
    SurveyPlanner::new(camera.clone(), flight.clone(), options.clone())?.plan()
}
