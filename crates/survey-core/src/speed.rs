//! Capture speed limits derived from motion blur.

use crate::error::{ensure_positive, PlanResult};
use crate::models::CaptureMode;
use serde::{Deserialize, Serialize};

/// Default allowed image motion during one exposure (pixels).
pub const DEFAULT_BLUR_BUDGET_PX: f64 = 1.0;

/// Fastest ground speed that keeps motion blur within `blur_px_budget`.
///
/// The ground distance covered during one exposure must not exceed the blur
/// budget expressed in ground units: `v = budget · gsd / exposure`.
pub fn max_speed(gsd_m: f64, exposure_time_s: f64, blur_px_budget: f64) -> PlanResult<f64> {
    ensure_positive("gsd_m", gsd_m)?;
    ensure_positive("exposure_time_s", exposure_time_s)?;
    ensure_positive("blur_px_budget", blur_px_budget)?;
    Ok(blur_px_budget * gsd_m / exposure_time_s)
}

/// Speeds handed to the motion profiler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedLimits {
    /// Motion-blur ceiling (m/s)
    pub blur_limit_mps: f64,
    /// Airframe ceiling (m/s)
    pub airframe_limit_mps: f64,
    /// Speed at each capture waypoint
    pub boundary_speed_mps: f64,
    /// Speed held between waypoints when distance allows
    pub cruise_speed_mps: f64,
}

impl SpeedLimits {
    /// Combine the blur and airframe ceilings for a capture mode.
    pub fn resolve(blur_limit_mps: f64, airframe_limit_mps: f64, mode: CaptureMode) -> Self {
        let capture_cap = blur_limit_mps.min(airframe_limit_mps);
        let (boundary_speed_mps, cruise_speed_mps) = match mode {
            CaptureMode::StopAndShoot => (0.0, capture_cap),
            CaptureMode::FlyThrough => (capture_cap, airframe_limit_mps),
        };
        Self {
            blur_limit_mps,
            airframe_limit_mps,
            boundary_speed_mps,
            cruise_speed_mps,
        }
    }

    /// Speed never exceeded while a photo is being taken.
    pub fn capture_cap_mps(&self) -> f64 {
        self.blur_limit_mps.min(self.airframe_limit_mps)
    }

    pub fn is_blur_limited(&self) -> bool {
        self.blur_limit_mps < self.airframe_limit_mps
    }
}
