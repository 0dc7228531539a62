//! Bounded-acceleration segment timing.
//!
//! Every leg between consecutive waypoints is flown with a symmetric
//! velocity profile: accelerate at `a` from the boundary speed, optionally
//! cruise, then decelerate back to the boundary speed. When the leg is too
//! short to reach cruise speed the profile collapses to a triangle.

use crate::error::{ensure_non_negative, ensure_positive, ConfigError, PlanResult};
use crate::models::Waypoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Velocity-time shape of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileShape {
    /// Cruise speed reached and held
    Trapezoid,
    /// Leg too short to reach cruise speed
    Triangle,
}

impl ProfileShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileShape::Trapezoid => "trapezoid",
            ProfileShape::Triangle => "triangle",
        }
    }
}

impl fmt::Display for ProfileShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Velocity profile for a single leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityProfile {
    pub shape: ProfileShape,
    /// Speed at both ends of the leg (m/s)
    pub boundary_velocity_mps: f64,
    pub peak_velocity_mps: f64,
    pub accel_duration_s: f64,
    pub cruise_duration_s: f64,
    pub decel_duration_s: f64,
    pub distance_m: f64,
    pub total_time_s: f64,
}

impl VelocityProfile {
    /// Profile for a leg that starts and ends at rest.
    pub fn compute(distance_m: f64, cruise_speed_mps: f64, accel_mps2: f64) -> PlanResult<Self> {
        Self::with_boundary_speed(distance_m, 0.0, cruise_speed_mps, accel_mps2)
    }

    /// Profile for a leg entered and left at `boundary_mps`.
    ///
    /// A trapezoid is chosen whenever `distance >= 2 · (vc² - v0²) / 2a`; at
    /// exactly that distance the cruise phase has zero length, which keeps
    /// total time continuous across the trapezoid/triangle threshold.
    pub fn with_boundary_speed(
        distance_m: f64,
        boundary_mps: f64,
        cruise_speed_mps: f64,
        accel_mps2: f64,
    ) -> PlanResult<Self> {
        ensure_non_negative("distance_m", distance_m)?;
        ensure_non_negative("boundary_speed_mps", boundary_mps)?;
        ensure_positive("cruise_speed_mps", cruise_speed_mps)?;
        ensure_positive("max_accel_mps2", accel_mps2)?;
        if boundary_mps > cruise_speed_mps {
            return Err(ConfigError::InconsistentSpeeds {
                boundary: boundary_mps,
                cruise: cruise_speed_mps,
            });
        }

        if distance_m == 0.0 {
            return Ok(Self::stationary(boundary_mps));
        }

        let ramp_distance = (cruise_speed_mps.powi(2) - boundary_mps.powi(2)) / (2.0 * accel_mps2);
        let minimum_distance = 2.0 * ramp_distance;

        if distance_m >= minimum_distance {
            let ramp_time = (cruise_speed_mps - boundary_mps) / accel_mps2;
            let cruise_time = (distance_m - minimum_distance) / cruise_speed_mps;
            Ok(Self {
                shape: ProfileShape::Trapezoid,
                boundary_velocity_mps: boundary_mps,
                peak_velocity_mps: cruise_speed_mps,
                accel_duration_s: ramp_time,
                cruise_duration_s: cruise_time,
                decel_duration_s: ramp_time,
                distance_m,
                total_time_s: 2.0 * ramp_time + cruise_time,
            })
        } else {
            // Each half covers d/2: (vp² - v0²) / 2a = d/2
            let peak = (boundary_mps.powi(2) + accel_mps2 * distance_m).sqrt();
            let ramp_time = (peak - boundary_mps) / accel_mps2;
            Ok(Self {
                shape: ProfileShape::Triangle,
                boundary_velocity_mps: boundary_mps,
                peak_velocity_mps: peak,
                accel_duration_s: ramp_time,
                cruise_duration_s: 0.0,
                decel_duration_s: ramp_time,
                distance_m,
                total_time_s: 2.0 * ramp_time,
            })
        }
    }

    /// Zero-length leg, e.g. duplicate waypoints.
    fn stationary(boundary_mps: f64) -> Self {
        Self {
            shape: ProfileShape::Triangle,
            boundary_velocity_mps: boundary_mps,
            peak_velocity_mps: boundary_mps,
            accel_duration_s: 0.0,
            cruise_duration_s: 0.0,
            decel_duration_s: 0.0,
            distance_m: 0.0,
            total_time_s: 0.0,
        }
    }

    /// Distance integrated over the three phases.
    pub fn covered_distance(&self) -> f64 {
        let v0 = self.boundary_velocity_mps;
        let vp = self.peak_velocity_mps;
        self.accel_duration_s * (v0 + vp) / 2.0
            + self.cruise_duration_s * vp
            + self.decel_duration_s * (vp + v0) / 2.0
    }

    /// Corner points `(t, v)` of the profile, for plotting.
    pub fn breakpoints(&self) -> Vec<(f64, f64)> {
        let v0 = self.boundary_velocity_mps;
        let vp = self.peak_velocity_mps;
        let ta = self.accel_duration_s;
        match self.shape {
            ProfileShape::Trapezoid => vec![
                (0.0, v0),
                (ta, vp),
                (ta + self.cruise_duration_s, vp),
                (self.total_time_s, v0),
            ],
            ProfileShape::Triangle => vec![(0.0, v0), (ta, vp), (self.total_time_s, v0)],
        }
    }

    /// Speed `t` seconds into the leg; boundary speed outside the leg.
    pub fn velocity_at(&self, t: f64) -> f64 {
        let v0 = self.boundary_velocity_mps;
        let vp = self.peak_velocity_mps;
        let ta = self.accel_duration_s;
        let cruise_end = ta + self.cruise_duration_s;

        if t <= 0.0 || t >= self.total_time_s {
            v0
        } else if t < ta {
            v0 + (vp - v0) * t / ta
        } else if t <= cruise_end {
            vp
        } else {
            vp - (vp - v0) * (t - cruise_end) / self.decel_duration_s
        }
    }

    /// Distance travelled `t` seconds into the leg, clamped to the leg.
    pub fn distance_at(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, self.total_time_s);
        let v0 = self.boundary_velocity_mps;
        let vp = self.peak_velocity_mps;
        let ta = self.accel_duration_s;
        let tc = self.cruise_duration_s;
        let td = self.decel_duration_s;

        if t <= ta {
            if ta <= 0.0 {
                return 0.0;
            }
            return v0 * t + 0.5 * (vp - v0) * t * t / ta;
        }
        let accel_distance = 0.5 * (v0 + vp) * ta;
        if t <= ta + tc {
            return accel_distance + vp * (t - ta);
        }
        let tau = t - ta - tc;
        let decel = if td > 0.0 {
            vp * tau - 0.5 * (vp - v0) * tau * tau / td
        } else {
            0.0
        };
        accel_distance + vp * tc + decel
    }
}

/// One leg of the survey with its place on the mission clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub index: usize,
    pub from: Waypoint,
    pub to: Waypoint,
    pub profile: VelocityProfile,
    pub start_time_s: f64,
    pub end_time_s: f64,
}

impl Segment {
    pub fn distance_m(&self) -> f64 {
        self.profile.distance_m
    }

    pub fn duration_s(&self) -> f64 {
        self.profile.total_time_s
    }
}

/// Ordered segment timings for a whole mission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub segments: Vec<Segment>,
}

impl Timeline {
    pub fn total_time_s(&self) -> f64 {
        self.segments.last().map(|s| s.end_time_s).unwrap_or(0.0)
    }

    pub fn total_distance_m(&self) -> f64 {
        self.segments.iter().map(Segment::distance_m).sum()
    }

    /// Mission time at which each waypoint is reached, starting at 0.
    ///
    /// One entry per waypoint. A timeline without segments (zero or one
    /// waypoint) yields `[0.0]`.
    pub fn arrival_times(&self) -> Vec<f64> {
        let mut times = Vec::with_capacity(self.segments.len() + 1);
        times.push(0.0);
        times.extend(self.segments.iter().map(|s| s.end_time_s));
        times
    }

    /// Number of segments with the given profile shape.
    pub fn count_shape(&self, shape: ProfileShape) -> usize {
        self.segments
            .iter()
            .filter(|s| s.profile.shape == shape)
            .count()
    }

    /// Commanded speed at mission time `t`.
    pub fn velocity_at(&self, t: f64) -> f64 {
        let Some(last) = self.segments.last() else {
            return 0.0;
        };
        let idx = self.segments.partition_point(|s| s.end_time_s <= t);
        match self.segments.get(idx) {
            Some(segment) => segment.profile.velocity_at(t - segment.start_time_s),
            None => last.profile.boundary_velocity_mps,
        }
    }
}

/// Time every leg of a stop-and-shoot mission.
pub fn build_timeline(
    waypoints: &[Waypoint],
    cruise_speed_mps: f64,
    accel_mps2: f64,
) -> PlanResult<Timeline> {
    build_timeline_with_boundary(waypoints, 0.0, cruise_speed_mps, accel_mps2)
}

/// Time every leg with a non-zero speed at each waypoint.
///
/// Profiles are independent per leg; only the start times are a running sum
/// in waypoint order.
pub fn build_timeline_with_boundary(
    waypoints: &[Waypoint],
    boundary_mps: f64,
    cruise_speed_mps: f64,
    accel_mps2: f64,
) -> PlanResult<Timeline> {
    let mut segments = Vec::with_capacity(waypoints.len().saturating_sub(1));
    let mut clock_s = 0.0;

    for (index, pair) in waypoints.windows(2).enumerate() {
        let (from, to) = (pair[0], pair[1]);
        let profile = VelocityProfile::with_boundary_speed(
            from.distance_to(&to),
            boundary_mps,
            cruise_speed_mps,
            accel_mps2,
        )?;
        let end_time_s = clock_s + profile.total_time_s;
        segments.push(Segment {
            index,
            from,
            to,
            profile,
            start_time_s: clock_s,
            end_time_s,
        });
        clock_s = end_time_s;
    }

    Ok(Timeline { segments })
}
