//! Core data models for survey planning.

use crate::error::{ensure_finite, ensure_positive, ensure_ratio, PlanResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Simple pinhole camera.
///
/// Focal lengths and principal point are expressed in pixels, the same unit
/// as the image dimensions. `fy` falls back to `fx` and the principal point
/// falls back to the image centre when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraModel {
    /// Focal length along the image x axis (pixels)
    pub fx: f64,
    /// Focal length along the image y axis (pixels)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fy: Option<f64>,
    /// Principal point x (pixels)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cx: Option<f64>,
    /// Principal point y (pixels)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cy: Option<f64>,
    pub sensor_width_mm: f64,
    pub sensor_height_mm: f64,
    pub image_width_px: u32,
    pub image_height_px: u32,
}

impl CameraModel {
    /// Create a camera with square pixels and a centred principal point.
    pub fn new(
        focal_length_px: f64,
        sensor_width_mm: f64,
        sensor_height_mm: f64,
        image_width_px: u32,
        image_height_px: u32,
    ) -> Self {
        Self {
            fx: focal_length_px,
            fy: None,
            cx: None,
            cy: None,
            sensor_width_mm,
            sensor_height_mm,
            image_width_px,
            image_height_px,
        }
    }

    /// Create a camera from a lens focal length in millimetres.
    ///
    /// The focal length is converted to pixels per axis using the sensor
    /// pitch, so non-square pixels yield distinct `fx`/`fy`.
    pub fn from_focal_length_mm(
        focal_length_mm: f64,
        sensor_width_mm: f64,
        sensor_height_mm: f64,
        image_width_px: u32,
        image_height_px: u32,
    ) -> Self {
        let fx = focal_length_mm * image_width_px as f64 / sensor_width_mm;
        let fy = focal_length_mm * image_height_px as f64 / sensor_height_mm;
        Self {
            fx,
            fy: Some(fy),
            cx: None,
            cy: None,
            sensor_width_mm,
            sensor_height_mm,
            image_width_px,
            image_height_px,
        }
    }

    /// Set the principal point.
    pub fn with_principal_point(mut self, cx: f64, cy: f64) -> Self {
        self.cx = Some(cx);
        self.cy = Some(cy);
        self
    }

    /// Focal length along y in pixels.
    pub fn focal_y(&self) -> f64 {
        self.fy.unwrap_or(self.fx)
    }

    /// Principal point in pixels, defaulting to the image centre.
    pub fn principal_point(&self) -> (f64, f64) {
        (
            self.cx.unwrap_or(self.image_width_px as f64 / 2.0),
            self.cy.unwrap_or(self.image_height_px as f64 / 2.0),
        )
    }

    pub fn validate(&self) -> PlanResult<()> {
        ensure_positive("fx", self.fx)?;
        ensure_positive("fy", self.focal_y())?;
        ensure_positive("sensor_width_mm", self.sensor_width_mm)?;
        ensure_positive("sensor_height_mm", self.sensor_height_mm)?;
        ensure_positive("image_width_px", self.image_width_px as f64)?;
        ensure_positive("image_height_px", self.image_height_px as f64)?;
        let (cx, cy) = self.principal_point();
        ensure_finite("cx", cx)?;
        ensure_finite("cy", cy)?;
        Ok(())
    }
}

/// User specification for one survey flight over a rectangular area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSpec {
    /// Height above ground (meters)
    pub height_m: f64,
    /// Fraction of scene shared between consecutive images, in [0, 1)
    pub overlap: f64,
    /// Fraction of scene shared between images in adjacent rows, in [0, 1)
    pub sidelap: f64,
    /// Exposure time per image (seconds)
    pub exposure_time_s: f64,
    /// Airframe speed limit (m/s)
    pub max_speed_mps: f64,
    /// Acceleration bound (m/s²)
    pub max_accel_mps2: f64,
    /// Extent of the area along x (meters)
    pub area_width_m: f64,
    /// Extent of the area along y (meters)
    pub area_height_m: f64,
}

impl FlightSpec {
    pub fn validate(&self) -> PlanResult<()> {
        ensure_positive("height_m", self.height_m)?;
        ensure_ratio("overlap", self.overlap)?;
        ensure_ratio("sidelap", self.sidelap)?;
        ensure_positive("exposure_time_s", self.exposure_time_s)?;
        ensure_positive("max_speed_mps", self.max_speed_mps)?;
        ensure_positive("max_accel_mps2", self.max_accel_mps2)?;
        ensure_positive("area_width_m", self.area_width_m)?;
        ensure_positive("area_height_m", self.area_height_m)?;
        Ok(())
    }
}

/// How capture centres are placed along each axis of the area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridAlignment {
    /// First centre on the origin edge, exact spacing, last centre at or past the far edge
    #[default]
    Boundary,
    /// Centres spread symmetrically inside the area with equal edge margins
    Centered,
}

impl GridAlignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            GridAlignment::Boundary => "boundary",
            GridAlignment::Centered => "centered",
        }
    }
}

impl fmt::Display for GridAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GridAlignment {
    type Err = GridAlignmentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "boundary" => Ok(GridAlignment::Boundary),
            "centered" | "centred" => Ok(GridAlignment::Centered),
            _ => Err(GridAlignmentParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown grid alignment: {0}")]
pub struct GridAlignmentParseError(String);

/// Speed the aircraft holds while a photo is taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
    /// Come to rest at every waypoint; cruise capped by the blur limit
    #[default]
    StopAndShoot,
    /// Pass every waypoint at the blur limit, cruise at airframe speed in between
    FlyThrough,
}

impl CaptureMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureMode::StopAndShoot => "stop_and_shoot",
            CaptureMode::FlyThrough => "fly_through",
        }
    }
}

impl fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CaptureMode {
    type Err = CaptureModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "stop_and_shoot" => Ok(CaptureMode::StopAndShoot),
            "fly_through" => Ok(CaptureMode::FlyThrough),
            _ => Err(CaptureModeParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown capture mode: {0}")]
pub struct CaptureModeParseError(String);

/// Planner knobs that are not part of the flight itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerOptions {
    /// Allowed motion blur during one exposure (pixels)
    pub blur_px_budget: f64,
    pub alignment: GridAlignment,
    pub capture_mode: CaptureMode,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            blur_px_budget: crate::speed::DEFAULT_BLUR_BUDGET_PX,
            alignment: GridAlignment::default(),
            capture_mode: CaptureMode::default(),
        }
    }
}

impl PlannerOptions {
    pub fn validate(&self) -> PlanResult<()> {
        ensure_positive("blur_px_budget", self.blur_px_budget)?;
        Ok(())
    }
}

/// Capture position in the survey plane.
///
/// `row`/`column` index the grid cell, independent of flight direction.
/// `row_start`/`row_end` mark where the aircraft enters and leaves a row,
/// i.e. the serpentine turn points. `z_m` and `capture_speed_mps` are zero
/// until the planner stamps the flight height and the speed at capture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    /// Capture altitude above the ground plane (meters)
    #[serde(default)]
    pub z_m: f64,
    /// Speed when the photo is triggered (m/s)
    #[serde(default)]
    pub capture_speed_mps: f64,
    pub row: usize,
    pub column: usize,
    #[serde(default)]
    pub row_start: bool,
    #[serde(default)]
    pub row_end: bool,
}

impl Waypoint {
    /// Euclidean distance to another waypoint in meters.
    pub fn distance_to(&self, other: &Waypoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn flight() -> FlightSpec {
        FlightSpec {
            height_m: 50.0,
            overlap: 0.7,
            sidelap: 0.6,
            exposure_time_s: 0.002,
            max_speed_mps: 12.0,
            max_accel_mps2: 2.0,
            area_width_m: 100.0,
            area_height_m: 70.0,
        }
    }

    #[test]
    fn focal_length_mm_conversion_matches_sensor_pitch() {
        let camera = CameraModel::from_focal_length_mm(24.0, 36.0, 24.0, 6000, 4000);
        assert!((camera.fx - 4000.0).abs() < 1e-9);
        assert!((camera.focal_y() - 4000.0).abs() < 1e-9);
        assert!(camera.validate().is_ok());
    }

    #[test]
    fn principal_point_defaults_to_image_centre() {
        let camera = CameraModel::new(4000.0, 36.0, 24.0, 6000, 4000);
        assert_eq!(camera.principal_point(), (3000.0, 2000.0));
        let shifted = camera.with_principal_point(2990.5, 2010.0);
        assert_eq!(shifted.principal_point(), (2990.5, 2010.0));
    }

    #[test]
    fn camera_rejects_zero_image_size() {
        let camera = CameraModel::new(4000.0, 36.0, 24.0, 0, 4000);
        assert!(matches!(
            camera.validate(),
            Err(ConfigError::NonPositive { field: "image_width_px", .. })
        ));
    }

    #[test]
    fn flight_spec_rejects_full_overlap() {
        let mut spec = flight();
        assert!(spec.validate().is_ok());
        spec.overlap = 1.0;
        assert!(matches!(
            spec.validate(),
            Err(ConfigError::RatioOutOfRange { field: "overlap", .. })
        ));
    }

    #[test]
    fn flight_spec_rejects_non_positive_fields() {
        let cases: [(&str, fn(&mut FlightSpec)); 4] = [
            ("exposure_time_s", |s| s.exposure_time_s = 0.0),
            ("max_accel_mps2", |s| s.max_accel_mps2 = -1.0),
            ("area_width_m", |s| s.area_width_m = 0.0),
            ("height_m", |s| s.height_m = 0.0),
        ];
        for (field, mutate) in cases {
            let mut spec = flight();
            mutate(&mut spec);
            match spec.validate() {
                Err(ConfigError::NonPositive { field: got, .. }) => assert_eq!(got, field),
                other => panic!("expected NonPositive for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn options_parse_from_str() {
        assert_eq!("Centered".parse::<GridAlignment>().unwrap(), GridAlignment::Centered);
        assert_eq!("fly-through".parse::<CaptureMode>().unwrap(), CaptureMode::FlyThrough);
        assert!("zigzag".parse::<GridAlignment>().is_err());
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: PlannerOptions =
            serde_json::from_str(r#"{ "capture_mode": "fly_through" }"#).unwrap();
        assert_eq!(options.capture_mode, CaptureMode::FlyThrough);
        assert_eq!(options.alignment, GridAlignment::Boundary);
        assert_eq!(options.blur_px_budget, 1.0);
    }
}
