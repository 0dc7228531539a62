//! Pinhole camera geometry: ground footprint and sampling distance.
//!
//! Axis convention: the image width axis maps to ground x and the image
//! height axis maps to ground y (nadir-pointing camera, flat ground).

use crate::error::{ensure_finite, ensure_positive, PlanResult};
use crate::models::CameraModel;
use serde::{Deserialize, Serialize};

/// Ground area covered by a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Ground extent along x (meters)
    pub width_m: f64,
    /// Ground extent along y (meters)
    pub height_m: f64,
    /// Ground distance per pixel along x (m/px)
    pub gsd_x_m: f64,
    /// Ground distance per pixel along y (m/px)
    pub gsd_y_m: f64,
}

impl Footprint {
    /// Ground sampling distance, the finer of the two axes.
    pub fn gsd(&self) -> f64 {
        self.gsd_x_m.min(self.gsd_y_m)
    }
}

/// Convert the pixel focal lengths to millimetres using the sensor pitch.
///
/// Returns `(fx_mm, fy_mm)`.
pub fn focal_length_mm(camera: &CameraModel) -> (f64, f64) {
    let pitch_x_mm = camera.sensor_width_mm / camera.image_width_px as f64;
    let pitch_y_mm = camera.sensor_height_mm / camera.image_height_px as f64;
    (camera.fx * pitch_x_mm, camera.focal_y() * pitch_y_mm)
}

/// Compute the frame footprint at `height_m` above flat ground.
///
/// Similar triangles: `ground / height = sensor / focal`, with the focal
/// length first brought into the sensor's millimetre unit.
pub fn footprint(camera: &CameraModel, height_m: f64) -> PlanResult<Footprint> {
    camera.validate()?;
    ensure_positive("height_m", height_m)?;

    let (fx_mm, fy_mm) = focal_length_mm(camera);
    let width_m = height_m * camera.sensor_width_mm / fx_mm;
    let height_m_ground = height_m * camera.sensor_height_mm / fy_mm;

    Ok(Footprint {
        width_m,
        height_m: height_m_ground,
        gsd_x_m: width_m / camera.image_width_px as f64,
        gsd_y_m: height_m_ground / camera.image_height_px as f64,
    })
}

/// Ground sampling distance at `height_m` above flat ground (m/px).
pub fn ground_sampling_distance(camera: &CameraModel, height_m: f64) -> PlanResult<f64> {
    Ok(footprint(camera, height_m)?.gsd())
}

/// Project a camera-frame point `[X, Y, Z]` (meters) to pixel coordinates.
pub fn project_point(camera: &CameraModel, point: [f64; 3]) -> PlanResult<[f64; 2]> {
    camera.validate()?;
    let [x, y, z] = point;
    ensure_finite("x", x)?;
    ensure_finite("y", y)?;
    ensure_positive("z", z)?;

    let (cx, cy) = camera.principal_point();
    Ok([camera.fx * (x / z) + cx, camera.focal_y() * (y / z) + cy])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn full_frame() -> CameraModel {
        CameraModel::from_focal_length_mm(24.0, 36.0, 24.0, 6000, 4000)
    }

    #[test]
    fn full_frame_footprint_at_50m() {
        let fp = footprint(&full_frame(), 50.0).unwrap();
        assert!((fp.width_m - 75.0).abs() < 1e-9);
        assert!((fp.height_m - 50.0).abs() < 1e-9);
        assert!((fp.gsd_x_m - 0.0125).abs() < 1e-12);
        assert!((fp.gsd_y_m - fp.gsd_x_m).abs() < 1e-12);
    }

    #[test]
    fn gsd_equals_height_over_focal_px() {
        let camera = CameraModel::new(3648.0, 13.2, 8.8, 5472, 3648);
        let gsd = ground_sampling_distance(&camera, 80.0).unwrap();
        assert!((gsd - 80.0 / 3648.0).abs() < 1e-12);
    }

    #[test]
    fn gsd_picks_finer_axis() {
        let mut camera = full_frame();
        camera.fy = Some(3000.0);
        let fp = footprint(&camera, 60.0).unwrap();
        assert!(fp.gsd_y_m > fp.gsd_x_m);
        assert_eq!(fp.gsd(), fp.gsd_x_m);
    }

    #[test]
    fn footprint_scales_linearly_with_height() {
        let low = footprint(&full_frame(), 40.0).unwrap();
        let high = footprint(&full_frame(), 80.0).unwrap();
        assert!((high.width_m - 2.0 * low.width_m).abs() < 1e-9);
        assert!((high.gsd() - 2.0 * low.gsd()).abs() < 1e-12);
    }

    #[test]
    fn footprint_rejects_bad_inputs() {
        assert!(matches!(
            footprint(&full_frame(), 0.0),
            Err(ConfigError::NonPositive { field: "height_m", .. })
        ));
        let mut camera = full_frame();
        camera.fx = -1.0;
        assert!(matches!(
            footprint(&camera, 50.0),
            Err(ConfigError::NonPositive { field: "fx", .. })
        ));
    }

    #[test]
    fn projection_of_optical_axis_hits_principal_point() {
        let camera = full_frame();
        let [u, v] = project_point(&camera, [0.0, 0.0, 50.0]).unwrap();
        assert_eq!((u, v), (3000.0, 2000.0));
    }

    #[test]
    fn projected_footprint_corner_lands_on_image_corner() {
        let camera = full_frame();
        let fp = footprint(&camera, 50.0).unwrap();
        let [u, v] = project_point(&camera, [fp.width_m / 2.0, fp.height_m / 2.0, 50.0]).unwrap();
        assert!((u - 6000.0).abs() < 1e-6);
        assert!((v - 4000.0).abs() < 1e-6);
    }

    #[test]
    fn projection_behind_camera_fails() {
        assert!(project_point(&full_frame(), [1.0, 1.0, 0.0]).is_err());
    }
}
