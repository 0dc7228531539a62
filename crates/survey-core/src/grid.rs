//! Capture grid generation in a serpentine (boustrophedon) order.
//!
//! Rows run along x and are stacked along y. Row 0 sits at the low-y edge and
//! is flown toward +x; every odd row is flown toward -x so consecutive rows
//! join at the same end of the area.

use crate::camera::Footprint;
use crate::error::{ensure_positive, ensure_ratio, ConfigError, PlanResult};
use crate::models::{GridAlignment, Waypoint};
use serde::{Deserialize, Serialize};

/// Largest capture grid a single plan may hold.
pub const MAX_WAYPOINTS: usize = 1_000_000;

/// Distance between neighbouring capture centres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    /// Step between captures within a row (meters)
    pub dx_m: f64,
    /// Step between rows (meters)
    pub dy_m: f64,
}

/// Ordered capture grid covering the survey area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: usize,
    pub columns: usize,
    pub step_x_m: f64,
    pub step_y_m: f64,
    pub waypoints: Vec<Waypoint>,
}

impl GridLayout {
    /// Waypoints of one row in flight order.
    pub fn row(&self, row: usize) -> &[Waypoint] {
        let start = (row * self.columns).min(self.waypoints.len());
        let end = (start + self.columns).min(self.waypoints.len());
        &self.waypoints[start..end]
    }
}

/// Derive capture spacing from the frame footprint.
///
/// Sidelap shrinks the along-row step (`dx`, footprint width) and overlap
/// shrinks the between-row step (`dy`, footprint height).
pub fn spacing(footprint: &Footprint, overlap: f64, sidelap: f64) -> PlanResult<Spacing> {
    ensure_ratio("overlap", overlap)?;
    ensure_ratio("sidelap", sidelap)?;

    let dx_m = footprint.width_m * (1.0 - sidelap);
    let dy_m = footprint.height_m * (1.0 - overlap);
    check_step("x", dx_m)?;
    check_step("y", dy_m)?;

    Ok(Spacing { dx_m, dy_m })
}

/// Generate the boundary-aligned serpentine grid.
///
/// Produces `ceil(area_height / dy) + 1` rows and `ceil(area_width / dx) + 1`
/// columns at exact multiples of the steps, starting at the origin corner.
pub fn generate_waypoints(
    area_width_m: f64,
    area_height_m: f64,
    dx_m: f64,
    dy_m: f64,
) -> PlanResult<Vec<Waypoint>> {
    let spacing = Spacing { dx_m, dy_m };
    Ok(layout_grid(area_width_m, area_height_m, &spacing, GridAlignment::Boundary)?.waypoints)
}

/// Lay out the capture grid with the requested alignment.
pub fn layout_grid(
    area_width_m: f64,
    area_height_m: f64,
    spacing: &Spacing,
    alignment: GridAlignment,
) -> PlanResult<GridLayout> {
    check_step("x", spacing.dx_m)?;
    check_step("y", spacing.dy_m)?;
    ensure_positive("area_width_m", area_width_m)?;
    ensure_positive("area_height_m", area_height_m)?;

    let columns = axis_count(area_width_m, spacing.dx_m, alignment);
    let rows = axis_count(area_height_m, spacing.dy_m, alignment);
    if !(rows * columns).is_finite() || rows * columns > MAX_WAYPOINTS as f64 {
        return Err(ConfigError::GridTooLarge {
            rows,
            columns,
            limit: MAX_WAYPOINTS,
        });
    }

    let (xs, step_x_m) = axis_positions(area_width_m, spacing.dx_m, columns as usize, alignment);
    let (ys, step_y_m) = axis_positions(area_height_m, spacing.dy_m, rows as usize, alignment);

    Ok(GridLayout {
        rows: ys.len(),
        columns: xs.len(),
        step_x_m,
        step_y_m,
        waypoints: serpentine(&xs, &ys)?,
    })
}

fn check_step(axis: &'static str, step: f64) -> PlanResult<()> {
    if step.is_finite() && step > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::DegenerateSpacing { axis, value: step })
    }
}

/// Number of capture centres along one axis, kept in f64 until bounded.
fn axis_count(extent: f64, step: f64, alignment: GridAlignment) -> f64 {
    let gaps = (extent / step).ceil();
    match alignment {
        GridAlignment::Boundary => gaps + 1.0,
        GridAlignment::Centered => gaps.max(1.0),
    }
}

/// Capture centres along one axis plus the step actually used.
fn axis_positions(
    extent: f64,
    step: f64,
    count: usize,
    alignment: GridAlignment,
) -> (Vec<f64>, f64) {
    match alignment {
        GridAlignment::Boundary => ((0..count).map(|i| i as f64 * step).collect(), step),
        GridAlignment::Centered => {
            if count <= 1 {
                return (vec![extent / 2.0], step);
            }
            // count - 1 full steps always fit, leaving an equal margin each side
            let offset = 0.5 * (extent - step * (count - 1) as f64);
            ((0..count).map(|i| offset + i as f64 * step).collect(), step)
        }
    }
}

fn serpentine(xs: &[f64], ys: &[f64]) -> PlanResult<Vec<Waypoint>> {
    let total = xs
        .len()
        .checked_mul(ys.len())
        .filter(|&n| n <= MAX_WAYPOINTS)
        .ok_or(ConfigError::GridTooLarge {
            rows: ys.len() as f64,
            columns: xs.len() as f64,
            limit: MAX_WAYPOINTS,
        })?;
    let mut waypoints = Vec::with_capacity(total);
    let last = xs.len().saturating_sub(1);

    for (row, &y) in ys.iter().enumerate() {
        let mut columns: Vec<usize> = (0..xs.len()).collect();
        if row % 2 == 1 {
            columns.reverse();
        }
        for (visit, &column) in columns.iter().enumerate() {
            waypoints.push(Waypoint {
                x: xs[column],
                y,
                z_m: 0.0,
                capture_speed_mps: 0.0,
                row,
                column,
                row_start: visit == 0,
                row_end: visit == last,
            });
        }
    }

    Ok(waypoints)
}
