//! Survey planning core: camera footprint, serpentine capture grid,
//! motion-blur speed limit and bounded-acceleration segment timing.

pub mod camera;
pub mod error;
pub mod grid;
pub mod models;
pub mod planner;
pub mod profile;
pub mod speed;

pub use camera::{focal_length_mm, footprint, ground_sampling_distance, project_point, Footprint};
pub use error::{ConfigError, PlanResult};
pub use grid::{generate_waypoints, layout_grid, spacing, GridLayout, Spacing};
pub use models::{CameraModel, CaptureMode, FlightSpec, GridAlignment, PlannerOptions, Waypoint};
pub use planner::{plan_survey, PlanSummary, SurveyPlan, SurveyPlanner};
pub use profile::{
    build_timeline, build_timeline_with_boundary, ProfileShape, Segment, Timeline,
    VelocityProfile,
};
pub use speed::{max_speed, SpeedLimits, DEFAULT_BLUR_BUDGET_PX};
