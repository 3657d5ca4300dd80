//! Stage layout calculator
//!
//! Maps surface dimensions plus the target's aspect ratio into the fixed
//! geometry every other module reads: ground line, launcher anchor, target
//! bounding box, sling fork anchors and rest point.
//!
//! Everything here is in surface space: origin top-left, y grows downward,
//! matching pointer coordinates. The render layer converts to world space.

use bevy::prelude::*;
use bevy::window::WindowResized;

use crate::catalog::CurrentTarget;
use crate::constants::*;

/// Axis-aligned target bounding box in surface space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl TargetBox {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Derived stage geometry. Pure value: recomputed, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageLayout {
    pub width: f32,
    pub height: f32,
    pub ground_y: f32,
    pub anchor: Vec2,
    pub target: TargetBox,
    /// Left and right sling fork tips the cord is drawn from
    pub fork_left: Vec2,
    pub fork_right: Vec2,
    /// Where the pouch sits when nothing is drawn
    pub rest_point: Vec2,
}

/// Compute the stage layout for a surface and target shape.
///
/// Identical inputs always yield identical output. `aspect` is the target's
/// height/width ratio and is clamped to a sane range before use.
pub fn compute_stage_layout(width: f32, height: f32, aspect: f32) -> StageLayout {
    let aspect = if aspect.is_finite() && aspect > 0.0 {
        aspect.clamp(TARGET_ASPECT_MIN, TARGET_ASPECT_MAX)
    } else {
        TARGET_DEFAULT_ASPECT
    };

    let ground_y = height - (height * GROUND_INSET_RATIO).min(GROUND_INSET_MAX);
    let anchor = Vec2::new(width * LAUNCHER_X_RATIO, ground_y - LAUNCHER_POST_HEIGHT);

    let mut target_width = (width * TARGET_WIDTH_RATIO).min(TARGET_MAX_WIDTH);
    let mut target_height = target_width * aspect;

    // Tall targets get clamped to the vertical budget; width follows so the
    // aspect ratio is preserved.
    let height_budget = ground_y * TARGET_HEIGHT_BUDGET_RATIO;
    if target_height > height_budget {
        target_height = height_budget;
        target_width = target_height / aspect;
    }

    let target = TargetBox {
        x: width * TARGET_X_RATIO - target_width / 2.0,
        y: ground_y - target_height,
        width: target_width,
        height: target_height,
    };

    StageLayout {
        width,
        height,
        ground_y,
        anchor,
        target,
        fork_left: Vec2::new(anchor.x - SLING_FORK_HALF_WIDTH, anchor.y),
        fork_right: Vec2::new(anchor.x + SLING_FORK_HALF_WIDTH, anchor.y),
        rest_point: anchor + SLING_REST_OFFSET,
    }
}

/// Current stage geometry, recomputed on resize and when the target's
/// natural dimensions resolve.
#[derive(Resource, Debug, Clone, Copy)]
pub struct StageGeometry(pub StageLayout);

impl Default for StageGeometry {
    fn default() -> Self {
        Self(compute_stage_layout(
            DEFAULT_SURFACE_SIZE.x,
            DEFAULT_SURFACE_SIZE.y,
            TARGET_DEFAULT_ASPECT,
        ))
    }
}

impl StageGeometry {
    pub fn for_target(width: f32, height: f32, target: &CurrentTarget) -> Self {
        Self(compute_stage_layout(
            width,
            height,
            target.aspect.unwrap_or(TARGET_DEFAULT_ASPECT),
        ))
    }
}

/// Recompute layout when the window resizes or the target's aspect changes.
/// Runs before the simulation step so a frame never sees stale geometry.
pub fn refresh_stage_layout(
    mut resize_events: MessageReader<WindowResized>,
    target: Res<CurrentTarget>,
    mut geometry: ResMut<StageGeometry>,
) {
    let mut size = None;
    for resized in resize_events.read() {
        size = Some((resized.width, resized.height));
    }

    if size.is_none() && !target.is_changed() {
        return;
    }

    let (width, height) = size.unwrap_or((geometry.0.width, geometry.0.height));
    *geometry = StageGeometry::for_target(width, height, &target);
}
