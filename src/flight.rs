//! Projectile flight simulation
//!
//! One step function drives both the live projectile and the dotted aim
//! preview: live mode advances the single active projectile with a measured
//! (clamped) frame delta, prediction mode runs the same math forward with an
//! ideal per-step delta of 1 and never touches live state.

use bevy::prelude::*;
use std::collections::VecDeque;

use crate::aim::LaunchSolution;
use crate::constants::*;
use crate::layout::StageLayout;
use crate::tuning::EngineTweaks;

/// The single in-flight (or briefly resting) projectile
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub lift: f32,
    pub drag: f32,
    pub wobble: f32,
    /// Age in ideal-frame units (1.0 per 60 fps frame)
    pub age: f32,
    /// False once the projectile has hit the target or the ground; the
    /// sprite lingers until the delayed clear fires.
    pub active: bool,
}

impl Projectile {
    pub fn from_solution(solution: &LaunchSolution) -> Self {
        Self {
            pos: solution.start,
            vel: solution.velocity,
            lift: solution.lift,
            drag: solution.drag,
            wobble: solution.wobble,
            age: 0.0,
            active: true,
        }
    }
}

/// Slot for the at-most-one projectile. `None` means the sling is reloaded.
#[derive(Resource, Default, Debug)]
pub struct ActiveProjectile(pub Option<Projectile>);

impl ActiveProjectile {
    /// A live projectile blocks new aims from starting
    pub fn is_live(&self) -> bool {
        self.0.as_ref().is_some_and(|p| p.active)
    }
}

/// Bounded record of recent projectile positions, most-recent-last
#[derive(Resource, Default, Debug)]
pub struct Trail {
    positions: VecDeque<Vec2>,
}

impl Trail {
    pub fn push(&mut self, pos: Vec2) {
        self.positions.push_back(pos);
        while self.positions.len() > TRAIL_CAP {
            self.positions.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec2> {
        self.positions.iter()
    }
}

/// Convert a measured frame delta into ideal-frame units, clamped so a
/// stalled tab or debugger pause never produces one huge step.
pub fn frame_step(delta_ms: f32) -> f32 {
    delta_ms.clamp(MIN_FRAME_MS, MAX_FRAME_MS) / BASE_FRAME_MS
}

/// Advance a projectile by `dt` ideal frames.
///
/// Velocity decays multiplicatively with drag, vertical velocity accumulates
/// gravity minus lift, and position advances by velocity plus an oscillatory
/// wobble offset. Surface space: +y is down, so gravity is positive.
pub fn step_projectile(p: &mut Projectile, gravity: f32, dt: f32) {
    p.vel *= 1.0 - p.drag * dt;
    p.vel.y += (gravity - p.lift) * dt;

    let wobble_x = (p.age * WOBBLE_FREQ_X).sin() * p.wobble * WOBBLE_AMP_X;
    let wobble_y = (p.age * WOBBLE_FREQ_Y).cos() * p.wobble * WOBBLE_AMP_Y;
    p.pos.x += (p.vel.x + wobble_x) * dt;
    p.pos.y += (p.vel.y + wobble_y) * dt;

    p.age += dt;
}

/// Forward-simulate a launch solution for the aim preview.
///
/// Runs the live step function for a fixed number of ideal frames, recording
/// each position, stopping early once the path crosses the ground line or
/// leaves the horizontal bounds. No side effects on live state.
pub fn predict_path(solution: &LaunchSolution, layout: &StageLayout, gravity: f32) -> Vec<Vec2> {
    let mut ghost = Projectile::from_solution(solution);
    let mut path = Vec::with_capacity(PREDICTION_STEPS);

    for _ in 0..PREDICTION_STEPS {
        step_projectile(&mut ghost, gravity, 1.0);
        path.push(ghost.pos);
        if ghost.pos.y >= layout.ground_y || ghost.pos.x < 0.0 || ghost.pos.x > layout.width {
            break;
        }
    }
    path
}

/// Advance the live projectile each frame and record its trail
pub fn advance_projectile(
    time: Res<Time>,
    tweaks: Res<EngineTweaks>,
    mut slot: ResMut<ActiveProjectile>,
    mut trail: ResMut<Trail>,
) {
    let dt = frame_step(time.delta_secs() * 1000.0);

    if let Some(projectile) = slot.0.as_mut() {
        if projectile.active {
            step_projectile(projectile, tweaks.gravity, dt);
            trail.push(projectile.pos);
        }
    }
}
