//! Tunable constants for flingshot
//!
//! All gameplay values are defined here for easy tweaking.

use bevy::prelude::*;

// =============================================================================
// STAGE COLORS
// =============================================================================

pub const BACKGROUND_COLOR: Color = Color::srgb(0.10, 0.09, 0.13);
pub const AMBIENCE_COLOR: Color = Color::srgb(0.14, 0.12, 0.18);
pub const GROUND_COLOR: Color = Color::srgb(0.22, 0.17, 0.14);
pub const LAUNCHER_COLOR: Color = Color::srgb(0.45, 0.30, 0.18);
pub const CORD_COLOR: Color = Color::srgb(0.82, 0.72, 0.55);
pub const TARGET_BASE_COLOR: Color = Color::srgb(0.55, 0.62, 0.70);
pub const PROJECTILE_COLOR: Color = Color::srgb(0.85, 0.45, 0.25);
pub const PREDICTION_DOT_COLOR: Color = Color::srgba(0.95, 0.92, 0.80, 0.55);
pub const SHADOW_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.35);

// =============================================================================
// FRAME TIMING
// =============================================================================

// Simulation math runs in "60 fps frame" units: a step of 1.0 is one ideal
// frame. Measured deltas are clamped so a stall never tunnels the projectile.
pub const BASE_FRAME_MS: f32 = 1000.0 / 60.0;
pub const MIN_FRAME_MS: f32 = 8.0;
pub const MAX_FRAME_MS: f32 = 64.0;

// =============================================================================
// STAGE LAYOUT
// =============================================================================

pub const DEFAULT_SURFACE_SIZE: Vec2 = Vec2::new(960.0, 600.0);
pub const GROUND_INSET_RATIO: f32 = 0.085; // Ground line rises this fraction of height...
pub const GROUND_INSET_MAX: f32 = 64.0; // ...capped here
pub const LAUNCHER_X_RATIO: f32 = 0.18;
pub const LAUNCHER_POST_HEIGHT: f32 = 132.0;
pub const SLING_FORK_HALF_WIDTH: f32 = 16.0;
pub const SLING_REST_OFFSET: Vec2 = Vec2::new(-10.0, 14.0); // Pouch hangs behind/below the fork
pub const TARGET_X_RATIO: f32 = 0.72;
pub const TARGET_WIDTH_RATIO: f32 = 0.24;
pub const TARGET_MAX_WIDTH: f32 = 180.0;
pub const TARGET_HEIGHT_BUDGET_RATIO: f32 = 0.58; // Of ground line height
pub const TARGET_ASPECT_MIN: f32 = 0.6;
pub const TARGET_ASPECT_MAX: f32 = 2.6;
pub const TARGET_DEFAULT_ASPECT: f32 = 1.5; // Until the target's image dimensions resolve

// =============================================================================
// AIMING
// =============================================================================

pub const MIN_PULL: f32 = 12.0; // Pulls shorter than this are a cancelled aim
pub const MAX_PULL: f32 = 190.0; // Effective pull length cap
pub const AIM_CLAMP_RADIUS: f32 = 210.0; // Raw pointer clamp around the anchor
// Anchor-relative pointer envelope: how far the pouch may travel each way
pub const AIM_ENVELOPE_LEFT: f32 = 230.0;
pub const AIM_ENVELOPE_RIGHT: f32 = 120.0;
pub const AIM_ENVELOPE_UP: f32 = 150.0;
pub const AIM_ENVELOPE_DOWN: f32 = 240.0;
pub const AIM_ASSIST_BLEND: f32 = 0.32; // Lerp weight toward target center after arc bias
pub const BASE_POWER: f32 = 0.165; // Launch speed per pixel of pull

// =============================================================================
// FLIGHT PHYSICS
// =============================================================================

pub const GRAVITY: f32 = 0.55; // px per frame², y-down surface space
pub const WOBBLE_FREQ_X: f32 = 0.35;
pub const WOBBLE_FREQ_Y: f32 = 0.25;
pub const WOBBLE_AMP_X: f32 = 6.0;
pub const WOBBLE_AMP_Y: f32 = 4.0;
pub const PREDICTION_STEPS: usize = 60; // Ideal frames simulated for the aim preview
pub const TRAIL_CAP: usize = 14; // Most recent positions kept for the motion trail
pub const PROJECTILE_RADIUS: f32 = 13.0; // Placeholder sprite / fallback circle radius
pub const CLEAR_DELAY_SECS: f32 = 0.32; // Sprite lingers at rest this long before reload

// =============================================================================
// TARGET REACTION
// =============================================================================

pub const FLINCH_SECS: f32 = 0.36;
pub const STUN_SECS: f32 = 1.4;
pub const FLASH_DECAY_PER_SEC: f32 = 2.4; // Linear decay of hit-flash intensity
pub const SQUASH_DECAY_PER_SEC: f32 = 1.6;
pub const TILT_DAMP: f32 = 0.88; // Per-frame exponential damping (critically-damped feel)
pub const TILT_VEL_DAMP: f32 = 0.82;
pub const TILT_SNAP_EPSILON: f32 = 0.0015; // Below this, tilt snaps to exactly 0
pub const IDLE_BOB_AMP: f32 = 2.6; // px of idle bob so the target is never static
pub const IDLE_BOB_FREQ: f32 = 1.7; // Hz-ish
pub const IDLE_TILT_AMP: f32 = 0.02; // Radians of idle sway

// =============================================================================
// SCREEN SHAKE
// =============================================================================

pub const SHAKE_CAP: f32 = 18.0;
pub const SHAKE_DECAY: f32 = 0.86; // Per-frame exponential decay
pub const SHAKE_FLOOR: f32 = 0.05; // Below this the accumulator snaps to 0

// =============================================================================
// EFFECT POOLS
// =============================================================================

pub const PARTICLE_POOL_CAP: usize = 140; // Hard cap, oldest dropped first
pub const PARTICLE_GRAVITY: f32 = 0.32; // px per frame²
pub const PARTICLE_AIR_DECAY: f32 = 0.965; // Velocity retained per frame
pub const PARTICLE_BOUNCE_RETENTION: f32 = 0.5;
pub const PARTICLE_BOUNCE_SHRINK: f32 = 0.82; // Size multiplier per ground bounce
// Empirically tuned settle threshold; below this |vy| a grounded particle is
// removed instead of bounced.
pub const PARTICLE_REST_SPEED: f32 = 0.45;
pub const PARTICLE_LIFE_MIN: f32 = 30.0; // Frames
pub const PARTICLE_LIFE_MAX: f32 = 66.0;
pub const PARTICLE_HUE_JITTER: f32 = 10.0; // Degrees either side of the weight-class base
pub const SHOCKWAVE_DURATION_SECS: f32 = 0.55;
pub const SHOCKWAVE_BASE_RADIUS: f32 = 10.0;

// =============================================================================
// CONFIG FILE
// =============================================================================

pub const ENGINE_TUNING_FILE: &str = "config/engine_tuning.json";
