//! Collaborator-owned descriptors consumed by the engine
//!
//! The armory/roster side of the game owns these; the engine treats them as
//! read-only input selected once per throw.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Qualitative shape of a throw's path; biases the launch direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArcClass {
    Low,
    #[default]
    Medium,
    High,
}

impl ArcClass {
    /// (horizontal, vertical) direction multipliers applied before
    /// re-normalizing. High arcs steepen, low arcs flatten.
    pub fn bias(&self) -> (f32, f32) {
        match self {
            ArcClass::Low => (1.25, 0.7),
            ArcClass::Medium => (1.0, 1.0),
            ArcClass::High => (0.8, 1.35),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ArcClass::Low => "low",
            ArcClass::Medium => "medium",
            ArcClass::High => "high",
        }
    }
}

/// Qualitative mass category scaling launch power and impact visuals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightClass {
    Light,
    #[default]
    Medium,
    Heavy,
}

impl WeightClass {
    /// All weight classes in order
    pub const ALL: [WeightClass; 3] = [WeightClass::Light, WeightClass::Medium, WeightClass::Heavy];

    /// Launch power multiplier: light throws slower, heavy faster.
    pub fn launch_modifier(&self) -> f32 {
        match self {
            WeightClass::Light => 0.88,
            WeightClass::Medium => 1.0,
            WeightClass::Heavy => 1.14,
        }
    }

    /// Particles spawned per impact burst
    pub fn particle_count(&self) -> usize {
        match self {
            WeightClass::Light => 10,
            WeightClass::Medium => 16,
            WeightClass::Heavy => 26,
        }
    }

    /// Base outward particle speed (px/frame) before jitter
    pub fn particle_speed(&self) -> f32 {
        match self {
            WeightClass::Light => 2.2,
            WeightClass::Medium => 3.2,
            WeightClass::Heavy => 4.6,
        }
    }

    /// Base particle hue in degrees (warmer for heavier hits)
    pub fn particle_hue(&self) -> f32 {
        match self {
            WeightClass::Light => 48.0,
            WeightClass::Medium => 30.0,
            WeightClass::Heavy => 12.0,
        }
    }

    /// Shockwave ring radius at full expansion
    pub fn shockwave_radius(&self) -> f32 {
        match self {
            WeightClass::Light => 46.0,
            WeightClass::Medium => 64.0,
            WeightClass::Heavy => 90.0,
        }
    }

    /// Screen shake added per impact (pre-cap)
    pub fn shake_impulse(&self) -> f32 {
        match self {
            WeightClass::Light => 4.0,
            WeightClass::Medium => 7.0,
            WeightClass::Heavy => 12.0,
        }
    }

    /// Hit-flash intensity floor set on impact
    pub fn flash_magnitude(&self) -> f32 {
        match self {
            WeightClass::Light => 0.45,
            WeightClass::Medium => 0.6,
            WeightClass::Heavy => 0.85,
        }
    }

    /// Squash intensity floor set on impact
    pub fn squash_magnitude(&self) -> f32 {
        match self {
            WeightClass::Light => 0.22,
            WeightClass::Medium => 0.38,
            WeightClass::Heavy => 0.65,
        }
    }

    /// Tilt-velocity impulse magnitude (radians/frame)
    pub fn tilt_impulse(&self) -> f32 {
        match self {
            WeightClass::Light => 0.035,
            WeightClass::Medium => 0.06,
            WeightClass::Heavy => 0.11,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeightClass::Light => "light",
            WeightClass::Medium => "medium",
            WeightClass::Heavy => "heavy",
        }
    }
}

/// Numeric flight coefficients for a throwable item
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThrowablePhysics {
    pub power: f32,
    pub lift: f32,
    pub drag: f32,
    pub wobble: f32,
}

impl Default for ThrowablePhysics {
    fn default() -> Self {
        Self {
            power: 1.0,
            lift: 0.04,
            drag: 0.012,
            wobble: 0.0,
        }
    }
}

/// The equipped throwable item, selected by the armory collaborator
#[derive(Resource, Debug, Clone)]
pub struct EquippedThrowable {
    pub id: String,
    pub name: String,
    pub arc: ArcClass,
    pub weight: WeightClass,
    pub physics: ThrowablePhysics,
    /// Display size override for the sprite, if the item provides one
    pub sprite_size: Option<Vec2>,
}

impl Default for EquippedThrowable {
    fn default() -> Self {
        Self {
            id: "default-shoe".to_string(),
            name: "Worn Sneaker".to_string(),
            arc: ArcClass::Medium,
            weight: WeightClass::Medium,
            physics: ThrowablePhysics::default(),
            sprite_size: None,
        }
    }
}

/// The target currently on stage, provided by the roster collaborator
#[derive(Resource, Debug, Clone)]
pub struct CurrentTarget {
    pub id: String,
    pub name: String,
    /// Natural height/width ratio once the target's image has decoded.
    /// `None` until then; layout falls back to the default aspect.
    pub aspect: Option<f32>,
}

impl Default for CurrentTarget {
    fn default() -> Self {
        Self {
            id: "target-0".to_string(),
            name: "The Boss".to_string(),
            aspect: None,
        }
    }
}

/// Whether launches get nudged toward the target center
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct AimAssist(pub bool);

/// External 0..1 intensity scalar. Modulates cosmetic parameters only
/// (particle brightness, trail opacity); never physics.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Hype(pub f32);

impl Default for Hype {
    fn default() -> Self {
        Self(0.5)
    }
}

impl Hype {
    pub fn clamped(&self) -> f32 {
        self.0.clamp(0.0, 1.0)
    }
}
