//! Event type definitions for the notification and logging system

use serde::{Deserialize, Serialize};

use crate::catalog::WeightClass;
use crate::tuning::EngineTweaks;

/// Engine configuration snapshot logged at session start
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub gravity: f32,
    pub min_pull: f32,
    pub max_pull: f32,
    pub base_power: f32,
    pub aim_assist_blend: f32,
    pub flinch_secs: f32,
    pub stun_secs: f32,
}

impl EngineConfig {
    pub fn snapshot(tweaks: &EngineTweaks) -> Self {
        Self {
            gravity: tweaks.gravity,
            min_pull: tweaks.min_pull,
            max_pull: tweaks.max_pull,
            base_power: tweaks.base_power,
            aim_assist_blend: tweaks.aim_assist_blend,
            flinch_secs: tweaks.flinch_secs,
            stun_secs: tweaks.stun_secs,
        }
    }
}

/// All events the engine emits outward. Fire-and-forget: collaborators use
/// them for sound, haptics and tallies; nothing is returned to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EngineEvent {
    // === Session Events ===
    /// Session started (generated once per engine launch)
    SessionStart {
        session_id: String, // UUID v4
        timestamp: String,  // ISO 8601
    },
    /// Engine configuration snapshot (logged after session start)
    Config(EngineConfig),

    // === Throw Events ===
    /// Pointer-down accepted, an aim has begun
    DrawStarted { x: f32, y: f32 },
    /// A projectile was instantiated (release-sound hook)
    Launched {
        item_id: String,
        weight: WeightClass,
    },
    /// Projectile struck the target (impact sound / haptics / tally hook)
    Hit {
        target_id: String,
        item_id: String,
        weight: WeightClass,
        x: f32,
        y: f32,
        time_ms: u32,
    },
    /// Projectile reached the ground without hitting the target
    Missed { item_id: String, x: f32 },
}

impl EngineEvent {
    /// Get the event type code for compact serialization
    pub fn type_code(&self) -> &'static str {
        match self {
            EngineEvent::SessionStart { .. } => "SE",
            EngineEvent::Config(_) => "CF",
            EngineEvent::DrawStarted { .. } => "DS",
            EngineEvent::Launched { .. } => "L",
            EngineEvent::Hit { .. } => "H",
            EngineEvent::Missed { .. } => "M",
        }
    }
}
