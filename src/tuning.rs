//! Global engine tuning settings (decoupled from UI)

use bevy::log::warn;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::constants::*;

// Serde default functions for fields added after the first config format
fn default_aim_assist_blend() -> f32 {
    AIM_ASSIST_BLEND
}
fn default_shake_cap() -> f32 {
    SHAKE_CAP
}
fn default_particle_rest_speed() -> f32 {
    PARTICLE_REST_SPEED
}
fn default_clear_delay_secs() -> f32 {
    CLEAR_DELAY_SECS
}

/// Serializable tuning values stored in config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineTuning {
    pub gravity: f32,
    pub min_pull: f32,
    pub max_pull: f32,
    pub base_power: f32,
    pub flinch_secs: f32,
    pub stun_secs: f32,
    #[serde(default = "default_aim_assist_blend")]
    pub aim_assist_blend: f32,
    #[serde(default = "default_shake_cap")]
    pub shake_cap: f32,
    #[serde(default = "default_particle_rest_speed")]
    pub particle_rest_speed: f32,
    #[serde(default = "default_clear_delay_secs")]
    pub clear_delay_secs: f32,
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            min_pull: MIN_PULL,
            max_pull: MAX_PULL,
            base_power: BASE_POWER,
            flinch_secs: FLINCH_SECS,
            stun_secs: STUN_SECS,
            aim_assist_blend: default_aim_assist_blend(),
            shake_cap: default_shake_cap(),
            particle_rest_speed: default_particle_rest_speed(),
            clear_delay_secs: default_clear_delay_secs(),
        }
    }
}

impl EngineTuning {
    pub fn apply_to(&self, tweaks: &mut EngineTweaks) {
        tweaks.gravity = self.gravity;
        tweaks.min_pull = self.min_pull;
        tweaks.max_pull = self.max_pull;
        tweaks.base_power = self.base_power;
        tweaks.flinch_secs = self.flinch_secs;
        tweaks.stun_secs = self.stun_secs;
        tweaks.aim_assist_blend = self.aim_assist_blend;
        tweaks.shake_cap = self.shake_cap;
        tweaks.particle_rest_speed = self.particle_rest_speed;
        tweaks.clear_delay_secs = self.clear_delay_secs;
    }
}

/// Runtime-adjustable physics values for tweaking game feel
#[derive(Resource, Debug, Clone)]
pub struct EngineTweaks {
    pub gravity: f32,
    pub min_pull: f32,
    pub max_pull: f32,
    pub base_power: f32,
    pub flinch_secs: f32,
    pub stun_secs: f32,
    pub aim_assist_blend: f32,
    pub shake_cap: f32,
    pub particle_rest_speed: f32,
    pub clear_delay_secs: f32,
}

impl Default for EngineTweaks {
    fn default() -> Self {
        let defaults = EngineTuning::default();
        Self {
            gravity: defaults.gravity,
            min_pull: defaults.min_pull,
            max_pull: defaults.max_pull,
            base_power: defaults.base_power,
            flinch_secs: defaults.flinch_secs,
            stun_secs: defaults.stun_secs,
            aim_assist_blend: defaults.aim_assist_blend,
            shake_cap: defaults.shake_cap,
            particle_rest_speed: defaults.particle_rest_speed,
            clear_delay_secs: defaults.clear_delay_secs,
        }
    }
}

impl EngineTweaks {
    /// Dwell time before a mood returns to idle
    pub fn mood_dwell(&self, mood: crate::mood::Mood) -> f32 {
        match mood {
            crate::mood::Mood::Idle => 0.0,
            crate::mood::Mood::Flinch => self.flinch_secs,
            crate::mood::Mood::Stunned => self.stun_secs,
        }
    }
}

pub fn load_engine_tuning_from_file(path: &str) -> Result<EngineTuning, String> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
    serde_json::from_str(&contents).map_err(|e| format!("Failed to parse {}: {}", path, e))
}

pub fn apply_global_tuning(tweaks: &mut EngineTweaks) -> Result<(), String> {
    match load_engine_tuning_from_file(ENGINE_TUNING_FILE) {
        Ok(tuning) => {
            tuning.apply_to(tweaks);
            Ok(())
        }
        Err(err) => {
            EngineTuning::default().apply_to(tweaks);
            Err(err)
        }
    }
}

pub fn load_global_tuning_system(mut tweaks: bevy::prelude::ResMut<EngineTweaks>) {
    if let Err(err) = apply_global_tuning(&mut tweaks) {
        warn!("{}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let tweaks = EngineTweaks::default();
        assert_eq!(tweaks.gravity, GRAVITY);
        assert_eq!(tweaks.min_pull, MIN_PULL);
        assert_eq!(tweaks.max_pull, MAX_PULL);
        assert_eq!(tweaks.aim_assist_blend, AIM_ASSIST_BLEND);
    }

    #[test]
    fn old_config_format_fills_new_fields() {
        // A config written before the assist/shake fields existed still loads
        let json = r#"{
            "gravity": 0.6,
            "min_pull": 10.0,
            "max_pull": 200.0,
            "base_power": 0.15,
            "flinch_secs": 0.3,
            "stun_secs": 1.2
        }"#;
        let tuning: EngineTuning = serde_json::from_str(json).unwrap();
        assert_eq!(tuning.gravity, 0.6);
        assert_eq!(tuning.aim_assist_blend, AIM_ASSIST_BLEND);
        assert_eq!(tuning.particle_rest_speed, PARTICLE_REST_SPEED);
    }
}
