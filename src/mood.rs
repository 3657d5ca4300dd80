//! Target reaction state machine
//!
//! Owns the target's discrete mood (idle, flinch, stunned), the continuous
//! decay fields layered on top of it (hit flash, squash, damped tilt), and
//! the global screen-shake accumulator. All of it advances every frame
//! whether or not a projectile is in flight.

use bevy::prelude::*;
use rand::Rng;

use crate::catalog::WeightClass;
use crate::constants::*;
use crate::tuning::EngineTweaks;

/// The target's discrete reactive animation state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mood {
    #[default]
    Idle,
    Flinch,
    Stunned,
}

impl Mood {
    pub fn name(&self) -> &'static str {
        match self {
            Mood::Idle => "idle",
            Mood::Flinch => "flinch",
            Mood::Stunned => "stunned",
        }
    }
}

/// Per-target animation state, long-lived across throws
#[derive(Resource, Debug, Clone)]
pub struct TargetAnimation {
    pub mood: Mood,
    /// Seconds until the current mood falls back to idle
    pub mood_timer: f32,
    /// Decays linearly to 0
    pub hit_flash: f32,
    /// Decays linearly to 0; impacts raise it with max, never overwrite
    pub squash: f32,
    /// Radians; integrates tilt velocity with spring-like damping
    pub tilt: f32,
    pub tilt_vel: f32,
    /// Random phase fixed when the target first appears, so idle frames
    /// are never perfectly static
    pub idle_phase: f32,
}

impl Default for TargetAnimation {
    fn default() -> Self {
        Self {
            mood: Mood::Idle,
            mood_timer: 0.0,
            hit_flash: 0.0,
            squash: 0.0,
            tilt: 0.0,
            tilt_vel: 0.0,
            idle_phase: rand::thread_rng().gen_range(0.0..std::f32::consts::TAU),
        }
    }
}

impl TargetAnimation {
    /// Continuous low-amplitude idle motion: (vertical bob px, sway radians)
    pub fn idle_motion(&self, elapsed_secs: f32) -> (f32, f32) {
        let t = elapsed_secs * IDLE_BOB_FREQ + self.idle_phase;
        (t.sin() * IDLE_BOB_AMP, (t * 0.6).cos() * IDLE_TILT_AMP)
    }
}

/// Decaying whole-frame shake. `offset` is re-randomized within the current
/// magnitude each frame by the render layer.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct ScreenShake {
    pub magnitude: f32,
    pub offset: Vec2,
}

/// React to an impact.
///
/// Heavy hits stun, lighter hits flinch; the dwell timer restarts on every
/// hit. Flash and squash are raised to at least the weight-class magnitude
/// so a weaker follow-up hit never cuts a decay short. The tilt impulse
/// spins away from the impact side.
pub fn apply_impact(
    anim: &mut TargetAnimation,
    shake: &mut ScreenShake,
    weight: WeightClass,
    impact_side: f32,
    tweaks: &EngineTweaks,
) {
    anim.mood = match weight {
        WeightClass::Heavy => Mood::Stunned,
        _ => Mood::Flinch,
    };
    anim.mood_timer = tweaks.mood_dwell(anim.mood);

    anim.hit_flash = anim.hit_flash.max(weight.flash_magnitude());
    anim.squash = anim.squash.max(weight.squash_magnitude());

    let side = if impact_side < 0.0 { -1.0 } else { 1.0 };
    anim.tilt_vel += side * weight.tilt_impulse();

    shake.magnitude = (shake.magnitude + weight.shake_impulse()).min(tweaks.shake_cap);
}

/// Advance mood timer, decay fields and shake by `dt` seconds
pub fn step_animation(anim: &mut TargetAnimation, shake: &mut ScreenShake, dt: f32) {
    if anim.mood != Mood::Idle {
        anim.mood_timer -= dt;
        if anim.mood_timer <= 0.0 {
            anim.mood = Mood::Idle;
            anim.mood_timer = 0.0;
        }
    }

    anim.hit_flash = (anim.hit_flash - FLASH_DECAY_PER_SEC * dt).max(0.0);
    anim.squash = (anim.squash - SQUASH_DECAY_PER_SEC * dt).max(0.0);

    let frames = dt * 60.0;
    anim.tilt += anim.tilt_vel * frames;
    anim.tilt *= TILT_DAMP.powf(frames);
    anim.tilt_vel *= TILT_VEL_DAMP.powf(frames);
    if anim.tilt.abs() < TILT_SNAP_EPSILON && anim.tilt_vel.abs() < TILT_SNAP_EPSILON {
        anim.tilt = 0.0;
        anim.tilt_vel = 0.0;
    }

    shake.magnitude *= SHAKE_DECAY.powf(frames);
    if shake.magnitude < SHAKE_FLOOR {
        shake.magnitude = 0.0;
    }
}

/// Per-frame system wrapper around [`step_animation`]
pub fn advance_target_animation(
    time: Res<Time>,
    mut anim: ResMut<TargetAnimation>,
    mut shake: ResMut<ScreenShake>,
) {
    step_animation(&mut anim, &mut shake, time.delta_secs());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> (TargetAnimation, ScreenShake, EngineTweaks) {
        (
            TargetAnimation::default(),
            ScreenShake::default(),
            EngineTweaks::default(),
        )
    }

    #[test]
    fn heavy_hit_stuns_lighter_hits_flinch() {
        let (mut anim, mut shake, tweaks) = fresh();
        apply_impact(&mut anim, &mut shake, WeightClass::Light, 1.0, &tweaks);
        assert_eq!(anim.mood, Mood::Flinch);
        apply_impact(&mut anim, &mut shake, WeightClass::Heavy, 1.0, &tweaks);
        assert_eq!(anim.mood, Mood::Stunned);
        assert!(shake.magnitude > 0.0);
    }

    #[test]
    fn mood_recovers_after_dwell_time() {
        let (mut anim, mut shake, tweaks) = fresh();
        apply_impact(&mut anim, &mut shake, WeightClass::Medium, 1.0, &tweaks);
        assert_eq!(anim.mood, Mood::Flinch);

        // Step in 60 fps frames; recovery lands within one frame of the dwell
        let frame = 1.0 / 60.0;
        let frames_needed = (tweaks.flinch_secs / frame).ceil() as usize;
        for _ in 0..frames_needed - 1 {
            step_animation(&mut anim, &mut shake, frame);
        }
        assert_eq!(anim.mood, Mood::Flinch);
        step_animation(&mut anim, &mut shake, frame);
        assert_eq!(anim.mood, Mood::Idle);
    }

    #[test]
    fn weaker_hit_never_reduces_squash_mid_decay() {
        let (mut anim, mut shake, tweaks) = fresh();
        apply_impact(&mut anim, &mut shake, WeightClass::Heavy, 1.0, &tweaks);
        let squash_after_heavy = anim.squash;
        // Decay a little, then land a light hit
        step_animation(&mut anim, &mut shake, 0.05);
        let decayed = anim.squash;
        assert!(decayed < squash_after_heavy);
        apply_impact(&mut anim, &mut shake, WeightClass::Light, 1.0, &tweaks);
        assert!(anim.squash >= decayed);
        assert!(anim.squash >= WeightClass::Light.squash_magnitude());
    }

    #[test]
    fn tilt_impulse_sign_follows_impact_side() {
        let (mut anim, mut shake, tweaks) = fresh();
        apply_impact(&mut anim, &mut shake, WeightClass::Medium, -10.0, &tweaks);
        assert!(anim.tilt_vel < 0.0);

        let (mut anim, mut shake, tweaks) = fresh();
        apply_impact(&mut anim, &mut shake, WeightClass::Medium, 10.0, &tweaks);
        assert!(anim.tilt_vel > 0.0);
    }

    #[test]
    fn shake_accumulates_but_caps() {
        let (mut anim, mut shake, tweaks) = fresh();
        for _ in 0..10 {
            apply_impact(&mut anim, &mut shake, WeightClass::Heavy, 1.0, &tweaks);
        }
        assert!(shake.magnitude <= tweaks.shake_cap);
    }

    #[test]
    fn tilt_settles_to_exact_zero() {
        let (mut anim, mut shake, tweaks) = fresh();
        apply_impact(&mut anim, &mut shake, WeightClass::Heavy, 1.0, &tweaks);
        for _ in 0..600 {
            step_animation(&mut anim, &mut shake, 1.0 / 60.0);
        }
        assert_eq!(anim.tilt, 0.0);
        assert_eq!(anim.tilt_vel, 0.0);
        assert_eq!(shake.magnitude, 0.0);
        assert_eq!(anim.hit_flash, 0.0);
    }

    #[test]
    fn idle_motion_is_never_static() {
        let anim = TargetAnimation::default();
        let (bob_a, sway_a) = anim.idle_motion(0.2);
        let (bob_b, sway_b) = anim.idle_motion(0.5);
        assert!(bob_a != bob_b || sway_a != sway_b);
        assert!(bob_a.abs() <= IDLE_BOB_AMP);
    }
}
