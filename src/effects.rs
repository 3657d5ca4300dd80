//! Impact effect pools: shockwaves and particles
//!
//! Both pools are advanced every frame and hard-bounded: shockwaves expire
//! by age, particles by lifetime or by settling on the ground, and the
//! particle pool evicts oldest-first when rapid-fire play would overflow it.

use bevy::prelude::*;
use rand::Rng;

use crate::catalog::WeightClass;
use crate::constants::*;
use crate::flight::frame_step;
use crate::layout::StageGeometry;
use crate::tuning::EngineTweaks;

/// A transient expanding-ring visual spawned on collision
#[derive(Debug, Clone, Copy)]
pub struct Shockwave {
    pub id: u32,
    pub origin: Vec2,
    /// Seconds since spawn
    pub age: f32,
    pub weight: WeightClass,
    pub duration: f32,
}

impl Shockwave {
    pub fn progress(&self) -> f32 {
        (self.age / self.duration).clamp(0.0, 1.0)
    }

    /// Ring radius, interpolating from the base toward the weight-class max
    pub fn radius(&self) -> f32 {
        let t = self.progress();
        SHOCKWAVE_BASE_RADIUS + (self.weight.shockwave_radius() - SHOCKWAVE_BASE_RADIUS) * t
    }

    /// Fades to 0 over the ring's lifetime
    pub fn opacity(&self) -> f32 {
        1.0 - self.progress()
    }
}

/// A single debris particle
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    /// px per ideal frame
    pub vel: Vec2,
    /// Age and lifetime in ideal-frame units
    pub age: f32,
    pub life: f32,
    pub size: f32,
    /// Color hue in degrees
    pub hue: f32,
    pub weight: WeightClass,
}

/// Live effect pools. Owned by the frame loop; no cross-frame references.
#[derive(Resource, Default, Debug)]
pub struct EffectPools {
    shockwaves: Vec<Shockwave>,
    particles: Vec<Particle>,
    next_id: u32,
}

impl EffectPools {
    pub fn shockwaves(&self) -> &[Shockwave] {
        &self.shockwaves
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Spawn exactly one shockwave and a weight-scaled particle batch at the
    /// impact point. Enforces the particle cap with FIFO eviction.
    pub fn spawn_burst(&mut self, origin: Vec2, weight: WeightClass, rng: &mut impl Rng) {
        self.shockwaves.push(Shockwave {
            id: self.next_id,
            origin,
            age: 0.0,
            weight,
            duration: SHOCKWAVE_DURATION_SECS,
        });
        self.next_id += 1;

        let base_hue = weight.particle_hue();
        let base_speed = weight.particle_speed();
        for _ in 0..weight.particle_count() {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = base_speed * rng.gen_range(0.6..1.4);
            self.particles.push(Particle {
                id: self.next_id,
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                age: 0.0,
                life: rng.gen_range(PARTICLE_LIFE_MIN..PARTICLE_LIFE_MAX),
                size: rng.gen_range(2.0..4.5),
                hue: base_hue + rng.gen_range(-PARTICLE_HUE_JITTER..PARTICLE_HUE_JITTER),
                weight,
            });
            self.next_id += 1;
        }

        while self.particles.len() > PARTICLE_POOL_CAP {
            self.particles.remove(0);
        }
    }

    /// Advance both pools and purge expired elements.
    ///
    /// `dt_frames` drives particle motion (ideal-frame units), `dt_secs`
    /// drives shockwave age. Grounded particles bounce with reduced vertical
    /// velocity and shrink until the residual speed drops below the rest
    /// threshold, then they are removed.
    pub fn advance(&mut self, ground_y: f32, rest_speed: f32, dt_frames: f32, dt_secs: f32) {
        for wave in &mut self.shockwaves {
            wave.age += dt_secs;
        }
        self.shockwaves.retain(|w| w.age < w.duration);

        self.particles.retain_mut(|p| {
            p.vel.y += PARTICLE_GRAVITY * dt_frames;
            p.vel *= PARTICLE_AIR_DECAY.powf(dt_frames);
            p.pos += p.vel * dt_frames;
            p.age += dt_frames;

            if p.age >= p.life {
                return false;
            }

            if p.pos.y >= ground_y {
                if p.vel.y.abs() <= rest_speed {
                    return false; // Settled
                }
                p.pos.y = ground_y;
                p.vel.y = -p.vel.y * PARTICLE_BOUNCE_RETENTION;
                p.size *= PARTICLE_BOUNCE_SHRINK;
            }
            true
        });
    }

    pub fn clear(&mut self) {
        self.shockwaves.clear();
        self.particles.clear();
    }
}

/// Per-frame system advancing both pools
pub fn advance_effects(
    time: Res<Time>,
    tweaks: Res<EngineTweaks>,
    geometry: Res<StageGeometry>,
    mut pools: ResMut<EffectPools>,
) {
    let dt_secs = time.delta_secs();
    let dt_frames = frame_step(dt_secs * 1000.0);
    pools.advance(
        geometry.0.ground_y,
        tweaks.particle_rest_speed,
        dt_frames,
        dt_secs,
    );
}
