//! Invader Siege - simulation core for a descending-swarm arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, swarm, collisions, session state machine)
//! - `settings`: Data-driven game balance and playfield geometry
//! - `platform`: Input/clock/presentation collaborator interfaces
//! - `audio`: Mapping of frame events to sound cues
//! - `error`: Configuration and invariant errors

pub mod audio;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::Settings;

/// Fixed gameplay constants (not exposed through `Settings`)
pub mod consts {
    /// Score for destroying a swarm enemy
    pub const SCORE_PER_ENEMY: u64 = 10;
    /// Score for destroying the bonus craft
    pub const SCORE_PER_BONUS: u64 = 100;

    /// Swarm reverses when its extent gets this close to a side wall
    pub const EDGE_MARGIN: f32 = 10.0;
    /// Lateral distance of one swarm step
    pub const LATERAL_STEP: f32 = 10.0;

    /// Descent distance thresholds and their speed multipliers (stage 1..=4)
    pub const SPEED_STAGES: [(f32, f32); 4] = [(0.0, 1.0), (100.0, 1.5), (200.0, 2.2), (300.0, 3.0)];

    /// Freeze after the player is hit, before the ship reappears
    pub const RESPAWN_DELAY_MS: f64 = 1000.0;
}

/// Clamp `v` into `[lo, hi]`. If the range is inverted, `lo` wins.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.min(hi).max(lo)
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(12.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(5.0, 4.0, 2.0), 4.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
    }
}
