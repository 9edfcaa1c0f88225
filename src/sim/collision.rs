//! Collision resolution between projectiles and targets
//!
//! Player shots resolve against the swarm first and only fall through to the
//! bonus craft on a swarm miss, so a single shot can never score twice. Enemy
//! shots register at most one hit on the player per frame.

use super::entities::{BonusCraft, Enemy, Projectile};
use super::rect::Rect;
use super::swarm::Swarm;
use crate::consts::{SCORE_PER_BONUS, SCORE_PER_ENEMY};

/// Effects of resolving the player's shots for one frame
#[derive(Debug, Clone, Default)]
pub struct ShotResult {
    pub score: u64,
    pub enemies_killed: Vec<Enemy>,
    pub bonus_killed: bool,
}

/// Resolve every player projectile against the swarm, then the bonus craft.
/// Projectiles that hit something are removed from `shots`.
pub fn resolve_player_shots(
    shots: &mut Vec<Projectile>,
    swarm: &mut Swarm,
    bonus: &mut BonusCraft,
) -> ShotResult {
    let mut result = ShotResult::default();

    shots.retain(|shot| {
        let rect = shot.rect();

        if let Some(enemy) = swarm.check_bullet_collision(&rect) {
            result.score += SCORE_PER_ENEMY;
            result.enemies_killed.push(enemy);
            return false;
        }

        if bonus.is_active() && bonus.rect().overlaps(&rect) {
            bonus.deactivate();
            result.score += SCORE_PER_BONUS;
            result.bonus_killed = true;
            return false;
        }

        true
    });

    result
}

/// Test enemy projectiles against the player. The first hit is removed and
/// reported; any further overlapping shots are left for a later frame.
pub fn resolve_enemy_shots(shots: &mut Vec<Projectile>, player: &Rect) -> bool {
    match shots.iter().position(|s| s.rect().overlaps(player)) {
        Some(i) => {
            shots.swap_remove(i);
            true
        }
        None => false,
    }
}
