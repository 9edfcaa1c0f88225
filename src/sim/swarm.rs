//! The invader swarm
//!
//! A fixed `rows x cols` formation that moves as one rigid body: lateral steps
//! on a wall-clock cadence, a drop and reversal at either side wall, and a
//! fire cadence shared by the whole grid. Both cadences speed up in four
//! stages as the swarm descends toward the player.
//!
//! Dead enemies stay in `enemies` so row-major indices (and row/col lookups)
//! remain stable for the whole wave.

use glam::Vec2;

use super::entities::{Enemy, EnemyTier, Projectile};
use super::rect::Rect;
use super::rng::SimRng;
use crate::consts::{EDGE_MARGIN, LATERAL_STEP, SPEED_STAGES};
use crate::error::SimError;
use crate::settings::Settings;

/// Speed stage (1..=4) and its multiplier for a given descent distance
pub fn speed_stage(descent: f32) -> (u8, f32) {
    let mut stage = (1, SPEED_STAGES[0].1);
    for (i, &(threshold, multiplier)) in SPEED_STAGES.iter().enumerate() {
        if descent >= threshold {
            stage = (i as u8 + 1, multiplier);
        }
    }
    stage
}

/// What a single swarm step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No living enemies, nothing moved
    Idle,
    /// Every living enemy shifted sideways
    Lateral,
    /// Direction flipped and every living enemy dropped
    Drop,
}

/// Outcome of one `Swarm::update`
#[derive(Debug, Clone, Default)]
pub struct SwarmUpdate {
    /// Projectile fired this update, if any
    pub fired: Option<Projectile>,
    /// New speed stage, if it changed since the last update
    pub stage_changed: Option<u8>,
    /// Whether a movement step was taken
    pub stepped: Option<Step>,
}

/// The invader formation and its clock-gated march
#[derive(Debug, Clone)]
pub struct Swarm {
    /// Every enemy of the wave in row-major order, living or dead
    pub enemies: Vec<Enemy>,
    /// +1 = moving right, -1 = moving left
    pub direction: f32,
    /// Clock time of the last lateral/drop step
    pub last_move_ms: f64,
    /// Clock time of the last fire attempt
    pub last_shot_ms: f64,
    /// Stage seen on the previous update (for change notification only)
    pub previous_stage: u8,
    settings: Settings,
}

impl Swarm {
    pub fn new(settings: &Settings) -> Result<Self, SimError> {
        if settings.formation_rows == 0 || settings.formation_cols == 0 {
            return Err(SimError::Configuration(format!(
                "formation must be at least 1x1 (got {}x{})",
                settings.formation_rows, settings.formation_cols
            )));
        }

        let mut swarm = Self {
            enemies: Vec::new(),
            direction: 1.0,
            last_move_ms: 0.0,
            last_shot_ms: 0.0,
            previous_stage: 1,
            settings: *settings,
        };
        swarm.reset();
        Ok(swarm)
    }

    /// Rebuild the canonical formation and clear all timers
    pub fn reset(&mut self) {
        self.direction = 1.0;
        self.last_move_ms = 0.0;
        self.last_shot_ms = 0.0;
        self.previous_stage = 1;
        self.enemies = build_formation(&self.settings);
    }

    pub fn living(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.living().count()
    }

    /// Descent distance of the lowest living enemy (0 when none are alive)
    pub fn descent(&self) -> f32 {
        self.living()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.descent())
            .unwrap_or(0.0)
    }

    pub fn speed_stage(&self) -> u8 {
        speed_stage(self.descent()).0
    }

    pub fn speed_multiplier(&self) -> f32 {
        speed_stage(self.descent()).1
    }

    /// Milliseconds between lateral/drop steps at the current stage
    pub fn move_interval_ms(&self) -> f64 {
        1000.0 / (self.settings.swarm_base_speed * self.speed_multiplier() as f64)
    }

    /// Milliseconds between enemy shots at the current stage
    pub fn fire_interval_ms(&self) -> f64 {
        self.settings.swarm_fire_interval_ms / self.speed_multiplier() as f64
    }

    /// Advance the swarm to `now_ms`. Movement and firing are gated on the
    /// time since the last step/shot, not on frame time.
    pub fn update(&mut self, now_ms: f64, rng: &mut SimRng) -> SwarmUpdate {
        let mut result = SwarmUpdate::default();
        let move_interval = self.move_interval_ms();
        let fire_interval = self.fire_interval_ms();

        if now_ms - self.last_move_ms >= move_interval {
            result.stepped = Some(self.step());
            self.last_move_ms = now_ms;
        }

        // Stamped even when nobody can fire, so the cadence keeps ticking
        if now_ms - self.last_shot_ms >= fire_interval {
            result.fired = self.fire(rng);
            self.last_shot_ms = now_ms;
        }

        // After the step: a drop that crosses a threshold reports in this update
        let stage = self.speed_stage();
        if stage != self.previous_stage {
            log::debug!("Swarm speed stage {} -> {}", self.previous_stage, stage);
            self.previous_stage = stage;
            result.stage_changed = Some(stage);
        }

        result
    }

    /// Horizontal extent (left, right) of the living enemies
    pub fn extent(&self) -> Option<(f32, f32)> {
        self.living().fold(None, |acc, e| {
            let r = e.rect();
            Some(match acc {
                None => (r.left(), r.right()),
                Some((l, rt)) => (l.min(r.left()), rt.max(r.right())),
            })
        })
    }

    /// One lateral step, or a reversal with a drop when at a side wall
    pub fn step(&mut self) -> Step {
        let Some((left, right)) = self.extent() else {
            return Step::Idle;
        };

        let at_wall = if self.direction > 0.0 {
            right >= self.settings.playfield_width - EDGE_MARGIN
        } else {
            left <= EDGE_MARGIN
        };

        if at_wall {
            self.direction = -self.direction;
            let drop = self.settings.drop_distance;
            for enemy in self.enemies.iter_mut().filter(|e| e.alive) {
                enemy.pos.y += drop;
            }
            Step::Drop
        } else {
            let dx = self.direction * LATERAL_STEP;
            for enemy in self.enemies.iter_mut().filter(|e| e.alive) {
                enemy.pos.x += dx;
            }
            Step::Lateral
        }
    }

    /// Indices of the enemies allowed to fire: per column, the living enemy
    /// closest to the player. Ordered by column.
    pub fn front_line(&self) -> Vec<usize> {
        let mut best: Vec<Option<usize>> = vec![None; self.settings.formation_cols as usize];
        for (i, enemy) in self.enemies.iter().enumerate() {
            if !enemy.alive {
                continue;
            }
            let slot = &mut best[enemy.col as usize];
            match *slot {
                Some(j) if self.enemies[j].pos.y >= enemy.pos.y => {}
                _ => *slot = Some(i),
            }
        }
        best.into_iter().flatten().collect()
    }

    /// Pick a random front-line enemy and fire from it
    fn fire(&self, rng: &mut SimRng) -> Option<Projectile> {
        let front = self.front_line();
        let shooter = &self.enemies[front[rng.pick_index(front.len())?]];
        let rect = shooter.rect();
        Some(Projectile::from_enemy(
            rect.center().x,
            rect.bottom(),
            &self.settings,
        ))
    }

    /// Kill and return the first living enemy (row-major) overlapping `bullet`
    pub fn check_bullet_collision(&mut self, bullet: &Rect) -> Option<Enemy> {
        let enemy = self
            .enemies
            .iter_mut()
            .find(|e| e.alive && e.rect().overlaps(bullet))?;
        enemy.alive = false;
        Some(*enemy)
    }

    /// First living enemy physically touching the player, if any
    pub fn check_player_collision(&self, player: &Rect) -> Option<&Enemy> {
        self.living().find(|e| e.rect().overlaps(player))
    }
}

fn build_formation(settings: &Settings) -> Vec<Enemy> {
    let origin = settings.formation_origin();
    let size = Vec2::new(settings.enemy_width, settings.enemy_height);
    let rows = settings.formation_rows;
    let cols = settings.formation_cols;

    let mut enemies = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let pos = origin
                + Vec2::new(
                    col as f32 * settings.enemy_spacing_x,
                    row as f32 * settings.enemy_spacing_y,
                );
            enemies.push(Enemy {
                pos,
                size,
                alive: true,
                row,
                col,
                tier: EnemyTier::for_row(row, rows),
                baseline_y: pos.y,
            });
        }
    }
    enemies
}
