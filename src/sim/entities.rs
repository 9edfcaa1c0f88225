//! Entity types: player ship, projectiles, swarm enemies and the bonus craft

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::rng::SimRng;
use crate::clamp;
use crate::settings::Settings;

/// A projectile in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (negative = upward)
    pub vel_y: f32,
    /// Fired by the player (otherwise by the swarm)
    pub player_owned: bool,
}

impl Projectile {
    /// Upward projectile whose top edge sits at `top_y`
    pub fn from_player(center_x: f32, top_y: f32, settings: &Settings) -> Self {
        let size = Vec2::new(settings.projectile_width, settings.projectile_height);
        Self {
            pos: Vec2::new(center_x - size.x / 2.0, top_y - size.y),
            size,
            vel_y: -settings.player_projectile_speed,
            player_owned: true,
        }
    }

    /// Downward projectile starting just below `bottom_y`
    pub fn from_enemy(center_x: f32, bottom_y: f32, settings: &Settings) -> Self {
        let size = Vec2::new(settings.projectile_width, settings.projectile_height);
        Self {
            pos: Vec2::new(center_x - size.x / 2.0, bottom_y),
            size,
            vel_y: settings.enemy_projectile_speed,
            player_owned: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel_y.abs()
    }

    pub fn update(&mut self, dt: f32) {
        self.pos.y += self.vel_y * dt;
    }

    /// True once the projectile has fully left the playfield vertically
    pub fn is_off_playfield(&self, playfield_height: f32) -> bool {
        self.pos.y + self.size.y < 0.0 || self.pos.y > playfield_height
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed (units/s)
    pub speed: f32,
    /// Remaining lives; can dip to 0 or below for the frame that ends the run
    pub lives: i32,
    /// Time of the last accepted shot (None = never fired since reset)
    pub last_shot_ms: Option<f64>,
    start_lives: i32,
    fire_cooldown_ms: f64,
    playfield_width: f32,
    home_y: f32,
}

impl Player {
    pub fn new(settings: &Settings) -> Self {
        let mut player = Self {
            pos: Vec2::ZERO,
            size: Vec2::new(settings.player_width, settings.player_height),
            speed: settings.player_speed,
            lives: settings.player_lives,
            last_shot_ms: None,
            start_lives: settings.player_lives,
            fire_cooldown_ms: settings.player_fire_cooldown_ms,
            playfield_width: settings.playfield_width,
            home_y: settings.player_y(),
        };
        player.reset_position();
        player
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Largest x the ship may occupy
    pub fn max_x(&self) -> f32 {
        self.playfield_width - self.size.x
    }

    /// Apply held movement input. Holding both directions cancels out.
    pub fn update(&mut self, dt: f32, move_left: bool, move_right: bool) {
        let dt = dt.max(0.0);
        if move_left {
            self.pos.x -= self.speed * dt;
        }
        if move_right {
            self.pos.x += self.speed * dt;
        }
        self.pos.x = clamp(self.pos.x, 0.0, self.max_x());
    }

    pub fn can_shoot(&self, now_ms: f64) -> bool {
        match self.last_shot_ms {
            Some(last) => now_ms - last >= self.fire_cooldown_ms,
            None => true,
        }
    }

    /// Fire if the cooldown has elapsed
    pub fn shoot(&mut self, now_ms: f64, settings: &Settings) -> Option<Projectile> {
        if !self.can_shoot(now_ms) {
            return None;
        }
        self.last_shot_ms = Some(now_ms);
        let rect = self.rect();
        Some(Projectile::from_player(rect.center().x, rect.top(), settings))
    }

    pub fn hit(&mut self) {
        self.lives -= 1;
    }

    /// Lives as shown to the player (never negative)
    pub fn display_lives(&self) -> u32 {
        self.lives.max(0) as u32
    }

    /// Recentre the ship and clear the fire cooldown. Lives are kept.
    pub fn reset_position(&mut self) {
        self.pos = Vec2::new((self.playfield_width - self.size.x) / 2.0, self.home_y);
        self.last_shot_ms = None;
    }

    /// Full reset for a new session
    pub fn reset(&mut self) {
        self.reset_position();
        self.lives = self.start_lives;
    }
}

/// Colour tier of an enemy, fixed by its formation row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyTier {
    /// Top row
    Top,
    /// Rows above the bottom two
    Middle,
    /// Bottom two rows
    Bottom,
}

impl EnemyTier {
    pub fn for_row(row: u32, rows: u32) -> Self {
        if row == 0 {
            EnemyTier::Top
        } else if row + 2 >= rows {
            EnemyTier::Bottom
        } else {
            EnemyTier::Middle
        }
    }
}

/// A member of the swarm formation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub alive: bool,
    pub row: u32,
    pub col: u32,
    pub tier: EnemyTier,
    /// y of this enemy's row when the wave started
    pub baseline_y: f32,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// How far this enemy has descended since the wave started
    pub fn descent(&self) -> f32 {
        self.pos.y - self.baseline_y
    }
}

/// Side of the playfield a bonus craft enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// The intermittent bonus target crossing the top of the playfield
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusCraft {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// +1 = moving right, -1 = moving left
    pub direction: f32,
    pub active: bool,
    playfield_width: f32,
}

impl BonusCraft {
    /// An inactive craft parked above the playfield
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: Vec2::new(-settings.bonus_width, settings.bonus_y),
            size: Vec2::new(settings.bonus_width, settings.bonus_height),
            speed: settings.bonus_speed,
            direction: 1.0,
            active: false,
            playfield_width: settings.playfield_width,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start a crossing from `side`. Returns false (and changes nothing) if a
    /// crossing is already in progress.
    pub fn spawn(&mut self, side: Side) -> bool {
        if self.active {
            return false;
        }
        match side {
            Side::Left => {
                self.pos.x = -self.size.x;
                self.direction = 1.0;
            }
            Side::Right => {
                self.pos.x = self.playfield_width;
                self.direction = -1.0;
            }
        }
        self.active = true;
        true
    }

    /// Start a crossing from a random side
    pub fn spawn_random(&mut self, rng: &mut SimRng) -> bool {
        let side = if rng.random_int(0, 1) == 0 {
            Side::Left
        } else {
            Side::Right
        };
        self.spawn(side)
    }

    /// Move along the crossing; deactivates once past the far edge
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.pos.x += self.direction * self.speed * dt.max(0.0);

        let exited = if self.direction > 0.0 {
            self.pos.x >= self.playfield_width
        } else {
            self.pos.x + self.size.x <= 0.0
        };
        if exited {
            self.active = false;
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}
