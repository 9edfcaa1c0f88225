//! Game settings and balance
//!
//! Playfield geometry, entity sizes, speeds and timers. Loaded from JSON on
//! native builds; any field left out of the file keeps its default.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::EDGE_MARGIN;
use crate::error::SimError;

/// Tunable session parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Horizontal speed (units/s)
    pub player_speed: f32,
    /// Lives at the start of a session
    pub player_lives: i32,
    /// Minimum time between two player shots
    pub player_fire_cooldown_ms: f64,
    /// Gap between the player's bottom edge and the playfield floor
    pub player_bottom_margin: f32,
    /// Cap on simultaneously live player projectiles
    pub max_player_projectiles: usize,

    // === Projectiles ===
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub player_projectile_speed: f32,
    pub enemy_projectile_speed: f32,

    // === Formation ===
    pub formation_rows: u32,
    pub formation_cols: u32,
    pub enemy_width: f32,
    pub enemy_height: f32,
    /// Distance between column origins
    pub enemy_spacing_x: f32,
    /// Distance between row origins
    pub enemy_spacing_y: f32,
    /// y of the top row at wave start
    pub formation_top: f32,
    /// Vertical drop applied when the swarm reverses
    pub drop_distance: f32,
    /// Lateral steps per second at the first speed stage
    pub swarm_base_speed: f64,
    /// Time between enemy shots at the first speed stage
    pub swarm_fire_interval_ms: f64,

    // === Bonus craft ===
    pub bonus_width: f32,
    pub bonus_height: f32,
    pub bonus_y: f32,
    pub bonus_speed: f32,
    pub bonus_spawn_interval_ms: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield_width: 800.0,
            playfield_height: 600.0,

            player_width: 50.0,
            player_height: 30.0,
            player_speed: 300.0,
            player_lives: 3,
            player_fire_cooldown_ms: 400.0,
            player_bottom_margin: 30.0,
            max_player_projectiles: 3,

            projectile_width: 4.0,
            projectile_height: 12.0,
            player_projectile_speed: 500.0,
            enemy_projectile_speed: 250.0,

            formation_rows: 5,
            formation_cols: 9,
            enemy_width: 40.0,
            enemy_height: 30.0,
            enemy_spacing_x: 60.0,
            enemy_spacing_y: 40.0,
            formation_top: 50.0,
            drop_distance: 20.0,
            swarm_base_speed: 2.0,
            swarm_fire_interval_ms: 1000.0,

            bonus_width: 64.0,
            bonus_height: 28.0,
            bonus_y: 15.0,
            bonus_speed: 144.0,
            bonus_spawn_interval_ms: 20_000.0,
        }
    }
}

impl Settings {
    /// Width of the full formation from the left edge of column 0 to the
    /// right edge of the last column
    pub fn formation_width(&self) -> f32 {
        self.formation_cols.saturating_sub(1) as f32 * self.enemy_spacing_x + self.enemy_width
    }

    /// Top-left corner of the (row 0, col 0) enemy at wave start
    pub fn formation_origin(&self) -> Vec2 {
        Vec2::new(
            (self.playfield_width - self.formation_width()) / 2.0,
            self.formation_top,
        )
    }

    /// Resting y of the player ship
    pub fn player_y(&self) -> f32 {
        self.playfield_height - self.player_bottom_margin - self.player_height
    }

    /// Check that these settings describe a playable session
    pub fn validate(&self) -> Result<(), SimError> {
        let fail = |msg: String| Err(SimError::Configuration(msg));

        if self.formation_rows == 0 || self.formation_cols == 0 {
            return fail(format!(
                "formation must be at least 1x1 (got {}x{})",
                self.formation_rows, self.formation_cols
            ));
        }

        let sizes = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
            ("bonus_width", self.bonus_width),
            ("bonus_height", self.bonus_height),
            ("player_speed", self.player_speed),
            ("player_projectile_speed", self.player_projectile_speed),
            ("enemy_projectile_speed", self.enemy_projectile_speed),
            ("bonus_speed", self.bonus_speed),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return fail(format!("{name} must be positive (got {value})"));
            }
        }

        if !(self.swarm_base_speed.is_finite() && self.swarm_base_speed > 0.0) {
            return fail(format!(
                "swarm_base_speed must be positive (got {})",
                self.swarm_base_speed
            ));
        }
        let pacing = [
            ("drop_distance", f64::from(self.drop_distance)),
            ("swarm_fire_interval_ms", self.swarm_fire_interval_ms),
            ("bonus_spawn_interval_ms", self.bonus_spawn_interval_ms),
        ];
        for (name, value) in pacing {
            if !(value.is_finite() && value > 0.0) {
                return fail(format!("{name} must be positive (got {value})"));
            }
        }
        if !(self.player_fire_cooldown_ms.is_finite() && self.player_fire_cooldown_ms >= 0.0) {
            return fail(format!(
                "player_fire_cooldown_ms must not be negative (got {})",
                self.player_fire_cooldown_ms
            ));
        }
        if self.player_lives <= 0 {
            return fail(format!("player_lives must be positive (got {})", self.player_lives));
        }
        if self.max_player_projectiles == 0 {
            return fail("max_player_projectiles must be at least 1".into());
        }
        if self.enemy_spacing_x < self.enemy_width || self.enemy_spacing_y < self.enemy_height {
            return fail("enemy spacing must not be smaller than the enemy size".into());
        }
        if self.player_width > self.playfield_width {
            return fail("player is wider than the playfield".into());
        }
        if self.formation_width() > self.playfield_width - 2.0 * EDGE_MARGIN {
            return fail(format!(
                "formation ({} wide) does not fit the playfield ({} wide)",
                self.formation_width(),
                self.playfield_width
            ));
        }

        let formation_bottom = self.formation_top
            + (self.formation_rows - 1) as f32 * self.enemy_spacing_y
            + self.enemy_height;
        if formation_bottom >= self.player_y() {
            return fail("formation starts on top of the player".into());
        }

        Ok(())
    }

    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| SimError::Configuration(format!("invalid settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            SimError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
