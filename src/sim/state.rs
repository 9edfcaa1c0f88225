//! Session state and read-only snapshots
//!
//! The session exclusively owns every entity collection. Collaborators only
//! ever see owned `Snapshot`s and `FrameEvent`s.

use serde::{Deserialize, Serialize};

use super::entities::{BonusCraft, Enemy, Player, Projectile};
use super::rect::Rect;
use super::rng::SimRng;
use super::swarm::Swarm;
use crate::error::SimError;
use crate::settings::Settings;

/// Top-level phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to confirm a new run
    Title,
    /// Active gameplay (including the respawn freeze)
    Playing,
    /// Run ended, waiting for confirm to return to the title
    GameOver,
}

/// Something that happened during one `advance` call, for audio/visual effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FrameEvent {
    /// Player launched a projectile
    PlayerFired,
    /// A front-line enemy launched a projectile
    EnemyFired,
    /// Swarm enemy at (row, col) destroyed
    EnemyKilled { row: u32, col: u32 },
    /// Bonus craft entered the playfield
    BonusSpawned,
    /// Bonus craft shot down
    BonusKilled,
    /// Player took an enemy projectile
    PlayerHit { lives_left: u32 },
    /// Swarm cleared; the next wave starts
    WaveAdvanced { wave: u32 },
    /// Swarm moved into a new speed stage (1-4)
    SpeedStageChanged { stage: u8 },
    /// Session entered a new phase
    PhaseChanged { phase: GamePhase },
}

/// Everything a presenter needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub wave: u32,
    pub lives: u32,
    pub player: Rect,
    pub living_enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub bonus: Option<BonusCraft>,
    pub speed_multiplier: f32,
    pub speed_stage: u8,
    pub respawning: bool,
}

/// One play session: title screen, any number of runs, game over screens
#[derive(Debug, Clone)]
pub struct Session {
    pub settings: Settings,
    pub phase: GamePhase,
    pub score: u64,
    /// Best score seen since the process started
    pub high_score: u64,
    /// Current wave (1-based)
    pub wave: u32,
    pub player: Player,
    pub swarm: Swarm,
    pub bonus: BonusCraft,
    pub player_shots: Vec<Projectile>,
    pub enemy_shots: Vec<Projectile>,
    /// Gameplay frozen after a hit, waiting for the ship to reappear
    pub respawning: bool,
    pub respawn_started_ms: f64,
    /// Time since the last bonus craft spawn (or session start)
    pub bonus_timer_ms: f64,
    pub(super) rng: SimRng,
}

impl Session {
    /// Create a session on the title screen
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SimError> {
        settings.validate()?;
        let swarm = Swarm::new(&settings)?;

        log::info!(
            "New session: {}x{} formation, {} lives, seed {}",
            settings.formation_rows,
            settings.formation_cols,
            settings.player_lives,
            seed
        );

        Ok(Self {
            phase: GamePhase::Title,
            score: 0,
            high_score: 0,
            wave: 1,
            player: Player::new(&settings),
            swarm,
            bonus: BonusCraft::new(&settings),
            player_shots: Vec::new(),
            enemy_shots: Vec::new(),
            respawning: false,
            respawn_started_ms: 0.0,
            bonus_timer_ms: 0.0,
            rng: SimRng::new(seed),
            settings,
        })
    }

    /// Reset everything a new run starts from. The high score survives.
    pub fn reset(&mut self) {
        self.score = 0;
        self.wave = 1;
        self.player.reset();
        self.swarm.reset();
        self.bonus = BonusCraft::new(&self.settings);
        self.player_shots.clear();
        self.enemy_shots.clear();
        self.respawning = false;
        self.respawn_started_ms = 0.0;
        self.bonus_timer_ms = 0.0;
    }

    pub fn add_score(&mut self, points: u64) {
        self.score += points;
        self.high_score = self.high_score.max(self.score);
    }

    /// Switch phase and record the change
    pub fn set_phase(&mut self, phase: GamePhase, events: &mut Vec<FrameEvent>) {
        if self.phase == phase {
            return;
        }
        log::info!(
            "Phase {:?} -> {:?} (score {}, wave {})",
            self.phase,
            phase,
            self.score,
            self.wave
        );
        self.phase = phase;
        if phase == GamePhase::GameOver {
            self.respawning = false;
        }
        events.push(FrameEvent::PhaseChanged { phase });
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Read-only view of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            high_score: self.high_score,
            wave: self.wave,
            lives: self.player.display_lives(),
            player: self.player.rect(),
            living_enemies: self.swarm.living().copied().collect(),
            projectiles: self
                .player_shots
                .iter()
                .chain(self.enemy_shots.iter())
                .copied()
                .collect(),
            bonus: self.bonus.is_active().then_some(self.bonus),
            speed_multiplier: self.swarm.speed_multiplier(),
            speed_stage: self.swarm.speed_stage(),
            respawning: self.respawning,
        }
    }
}
