//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! audio and platform code:
//! - Time is injected (frame `dt` plus a monotonic `now` in ms)
//! - Seeded RNG only, owned by the session
//! - Stable iteration order (formation is row-major, never compacted)

pub mod collision;
pub mod entities;
pub mod rect;
pub mod rng;
pub mod state;
pub mod swarm;
pub mod tick;

pub use collision::{ShotResult, resolve_enemy_shots, resolve_player_shots};
pub use entities::{BonusCraft, Enemy, EnemyTier, Player, Projectile, Side};
pub use rect::{Rect, overlaps};
pub use rng::SimRng;
pub use state::{FrameEvent, GamePhase, Session, Snapshot};
pub use swarm::{Step, Swarm, SwarmUpdate, speed_stage};
pub use tick::FrameInput;
