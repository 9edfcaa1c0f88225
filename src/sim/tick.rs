//! Per-frame session advance
//!
//! One `advance` call per presentation frame. Movement of the player,
//! projectiles and bonus craft is integrated over `dt`; swarm movement and
//! firing are gated on the injected monotonic `now_ms`.

use super::collision::{resolve_enemy_shots, resolve_player_shots};
use super::state::{FrameEvent, GamePhase, Session};
use crate::consts::RESPAWN_DELAY_MS;
use crate::error::{check_dt, check_now};

/// Input snapshot for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Move left held
    pub move_left: bool,
    /// Move right held
    pub move_right: bool,
    /// Fire held
    pub fire: bool,
    /// Confirm pressed this frame (start / restart)
    pub confirm: bool,
}

impl Session {
    /// Advance the session by one frame and report what happened
    pub fn advance(&mut self, dt: f64, now_ms: f64, input: &FrameInput) -> Vec<FrameEvent> {
        let dt = check_dt(dt).unwrap_or_else(|err| {
            log::warn!("{err}; clamping to 0");
            0.0
        });
        let now_ms = match check_now(now_ms) {
            Ok(now) => now,
            Err(err) => {
                log::warn!("{err}; frame skipped");
                return Vec::new();
            }
        };

        let mut events = Vec::new();
        match self.phase {
            GamePhase::Title => {
                if input.confirm {
                    self.set_phase(GamePhase::Playing, &mut events);
                }
            }
            GamePhase::Playing => self.tick_playing(dt, now_ms, input, &mut events),
            GamePhase::GameOver => {
                if input.confirm {
                    self.reset();
                    self.set_phase(GamePhase::Title, &mut events);
                }
            }
        }
        events
    }

    fn tick_playing(
        &mut self,
        dt: f64,
        now_ms: f64,
        input: &FrameInput,
        events: &mut Vec<FrameEvent>,
    ) {
        if self.respawning {
            if now_ms - self.respawn_started_ms >= RESPAWN_DELAY_MS {
                self.player.reset_position();
                self.enemy_shots.clear();
                self.respawning = false;
                log::debug!("Player respawned ({} lives)", self.player.lives);
            }
            return;
        }

        let frame_dt = dt as f32;

        // Player
        self.player.update(frame_dt, input.move_left, input.move_right);
        if input.fire && self.player_shots.len() < self.settings.max_player_projectiles {
            if let Some(shot) = self.player.shoot(now_ms, &self.settings) {
                self.player_shots.push(shot);
                events.push(FrameEvent::PlayerFired);
            }
        }

        // Swarm
        let swarm = self.swarm.update(now_ms, &mut self.rng);
        if let Some(stage) = swarm.stage_changed {
            events.push(FrameEvent::SpeedStageChanged { stage });
        }
        if let Some(shot) = swarm.fired {
            self.enemy_shots.push(shot);
            events.push(FrameEvent::EnemyFired);
        }

        self.tick_bonus(dt, events);

        // Projectiles
        let height = self.settings.playfield_height;
        for shot in self.player_shots.iter_mut().chain(self.enemy_shots.iter_mut()) {
            shot.update(frame_dt);
        }
        self.player_shots.retain(|s| !s.is_off_playfield(height));
        self.enemy_shots.retain(|s| !s.is_off_playfield(height));

        // Collisions
        let hits = resolve_player_shots(&mut self.player_shots, &mut self.swarm, &mut self.bonus);
        for enemy in &hits.enemies_killed {
            events.push(FrameEvent::EnemyKilled {
                row: enemy.row,
                col: enemy.col,
            });
        }
        if hits.bonus_killed {
            events.push(FrameEvent::BonusKilled);
        }
        self.add_score(hits.score);

        if resolve_enemy_shots(&mut self.enemy_shots, &self.player.rect()) {
            self.player.hit();
            events.push(FrameEvent::PlayerHit {
                lives_left: self.player.display_lives(),
            });
            if self.player.lives > 0 {
                self.respawning = true;
                self.respawn_started_ms = now_ms;
            }
        }

        let contact = self
            .swarm
            .check_player_collision(&self.player.rect())
            .is_some();

        // End conditions: out of lives, then contact, then wave clear
        if self.player.lives <= 0 {
            self.set_phase(GamePhase::GameOver, events);
        } else if contact {
            log::info!("Swarm reached the player");
            self.set_phase(GamePhase::GameOver, events);
        } else if self.swarm.alive_count() == 0 {
            self.advance_wave(events);
        }
    }

    fn tick_bonus(&mut self, dt: f64, events: &mut Vec<FrameEvent>) {
        self.bonus_timer_ms += dt * 1000.0;
        if !self.bonus.is_active()
            && self.bonus_timer_ms >= self.settings.bonus_spawn_interval_ms
            && self.bonus.spawn_random(&mut self.rng)
        {
            self.bonus_timer_ms = 0.0;
            let heading = if self.bonus.direction > 0.0 { "right" } else { "left" };
            log::debug!("Bonus craft spawned heading {heading}");
            events.push(FrameEvent::BonusSpawned);
        }
        self.bonus.update(dt as f32);
    }

    fn advance_wave(&mut self, events: &mut Vec<FrameEvent>) {
        self.wave += 1;
        self.swarm.reset();
        self.player_shots.clear();
        self.enemy_shots.clear();
        log::info!("Wave {} (score {})", self.wave, self.score);
        events.push(FrameEvent::WaveAdvanced { wave: self.wave });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SCORE_PER_BONUS, SCORE_PER_ENEMY};
    use crate::settings::Settings;
    use crate::sim::entities::{Projectile, Side};

    const NOW: f64 = 10_000.0;

    /// A session in the Playing phase with the swarm's clocks stamped at `NOW`
    /// so nothing moves or fires unless a test asks for it.
    fn playing() -> Session {
        let mut session = Session::new(Settings::default(), 12345).unwrap();
        session.phase = GamePhase::Playing;
        session.swarm.last_move_ms = NOW;
        session.swarm.last_shot_ms = NOW;
        session
    }

    fn enemy_shot_on_player(session: &Session) -> Projectile {
        let rect = session.player.rect();
        Projectile::from_enemy(rect.center().x, rect.top(), &session.settings)
    }

    #[test]
    fn test_title_to_playing() {
        let mut session = Session::new(Settings::default(), 1).unwrap();
        let events = session.advance(0.016, 0.0, &FrameInput::default());
        assert!(events.is_empty());
        assert_eq!(session.phase, GamePhase::Title);

        let confirm = FrameInput {
            confirm: true,
            ..Default::default()
        };
        let events = session.advance(0.016, 16.0, &confirm);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(
            events,
            vec![FrameEvent::PhaseChanged {
                phase: GamePhase::Playing
            }]
        );
    }

    #[test]
    fn test_front_line_kill_scores_ten() {
        let mut session = playing();
        let target = session.swarm.enemies[40]; // row 4, col 4
        let rect = target.rect();
        let shot = Projectile::from_player(rect.center().x, rect.bottom(), &session.settings);
        session.player_shots.push(shot);

        let events = session.advance(0.0, NOW, &FrameInput::default());
        assert_eq!(session.score, SCORE_PER_ENEMY);
        assert!(session.player_shots.is_empty());
        assert!(!session.swarm.enemies[40].alive);
        assert_eq!(session.swarm.alive_count(), 44);
        assert!(events.contains(&FrameEvent::EnemyKilled { row: 4, col: 4 }));
    }

    #[test]
    fn test_bonus_kill_scores_hundred() {
        let mut session = playing();
        session.bonus.spawn(Side::Left);
        session.bonus.pos.x = 20.0;
        let shot = Projectile::from_player(50.0, 40.0, &session.settings);
        session.player_shots.push(shot);

        let events = session.advance(0.0, NOW, &FrameInput::default());
        assert_eq!(session.score, SCORE_PER_BONUS);
        assert!(!session.bonus.is_active());
        assert!(events.contains(&FrameEvent::BonusKilled));
    }

    #[test]
    fn test_last_life_goes_straight_to_game_over() {
        let mut session = playing();
        session.player.lives = 1;
        let shot = enemy_shot_on_player(&session);
        session.enemy_shots.push(shot);

        let events = session.advance(0.0, NOW, &FrameInput::default());
        assert_eq!(session.player.lives, 0);
        assert_eq!(session.phase, GamePhase::GameOver);
        assert!(!session.respawning);
        assert!(events.contains(&FrameEvent::PlayerHit { lives_left: 0 }));
        assert!(events.contains(&FrameEvent::PhaseChanged {
            phase: GamePhase::GameOver
        }));
        assert_eq!(session.snapshot().lives, 0);
    }

    #[test]
    fn test_hit_freezes_then_respawns() {
        let mut session = playing();
        session.player.pos.x = 10.0;
        let hit = enemy_shot_on_player(&session);
        session.enemy_shots.push(hit);
        session
            .enemy_shots
            .push(Projectile::from_enemy(600.0, 300.0, &session.settings));

        session.advance(0.0, NOW, &FrameInput::default());
        assert!(session.respawning);
        assert_eq!(session.player.lives, 2);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.enemy_shots.len(), 1);

        // Frozen: input and time do nothing
        let held = FrameInput {
            move_right: true,
            fire: true,
            ..Default::default()
        };
        let events = session.advance(0.5, NOW + 500.0, &held);
        assert!(events.is_empty());
        assert_eq!(session.player.pos.x, 10.0);
        assert!(session.player_shots.is_empty());
        assert_eq!(session.enemy_shots[0].pos.y, 300.0);

        session.advance(0.5, NOW + RESPAWN_DELAY_MS, &FrameInput::default());
        assert!(!session.respawning);
        assert!(session.enemy_shots.is_empty());
        assert_eq!(session.player.pos.x, 375.0);
        assert_eq!(session.player.lives, 2);
    }

    #[test]
    fn test_only_one_enemy_hit_per_frame() {
        let mut session = playing();
        let shot = enemy_shot_on_player(&session);
        session.enemy_shots.push(shot);
        session.enemy_shots.push(shot);

        session.advance(0.0, NOW, &FrameInput::default());
        assert_eq!(session.player.lives, 2);
    }

    #[test]
    fn test_player_shot_cap() {
        let mut session = playing();
        let fire = FrameInput {
            fire: true,
            ..Default::default()
        };
        let cooldown = session.settings.player_fire_cooldown_ms;
        let mut fired = 0;
        for i in 0..5 {
            let now = NOW + i as f64 * cooldown;
            session.swarm.last_move_ms = now;
            session.swarm.last_shot_ms = now;
            let events = session.advance(0.0, now, &fire);
            fired += events.iter().filter(|e| **e == FrameEvent::PlayerFired).count();
        }
        assert_eq!(fired, session.settings.max_player_projectiles);
        assert_eq!(session.player_shots.len(), session.settings.max_player_projectiles);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut session = playing();
        let fire = FrameInput {
            fire: true,
            ..Default::default()
        };
        let a = session.advance(0.0, NOW, &fire);
        let b = session.advance(0.0, NOW + 1.0, &fire);
        assert!(a.contains(&FrameEvent::PlayerFired));
        assert!(!b.contains(&FrameEvent::PlayerFired));
        assert_eq!(session.player_shots.len(), 1);
    }

    #[test]
    fn test_wave_clear_advances() {
        let mut session = playing();
        session.add_score(120);
        session.player.lives = 2;
        session.player.pos.x = 33.0;
        for enemy in &mut session.swarm.enemies {
            enemy.alive = false;
            enemy.pos.y += 200.0;
        }
        session.swarm.previous_stage = 3;
        let stray = Projectile::from_enemy(600.0, 300.0, &session.settings);
        session.enemy_shots.push(stray);

        let events = session.advance(0.0, NOW, &FrameInput::default());
        assert!(events.contains(&FrameEvent::WaveAdvanced { wave: 2 }));
        assert_eq!(session.wave, 2);
        assert_eq!(session.swarm.alive_count(), 45);
        assert_eq!(session.swarm.previous_stage, 1);
        assert_eq!(session.swarm.enemies[0].pos, session.settings.formation_origin());
        assert!(session.enemy_shots.is_empty());
        assert!(session.player_shots.is_empty());
        assert_eq!(session.score, 120);
        assert_eq!(session.player.lives, 2);
        assert_eq!(session.player.pos.x, 33.0);
    }

    #[test]
    fn test_no_wave_clear_while_enemies_live() {
        let mut session = playing();
        for enemy in session.swarm.enemies.iter_mut().skip(1) {
            enemy.alive = false;
        }
        session.advance(0.0, NOW, &FrameInput::default());
        assert_eq!(session.wave, 1);
    }

    #[test]
    fn test_swarm_contact_ends_run() {
        let mut session = playing();
        for enemy in &mut session.swarm.enemies {
            enemy.pos.y += 320.0;
        }
        let events = session.advance(0.0, NOW, &FrameInput::default());
        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(session.player.lives, 3);
        assert!(events.contains(&FrameEvent::PhaseChanged {
            phase: GamePhase::GameOver
        }));
    }

    #[test]
    fn test_hit_and_contact_in_one_frame_ends_without_respawn() {
        let mut session = playing();
        for enemy in &mut session.swarm.enemies {
            enemy.pos.y += 320.0;
        }
        let shot = enemy_shot_on_player(&session);
        session.enemy_shots.push(shot);

        let events = session.advance(0.0, NOW, &FrameInput::default());
        assert!(events.contains(&FrameEvent::PlayerHit { lives_left: 2 }));
        assert_eq!(session.phase, GamePhase::GameOver);
        assert!(!session.respawning);
        assert!(!session.snapshot().respawning);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut session = playing();
        session.add_score(250);
        session.wave = 4;
        session.player.lives = 0;
        session.swarm.enemies[0].alive = false;
        session.bonus.spawn(Side::Right);
        session.bonus_timer_ms = 5000.0;
        session.phase = GamePhase::GameOver;
        let shot = enemy_shot_on_player(&session);
        session.enemy_shots.push(shot);

        let confirm = FrameInput {
            confirm: true,
            ..Default::default()
        };
        let events = session.advance(0.016, NOW, &confirm);
        assert_eq!(
            events,
            vec![FrameEvent::PhaseChanged {
                phase: GamePhase::Title
            }]
        );
        assert_eq!(session.score, 0);
        assert_eq!(session.high_score, 250);
        assert_eq!(session.wave, 1);
        assert_eq!(session.player.lives, 3);
        assert_eq!(session.swarm.alive_count(), 45);
        assert!(!session.bonus.is_active());
        assert!(session.enemy_shots.is_empty());
        assert_eq!(session.bonus_timer_ms, 0.0);
        assert!(!session.respawning);
    }

    #[test]
    fn test_game_over_waits_for_confirm() {
        let mut session = playing();
        session.phase = GamePhase::GameOver;
        session.advance(0.016, NOW, &FrameInput::default());
        assert_eq!(session.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_bonus_spawns_on_timer() {
        let mut session = playing();
        session.bonus_timer_ms = session.settings.bonus_spawn_interval_ms - 1.0;
        let events = session.advance(0.001, NOW, &FrameInput::default());
        assert!(events.contains(&FrameEvent::BonusSpawned));
        assert!(session.bonus.is_active());
        assert_eq!(session.bonus_timer_ms, 0.0);

        // Already active: timer elapsing again does not respawn it
        session.bonus_timer_ms = session.settings.bonus_spawn_interval_ms;
        let events = session.advance(0.0, NOW, &FrameInput::default());
        assert!(!events.contains(&FrameEvent::BonusSpawned));
    }

    #[test]
    fn test_negative_dt_is_clamped() {
        let mut session = playing();
        let x = session.player.pos.x;
        let left = FrameInput {
            move_left: true,
            ..Default::default()
        };
        session.advance(-1.0, NOW, &left);
        assert_eq!(session.player.pos.x, x);
    }

    #[test]
    fn test_nan_timestamp_skips_frame() {
        let mut session = playing();
        let shot = enemy_shot_on_player(&session);
        session.enemy_shots.push(shot);
        let events = session.advance(0.016, f64::NAN, &FrameInput::default());
        assert!(events.is_empty());
        assert_eq!(session.player.lives, 3);
    }

    #[test]
    fn test_swarm_events_surface() {
        let mut session = playing();
        for enemy in &mut session.swarm.enemies {
            enemy.pos.y += 100.0;
        }
        let later = NOW + 2000.0;
        let events = session.advance(0.0, later, &FrameInput::default());
        assert!(events.contains(&FrameEvent::SpeedStageChanged { stage: 2 }));
        assert!(events.contains(&FrameEvent::EnemyFired));
        assert_eq!(session.enemy_shots.len(), 1);
    }

    #[test]
    fn test_determinism() {
        let mut a = Session::new(Settings::default(), 99999).unwrap();
        let mut b = Session::new(Settings::default(), 99999).unwrap();

        let inputs = [
            FrameInput {
                confirm: true,
                ..Default::default()
            },
            FrameInput {
                move_left: true,
                fire: true,
                ..Default::default()
            },
            FrameInput {
                move_right: true,
                ..Default::default()
            },
            FrameInput {
                fire: true,
                ..Default::default()
            },
        ];

        let mut now = 0.0;
        for frame in 0..600 {
            let input = &inputs[frame % inputs.len()];
            let ea = a.advance(1.0 / 60.0, now, input);
            let eb = b.advance(1.0 / 60.0, now, input);
            assert_eq!(ea, eb);
            now += 1000.0 / 60.0;
        }

        let sa = serde_json::to_string(&a.snapshot()).unwrap();
        let sb = serde_json::to_string(&b.snapshot()).unwrap();
        assert_eq!(sa, sb);
    }
}
