//! Invader Siege headless runner
//!
//! Drives a session with a simple autopilot against a manual clock, feeds the
//! frame events to the audio cue mapper and logs progress. Useful for balance
//! checks without a window.
//!
//! Usage: `invader-siege [settings.json] [frames] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();
    log::info!("Invader Siege (headless) starting...");

    match headless::run(std::env::args().skip(1).collect()) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser shell drives `Session::advance` itself
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;

    use invader_siege::SimError;
    use invader_siege::audio::{AudioManager, CueLog};
    use invader_siege::platform::{Action, Clock, EventSink, KeyState, ManualClock, Presenter};
    use invader_siege::settings::Settings;
    use invader_siege::sim::{FrameEvent, FrameInput, GamePhase, Session, Snapshot};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const DEFAULT_FRAMES: u64 = 60 * 60;
    const DEFAULT_SEED: u64 = 0x5EED;

    /// Logs a one-line summary once per simulated second
    struct LogPresenter {
        frame: u64,
    }

    impl Presenter for LogPresenter {
        fn present(&mut self, snapshot: &Snapshot) {
            self.frame += 1;
            if self.frame % 60 != 0 {
                return;
            }
            log::info!(
                "t={:>3}s {:?} wave {} score {} lives {} enemies {} shots {} stage {} (x{:.1}){}",
                self.frame / 60,
                snapshot.phase,
                snapshot.wave,
                snapshot.score,
                snapshot.lives,
                snapshot.living_enemies.len(),
                snapshot.projectiles.len(),
                snapshot.speed_stage,
                snapshot.speed_multiplier,
                if snapshot.bonus.is_some() { " [bonus]" } else { "" },
            );
        }
    }

    /// Chase the nearest front-line column and keep firing
    fn autopilot(snapshot: &Snapshot, keys: &mut KeyState) {
        keys.release(Action::MoveLeft);
        keys.release(Action::MoveRight);
        keys.release(Action::Confirm);

        match snapshot.phase {
            GamePhase::Title | GamePhase::GameOver => {
                keys.press(Action::Confirm);
                return;
            }
            GamePhase::Playing => {}
        }

        keys.press(Action::Fire);

        let ship_x = snapshot.player.center().x;
        let target = snapshot
            .living_enemies
            .iter()
            .map(|e| e.rect().center().x)
            .min_by(|a, b| (a - ship_x).abs().total_cmp(&(b - ship_x).abs()));

        if let Some(target) = target {
            if target < ship_x - 4.0 {
                keys.press(Action::MoveLeft);
            } else if target > ship_x + 4.0 {
                keys.press(Action::MoveRight);
            }
        }
    }

    pub fn run(args: Vec<String>) -> Result<(), SimError> {
        let settings = match args.first() {
            Some(path) => Settings::load(Path::new(path))?,
            None => Settings::default(),
        };
        let frames = parse_arg(args.get(1), DEFAULT_FRAMES, "frames")?;
        let seed = parse_arg(args.get(2), DEFAULT_SEED, "seed")?;

        let mut session = Session::new(settings, seed)?;
        let mut clock = ManualClock::new(0.0);
        let mut keys = KeyState::new();
        let mut audio = AudioManager::new(Some(CueLog::default()));
        let mut presenter = LogPresenter { frame: 0 };
        let mut runs = 0u32;

        for _ in 0..frames {
            autopilot(&session.snapshot(), &mut keys);
            let input = FrameInput::from_provider(&keys);
            keys.end_frame();

            clock.advance(FRAME_MS);
            let events = session.advance(FRAME_MS / 1000.0, clock.now_ms(), &input);

            runs += events
                .iter()
                .filter(|e| matches!(e, FrameEvent::PhaseChanged { phase: GamePhase::Playing }))
                .count() as u32;
            audio.handle(&events);
            presenter.present(&session.snapshot());
        }

        let cues = audio.output().map(|o| o.played.len()).unwrap_or(0);
        log::info!(
            "Finished {frames} frames: {runs} run(s), high score {}, {cues} sound cues",
            session.high_score
        );

        let json = serde_json::to_string_pretty(&session.snapshot())
            .map_err(|e| SimError::InvariantViolation(format!("snapshot not serializable: {e}")))?;
        println!("{json}");
        Ok(())
    }

    fn parse_arg(arg: Option<&String>, default: u64, name: &str) -> Result<u64, SimError> {
        match arg {
            None => Ok(default),
            Some(s) => s
                .parse()
                .map_err(|_| SimError::Configuration(format!("invalid {name}: {s}"))),
        }
    }
}
