//! Session ownership and the per-frame pump
//!
//! One `Session` holds everything a running show owns: the simulation
//! engine and the launch scheduler. `start` builds it, `stop` (or the
//! scheduler winding down) drops it, and the host's frame loop calls
//! `frame` once per display refresh. Dropping the session is the single
//! cancellation point; no timer or callback outlives it.

use crate::settings::Settings;
use crate::sim::{self, Launcher, ShowState, Verdict};

/// Everything one running show owns
#[derive(Debug)]
struct Session {
    state: ShowState,
    launcher: Launcher,
}

/// What the host loop should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Keep requesting frames
    Running,
    /// The show is over and the session has been discarded
    Finished,
}

/// The animation driver: owns the live session and guards re-entry.
#[derive(Debug)]
pub struct Director {
    settings: Settings,
    session: Option<Session>,
}

impl Director {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            session: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// Simulation state of the live session, for the renderer
    pub fn state(&self) -> Option<&ShowState> {
        self.session.as_ref().map(|s| &s.state)
    }

    /// Begin a show on a surface of the given size.
    ///
    /// Returns false without touching the running session when one is
    /// already active; the start button stays debounced through this.
    /// `fallback_seed` is used unless the settings pin a seed.
    pub fn start(&mut self, width: f32, height: f32, fallback_seed: u64) -> bool {
        if self.session.is_some() {
            log::debug!("Show already running; ignoring start");
            return false;
        }

        let seed = self.settings.seed.unwrap_or(fallback_seed);
        let palette_len = self.settings.effective_palette().len();
        let (delay_min, delay_max) = self.settings.delay_band_ms();

        log::info!("Show starting: {width}x{height}, seed {seed}");
        self.session = Some(Session {
            state: ShowState::new(width, height, palette_len, seed),
            // Decorrelate the launch schedule from the burst randomness
            launcher: Launcher::new(
                self.settings.effective_max_rockets(),
                delay_min,
                delay_max,
                self.settings.grace_ms,
                seed.wrapping_mul(2654435761),
            ),
        });
        true
    }

    /// Tear down the live session. Pixels already on the canvas stay
    /// where they are; the next show clears them on its first render.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            log::info!(
                "Show stopped after {} ticks ({} rockets launched)",
                session.state.time_ticks,
                session.launcher.launched()
            );
        }
    }

    /// Run one frame: drain the launch schedule, then advance physics.
    ///
    /// The caller renders after this returns, so within a frame the tick
    /// always completes before any state is read.
    pub fn frame(&mut self, now_ms: f64) -> FrameOutcome {
        let Some(session) = self.session.as_mut() else {
            return FrameOutcome::Finished;
        };

        let verdict = session.launcher.poll(now_ms);
        if verdict == Verdict::Finished {
            let launched = session.launcher.launched();
            let ticks = session.state.time_ticks;
            self.session = None;
            log::info!("Show complete: {launched} rockets over {ticks} ticks");
            return FrameOutcome::Finished;
        }

        if verdict == Verdict::Launch {
            session.state.spawn_rocket();
        }
        sim::tick(&mut session.state);

        FrameOutcome::Running
    }

    /// Forward new surface bounds to the live session (viewport resize)
    pub fn resize(&mut self, width: f32, height: f32) {
        if let Some(session) = self.session.as_mut() {
            session.state.resize(width, height);
        }
    }
}
