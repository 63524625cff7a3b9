//! Pumps keyboard input, session ticks and rendering for the viewer.
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use region_map_core::display::SoundCue;
use region_map_core::{
    RegionMapEnv, RegionMapError, RegionMapSession, SessionError, SessionExit, SessionStatus,
    VirtualDisplay,
};
use tokio::time::{self, Duration, MissedTickBehavior};

use crate::input::{ButtonLatch, KeyAction, map_key};
use crate::presentation::{terminal::Tui, ui, view::MapView};

const FRAME_INTERVAL_MS: u64 = 16;

/// Sounds remembered across frames for the footer.
const SOUND_HISTORY: usize = 16;

/// How the loop ended.
#[derive(Debug)]
pub enum Outcome {
    /// The session closed and handed control back.
    Exited(SessionExit),
    /// The session aborted with an error.
    Aborted(SessionError),
    /// The user quit the viewer mid-session.
    Quit,
}

pub struct EventLoop<'a> {
    session: RegionMapSession,
    env: RegionMapEnv<'a>,
    display: VirtualDisplay,
    latch: ButtonLatch,
    sounds: Vec<SoundCue>,
}

impl<'a> EventLoop<'a> {
    pub fn new(session: RegionMapSession, env: RegionMapEnv<'a>, display: VirtualDisplay) -> Self {
        Self {
            session,
            env,
            display,
            latch: ButtonLatch::new(),
            sounds: Vec::new(),
        }
    }

    pub async fn run(mut self, terminal: &mut Tui) -> Result<Outcome> {
        let mut interval = time::interval(Duration::from_millis(FRAME_INTERVAL_MS));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if self.drain_keys(terminal)? {
                        tracing::info!("Viewer quit at phase {}", self.session.phase().as_str());
                        return Ok(Outcome::Quit);
                    }
                    if let Some(outcome) = self.step()? {
                        self.render(terminal)?;
                        return Ok(outcome);
                    }
                    self.render(terminal)?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::warn!("Interrupted");
                    return Ok(Outcome::Quit);
                }
            }
        }
    }

    /// Reads every pending terminal event; returns `true` on quit.
    fn drain_keys(&mut self, terminal: &mut Tui) -> Result<bool> {
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => match map_key(key) {
                    KeyAction::Quit => return Ok(true),
                    KeyAction::Press(buttons) => self.latch.press(buttons),
                    KeyAction::None => {}
                },
                Event::Resize(_, _) => {
                    terminal.autoresize()?;
                }
                _ => {}
            }
        }
        Ok(false)
    }

    /// Runs one session tick and advances the display by a frame.
    fn step(&mut self) -> Result<Option<Outcome>> {
        let input = self.latch.frame();
        let status = self.session.tick(&input, &self.env, &mut self.display);
        self.display.end_frame();
        self.collect_sounds();

        match status {
            Ok(SessionStatus::Running) => Ok(None),
            Ok(SessionStatus::Finished(exit)) => Ok(Some(Outcome::Exited(exit))),
            Err(error) => {
                tracing::error!(
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    "Session aborted: {}",
                    error
                );
                Ok(Some(Outcome::Aborted(error)))
            }
        }
    }

    fn collect_sounds(&mut self) {
        let played = self.display.take_sounds();
        if played.is_empty() {
            return;
        }
        for sound in &played {
            tracing::debug!("Sound: {}", sound);
        }
        self.sounds.extend(played);
        let excess = self.sounds.len().saturating_sub(SOUND_HISTORY);
        self.sounds.drain(..excess);
    }

    fn render(&self, terminal: &mut Tui) -> Result<()> {
        let view = MapView::build(&self.session, &self.display, &self.env, &self.sounds);
        ui::render(terminal, &view)
    }
}
