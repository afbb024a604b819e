//! Drives the automaton on a fixed cadence while listening for commands.

use std::time::{Duration, Instant};

use crate::command::{CommandReceiver, SimulationCommand};
use crate::context::SimulationContext;
use crate::snapshot::GridSnapshot;

/// Consumer of published generations.
pub trait Renderer {
    fn render(&mut self, snapshot: &GridSnapshot, running: bool) -> anyhow::Result<()>;
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// `Stop` received or the generation limit reached; back to the menu.
    Stopped,
    /// `Quit` received or the input side went away.
    Quit,
}

pub struct Coordinator<'a, R: Renderer> {
    context: &'a mut SimulationContext,
    renderer: R,
    commands: CommandReceiver,
    tick: Duration,
    running: bool,
    generation_limit: Option<u64>,
}

impl<'a, R: Renderer> Coordinator<'a, R> {
    /// Paused coordinator ticking every `config.tick_ms`.
    pub fn new(context: &'a mut SimulationContext, renderer: R, commands: CommandReceiver) -> Self {
        let tick = Duration::from_millis(context.config().tick_ms);
        Self {
            context,
            renderer,
            commands,
            tick,
            running: false,
            generation_limit: None,
        }
    }

    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Starts running instead of paused.
    #[must_use]
    pub fn running(mut self, running: bool) -> Self {
        self.running = running;
        self
    }

    /// Stops after this many generations.
    #[must_use]
    pub fn with_generation_limit(mut self, limit: u64) -> Self {
        self.generation_limit = Some(limit);
        self
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Hands back the renderer once the run is over.
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Renders the current generation, then loops until `Stop`, `Quit` or
    /// the generation limit.
    pub fn run(&mut self) -> anyhow::Result<RunOutcome> {
        let mut snapshot = self.context.snapshot();
        self.renderer.render(&snapshot, self.running)?;

        let mut generations = 0u64;
        let mut next_tick = Instant::now() + self.tick;
        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            match self.commands.wait(timeout) {
                SimulationCommand::Idle => {}
                SimulationCommand::ToggleRun => {
                    self.running = !self.running;
                    tracing::debug!(running = self.running, "Toggled run");
                    self.renderer.render(&snapshot, self.running)?;
                }
                SimulationCommand::Reset => {
                    self.context.reseed()?;
                    snapshot = self.context.snapshot();
                    tracing::debug!("Reset grid");
                    self.renderer.render(&snapshot, self.running)?;
                }
                SimulationCommand::Stop => {
                    tracing::info!(generations, "Run stopped");
                    return Ok(RunOutcome::Stopped);
                }
                SimulationCommand::Quit => {
                    tracing::info!(generations, "Run quit");
                    return Ok(RunOutcome::Quit);
                }
            }

            let now = Instant::now();
            if now < next_tick {
                continue;
            }
            next_tick = now + self.tick;

            if self.running {
                snapshot = self.context.step();
                generations += 1;
                self.renderer.render(&snapshot, self.running)?;
                if self.generation_limit.is_some_and(|limit| generations >= limit) {
                    tracing::info!(generations, "Generation limit reached");
                    return Ok(RunOutcome::Stopped);
                }
            }
        }
    }
}
