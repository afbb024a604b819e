//! Interactive run session: terminal renderer, key listener and the
//! coordinator on a blocking thread.

use anyhow::{anyhow, Result};
use tokio::sync::watch;

use conways_voronoi_core::{
    command_channel, CommandReceiver, Coordinator, DisplayTag, RunOutcome, SimulationContext,
};
use conways_voronoi_tui::{TerminalRenderer, Tui};

use crate::app::input;
use crate::app::state::App;

impl App {
    /// Runs the grid in the terminal until the user stops or quits.
    ///
    /// The context travels into the simulation thread and comes back when
    /// the run ends. If that thread panics, a fresh context is rebuilt from
    /// the config it started with.
    pub async fn run_session(&mut self) -> Result<RunOutcome> {
        let mut tui = Tui::new()?;
        tui.init()?;

        let mut context = self.take_context()?;
        let start_config = context.config().clone();
        let renderer = TerminalRenderer::new(tui, start_config.noise.algorithm);

        let (sender, receiver) = command_channel();
        let (done_tx, done_rx) = watch::channel(false);
        let listener = tokio::spawn(input::listen(sender, done_rx));

        let simulation = tokio::task::spawn_blocking(move || {
            let outcome = drive(&mut context, renderer, receiver);
            (context, outcome)
        });
        let joined = simulation.await;

        let _ = done_tx.send(true);
        if let Err(e) = listener.await {
            tracing::warn!(error = %e, "Input listener ended abnormally");
        }

        match joined {
            Ok((context, outcome)) => {
                self.restore_context(context);
                outcome
            }
            Err(e) => {
                self.restore_context(SimulationContext::new(start_config)?);
                Err(anyhow!("Simulation task failed: {e}"))
            }
        }
    }
}

fn drive(
    context: &mut SimulationContext,
    renderer: TerminalRenderer,
    commands: CommandReceiver,
) -> Result<RunOutcome> {
    context.set_display_tag(DisplayTag::Live);
    context.begin_session();
    context.reseed()?;

    let mut coordinator = Coordinator::new(context, renderer, commands);
    let outcome = coordinator.run();
    coordinator.into_renderer().finish()?;

    context.metrics().log_summary();
    outcome
}
