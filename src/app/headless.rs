//! Runs a fixed number of generations without a terminal session.

use anyhow::Result;
use std::time::Duration;

use conways_voronoi_core::config::AppConfig;
use conways_voronoi_core::{
    CommandReceiver, Coordinator, DisplayTag, GridSnapshot, Renderer, RunOutcome,
    SimulationContext,
};

/// Logs every published generation.
#[derive(Debug, Default)]
pub struct LogRenderer {
    pub frames: u64,
}

impl Renderer for LogRenderer {
    fn render(&mut self, snapshot: &GridSnapshot, running: bool) -> Result<()> {
        self.frames += 1;
        tracing::debug!(
            generation = snapshot.generation,
            active = snapshot.active_count,
            running,
            "Frame"
        );
        Ok(())
    }
}

/// Seeds, runs `generations` steps as fast as possible and returns the
/// final generation. `commands` can end the run early.
pub fn run_headless(
    config: AppConfig,
    generations: u64,
    commands: CommandReceiver,
) -> Result<(RunOutcome, GridSnapshot)> {
    let mut context = SimulationContext::new(config)?;
    context.set_display_tag(DisplayTag::Preview);
    context.begin_session();
    context.reseed()?;

    let outcome = if generations == 0 {
        RunOutcome::Stopped
    } else {
        Coordinator::new(&mut context, LogRenderer::default(), commands)
            .with_tick(Duration::ZERO)
            .running(true)
            .with_generation_limit(generations)
            .run()?
    };

    context.metrics().log_summary();
    Ok((outcome, context.snapshot()))
}
