use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use conways_voronoi_core::{command_channel, init_logging, Algorithm, SimulationCommand};
use conways_voronoi_lib::app::{run_headless, App};
use conways_voronoi_tui::render_plain;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mode to run in
    #[arg(short, long, value_enum, default_value = "interactive")]
    mode: Mode,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Generations to run in headless mode
    #[arg(short, long, default_value_t = 100)]
    generations: u64,

    /// Seed override; implies a deterministic session
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// Algorithm name or catalog index
    #[arg(short, long)]
    algorithm: Option<Algorithm>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<tracing::Level>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Interactive,
    Headless,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = match args.mode {
        Mode::Interactive => tracing::Level::WARN,
        Mode::Headless => tracing::Level::INFO,
    };
    init_logging(args.log_level.unwrap_or(default_level));

    let mut config = App::load_config(&args.config);
    if let Some(seed) = args.seed {
        config.noise.seed = seed;
        config.deterministic = true;
    }
    if let Some(algorithm) = args.algorithm {
        config.noise.algorithm = algorithm;
    }

    match args.mode {
        Mode::Headless => {
            let (sender, receiver) = command_channel();
            tokio::spawn(async move {
                tokio::signal::ctrl_c().await.ok();
                tracing::info!("Ctrl+C received, stopping headless run...");
                sender.submit(SimulationCommand::Quit);
            });

            let generations = args.generations;
            let (outcome, snapshot) = tokio::task::spawn_blocking(move || {
                run_headless(config, generations, receiver)
            })
            .await??;

            print!("{}", render_plain(&snapshot));
            println!(
                "{:?} after {} generations, {} active",
                outcome, snapshot.generation, snapshot.active_count
            );
            Ok(())
        }
        Mode::Interactive => {
            let mut app = App::new(config, args.config)?;
            let res = app.run().await;

            if let Err(e) = &res {
                tracing::error!(error = %e, "Application error");
                eprintln!("Application error: {e}");
                app.shutdown.set_exit_code(1);
            } else {
                println!("Exited clean.");
            }
            // A pending stdin read would keep the runtime alive on drop.
            std::process::exit(app.shutdown.exit_code());
        }
    }
}
