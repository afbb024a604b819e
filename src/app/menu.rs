//! Line-oriented main and settings menus.

use anyhow::Result;
use std::io::Write;

use conways_voronoi_core::settings::Setting;
use conways_voronoi_core::{Algorithm, DisplayTag, RunOutcome};
use conways_voronoi_tui::render_plain;

use crate::app::state::App;

/// Floats printed by the numerical test.
pub const NUMERICAL_TEST_DRAWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Run,
    Print,
    NumericalTest,
    Settings,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "r" | "run" => Some(MenuChoice::Run),
            "p" | "print" => Some(MenuChoice::Print),
            "t" | "test" => Some(MenuChoice::NumericalTest),
            "s" | "settings" => Some(MenuChoice::Settings),
            "x" | "exit" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// What the user typed at the settings prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsChoice {
    Edit(Setting),
    Back,
}

impl SettingsChoice {
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("x") || input.eq_ignore_ascii_case("exit") {
            return Some(SettingsChoice::Back);
        }
        input
            .parse::<usize>()
            .ok()
            .and_then(Setting::from_index)
            .map(SettingsChoice::Edit)
    }
}

impl App {
    /// Main menu loop. Returns once the user exits, stdin closes or Ctrl+C
    /// arrives.
    pub async fn run(&mut self) -> Result<()> {
        while !self.shutdown.is_shutdown_requested() {
            self.print_main_menu()?;
            let Some(line) = self.prompt("> ").await? else {
                break;
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::Run) => match self.run_session().await {
                    Ok(RunOutcome::Quit) => self.shutdown.request_shutdown(),
                    Ok(RunOutcome::Stopped) => {}
                    Err(e) => {
                        tracing::error!(error = %e, "Run session failed");
                        println!("Returning.");
                    }
                },
                Some(MenuChoice::Print) => self.print_once()?,
                Some(MenuChoice::NumericalTest) => self.numerical_test()?,
                Some(MenuChoice::Settings) => self.settings_menu().await?,
                Some(MenuChoice::Exit) => self.shutdown.request_shutdown(),
                None => println!("Bad Input"),
            }
        }

        self.shutdown.cleanup(self);
        Ok(())
    }

    fn print_main_menu(&self) -> Result<()> {
        let context = self
            .context()
            .ok_or_else(|| anyhow::anyhow!("Simulation context is missing"))?;
        let config = context.config();
        println!();
        println!("Conways Voronoi");
        println!(
            "  grid {}x{} | seed {} | algorithm {}",
            config.automaton.width, config.automaton.height, config.noise.seed, config.noise.algorithm
        );
        println!("  config {}", self.config_path.display());
        println!("  r) run   p) print   t) numerical test   s) settings   x) exit");
        Ok(())
    }

    /// Seeds and prints one generation.
    fn print_once(&mut self) -> Result<()> {
        let context = self.context_mut()?;
        context.set_display_tag(DisplayTag::Preview);
        context.begin_session();
        context.reseed()?;
        let snapshot = context.step();
        print!("{}", render_plain(&snapshot));
        println!(
            "Generation {} | Active {}",
            snapshot.generation, snapshot.active_count
        );
        Ok(())
    }

    fn numerical_test(&mut self) -> Result<()> {
        let context = self.context_mut()?;
        let algorithm = context.config().noise.algorithm;
        println!("{} draws from {}:", NUMERICAL_TEST_DRAWS, algorithm);
        for value in context.sample_floats(NUMERICAL_TEST_DRAWS) {
            println!("  {value:.6}");
        }
        Ok(())
    }

    async fn settings_menu(&mut self) -> Result<()> {
        loop {
            {
                let config = self.context_mut()?.config();
                println!();
                for setting in Setting::ALL {
                    println!(
                        "  {:>2}) {:<24} {}",
                        setting.index(),
                        setting.label(),
                        setting.current(config)
                    );
                }
                println!("   x) back");
            }

            let Some(line) = self.prompt("setting> ").await? else {
                return Ok(());
            };
            let setting = match SettingsChoice::parse(&line) {
                Some(SettingsChoice::Back) => return Ok(()),
                Some(SettingsChoice::Edit(setting)) => setting,
                None => {
                    println!("Bad Input");
                    continue;
                }
            };

            if setting == Setting::Algorithm {
                for algorithm in Algorithm::ALL {
                    println!("  {:>2}) {}", algorithm.index(), algorithm);
                }
            }
            let Some(value) = self.prompt(&format!("{}> ", setting.label())).await? else {
                return Ok(());
            };
            let outcome = self.context_mut()?.apply_setting(setting, &value);
            if outcome.is_bad_input() {
                println!("Bad Input");
            }
        }
    }

    /// Reads one trimmed line from stdin. `None` on end of input or Ctrl+C;
    /// Ctrl+C also requests shutdown.
    async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        print!("{label}");
        std::io::stdout().flush()?;

        let read = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line).map(|n| (n, line))
        });

        tokio::select! {
            joined = read => {
                let (n, line) = joined??;
                Ok((n > 0).then(|| line.trim().to_string()))
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Ctrl+C received, initiating graceful shutdown...");
                self.shutdown.request_shutdown();
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choices() {
        assert_eq!(MenuChoice::parse("r"), Some(MenuChoice::Run));
        assert_eq!(MenuChoice::parse(" P "), Some(MenuChoice::Print));
        assert_eq!(MenuChoice::parse("t"), Some(MenuChoice::NumericalTest));
        assert_eq!(MenuChoice::parse("s"), Some(MenuChoice::Settings));
        assert_eq!(MenuChoice::parse("exit"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("x"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("run now"), None);
    }

    #[test]
    fn test_settings_choices() {
        assert_eq!(
            SettingsChoice::parse("0"),
            Some(SettingsChoice::Edit(Setting::OctaveCount))
        );
        assert_eq!(
            SettingsChoice::parse("11"),
            Some(SettingsChoice::Edit(Setting::MaxActiveCount))
        );
        assert_eq!(SettingsChoice::parse("EXIT"), Some(SettingsChoice::Back));
        assert_eq!(SettingsChoice::parse("12"), None);
        assert_eq!(SettingsChoice::parse("-1"), None);
    }
}
