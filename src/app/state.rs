use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use conways_voronoi_core::config::AppConfig;
use conways_voronoi_core::SimulationContext;

use crate::app::shutdown::ShutdownManager;

pub struct App {
    /// `None` only while a run session has it.
    context: Option<SimulationContext>,
    pub config_path: PathBuf,
    pub shutdown: ShutdownManager,
}

impl App {
    /// Reads `path`. A missing file is created from defaults; an invalid one
    /// is reported and defaults are used.
    pub fn load_config(path: impl AsRef<Path>) -> AppConfig {
        let path = path.as_ref();
        if let Ok(content) = std::fs::read_to_string(path) {
            match AppConfig::from_toml(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to load config, using defaults");
                }
            }
        }
        let default = AppConfig::default();
        if !path.exists() {
            match default.to_toml() {
                Ok(toml_str) => {
                    if let Err(e) = std::fs::write(path, toml_str) {
                        tracing::warn!(path = %path.display(), error = %e, "Could not write default config");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Could not serialize default config"),
            }
        }
        default
    }

    pub fn new(config: AppConfig, config_path: impl Into<PathBuf>) -> Result<Self> {
        let context = SimulationContext::new(config).context("Invalid simulation config")?;
        Ok(Self {
            context: Some(context),
            config_path: config_path.into(),
            shutdown: ShutdownManager::new(),
        })
    }

    pub fn context(&self) -> Option<&SimulationContext> {
        self.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Result<&mut SimulationContext> {
        self.context
            .as_mut()
            .context("Simulation context is held by a running session")
    }

    pub(crate) fn take_context(&mut self) -> Result<SimulationContext> {
        self.context
            .take()
            .context("Simulation context is held by a running session")
    }

    pub(crate) fn restore_context(&mut self, context: SimulationContext) {
        self.context = Some(context);
    }
}
