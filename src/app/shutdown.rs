//! Shutdown bookkeeping for the interactive application.

/// Tracks whether the user asked to leave and with which exit code. Owned by
/// the menu loop; the run session reports its own quit through `RunOutcome`.
#[derive(Debug, Default)]
pub struct ShutdownManager {
    shutdown_requested: bool,
    exit_code: i32,
}

impl ShutdownManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_shutdown(&mut self) {
        self.shutdown_requested = true;
        tracing::info!("Shutdown requested");
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested
    }

    pub fn set_exit_code(&mut self, code: i32) {
        self.exit_code = code;
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Logs the final run totals.
    pub fn cleanup(&self, app: &crate::app::App) {
        tracing::info!("Performing shutdown cleanup...");
        if let Some(context) = app.context() {
            context.metrics().log_summary();
        }
        tracing::info!(exit_code = self.exit_code, "Cleanup complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_manager_new() {
        let manager = ShutdownManager::new();
        assert!(!manager.is_shutdown_requested());
        assert_eq!(manager.exit_code(), 0);
    }

    #[test]
    fn test_shutdown_request_sticks() {
        let mut manager = ShutdownManager::new();
        manager.request_shutdown();
        manager.request_shutdown();
        assert!(manager.is_shutdown_requested());
        assert_eq!(manager.exit_code(), 0);
    }

    #[test]
    fn test_exit_code() {
        let mut manager = ShutdownManager::new();
        manager.set_exit_code(1);
        assert_eq!(manager.exit_code(), 1);
    }
}
