pub mod headless;
pub mod input;
pub mod menu;
pub mod session;
pub mod shutdown;
pub mod state;

pub use headless::{run_headless, LogRenderer};
pub use shutdown::ShutdownManager;
pub use state::App;
