//! Control commands from the input side to the simulation loop.
//!
//! Commands are latest-wins: readers drain everything pending and act on the
//! most recent command only. Each command is seen once.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SimulationCommand {
    /// Nothing pending. This is the "no command" (`None`) value of the
    /// channel, named `Idle` so it does not shadow `Option::None`.
    #[default]
    Idle,
    ToggleRun,
    Reset,
    Stop,
    Quit,
}

impl SimulationCommand {
    /// Whether this command ends a run.
    pub fn is_terminal(self) -> bool {
        matches!(self, SimulationCommand::Stop | SimulationCommand::Quit)
    }
}

/// Creates a connected sender/receiver pair.
pub fn command_channel() -> (CommandSender, CommandReceiver) {
    let (tx, rx) = mpsc::channel();
    (CommandSender { tx }, CommandReceiver { rx })
}

#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: Sender<SimulationCommand>,
}

impl CommandSender {
    /// Queues a command. Never blocks; returns `false` once the receiver is
    /// gone.
    pub fn submit(&self, command: SimulationCommand) -> bool {
        self.tx.send(command).is_ok()
    }
}

#[derive(Debug)]
pub struct CommandReceiver {
    rx: Receiver<SimulationCommand>,
}

impl CommandReceiver {
    /// Latest pending command, or `Idle`.
    pub fn poll(&self) -> SimulationCommand {
        self.drain(SimulationCommand::Idle)
    }

    /// Waits up to `timeout` for a command, then drains to the latest.
    pub fn wait(&self, timeout: Duration) -> SimulationCommand {
        match self.rx.recv_timeout(timeout) {
            Ok(first) => self.drain(first),
            Err(RecvTimeoutError::Timeout) => SimulationCommand::Idle,
            Err(RecvTimeoutError::Disconnected) => SimulationCommand::Quit,
        }
    }

    fn drain(&self, mut latest: SimulationCommand) -> SimulationCommand {
        loop {
            match self.rx.try_recv() {
                Ok(command) => latest = command,
                Err(TryRecvError::Empty) => return latest,
                Err(TryRecvError::Disconnected) => {
                    return if latest == SimulationCommand::Idle {
                        SimulationCommand::Quit
                    } else {
                        latest
                    };
                }
            }
        }
    }
}
