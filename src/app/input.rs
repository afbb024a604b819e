//! Keyboard input during a run session.

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tokio::sync::watch;

use conways_voronoi_core::{CommandSender, SimulationCommand};

/// Command for a key press, if the key is bound.
pub fn map_key(key: KeyEvent) -> Option<SimulationCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(SimulationCommand::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char(' ') => {
            Some(SimulationCommand::ToggleRun)
        }
        KeyCode::Char('p') | KeyCode::Char('P') => Some(SimulationCommand::Reset),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(SimulationCommand::Stop),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(SimulationCommand::Quit)
        }
        KeyCode::Esc => Some(SimulationCommand::Quit),
        _ => None,
    }
}

/// Forwards key presses to `sender` until a terminal command is sent, the
/// session flips `done`, or the event stream ends. Dropping the sender on
/// exit lets the simulation observe a disconnect.
pub async fn listen(sender: CommandSender, mut done: watch::Receiver<bool>) {
    let mut events = EventStream::new();
    loop {
        tokio::select! {
            changed = done.changed() => {
                if changed.is_err() || *done.borrow() {
                    break;
                }
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    let Some(command) = map_key(key) else { continue };
                    tracing::debug!(?command, "Key command");
                    if !sender.submit(command) || command.is_terminal() {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::error!(error = %e, "Input stream failed");
                    break;
                }
                None => break,
            },
        }
    }
    tracing::debug!("Input listener stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_run_keys() {
        assert_eq!(map_key(key(KeyCode::Char('s'))), Some(SimulationCommand::ToggleRun));
        assert_eq!(map_key(key(KeyCode::Char(' '))), Some(SimulationCommand::ToggleRun));
        assert_eq!(map_key(key(KeyCode::Char('p'))), Some(SimulationCommand::Reset));
        assert_eq!(map_key(key(KeyCode::Char('r'))), Some(SimulationCommand::Stop));
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('x'), KeyCode::Char('q'), KeyCode::Esc] {
            assert_eq!(map_key(key(code)), Some(SimulationCommand::Quit));
        }
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c), Some(SimulationCommand::Quit));
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(map_key(key(KeyCode::Char('z'))), None);
        assert_eq!(map_key(key(KeyCode::Enter)), None);
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_s), None);
    }
}
