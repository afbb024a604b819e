use conways_voronoi_core::{Algorithm, GridSnapshot};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

/// Key bindings shown on the status line.
pub const KEY_HELP: &str = "s/space run | p reset | r stop | x quit";

pub struct StatusWidget<'a> {
    pub snapshot: &'a GridSnapshot,
    pub algorithm: Algorithm,
    pub running: bool,
}

impl<'a> Widget for StatusWidget<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let (state, color) = if self.running {
            ("RUNNING", Color::Green)
        } else {
            ("PAUSED", Color::Yellow)
        };

        let line = Line::from(vec![
            Span::styled(
                format!(" {state} "),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "| Gen: {} | Active: {} | {} | ",
                self.snapshot.generation, self.snapshot.active_count, self.algorithm
            )),
            Span::styled(KEY_HELP, Style::default().fg(Color::DarkGray)),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}
