use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Color;
use ratatui::widgets::Widget;

use conways_voronoi_core::{Algorithm, CellState, DisplayTag, GridSnapshot, Renderer};

use crate::plain::glyph_at;
use crate::views::status::StatusWidget;
use crate::Tui;

pub struct GridWidget<'a> {
    snapshot: &'a GridSnapshot,
}

impl<'a> GridWidget<'a> {
    pub fn new(snapshot: &'a GridSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn color_for(state: CellState, tag: DisplayTag) -> Color {
        match (state, tag) {
            (CellState::BorderWall, _) => Color::White,
            (CellState::Active, DisplayTag::Preview) => Color::Yellow,
            (CellState::Active, _) => Color::Green,
            (CellState::Inactive, _) => Color::DarkGray,
        }
    }
}

impl<'a> Widget for GridWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible_w = (area.width as usize).min(self.snapshot.width);
        let visible_h = (area.height as usize).min(self.snapshot.height);

        for y in 0..visible_h {
            for x in 0..visible_w {
                let cell = &mut buf[(area.x + x as u16, area.y + y as u16)];
                cell.set_char(glyph_at(self.snapshot, x, y));
                cell.set_fg(Self::color_for(
                    self.snapshot.cell(x, y),
                    self.snapshot.tag(x, y),
                ));
            }
        }
    }
}

/// Draws each published generation into the terminal session.
pub struct TerminalRenderer {
    tui: Tui,
    algorithm: Algorithm,
}

impl TerminalRenderer {
    /// Takes an initialized session.
    pub fn new(tui: Tui, algorithm: Algorithm) -> Self {
        Self { tui, algorithm }
    }

    /// Restores the terminal and hands the session back.
    pub fn finish(mut self) -> anyhow::Result<Tui> {
        self.tui.exit()?;
        Ok(self.tui)
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, snapshot: &GridSnapshot, running: bool) -> anyhow::Result<()> {
        let algorithm = self.algorithm;
        self.tui.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)])
                .split(f.area());

            f.render_widget(GridWidget::new(snapshot), chunks[0]);
            f.render_widget(
                StatusWidget {
                    snapshot,
                    algorithm,
                    running,
                },
                chunks[1],
            );
        })?;
        Ok(())
    }
}
