//! Text rendering of a generation, used for one-shot prints and headless
//! output.

use conways_voronoi_core::{CellState, GridSnapshot};

/// Character for the cell at `(x, y)`. Border cells become a double-line
/// frame.
pub fn glyph_at(snapshot: &GridSnapshot, x: usize, y: usize) -> char {
    match snapshot.cell(x, y) {
        CellState::BorderWall => frame_glyph(snapshot.width, snapshot.height, x, y),
        state => state.symbol(),
    }
}

fn frame_glyph(width: usize, height: usize, x: usize, y: usize) -> char {
    let (left, right) = (x == 0, x == width - 1);
    let (top, bottom) = (y == 0, y == height - 1);
    match (top, bottom, left, right) {
        (true, _, true, _) => '╔',
        (true, _, _, true) => '╗',
        (_, true, true, _) => '╚',
        (_, true, _, true) => '╝',
        (true, _, _, _) | (_, true, _, _) => '═',
        _ => '║',
    }
}

/// The whole grid as text, one line per row.
pub fn render_plain(snapshot: &GridSnapshot) -> String {
    let mut out = String::with_capacity((snapshot.width * 3 + 1) * snapshot.height);
    for y in 0..snapshot.height {
        for x in 0..snapshot.width {
            out.push(glyph_at(snapshot, x, y));
        }
        out.push('\n');
    }
    out
}
