//! Application layer: main menu, settings editor, terminal run session and
//! headless runner on top of `conways_voronoi_core`.

pub mod app;
