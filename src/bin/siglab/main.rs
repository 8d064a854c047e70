//! siglab - Terminal interface to the signals-and-systems lab
//!
//! Run with: cargo run --bin siglab

mod app;
mod ui;

use app::Lab;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let mut terminal = ratatui::init();
    let result = Lab::new().run(&mut terminal);
    ratatui::restore();
    result
}
