//! Text views for the calculator prompt.
//!
//! - `screen` - full layout printed after every event
//! - `table` - results area (loading, error or projection table)
//! - `status_bar` - command hints

mod screen;
mod status_bar;
mod table;

pub use screen::render_screen;
pub use status_bar::{KeyHint, build_status_bar, hints};
pub use table::render_view;
