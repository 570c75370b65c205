pub mod cli;
pub mod io;
pub mod model;
pub mod ops;
pub mod state;
pub mod toast;
pub mod tui;
pub mod util;
