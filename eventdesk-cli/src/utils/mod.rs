pub mod datetime;
pub mod prompt;
pub mod tui;
