pub mod app;
pub mod desktop_entry;
pub mod editor;
pub mod helpers;
pub mod shared;
pub mod tui;
