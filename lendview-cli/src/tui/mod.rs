//! # TUI Module
//!
//! Full-screen terminal dashboard built with ratatui: the market list and
//! the supply/borrow action card, driven by one [`App`] update loop.

pub mod app;
pub mod components;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use event::handle_events;
pub use ui::ui;
