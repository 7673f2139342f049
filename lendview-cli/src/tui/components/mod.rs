//! Component widgets for the TUI.

pub mod spinner;
pub mod stat_card;
pub mod tab_bar;

pub use spinner::LoadingSpinner;
pub use stat_card::{InlineStat, StatCard};
pub use tab_bar::TabBar;
