//! # lendview
//!
//! View models for a lending dashboard: the Market tab (supplied/borrowed
//! buckets and the default asset selection) and the Supply/Borrow action
//! card, coupled only through a shared [`SettingsStore`].

pub mod config;
pub mod dashboard;
pub mod inputs;
pub mod market;
pub mod prelude;
pub mod supply_card;
pub mod types;
pub mod wallet;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{InMemorySettings, Settings, SettingsStore, SettingsUpdate};
pub use dashboard::Dashboard;
pub use market::{MarketBuckets, MarketTab, MarketView, default_selection};
pub use supply_card::{ActionTab, CardPanel, SupplyCard};
pub use types::{Asset, LendError, RawAsset};
