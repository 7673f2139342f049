//! Prelude module for lendview
//!
//! Re-exports the types most callers need to drive a dashboard.
//!
//! # Usage
//!
//! ```rust
//! use lendview::prelude::*;
//! ```

pub use crate::config::{InMemorySettings, Settings, SettingsStore, SettingsUpdate};
pub use crate::dashboard::Dashboard;
pub use crate::inputs::IntoLendDecimal;
pub use crate::market::{MarketBuckets, MarketList, MarketTab, MarketView, default_selection};
pub use crate::supply_card::{ActionTab, CardPanel, SupplyCard};
pub use crate::types::{Asset, LendError, RawAsset, RawDecimal, TokenDecimals};
pub use crate::wallet::{
    InjectedWallet, RecordingRegistrar, TokenAffordance, TokenKind, TokenRegistrar, WalletProvider,
};
