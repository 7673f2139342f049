//! The update loop tying the market view and the action card together.
//!
//! Both components read from the same [`SettingsStore`]. Every event handler
//! here mutates state and then runs [`Dashboard::update`], so the two views
//! always see each other's writes in a fixed order: market first, card
//! second.

use tracing::debug;

use crate::config::{Settings, SettingsStore, SettingsUpdate};
use crate::market::{MarketList, MarketTab, MarketView};
use crate::supply_card::{ActionTab, SupplyCard};
use crate::types::{Asset, LendError, RawAsset};
use crate::wallet::{TokenAffordance, TokenRegistrar, WalletProvider};

pub struct Dashboard<S: SettingsStore> {
    store: S,
    market_tab: MarketTab,
    market: MarketView,
    card: SupplyCard,
}

impl<S: SettingsStore> Dashboard<S> {
    /// Creates the dashboard and runs the first update pass.
    ///
    /// The yield toggle starts on "Net APY" and that value is written to the
    /// settings, whatever they held before.
    pub fn new(store: S, market_tab: MarketTab) -> Self {
        Self::with_initial_strk(store, market_tab, true)
    }

    /// Like [`Dashboard::new`], with the yield toggle starting at `with_strk`.
    pub fn with_initial_strk(store: S, market_tab: MarketTab, with_strk: bool) -> Self {
        let mut dashboard = Self {
            store,
            market_tab,
            market: MarketView::new().with_strk(with_strk),
            card: SupplyCard::new(),
        };
        dashboard.update();
        dashboard
    }

    /// Recomputes derived state from the current inputs.
    pub fn update(&mut self) {
        self.market.sync(self.market_tab, &mut self.store);
        self.card.sync(self.market_tab, self.store.settings());
    }

    pub fn switch_market(&mut self, tab: MarketTab) {
        debug!(from = %self.market_tab, to = %tab, "switching market");
        self.market_tab = tab;
        self.update();
    }

    /// Selection callback of the market list views.
    pub fn select_asset(&mut self, asset: Asset) {
        self.market.select_asset(asset, &mut self.store);
        self.update();
    }

    /// Selects the `index`-th row of the visible market list.
    pub fn select_row(&mut self, index: usize) -> Option<Asset> {
        let asset = self.market_list().get(index).cloned()?;
        self.select_asset(asset.clone());
        Some(asset)
    }

    pub fn toggle_with_strk(&mut self) -> bool {
        let value = self.market.toggle_with_strk(&mut self.store);
        self.update();
        value
    }

    pub fn select_action_tab(&mut self, tab: ActionTab) -> Result<(), LendError> {
        self.card.select_tab(tab)
    }

    pub fn cycle_action_tab(&mut self) {
        self.card.cycle_tab();
    }

    /// Replaces the asset list, as a fresh account feed would.
    pub fn replace_asset_list(&mut self, list: Vec<RawAsset>) {
        self.store.dispatch(SettingsUpdate::AssetList(list));
        self.update();
    }

    pub fn token_affordances(&self, wallet: Option<&dyn WalletProvider>) -> Vec<TokenAffordance> {
        self.card.token_affordances(wallet)
    }

    pub fn register_token(
        &self,
        affordance: &TokenAffordance,
        registrar: &dyn TokenRegistrar,
    ) -> Result<(), LendError> {
        self.card
            .register_token(affordance, self.store.settings(), registrar)
    }

    pub fn market_list(&self) -> MarketList<'_> {
        self.market.list(self.market_tab)
    }

    pub fn market_tab(&self) -> MarketTab {
        self.market_tab
    }

    pub fn market(&self) -> &MarketView {
        &self.market
    }

    pub fn card(&self) -> &SupplyCard {
        &self.card
    }

    pub fn settings(&self) -> &Settings {
        self.store.settings()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
