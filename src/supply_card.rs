//! # Supply/Borrow Action Card
//!
//! Mirrors the selected asset out of the settings and tracks which action
//! sub-panel is open. The sub-panels themselves (supply, withdraw, borrow,
//! repay forms) receive the mirrored asset and are not modelled here.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::{debug, warn};

use crate::config::Settings;
use crate::market::MarketTab;
use crate::types::{Asset, LendError};
use crate::wallet::{TokenAffordance, TokenKind, TokenRegistrar, WalletProvider, wallet_available};

/// Sub-panel of the action card.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ActionTab {
    #[default]
    Supply,
    Withdraw,
    Borrow,
    Repay,
}

impl ActionTab {
    /// The market this sub-panel belongs to.
    pub fn market(self) -> MarketTab {
        match self {
            ActionTab::Supply | ActionTab::Withdraw => MarketTab::Supply,
            ActionTab::Borrow | ActionTab::Repay => MarketTab::Borrow,
        }
    }

    /// Sub-panel opened when a market is entered.
    pub fn default_for(market: MarketTab) -> Self {
        match market {
            MarketTab::Supply => ActionTab::Supply,
            MarketTab::Borrow => ActionTab::Borrow,
        }
    }

    pub fn tabs_for(market: MarketTab) -> [ActionTab; 2] {
        match market {
            MarketTab::Supply => [ActionTab::Supply, ActionTab::Withdraw],
            MarketTab::Borrow => [ActionTab::Borrow, ActionTab::Repay],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActionTab::Supply => "Supply",
            ActionTab::Withdraw => "Withdraw",
            ActionTab::Borrow => "Borrow",
            ActionTab::Repay => "Repay Borrow",
        }
    }
}

/// What the card body shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPanel<'a> {
    /// No asset selected yet.
    Loading,
    Section { tab: ActionTab, asset: &'a Asset },
}

#[derive(Debug, Clone, Default)]
pub struct SupplyCard {
    market: MarketTab,
    current_tab: ActionTab,
    current_asset: Option<Asset>,
    seen_market: Option<MarketTab>,
}

impl SupplyCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follows the external market and the selected asset.
    ///
    /// A market change resets the sub-panel to that market's default. The
    /// last mirrored asset is kept while the settings hold no selection.
    pub fn sync(&mut self, market: MarketTab, settings: &Settings) {
        if self.seen_market != Some(market) {
            self.market = market;
            self.current_tab = ActionTab::default_for(market);
            self.seen_market = Some(market);
            debug!(%market, tab = %self.current_tab, "action card market changed");
        }

        if settings.has_selection()
            && let Some(asset) = &settings.selected_asset
            && self.current_asset.as_ref() != Some(asset)
        {
            debug!(asset = %asset.id, "action card asset changed");
            self.current_asset = Some(asset.clone());
        }
    }

    /// Opens a sub-panel of the current market.
    pub fn select_tab(&mut self, tab: ActionTab) -> Result<(), LendError> {
        if tab.market() != self.market {
            return Err(LendError::TabNotInMarket {
                tab: tab.to_string(),
                market: self.market.to_string(),
            });
        }
        self.current_tab = tab;
        Ok(())
    }

    /// Opens the other sub-panel of the current market.
    pub fn cycle_tab(&mut self) {
        let [first, second] = ActionTab::tabs_for(self.market);
        self.current_tab = if self.current_tab == first { second } else { first };
    }

    pub fn market(&self) -> MarketTab {
        self.market
    }

    pub fn current_tab(&self) -> ActionTab {
        self.current_tab
    }

    pub fn tabs(&self) -> [ActionTab; 2] {
        ActionTab::tabs_for(self.market)
    }

    pub fn current_asset(&self) -> Option<&Asset> {
        self.current_asset.as_ref()
    }

    pub fn panel(&self) -> CardPanel<'_> {
        match &self.current_asset {
            Some(asset) => CardPanel::Section {
                tab: self.current_tab,
                asset,
            },
            None => CardPanel::Loading,
        }
    }

    /// "Add to wallet" buttons for the mirrored asset.
    ///
    /// Empty without a wallet reporting a network. Native ether has no
    /// token contract, so it only offers its receipt token.
    pub fn token_affordances(&self, wallet: Option<&dyn WalletProvider>) -> Vec<TokenAffordance> {
        let Some(asset) = self.current_asset.as_ref().filter(|a| !a.id.is_empty()) else {
            return Vec::new();
        };
        if !wallet_available(wallet) {
            return Vec::new();
        }

        let mut affordances = Vec::with_capacity(2);
        if asset.id != "eth" {
            affordances.push(TokenAffordance {
                asset_id: asset.id.clone(),
                label: asset.symbol(),
                kind: TokenKind::Token,
            });
        }
        affordances.push(TokenAffordance {
            asset_id: asset.id.clone(),
            label: asset.receipt_symbol(),
            kind: TokenKind::SToken,
        });
        affordances
    }

    /// Handles a click on an "add to wallet" button.
    pub fn register_token(
        &self,
        affordance: &TokenAffordance,
        settings: &Settings,
        registrar: &dyn TokenRegistrar,
    ) -> Result<(), LendError> {
        let decimals = settings.token_decimals(&affordance.asset_id).inspect_err(|e| {
            warn!("cannot register token: {}", e);
        })?;
        let precision = match affordance.kind {
            TokenKind::Token => decimals.token,
            TokenKind::SToken => decimals.stoken,
        };
        registrar.add_token(&affordance.asset_id, precision, affordance.kind);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::{InjectedWallet, RecordingRegistrar};

    fn selected(id: &str) -> Settings {
        Settings::default().with_selected_asset(Asset {
            id: id.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_loading_until_selected() {
        let mut card = SupplyCard::new();
        card.sync(MarketTab::Supply, &Settings::default());
        assert_eq!(card.panel(), CardPanel::Loading);

        card.sync(MarketTab::Supply, &selected("dai"));
        match card.panel() {
            CardPanel::Section { tab, asset } => {
                assert_eq!(tab, ActionTab::Supply);
                assert_eq!(asset.id, "dai");
            }
            CardPanel::Loading => panic!("Expected a section"),
        }
    }

    #[test]
    fn test_market_change_resets_tab() {
        let mut card = SupplyCard::new();
        let settings = selected("dai");
        card.sync(MarketTab::Supply, &settings);
        card.select_tab(ActionTab::Withdraw).unwrap();
        assert_eq!(card.current_tab(), ActionTab::Withdraw);

        // Same market again keeps the chosen tab.
        card.sync(MarketTab::Supply, &settings);
        assert_eq!(card.current_tab(), ActionTab::Withdraw);

        card.sync(MarketTab::Borrow, &settings);
        assert_eq!(card.current_tab(), ActionTab::Borrow);
        assert_eq!(card.tabs(), [ActionTab::Borrow, ActionTab::Repay]);
    }

    #[test]
    fn test_select_tab_outside_market() {
        let mut card = SupplyCard::new();
        card.sync(MarketTab::Supply, &Settings::default());
        let err = card.select_tab(ActionTab::Repay).unwrap_err();
        assert_eq!(
            err,
            LendError::TabNotInMarket { tab: "repay".into(), market: "supply".into() }
        );
        assert_eq!(card.current_tab(), ActionTab::Supply);
    }

    #[test]
    fn test_cycle_tab() {
        let mut card = SupplyCard::new();
        card.sync(MarketTab::Borrow, &Settings::default());
        card.cycle_tab();
        assert_eq!(card.current_tab(), ActionTab::Repay);
        card.cycle_tab();
        assert_eq!(card.current_tab(), ActionTab::Borrow);
    }

    #[test]
    fn test_keeps_last_asset_when_selection_cleared() {
        let mut card = SupplyCard::new();
        card.sync(MarketTab::Supply, &selected("usdc"));
        card.sync(MarketTab::Supply, &Settings::default());
        assert_eq!(card.current_asset().unwrap().id, "usdc");
    }

    #[test]
    fn test_affordances_need_wallet() {
        let mut card = SupplyCard::new();
        card.sync(MarketTab::Supply, &selected("dai"));
        assert!(card.token_affordances(None).is_empty());

        let wallet = InjectedWallet::disconnected();
        assert!(card.token_affordances(Some(&wallet)).is_empty());

        let wallet = InjectedWallet::new("56");
        let labels: Vec<String> = card
            .token_affordances(Some(&wallet))
            .into_iter()
            .map(|a| a.label)
            .collect();
        assert_eq!(labels, vec!["DAI".to_string(), "sDAI".to_string()]);
    }

    #[test]
    fn test_eth_has_only_receipt_affordance() {
        let mut card = SupplyCard::new();
        card.sync(MarketTab::Supply, &selected("eth"));
        let wallet = InjectedWallet::new("1");
        let affordances = card.token_affordances(Some(&wallet));
        assert_eq!(affordances.len(), 1);
        assert_eq!(affordances[0].kind, TokenKind::SToken);
        assert_eq!(affordances[0].label, "sETH");
    }

    #[test]
    fn test_register_uses_matching_precision() {
        let settings = selected("usdc").with_decimals("usdc", 6, 8).with_decimals("dai", 18, 8);
        let mut card = SupplyCard::new();
        card.sync(MarketTab::Supply, &settings);
        let wallet = InjectedWallet::new("1");
        let registrar = RecordingRegistrar::new();

        for affordance in card.token_affordances(Some(&wallet)) {
            card.register_token(&affordance, &settings, &registrar).unwrap();
        }
        let requests = registrar.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].kind, TokenKind::Token);
        assert_eq!(requests[1].kind, TokenKind::SToken);
        assert_eq!(requests[0].decimals, 6);
        assert_eq!(requests[1].decimals, 8);
        assert!(requests.iter().all(|r| r.asset_id == "usdc"));
    }

    #[test]
    fn test_register_without_decimals_fails() {
        let settings = selected("dai");
        let mut card = SupplyCard::new();
        card.sync(MarketTab::Supply, &settings);
        let wallet = InjectedWallet::new("1");
        let registrar = RecordingRegistrar::new();
        let affordance = card.token_affordances(Some(&wallet)).remove(0);

        let result = card.register_token(&affordance, &settings, &registrar);
        assert_eq!(result, Err(LendError::MissingDecimals("dai".to_string())));
        assert!(registrar.requests().is_empty());
    }
}
