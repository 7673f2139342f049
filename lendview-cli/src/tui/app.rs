//! Application state and screen management.

use lendview::prelude::*;

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Market list and action card
    Dashboard,
    /// Key bindings overlay
    Help,
}

/// Type of status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

/// Main application state
pub struct App {
    /// Whether the app should keep running
    pub running: bool,
    pub screen: Screen,
    pub dashboard: Dashboard<InMemorySettings>,
    /// Wallet the action card offers "add token" buttons for
    pub wallet: Option<InjectedWallet>,
    pub registrar: RecordingRegistrar,
    /// Cursor row in the visible market list
    pub row_index: usize,
    /// Status message to display
    pub message: Option<(String, MessageType)>,
    /// Animation counter for the loading spinner
    pub tick: usize,
}

impl App {
    pub fn new(settings: Settings, market: MarketTab, wallet: Option<InjectedWallet>) -> Self {
        Self::with_initial_strk(settings, market, wallet, true)
    }

    /// Starts with "Lending APY" when `with_strk` is false.
    pub fn with_initial_strk(
        settings: Settings,
        market: MarketTab,
        wallet: Option<InjectedWallet>,
        with_strk: bool,
    ) -> Self {
        let dashboard =
            Dashboard::with_initial_strk(InMemorySettings::new(settings), market, with_strk);
        let mut app = Self {
            running: true,
            screen: Screen::Dashboard,
            dashboard,
            wallet,
            registrar: RecordingRegistrar::new(),
            row_index: 0,
            message: None,
            tick: 0,
        };
        app.sync_cursor();
        app
    }

    pub fn wallet_ref(&self) -> Option<&dyn WalletProvider> {
        self.wallet.as_ref().map(|w| w as &dyn WalletProvider)
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn switch_market(&mut self, tab: MarketTab) {
        if tab == self.dashboard.market_tab() {
            return;
        }
        self.dashboard.switch_market(tab);
        self.sync_cursor();
    }

    pub fn toggle_market(&mut self) {
        self.switch_market(self.dashboard.market_tab().toggled());
    }

    pub fn next_row(&mut self) {
        let len = self.dashboard.market_list().len();
        if len > 0 {
            self.row_index = (self.row_index + 1) % len;
        }
    }

    pub fn previous_row(&mut self) {
        let len = self.dashboard.market_list().len();
        if len > 0 {
            self.row_index = (self.row_index + len - 1) % len;
        }
    }

    /// Selects the row under the cursor.
    pub fn select_row(&mut self) {
        match self.dashboard.select_row(self.row_index) {
            Some(asset) => {
                self.message = Some((format!("Selected {}", asset.symbol()), MessageType::Info));
            }
            None => {
                self.message = Some(("No asset to select".to_string(), MessageType::Warning));
            }
        }
    }

    pub fn toggle_apy(&mut self) {
        self.dashboard.toggle_with_strk();
        let label = self.dashboard.market().yield_label();
        self.message = Some((format!("Showing {}", label), MessageType::Info));
    }

    pub fn select_action_tab(&mut self, tab: ActionTab) {
        if let Err(e) = self.dashboard.select_action_tab(tab) {
            self.message = Some((e.to_string(), MessageType::Warning));
        }
    }

    pub fn cycle_action_tab(&mut self) {
        self.dashboard.cycle_action_tab();
    }

    /// Handles an "add to wallet" key for the given token kind.
    pub fn register(&mut self, kind: TokenKind) {
        let affordance = self
            .dashboard
            .token_affordances(self.wallet_ref())
            .into_iter()
            .find(|a| a.kind == kind);

        let Some(affordance) = affordance else {
            self.message = Some(("No wallet button for this token".to_string(), MessageType::Warning));
            return;
        };

        match self.dashboard.register_token(&affordance, &self.registrar) {
            Ok(()) => {
                self.message = Some((
                    format!("Asked wallet to add {}", affordance.label),
                    MessageType::Success,
                ));
            }
            Err(e) => {
                self.message = Some((e.to_string(), MessageType::Error));
            }
        }
    }

    /// Moves the cursor onto the selected asset, or clamps it to the list.
    fn sync_cursor(&mut self) {
        let list = self.dashboard.market_list();
        let selected_id = self
            .dashboard
            .settings()
            .selected_asset
            .as_ref()
            .map(|a| a.id.as_str());

        self.row_index = selected_id
            .and_then(|id| list.rows().position(|a| a.id == id))
            .unwrap_or_else(|| self.row_index.min(list.len().saturating_sub(1)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::new(vec![
            RawAsset::new("eth").borrow_balance(2),
            RawAsset::new("dai").supply_balance(100),
            RawAsset::new("usdc"),
        ])
        .with_decimals("dai", 18, 8)
    }

    #[test]
    fn test_cursor_starts_on_default_selection() {
        let app = App::new(settings(), MarketTab::Supply, None);
        assert_eq!(app.row_index, 0);
        assert_eq!(
            app.dashboard.market_list().get(app.row_index).unwrap().id,
            "dai"
        );
    }

    #[test]
    fn test_row_navigation_wraps() {
        let mut app = App::new(settings(), MarketTab::Supply, None);
        app.previous_row();
        assert_eq!(app.row_index, 2);
        app.next_row();
        assert_eq!(app.row_index, 0);
    }

    #[test]
    fn test_register_without_wallet_warns() {
        let mut app = App::new(settings(), MarketTab::Supply, None);
        app.register(TokenKind::Token);
        assert!(matches!(app.message, Some((_, MessageType::Warning))));
        assert!(app.registrar.requests().is_empty());
    }

    #[test]
    fn test_register_with_wallet() {
        let mut app = App::new(settings(), MarketTab::Supply, Some(InjectedWallet::new("1")));
        app.register(TokenKind::SToken);
        let last = app.registrar.last().unwrap();
        assert_eq!(last.asset_id, "dai");
        assert_eq!(last.decimals, 8);
        assert!(matches!(app.message, Some((_, MessageType::Success))));
    }

    #[test]
    fn test_lending_apy_start() {
        let app = App::with_initial_strk(settings(), MarketTab::Supply, None, false);
        assert_eq!(app.dashboard.market().yield_label(), "Lending APY");
        assert!(!app.dashboard.settings().with_strk);
    }

    #[test]
    fn test_action_tab_outside_market_warns() {
        let mut app = App::new(settings(), MarketTab::Supply, None);
        app.select_action_tab(ActionTab::Repay);
        assert!(matches!(app.message, Some((_, MessageType::Warning))));
        assert_eq!(app.dashboard.card().current_tab(), ActionTab::Supply);
    }
}
