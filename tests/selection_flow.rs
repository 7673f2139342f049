use lendview::prelude::*;

fn assets() -> Vec<RawAsset> {
    vec![
        RawAsset::new("eth").borrow_balance(5),
        RawAsset::new("dai").supply_balance(10),
        RawAsset::new("usdc"),
    ]
}

/// Store that drops selection writes, as if the account were reset between passes.
#[derive(Default)]
struct ForgetfulStore {
    inner: InMemorySettings,
    selection_writes: Vec<String>,
}

impl SettingsStore for ForgetfulStore {
    fn settings(&self) -> &Settings {
        self.inner.settings()
    }

    fn dispatch(&mut self, update: SettingsUpdate) {
        match update {
            SettingsUpdate::SelectedAsset(asset) => self.selection_writes.push(asset.id),
            other => self.inner.dispatch(other),
        }
    }

    fn asset_list_revision(&self) -> u64 {
        self.inner.asset_list_revision()
    }
}

#[test]
fn test_existing_selection_never_overwritten() {
    let chosen = Asset { id: "usdc".into(), ..Default::default() };
    let settings = Settings::new(assets()).with_selected_asset(chosen);
    let mut dashboard = Dashboard::new(InMemorySettings::new(settings), MarketTab::Supply);

    dashboard.switch_market(MarketTab::Borrow);
    dashboard.replace_asset_list(vec![RawAsset::new("bnb").supply_balance(1)]);
    dashboard.switch_market(MarketTab::Supply);

    assert_eq!(dashboard.settings().selected_asset.as_ref().unwrap().id, "usdc");
    assert_eq!(dashboard.card().current_asset().unwrap().id, "usdc");
}

#[test]
fn test_switch_to_borrow_selects_first_borrowed() {
    let mut store = ForgetfulStore::default();
    store.dispatch(SettingsUpdate::AssetList(assets()));
    let mut view = MarketView::new();

    view.sync(MarketTab::Supply, &mut store);
    assert_eq!(view.selected().unwrap().id, "dai");

    view.sync(MarketTab::Borrow, &mut store);
    assert_eq!(view.selected().unwrap().id, "eth");
    assert_eq!(store.selection_writes, vec!["dai", "eth"]);
}

#[test]
fn test_late_asset_list_picks_default_for_current_tab() {
    let mut dashboard = Dashboard::new(InMemorySettings::new(Settings::default()), MarketTab::Supply);
    assert!(dashboard.settings().selected_asset.is_none());
    assert_eq!(dashboard.card().panel(), CardPanel::Loading);

    dashboard.replace_asset_list(assets());
    dashboard.switch_market(MarketTab::Borrow);

    // The list landed while on the supply tab, so the supply default stuck.
    assert_eq!(dashboard.settings().selected_asset.as_ref().unwrap().id, "dai");
}

#[test]
fn test_borrow_tab_falls_back_to_non_supplied() {
    let list = vec![
        RawAsset::new("dai").supply_balance(10),
        RawAsset::new("usdc"),
    ];
    let dashboard = Dashboard::new(InMemorySettings::new(Settings::new(list)), MarketTab::Borrow);
    // dai is first in non-borrowed, but the fallback reads non-supplied.
    assert_eq!(dashboard.settings().selected_asset.as_ref().unwrap().id, "usdc");
}

#[test]
fn test_toggle_writes_every_time() {
    let mut dashboard = Dashboard::new(InMemorySettings::new(Settings::new(assets())), MarketTab::Supply);
    assert!(dashboard.settings().with_strk);
    assert_eq!(dashboard.market().yield_label(), "Net APY");

    assert!(!dashboard.toggle_with_strk());
    assert!(!dashboard.settings().with_strk);
    assert_eq!(dashboard.market().yield_label(), "Lending APY");

    assert!(dashboard.toggle_with_strk());
    assert!(dashboard.settings().with_strk);
}

#[test]
fn test_initial_with_strk_written_on_first_pass() {
    let mut store = ForgetfulStore::default();
    store.inner.dispatch(SettingsUpdate::WithStrk(false));
    let mut view = MarketView::new();
    view.sync(MarketTab::Supply, &mut store);
    assert!(store.settings().with_strk);
}

#[test]
fn test_no_wallet_no_affordances() {
    let dashboard = Dashboard::new(InMemorySettings::new(Settings::new(assets())), MarketTab::Supply);
    assert!(dashboard.card().current_asset().is_some());
    assert!(dashboard.token_affordances(None).is_empty());

    let wallet = InjectedWallet::new("1");
    assert_eq!(dashboard.token_affordances(Some(&wallet)).len(), 2);
}

#[test]
fn test_register_through_dashboard() {
    let settings = Settings::new(assets()).with_decimals("dai", 18, 8);
    let dashboard = Dashboard::new(InMemorySettings::new(settings), MarketTab::Supply);
    let wallet = InjectedWallet::new("1");
    let registrar = RecordingRegistrar::new();

    let receipt = dashboard
        .token_affordances(Some(&wallet))
        .into_iter()
        .find(|a| a.kind == TokenKind::SToken)
        .unwrap();
    dashboard.register_token(&receipt, &registrar).unwrap();

    let request = registrar.last().unwrap();
    assert_eq!(request.asset_id, "dai");
    assert_eq!(request.decimals, 8);
}
