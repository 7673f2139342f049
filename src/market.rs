//! # Market View
//!
//! Splits the settings asset list into supplied/borrowed buckets and keeps the
//! market-level selection in step with the shared settings.
//!
//! ## Default selection
//! When the settings hold no selection yet, the first asset of the relevant
//! bucket is chosen:
//! - **Supply tab**: first supplied asset, else first non-supplied asset.
//! - **Borrow tab**: first borrowed asset, else first *non-supplied* asset.
//!
//! The borrow fallback reads the non-supplied bucket, not the non-borrowed
//! one. Dashboards in production behave this way, so it is kept until the
//! asset owners confirm otherwise.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::{debug, warn};

use crate::config::{SettingsStore, SettingsUpdate};
use crate::types::{Asset, RawAsset};

/// Which market the dashboard is showing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MarketTab {
    #[default]
    Supply,
    Borrow,
}

impl MarketTab {
    pub fn label(self) -> &'static str {
        match self {
            MarketTab::Supply => "Supply Market",
            MarketTab::Borrow => "Borrow Market",
        }
    }

    /// The other market.
    pub fn toggled(self) -> Self {
        match self {
            MarketTab::Supply => MarketTab::Borrow,
            MarketTab::Borrow => MarketTab::Supply,
        }
    }
}

/// The four derived asset lists.
///
/// Each list preserves the order of the source list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketBuckets {
    pub supplied: Vec<Asset>,
    pub non_supplied: Vec<Asset>,
    pub borrowed: Vec<Asset>,
    pub non_borrowed: Vec<Asset>,
}

impl MarketBuckets {
    /// Partitions assets by a zero-check on their supply and borrow balances.
    pub fn partition(assets: &[Asset]) -> Self {
        let mut buckets = Self::default();
        for asset in assets {
            if asset.is_supplied() {
                buckets.supplied.push(asset.clone());
            } else {
                buckets.non_supplied.push(asset.clone());
            }

            if asset.is_borrowed() {
                buckets.borrowed.push(asset.clone());
            } else {
                buckets.non_borrowed.push(asset.clone());
            }
        }
        buckets
    }

    /// Converts a raw settings list and partitions it.
    ///
    /// Entries with a malformed numeric field are skipped.
    pub fn from_raw(list: &[RawAsset]) -> Self {
        let assets: Vec<Asset> = list
            .iter()
            .filter_map(|raw| match Asset::from_raw(raw) {
                Ok(asset) => Some(asset),
                Err(e) => {
                    warn!(asset = %raw.id, "dropping asset from market table: {}", e);
                    None
                }
            })
            .collect();
        Self::partition(&assets)
    }

    /// Number of distinct assets across the buckets.
    pub fn len(&self) -> usize {
        self.supplied.len() + self.non_supplied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The list view shown for a market tab.
    pub fn list(&self, tab: MarketTab) -> MarketList<'_> {
        match tab {
            MarketTab::Supply => MarketList {
                tab,
                primary: &self.supplied,
                remaining: &self.non_supplied,
            },
            MarketTab::Borrow => MarketList {
                tab,
                primary: &self.borrowed,
                remaining: &self.non_borrowed,
            },
        }
    }
}

/// Picks the asset to show when nothing has been selected yet.
pub fn default_selection(tab: MarketTab, buckets: &MarketBuckets) -> Option<&Asset> {
    match tab {
        MarketTab::Supply => buckets
            .supplied
            .first()
            .or_else(|| buckets.non_supplied.first()),
        // Falls back to non-supplied on purpose; see module docs.
        MarketTab::Borrow => buckets
            .borrowed
            .first()
            .or_else(|| buckets.non_supplied.first()),
    }
}

/// What a market list view receives: the user's positions first, then the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketList<'a> {
    pub tab: MarketTab,
    /// Supplied or borrowed assets.
    pub primary: &'a [Asset],
    /// Non-supplied or non-borrowed assets.
    pub remaining: &'a [Asset],
}

impl<'a> MarketList<'a> {
    pub fn primary_title(&self) -> &'static str {
        match self.tab {
            MarketTab::Supply => "Supplying",
            MarketTab::Borrow => "Borrowing",
        }
    }

    pub fn remaining_title(&self) -> &'static str {
        match self.tab {
            MarketTab::Supply => "Supply Markets",
            MarketTab::Borrow => "Borrow Markets",
        }
    }

    /// Rows in display order.
    pub fn rows(self) -> impl Iterator<Item = &'a Asset> {
        self.primary.iter().chain(self.remaining.iter())
    }

    pub fn len(&self) -> usize {
        self.primary.len() + self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(self, index: usize) -> Option<&'a Asset> {
        self.rows().nth(index)
    }
}

/// State behind the Market tab.
#[derive(Debug, Clone)]
pub struct MarketView {
    buckets: MarketBuckets,
    selected: Option<Asset>,
    with_strk: bool,
    seen_revision: Option<u64>,
    seen_tab: Option<MarketTab>,
    with_strk_published: bool,
}

impl Default for MarketView {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketView {
    pub fn new() -> Self {
        Self {
            buckets: MarketBuckets::default(),
            selected: None,
            with_strk: true,
            seen_revision: None,
            seen_tab: None,
            with_strk_published: false,
        }
    }

    /// Starts with a given yield display instead of "Net APY".
    pub fn with_strk(mut self, with_strk: bool) -> Self {
        self.with_strk = with_strk;
        self
    }

    /// Brings the view up to date with the settings and the active tab.
    ///
    /// Buckets are recomputed only when the asset list changed. The default
    /// selection runs when the buckets or the tab changed and the settings
    /// hold no selection.
    pub fn sync<S: SettingsStore + ?Sized>(&mut self, tab: MarketTab, store: &mut S) {
        let revision = store.asset_list_revision();
        let buckets_changed = self.seen_revision != Some(revision);
        if buckets_changed {
            self.buckets = MarketBuckets::from_raw(&store.settings().asset_list);
            self.seen_revision = Some(revision);
            debug!(
                supplied = self.buckets.supplied.len(),
                borrowed = self.buckets.borrowed.len(),
                total = self.buckets.len(),
                "market buckets recomputed"
            );
        }

        let tab_changed = self.seen_tab != Some(tab);
        self.seen_tab = Some(tab);

        if (buckets_changed || tab_changed) && !store.settings().has_selection() {
            let fallback = default_selection(tab, &self.buckets).cloned();
            debug!(
                %tab,
                asset = fallback.as_ref().map(|a| a.id.as_str()).unwrap_or("<none>"),
                "default market selection"
            );
            self.selected = fallback;
            self.publish_selection(store);
        }

        if !self.with_strk_published {
            store.dispatch(SettingsUpdate::WithStrk(self.with_strk));
            self.with_strk_published = true;
        }
    }

    /// Selection callback handed to the market list views.
    pub fn select_asset<S: SettingsStore + ?Sized>(&mut self, asset: Asset, store: &mut S) {
        self.selected = Some(asset);
        self.publish_selection(store);
    }

    /// Flips between "Lending APY" and "Net APY", writing the new value.
    pub fn toggle_with_strk<S: SettingsStore + ?Sized>(&mut self, store: &mut S) -> bool {
        self.with_strk = !self.with_strk;
        store.dispatch(SettingsUpdate::WithStrk(self.with_strk));
        self.with_strk_published = true;
        self.with_strk
    }

    fn publish_selection<S: SettingsStore + ?Sized>(&self, store: &mut S) {
        if let Some(asset) = &self.selected
            && !asset.id.is_empty()
        {
            store.dispatch(SettingsUpdate::SelectedAsset(asset.clone()));
        }
    }

    pub fn buckets(&self) -> &MarketBuckets {
        &self.buckets
    }

    pub fn selected(&self) -> Option<&Asset> {
        self.selected.as_ref()
    }

    pub fn is_with_strk(&self) -> bool {
        self.with_strk
    }

    pub fn yield_label(&self) -> &'static str {
        if self.with_strk { "Net APY" } else { "Lending APY" }
    }

    pub fn list(&self, tab: MarketTab) -> MarketList<'_> {
        self.buckets.list(tab)
    }
}
