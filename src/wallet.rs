//! Browser wallet detection and token registration.
//!
//! The dashboard never talks to a wallet directly. It asks a
//! [`WalletProvider`] whether one is present and hands clicks to a
//! [`TokenRegistrar`].

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use strum::{Display, EnumString};
use tracing::info;

/// Which of the two tokens of a market is being registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TokenKind {
    /// The underlying asset.
    Token,
    /// The interest-bearing receipt token.
    SToken,
}

/// An injected wallet, as seen by the page.
pub trait WalletProvider {
    /// Network identifier reported by the wallet, if it has connected.
    fn network_version(&self) -> Option<&str>;

    /// Wallet UI is offered only when a network is reported.
    fn is_available(&self) -> bool {
        self.network_version().is_some_and(|v| !v.is_empty())
    }
}

/// A wallet reporting a fixed network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectedWallet {
    network_version: Option<String>,
}

impl InjectedWallet {
    pub fn new(network_version: impl Into<String>) -> Self {
        Self {
            network_version: Some(network_version.into()),
        }
    }

    /// A provider object without a network yet.
    pub fn disconnected() -> Self {
        Self::default()
    }
}

impl WalletProvider for InjectedWallet {
    fn network_version(&self) -> Option<&str> {
        self.network_version.as_deref()
    }
}

/// Presence check over an optional provider.
pub fn wallet_available(provider: Option<&dyn WalletProvider>) -> bool {
    provider.is_some_and(|p| p.is_available())
}

/// Asks the wallet to start tracking a token.
pub trait TokenRegistrar {
    fn add_token(&self, asset_id: &str, decimals: u32, kind: TokenKind);
}

/// One "add to wallet" button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenAffordance {
    pub asset_id: String,
    /// Ticker shown next to the button, e.g. `DAI` or `sDAI`.
    pub label: String,
    pub kind: TokenKind,
}

/// A registration request captured by [`RecordingRegistrar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub asset_id: String,
    pub decimals: u32,
    pub kind: TokenKind,
}

/// Registrar that logs and keeps every request.
///
/// Used by the terminal dashboard, which has no wallet to forward to.
#[derive(Debug, Default)]
pub struct RecordingRegistrar {
    requests: RefCell<Vec<Registration>>,
}

impl RecordingRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<Registration> {
        self.requests.borrow().clone()
    }

    pub fn last(&self) -> Option<Registration> {
        self.requests.borrow().last().cloned()
    }
}

impl TokenRegistrar for RecordingRegistrar {
    fn add_token(&self, asset_id: &str, decimals: u32, kind: TokenKind) {
        info!(asset = asset_id, decimals, %kind, "wallet token registration requested");
        self.requests.borrow_mut().push(Registration {
            asset_id: asset_id.to_string(),
            decimals,
            kind,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_presence() {
        assert!(!wallet_available(None));
        let disconnected = InjectedWallet::disconnected();
        assert!(!wallet_available(Some(&disconnected)));
        let empty = InjectedWallet::new("");
        assert!(!empty.is_available());
        let mainnet = InjectedWallet::new("1");
        assert!(wallet_available(Some(&mainnet)));
    }

    #[test]
    fn test_token_kind_tags() {
        assert_eq!(TokenKind::Token.to_string(), "token");
        assert_eq!(TokenKind::SToken.to_string(), "stoken");
        assert_eq!("stoken".parse::<TokenKind>().unwrap(), TokenKind::SToken);
        assert_eq!(serde_json::to_string(&TokenKind::SToken).unwrap(), r#""stoken""#);
    }

    #[test]
    fn test_recording_registrar() {
        let registrar = RecordingRegistrar::new();
        registrar.add_token("dai", 18, TokenKind::Token);
        registrar.add_token("dai", 8, TokenKind::SToken);
        assert_eq!(registrar.requests().len(), 2);
        assert_eq!(
            registrar.last(),
            Some(Registration { asset_id: "dai".into(), decimals: 8, kind: TokenKind::SToken })
        );
    }
}
