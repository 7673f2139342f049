//! Event handling for keyboard input using crossterm.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

use lendview::prelude::{ActionTab, MarketTab, TokenKind};

use crate::tui::app::{App, Screen};

/// Poll for events and handle them.
/// Returns Ok(true) if the app should quit.
pub fn handle_events(app: &mut App) -> io::Result<bool> {
    if !event::poll(Duration::from_millis(100))? {
        app.on_tick();
        return Ok(false);
    }

    if let Event::Key(key) = event::read()? {
        // Only handle key press events, not release
        if key.kind != KeyEventKind::Press {
            return Ok(false);
        }
        handle_key(app, key);
    }

    Ok(!app.running)
}

/// Applies one key press to the app state.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Clear any existing message on key press
    app.message = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match app.screen {
        Screen::Dashboard => handle_dashboard(app, key.code),
        Screen::Help => handle_help(app, key.code),
    }
}

fn handle_dashboard(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.screen = Screen::Help,
        KeyCode::Tab | KeyCode::Char('m') => app.toggle_market(),
        KeyCode::Char('1') => app.switch_market(MarketTab::Supply),
        KeyCode::Char('2') => app.switch_market(MarketTab::Borrow),
        KeyCode::Down | KeyCode::Char('j') => app.next_row(),
        KeyCode::Up | KeyCode::Char('k') => app.previous_row(),
        KeyCode::Enter => app.select_row(),
        KeyCode::Char('a') => app.toggle_apy(),
        KeyCode::Char('s') => app.select_action_tab(ActionTab::Supply),
        KeyCode::Char('w') => app.select_action_tab(ActionTab::Withdraw),
        KeyCode::Char('b') => app.select_action_tab(ActionTab::Borrow),
        KeyCode::Char('r') => app.select_action_tab(ActionTab::Repay),
        KeyCode::Char(']') | KeyCode::Char('l') => app.cycle_action_tab(),
        KeyCode::Char('t') => app.register(TokenKind::Token),
        KeyCode::Char('T') => app.register(TokenKind::SToken),
        _ => {}
    }
}

fn handle_help(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter => app.screen = Screen::Dashboard,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lendview::prelude::{RawAsset, Settings};

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn make_app() -> App {
        let settings = Settings::new(vec![
            RawAsset::new("eth").borrow_balance(1),
            RawAsset::new("dai").supply_balance(5),
        ]);
        App::new(settings, MarketTab::Supply, None)
    }

    #[test]
    fn test_quit_keys() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);

        let mut app = make_app();
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_market_switching() {
        let mut app = make_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.dashboard.market_tab(), MarketTab::Borrow);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.dashboard.market_tab(), MarketTab::Supply);
        assert_eq!(app.dashboard.card().current_tab(), ActionTab::Supply);
    }

    #[test]
    fn test_enter_selects_cursor_row() {
        let mut app = make_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.dashboard.settings().selected_asset.as_ref().unwrap().id, "eth");
        assert!(app.message.is_some());
    }

    #[test]
    fn test_apy_toggle() {
        let mut app = make_app();
        assert!(app.dashboard.market().is_with_strk());
        press(&mut app, KeyCode::Char('a'));
        assert!(!app.dashboard.market().is_with_strk());
        assert!(!app.dashboard.settings().with_strk);
    }

    #[test]
    fn test_help_screen_round_trip() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.screen, Screen::Help);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Dashboard);
    }

    #[test]
    fn test_action_tab_keys() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('w'));
        assert_eq!(app.dashboard.card().current_tab(), ActionTab::Withdraw);
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.dashboard.card().current_tab(), ActionTab::Supply);
    }
}
