//! UI rendering for the TUI.
//!
//! Two cards side by side: the market list on the left, the supply/borrow
//! action card on the right.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Padding, Paragraph, Row, Table, Wrap},
    Frame,
};
use rust_decimal::Decimal;

use lendview::prelude::{ActionTab, Asset, CardPanel, MarketList, MarketTab, TokenKind, WalletProvider};

use crate::tui::app::{App, MessageType, Screen};
use crate::tui::components::{InlineStat, LoadingSpinner, StatCard, TabBar};
use crate::tui::theme::{icons, theme};

// ═══════════════════════════════════════════════════════════════════════════
// MAIN UI ENTRY POINT
// ═══════════════════════════════════════════════════════════════════════════

pub fn ui(frame: &mut Frame, app: &App) {
    let t = theme();

    frame.render_widget(Clear, frame.area());
    frame.render_widget(Block::default().style(t.bg()), frame.area());

    // Root Layout: Header | Main Content | Status Bar
    let root_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main Content
            Constraint::Length(1), // Status Bar
        ])
        .split(frame.area());

    render_header(frame, root_layout[0], app);
    render_content(frame, root_layout[1], app);
    render_status_bar(frame, root_layout[2], app);

    // Overlays - rendered last so they appear on top
    if app.screen == Screen::Help {
        render_help(frame, frame.area());
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// HEADER
// ═══════════════════════════════════════════════════════════════════════════

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let t = theme();

    let header_block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(t.navy_light))
        .style(t.bg());

    let inner = header_block.inner(area);
    frame.render_widget(header_block, area);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(inner);

    let brand = Line::from(vec![
        Span::raw(" "),
        Span::styled(icons::BANK, Style::default().fg(t.blue)),
        Span::raw(" "),
        Span::styled("LEND", t.title()),
        Span::styled("VIEW", Style::default().fg(t.text_primary).add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(brand).alignment(Alignment::Left), layout[0]);

    // Right: wallet status
    let wallet_line = match app.wallet.as_ref().filter(|w| w.is_available()) {
        Some(wallet) => Line::from(vec![
            Span::styled(icons::WALLET, Style::default().fg(t.green)),
            Span::raw(" "),
            Span::styled("Network ", t.subtitle()),
            Span::styled(wallet.network_version().unwrap_or_default().to_string(), t.text()),
            Span::raw("  "),
            Span::styled(icons::CHECK, Style::default().fg(t.success)),
            Span::styled(" Connected ", Style::default().fg(t.success)),
        ]),
        None => Line::from(vec![
            Span::styled(icons::CROSS, Style::default().fg(t.text_muted)),
            Span::styled(
                " No wallet detected ",
                Style::default().fg(t.text_muted).add_modifier(Modifier::ITALIC),
            ),
        ]),
    };
    frame.render_widget(Paragraph::new(wallet_line).alignment(Alignment::Right), layout[1]);
}

// ═══════════════════════════════════════════════════════════════════════════
// MAIN CONTENT
// ═══════════════════════════════════════════════════════════════════════════

fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_market(frame, chunks[0], app);
    render_action_card(frame, chunks[1], app);
}

// ═══════════════════════════════════════════════════════════════════════════
// MARKET CARD
// ═══════════════════════════════════════════════════════════════════════════

fn render_market(frame: &mut Frame, area: Rect, app: &App) {
    let t = theme();
    let tab = app.dashboard.market_tab();

    let block = Block::default()
        .title(Span::styled(format!(" {} ", tab.label()), t.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(t.border_active())
        .padding(Padding::horizontal(1))
        .style(t.bg());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Market tabs
            Constraint::Length(1), // APY toggle
            Constraint::Min(0),    // Asset table
        ])
        .split(inner);

    let active = match tab {
        MarketTab::Supply => 0,
        MarketTab::Borrow => 1,
    };
    TabBar::new([MarketTab::Supply.label(), MarketTab::Borrow.label()], active)
        .hotkeys(["1", "2"])
        .render(frame, chunks[0]);

    let market = app.dashboard.market();
    let (toggle_icon, toggle_color) = if market.is_with_strk() {
        (icons::TOGGLE_ON, t.green)
    } else {
        (icons::TOGGLE_OFF, t.text_muted)
    };
    let toggle = Line::from(vec![
        Span::styled(toggle_icon, Style::default().fg(toggle_color)),
        Span::raw(" "),
        Span::styled(market.yield_label(), t.text()),
        Span::styled("  [a] toggle", t.subtitle()),
    ]);
    frame.render_widget(Paragraph::new(toggle), chunks[1]);

    render_market_table(frame, chunks[2], app, app.dashboard.market_list());
}

fn render_market_table(frame: &mut Frame, area: Rect, app: &App, list: MarketList<'_>) {
    let t = theme();

    if list.is_empty() {
        let empty = Paragraph::new("No assets in this market yet")
            .style(t.subtitle())
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let yield_label = app.dashboard.market().yield_label();
    let selected_id = app
        .dashboard
        .settings()
        .selected_asset
        .as_ref()
        .map(|a| a.id.as_str());

    let header = Row::new(vec![
        Cell::from("  Asset"),
        Cell::from(yield_label),
        Cell::from(balance_header(list.tab)),
        Cell::from("Price"),
    ])
    .style(t.subtitle().add_modifier(Modifier::BOLD));

    let mut rows = Vec::with_capacity(list.len() + 2);
    let mut index = 0;
    for (title, section) in [
        (list.primary_title(), list.primary),
        (list.remaining_title(), list.remaining),
    ] {
        if section.is_empty() {
            continue;
        }
        rows.push(Row::new(vec![Cell::from(Span::styled(title, t.accent_style()))]));
        for asset in section {
            let is_cursor = index == app.row_index;
            let is_selected = selected_id == Some(asset.id.as_str());
            rows.push(asset_row(asset, list.tab, is_cursor, is_selected));
            index += 1;
        }
    }

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(28),
            Constraint::Percentage(22),
            Constraint::Percentage(28),
            Constraint::Percentage(22),
        ],
    )
    .header(header);

    frame.render_widget(table, area);
}

fn balance_header(tab: MarketTab) -> &'static str {
    match tab {
        MarketTab::Supply => "Balance",
        MarketTab::Borrow => "Borrowed",
    }
}

fn asset_row(asset: &Asset, tab: MarketTab, is_cursor: bool, is_selected: bool) -> Row<'static> {
    let t = theme();

    let (apy, balance) = match tab {
        MarketTab::Supply => (asset.supply_apy, position_or_wallet(asset.supply_balance, asset.wallet_balance)),
        MarketTab::Borrow => (asset.borrow_apy, position_or_wallet(asset.borrow_balance, asset.liquidity)),
    };

    let prefix = if is_cursor { icons::ARROW_RIGHT } else { " " };
    let marker = if is_selected { icons::CHECK } else { " " };

    let style = if is_cursor {
        t.highlight()
    } else {
        t.text()
    };
    let apy_style = if is_cursor { style } else { t.value_positive() };

    Row::new(vec![
        Cell::from(format!("{}{} {}", prefix, marker, asset.symbol())),
        Cell::from(Span::styled(format!("{:.2}%", apy), apy_style)),
        Cell::from(format!("{:.4}", balance)),
        Cell::from(format!("${:.2}", asset.token_price)),
    ])
    .style(style)
}

/// Open position when there is one, otherwise what could be used.
fn position_or_wallet(position: Decimal, fallback: Decimal) -> Decimal {
    if position.is_zero() { fallback } else { position }
}

// ═══════════════════════════════════════════════════════════════════════════
// ACTION CARD
// ═══════════════════════════════════════════════════════════════════════════

fn render_action_card(frame: &mut Frame, area: Rect, app: &App) {
    let t = theme();
    let card = app.dashboard.card();

    let block = Block::default()
        .title(Span::styled(" Actions ", t.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(t.border_inactive())
        .padding(Padding::horizontal(1))
        .style(t.bg());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Wallet buttons
            Constraint::Length(3), // Sub-tabs
            Constraint::Min(0),    // Body
        ])
        .split(inner);

    render_affordances(frame, chunks[0], app);

    let tabs = card.tabs();
    let active = tabs.iter().position(|tab| *tab == card.current_tab()).unwrap_or(0);
    let hotkeys = match card.market() {
        MarketTab::Supply => ["s", "w"],
        MarketTab::Borrow => ["b", "r"],
    };
    TabBar::new([tabs[0].label(), tabs[1].label()], active)
        .hotkeys(hotkeys)
        .render(frame, chunks[1]);

    match card.panel() {
        CardPanel::Loading => {
            LoadingSpinner::new("Loading asset...")
                .frame(app.tick)
                .render(frame, chunks[2]);
        }
        CardPanel::Section { tab, asset } => render_section(frame, chunks[2], tab, asset),
    }
}

fn render_affordances(frame: &mut Frame, area: Rect, app: &App) {
    let t = theme();
    let affordances = app.dashboard.token_affordances(app.wallet_ref());
    if affordances.is_empty() {
        return;
    }

    let mut spans = vec![
        Span::styled(icons::WALLET, Style::default().fg(t.green)),
        Span::styled(" Add to wallet ", t.subtitle()),
    ];
    for affordance in &affordances {
        let key = match affordance.kind {
            TokenKind::Token => "[t]",
            TokenKind::SToken => "[T]",
        };
        spans.push(Span::styled(format!("{} ", key), t.accent_style()));
        spans.push(Span::styled(
            format!("{} {} ", icons::ADD, affordance.label),
            Style::default().fg(t.green).add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_section(frame: &mut Frame, area: Rect, tab: ActionTab, asset: &Asset) {
    let t = theme();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(4), // Stat cards
            Constraint::Min(0),    // Details
        ])
        .split(area);

    let title = Line::from(vec![
        Span::styled(icons::ARROW_RIGHT, t.accent_style()),
        Span::raw(" "),
        Span::styled(tab.label(), t.value()),
        Span::styled(format!(" {}", asset.symbol()), t.title()),
    ]);
    frame.render_widget(Paragraph::new(title), chunks[0]);

    let (first, second) = section_stats(tab, asset);
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    StatCard::new(first.0, &first.1)
        .value_color(t.green)
        .highlighted(true)
        .render(frame, cards[0]);
    StatCard::new(second.0, &second.1).render(frame, cards[1]);

    let price = format!("${:.2}", asset.token_price);
    let collateral = format!("{}%", asset.collateral_factor);
    let receipt = format!("{:.4} {}", asset.stoken_balance, asset.receipt_symbol());
    let details = vec![
        InlineStat::new("Price", &price).to_line(),
        InlineStat::new("Collateral factor", &collateral).to_line(),
        InlineStat::new("Receipt balance", &receipt)
            .value_color(t.blue)
            .to_line(),
        Line::from(""),
        Line::from(Span::styled(
            "Amount entry opens in the browser dashboard.",
            t.subtitle().add_modifier(Modifier::ITALIC),
        )),
    ];
    frame.render_widget(Paragraph::new(details).wrap(Wrap { trim: true }), chunks[2]);
}

/// The two headline numbers shown for each sub-panel.
fn section_stats(tab: ActionTab, asset: &Asset) -> ((&'static str, String), (&'static str, String)) {
    match tab {
        ActionTab::Supply => (
            ("Supply APY", format!("{:.2}%", asset.supply_apy)),
            ("Wallet", format!("{:.4}", asset.wallet_balance)),
        ),
        ActionTab::Withdraw => (
            ("Supplied", format!("{:.4}", asset.supply_balance)),
            ("Supply APY", format!("{:.2}%", asset.supply_apy)),
        ),
        ActionTab::Borrow => (
            ("Borrow APY", format!("{:.2}%", asset.borrow_apy)),
            ("Liquidity", format!("{:.4}", asset.liquidity)),
        ),
        ActionTab::Repay => (
            ("Borrowed", format!("{:.4}", asset.borrow_balance)),
            ("Wallet", format!("{:.4}", asset.wallet_balance)),
        ),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP
// ═══════════════════════════════════════════════════════════════════════════

fn render_help(frame: &mut Frame, area: Rect) {
    let t = theme();
    let popup = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(" Keys ", t.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(t.border_active())
        .padding(Padding::uniform(1))
        .style(t.bg());

    let bindings = [
        ("Tab / m", "Switch market"),
        ("1 / 2", "Supply / Borrow market"),
        ("↑↓ / j k", "Move cursor"),
        ("Enter", "Select asset"),
        ("a", "Toggle Net APY / Lending APY"),
        ("s w b r", "Open action sub-panel"),
        ("] / l", "Other sub-panel"),
        ("t / T", "Add token / receipt token to wallet"),
        ("?", "Close help"),
        ("q", "Quit"),
    ];
    let lines: Vec<Line> = bindings
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:<10}", key), t.accent_style()),
                Span::raw(icons::SEPARATOR),
                Span::raw(" "),
                Span::styled(*action, t.text()),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

// ═══════════════════════════════════════════════════════════════════════════
// STATUS BAR
// ═══════════════════════════════════════════════════════════════════════════

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let t = theme();

    let mode = match app.screen {
        Screen::Dashboard => "DASHBOARD",
        Screen::Help => "HELP",
    };

    let status = if let Some((msg, kind)) = &app.message {
        let color = match kind {
            MessageType::Error => t.error,
            MessageType::Success => t.success,
            MessageType::Warning => t.warning,
            MessageType::Info => t.accent,
        };
        Span::styled(format!(" {} ", msg), Style::default().bg(color).fg(t.navy))
    } else {
        Span::styled(
            format!(" {} ", mode),
            Style::default().bg(t.navy_light).fg(t.text_muted),
        )
    };

    let keys = Span::styled(
        " [↑↓] Navigate  [Enter] Select  [Tab] Market  [?] Help  [Q] Quit ",
        Style::default().fg(t.text_muted),
    );

    let bar = Line::from(vec![status, Span::raw(" "), keys]);
    frame.render_widget(Paragraph::new(bar).style(t.bg()), area);
}

// ═══════════════════════════════════════════════════════════════════════════
// UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Helper to center a rect within a parent.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
#[path = "ui_tests.rs"]
mod ui_tests;
