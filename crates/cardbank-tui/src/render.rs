use cardbank_portal::{
    AdminDashboard, BannerKind, CustomerDashboard, CustomerField, InputField, LoginMode,
    LoginView, Screen,
};
use cardbank_types::{format_money, mask_card, Role, Session, Transaction};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};
use ratatui::Frame;

use crate::App;

/// Draw one frame
pub fn draw(frame: &mut Frame<'_>, app: &App) {
    draw_screen(
        frame,
        app.portal.screen(),
        &app.portal.session().current(),
        &app.status_line,
        &app.demo_hints,
    );
}

fn draw_screen(
    frame: &mut Frame<'_>,
    screen: &Screen,
    session: &Session,
    status_line: &str,
    demo_hints: &[String],
) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let who = match (session.role, session.active_card()) {
        (Some(Role::Customer), Some(card)) => format!("customer {}", mask_card(card)),
        (Some(Role::Admin), _) => "administrator".to_string(),
        _ => "signed out".to_string(),
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " CardBank ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {} | {}", screen_title(screen), who)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, vertical[0]);

    match screen {
        Screen::Login(view) => render_login(frame, vertical[1], view, demo_hints),
        Screen::Customer(dashboard) => render_customer(frame, vertical[1], dashboard),
        Screen::Admin(dashboard) => render_admin(frame, vertical[1], dashboard),
    }

    let footer = Paragraph::new(format!("{}   {}", hotkeys(screen), status_line))
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"));
    frame.render_widget(footer, vertical[2]);
}

fn screen_title(screen: &Screen) -> &'static str {
    match screen {
        Screen::Login(_) => "Sign in",
        Screen::Customer(_) => "Customer Dashboard",
        Screen::Admin(_) => "Admin Dashboard",
    }
}

fn hotkeys(screen: &Screen) -> &'static str {
    match screen {
        Screen::Login(_) => "Tab focus | F2 customer/admin | F3 show secret | Enter sign in | Esc quit",
        Screen::Customer(_) => {
            "Tab focus | F2 top up/withdraw | F3 show PIN | Enter submit | F5 refresh | F9 logout | Esc quit"
        }
        Screen::Admin(_) => "type to filter | Enter apply | F5 refresh | F9 logout | Esc quit",
    }
}

fn field_line(label: &str, field: &InputField, focused: bool) -> Line<'static> {
    let marker = if focused { "▶ " } else { "  " };
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(format!("{}{:<12}", marker, label), style),
        Span::raw(field.display()),
    ])
}

fn render_login(frame: &mut Frame<'_>, area: Rect, view: &LoginView, demo_hints: &[String]) {
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(3)])
        .split(area);

    let mut tabs = Vec::new();
    for mode in [LoginMode::Customer, LoginMode::Admin] {
        let style = if mode == view.mode() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        tabs.push(Span::styled(format!(" {} ", mode.label()), style));
        tabs.push(Span::raw(" "));
    }

    let mut lines = vec![Line::from(tabs), Line::raw("")];
    for field in view.mode().fields() {
        lines.push(field_line(
            field.label(),
            view.field(*field),
            *field == view.focused_field(),
        ));
    }
    lines.push(Line::raw(""));
    if view.is_verifying() {
        lines.push(Line::styled("Signing in...", Style::default().fg(Color::DarkGray)));
    } else if let Some(error) = view.error() {
        lines.push(Line::styled(error.to_string(), Style::default().fg(Color::Red)));
    }

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(view.mode().label()),
        ),
        split[0],
    );

    let hints: Vec<Line<'_>> = demo_hints.iter().map(|hint| Line::raw(hint.as_str())).collect();
    frame.render_widget(
        Paragraph::new(hints).block(Block::default().borders(Borders::ALL).title("Demo Credentials")),
        split[1],
    );
}

fn render_customer(frame: &mut Frame<'_>, area: Rect, dashboard: &CustomerDashboard) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(8)])
        .split(columns[0]);

    let account = match dashboard.details() {
        Some(details) => vec![
            Line::raw(format!("Name:    {}", details.customer_name)),
            Line::raw(format!("Card:    {}", details.masked_number())),
            Line::from(vec![
                Span::raw("Balance: "),
                Span::styled(
                    format_money(details.balance),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
            ]),
        ],
        None if dashboard.is_loading() => vec![Line::raw("Loading...")],
        None => vec![Line::raw(format!("Card:    {}", mask_card(dashboard.card_number())))],
    };
    frame.render_widget(
        Paragraph::new(account).block(Block::default().borders(Borders::ALL).title("Account")),
        left[0],
    );

    let focus = dashboard.focused_field();
    let mut form = vec![
        Line::raw(format!("  Type:       {}", dashboard.kind().label())),
        field_line(CustomerField::Amount.label(), dashboard.amount(), focus == CustomerField::Amount),
        field_line(CustomerField::Pin.label(), dashboard.pin(), focus == CustomerField::Pin),
        submit_line(dashboard),
    ];
    if let Some(banner) = dashboard.message() {
        let color = match banner.kind {
            BannerKind::Success => Color::Green,
            BannerKind::Error => Color::Red,
        };
        form.push(Line::styled(banner.text.clone(), Style::default().fg(color)));
    }
    frame.render_widget(
        Paragraph::new(form).block(Block::default().borders(Borders::ALL).title("New Transaction")),
        left[1],
    );

    let mut rows: Vec<Row<'_>> = dashboard
        .transactions()
        .iter()
        .map(|tx| {
            Row::new(vec![
                tx.id.to_string(),
                tx.display_timestamp(),
                tx.kind.label().to_string(),
                format_money(tx.amount),
                tx.status.clone(),
                tx.balance_after.map(format_money).unwrap_or_else(|| "-".to_string()),
            ])
            .style(status_style(tx))
        })
        .collect();
    if dashboard.shows_empty_row() {
        rows.push(Row::new(vec!["No transactions yet".to_string()]));
    }

    let title = if dashboard.is_loading() {
        "Transaction History (loading...)"
    } else {
        "Transaction History"
    };
    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(20),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(9),
            Constraint::Min(12),
        ],
    )
    .header(header_row(["ID", "Date", "Type", "Amount", "Status", "Balance After"]))
    .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, columns[1]);
}

/// Submit control, greyed out while disabled
fn submit_line(dashboard: &CustomerDashboard) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    if dashboard.is_submitting() {
        Line::styled("  Submitting...", dim)
    } else if dashboard.is_loading() {
        Line::styled("  [ Submit ] (loading...)", dim)
    } else {
        Line::styled(
            format!("  [ {} ] Enter", dashboard.kind().label()),
            Style::default().fg(Color::Cyan),
        )
    }
}

fn render_admin(frame: &mut Frame<'_>, area: Rect, dashboard: &AdminDashboard) {
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(6)])
        .split(area);

    let filter = Paragraph::new(Line::from(vec![
        Span::styled("Card number: ", Style::default().fg(Color::Yellow)),
        Span::raw(dashboard.filter().display()),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Filter (blank = all cards)"));
    frame.render_widget(filter, split[0]);

    let mut rows: Vec<Row<'_>> = dashboard
        .transactions()
        .iter()
        .map(|tx| {
            Row::new(vec![
                tx.id.to_string(),
                tx.card_number.clone(),
                tx.kind.label().to_string(),
                format_money(tx.amount),
                tx.status.clone(),
                tx.reason.clone().unwrap_or_default(),
                tx.display_timestamp(),
            ])
            .style(status_style(tx))
        })
        .collect();
    if dashboard.shows_empty_row() {
        rows.push(Row::new(vec!["No transactions".to_string()]));
    }

    let title = if dashboard.is_loading() {
        "All Transactions (loading...)"
    } else {
        "All Transactions"
    };
    let mut block = Block::default().borders(Borders::ALL).title(title);
    if let Some(error) = dashboard.error() {
        block = block.title_bottom(Line::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        ));
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(18),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(9),
            Constraint::Min(16),
            Constraint::Length(20),
        ],
    )
    .header(header_row(["ID", "Card", "Type", "Amount", "Status", "Reason", "Date"]))
    .block(block);
    frame.render_widget(table, split[1]);
}

fn header_row<const N: usize>(titles: [&'static str; N]) -> Row<'static> {
    Row::new(titles).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

fn status_style(tx: &Transaction) -> Style {
    if tx.is_success() {
        Style::default()
    } else {
        Style::default().fg(Color::Red)
    }
}
