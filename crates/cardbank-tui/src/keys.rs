//! Key map
//!
//! `Tab`/`Shift+Tab` move focus, `F2` toggles login mode or transaction
//! kind, `F3` reveals the secret field, `Enter` submits, `F5` refreshes,
//! `F9` logs out, `Esc`/`Ctrl+C` quit.

use cardbank_portal::{Route, Screen};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Apply one key event to the app. Submissions are only started here; their
/// results arrive through [`App::tick`].
pub fn handle_key(app: &mut App, key: KeyEvent) -> KeyOutcome {
    if key.kind != KeyEventKind::Press {
        return KeyOutcome::Continue;
    }

    match key.code {
        KeyCode::Esc => return KeyOutcome::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return KeyOutcome::Quit
        }
        KeyCode::Enter => {
            submit(app);
            return KeyOutcome::Continue;
        }
        KeyCode::F(5) => {
            if app.portal.route() != Route::Login {
                app.portal.refresh();
                app.set_status("Refreshing");
            }
            return KeyOutcome::Continue;
        }
        KeyCode::F(9) => {
            if app.portal.session().current().is_signed_in() {
                app.portal.logout();
                app.set_status("Signed out");
            }
            return KeyOutcome::Continue;
        }
        _ => {}
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyOutcome::Continue;
    }

    match app.portal.screen_mut() {
        Screen::Login(view) => match key.code {
            KeyCode::Tab => view.focus_next(),
            KeyCode::BackTab => view.focus_prev(),
            KeyCode::F(2) => view.toggle_mode(),
            KeyCode::F(3) => view.toggle_reveal(),
            KeyCode::Backspace => view.backspace(),
            KeyCode::Char(c) => view.input(c),
            _ => {}
        },
        Screen::Customer(dashboard) => match key.code {
            KeyCode::Tab | KeyCode::BackTab => dashboard.focus_next(),
            KeyCode::F(2) => dashboard.toggle_kind(),
            KeyCode::F(3) => dashboard.pin_mut().toggle_reveal(),
            KeyCode::Backspace => dashboard.backspace(),
            KeyCode::Char(c) => dashboard.input(c),
            _ => {}
        },
        Screen::Admin(dashboard) => match key.code {
            KeyCode::Backspace => {
                dashboard.filter_mut().pop();
            }
            KeyCode::Char(c) => {
                dashboard.filter_mut().push(c);
            }
            _ => {}
        },
    }
    KeyOutcome::Continue
}

fn submit(app: &mut App) {
    match app.portal.route() {
        Route::Login => {
            app.portal.submit_login();
            app.set_status("");
        }
        Route::Customer => {
            let blocked = match app.portal.screen() {
                Screen::Customer(dashboard) => !dashboard.can_submit(),
                _ => false,
            };
            if blocked {
                app.set_status("Please wait for the current request");
            } else {
                app.portal.submit_transaction();
                app.set_status("");
            }
        }
        // Enter applies the card filter
        Route::Admin => app.portal.refresh(),
    }
}
