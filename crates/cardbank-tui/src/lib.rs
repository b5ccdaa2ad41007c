//! Terminal front end for the CardBank portal
//!
//! A thin shell around [`Portal`]: key presses become portal calls, and every
//! frame is drawn from the portal's current screen. Requests run in the
//! background, so the loop keeps drawing while they are outstanding and ticks
//! the portal to pick up their results and any scheduled re-fetch.

mod keys;
mod render;

use std::time::Duration;

use cardbank_portal::{Portal, Route};
use crossterm::event::{self, Event as CEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use thiserror::Error;

pub use keys::{handle_key, KeyOutcome};
pub use render::draw;

const FRAME_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything the terminal shows besides the portal itself
pub struct App {
    pub portal: Portal,
    pub status_line: String,
    /// Credentials printed under the login form
    pub demo_hints: Vec<String>,
}

impl App {
    pub fn new(portal: Portal) -> Self {
        Self {
            portal,
            status_line: String::new(),
            demo_hints: Vec::new(),
        }
    }

    pub fn with_demo_hints(mut self, hints: Vec<String>) -> Self {
        self.demo_hints = hints;
        self
    }

    fn set_status(&mut self, status: impl Into<String>) {
        self.status_line = status.into();
    }

    /// Apply finished requests. Returns whether the screen needs redrawing.
    pub fn tick(&mut self) -> bool {
        let before = self.portal.route();
        if !self.portal.tick() {
            return false;
        }
        let after = self.portal.route();
        if before == Route::Login && after != Route::Login {
            let session = self.portal.session().current();
            let role = session.role.map(|role| role.as_str()).unwrap_or("-");
            self.set_status(format!("Signed in as {}", role));
        }
        true
    }
}

/// Take over the terminal until the user quits
pub async fn run_portal_tui(app: &mut App) -> Result<(), TuiError> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

async fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), TuiError> {
    tracing::info!(route = app.portal.route().path(), "Terminal UI started");
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        // never block the runtime: requests are finishing on it
        let mut pressed = false;
        while event::poll(Duration::ZERO)? {
            if let CEvent::Key(key) = event::read()? {
                pressed = true;
                if handle_key(app, key) == KeyOutcome::Quit {
                    tracing::info!("Terminal UI closed");
                    return Ok(());
                }
            }
        }

        if !app.tick() && !pressed {
            tokio::time::sleep(FRAME_INTERVAL).await;
        }
    }
}
