use std::{
    io::{self, Stdout},
    sync::Once,
};

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::{debug, warn};

use crate::controller::RenderSurface;

type Backend = CrosstermBackend<Stdout>;

static PANIC_RESTORE: Once = Once::new();

/// Raw-mode alternate screen owned by one repeater session.
///
/// The screen is handed back on drop, on [`TerminalGuard::restore`], or when
/// the process panics, whichever comes first.
pub struct TerminalGuard {
    terminal: Terminal<Backend>,
    active: bool,
}

impl TerminalGuard {
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err).context("failed to enter alternate screen");
        }
        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(err) => {
                leave_screen();
                return Err(err).context("failed to initialize terminal");
            }
        };
        PANIC_RESTORE.call_once(|| {
            let previous = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                leave_screen();
                previous(info);
            }));
        });
        debug!("terminal session started");
        Ok(Self {
            terminal,
            active: true,
        })
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame<'_>)) -> Result<()> {
        self.terminal
            .draw(render)
            .map(|_| ())
            .context("failed to draw frame")
    }

    pub fn resize(&mut self, area: Rect) -> Result<()> {
        self.terminal
            .resize(area)
            .context("failed to resize terminal")
    }

    /// Leave the alternate screen early. Safe to call more than once.
    pub fn restore(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let _ = self.terminal.show_cursor();
        leave_screen();
        debug!("terminal session ended");
    }
}

impl RenderSurface for TerminalGuard {
    fn request_auto_resize(&mut self) {
        if let Err(err) = self.terminal.autoresize() {
            warn!(error = %err, "terminal resize failed");
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

fn leave_screen() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}
