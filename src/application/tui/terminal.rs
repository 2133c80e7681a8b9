use anyhow::{Context, Result, bail};
use crossterm::ExecutableCommand;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::tty::IsTty;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stdout, stdout};

/// Raw-mode alternate-screen terminal, restored on drop.
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        if !IsTty::is_tty(&stdout()) {
            bail!("Not running in a TTY, cannot initialize terminal interface");
        }

        enable_raw_mode().context("Failed to enable raw mode")?;

        if let Err(e) = stdout().execute(EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("Failed to enter alternate screen");
        }

        let terminal = match Terminal::new(CrosstermBackend::new(stdout())) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = stdout().execute(LeaveAlternateScreen);
                return Err(e).context("Failed to create terminal");
            }
        };

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Leave raw mode and the alternate screen. Every step runs even if an
    /// earlier one fails; the first error is returned.
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }

        let steps = [
            disable_raw_mode().context("Failed to disable raw mode"),
            self.terminal
                .backend_mut()
                .execute(LeaveAlternateScreen)
                .map(|_| ())
                .context("Failed to leave alternate screen"),
            self.terminal.show_cursor().context("Failed to show cursor"),
        ];
        self.restored = true;
        first_error(steps)
    }
}

fn first_error(results: impl IntoIterator<Item = Result<()>>) -> Result<()> {
    results.into_iter().find(Result::is_err).unwrap_or(Ok(()))
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        // Fallback cleanup if restore wasn't called
        let _ = self.restore();
    }
}
