//! Blocking full-screen chart viewer.
//!
//! Takes over the terminal until the user closes the chart (q, Esc, Enter or
//! Ctrl-C), redrawing on every resize. The terminal is restored on the way out,
//! including when rendering panics.

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::chart::{ChartData, PriceChart};
use crate::theme::Theme;

/// Show the chart and block until it is closed.
pub fn show(data: &ChartData, theme: &Theme) -> Result<()> {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_viewer(&mut terminal, data, theme);
    terminal.show_cursor()?;

    result
}

/// Leaves raw mode and the alternate screen when dropped, on every exit path
/// after raw mode was enabled.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

fn run_viewer(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    data: &ChartData,
    theme: &Theme,
) -> Result<()> {
    loop {
        terminal.draw(|f| f.render_widget(PriceChart::new(data, theme), f.area()))?;

        // Resize events fall through to the next draw
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if is_close_key(&key) {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Keys that close the chart window.
pub fn is_close_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc | KeyCode::Enter => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
