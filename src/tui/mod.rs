pub mod app;
pub mod theme;

pub use app::ShellApp;
pub use theme::{Theme, ThemeVariant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::time::{Duration, Instant};

pub async fn launch(app: &mut ShellApp) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut ShellApp) -> Result<()> {
    loop {
        let frame_start = Instant::now();

        // Drain input first for minimal latency
        let mut should_quit = false;
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    should_quit = true;
                    break;
                }
                if !app.handle_key(key)? {
                    should_quit = true;
                    break;
                }
            }
        }

        if should_quit {
            break;
        }

        app.tick(Instant::now());
        terminal.draw(|frame| app.render(frame))?;

        // Sleep for the rest of the 16ms frame
        if let Some(remaining) = Duration::from_millis(16).checked_sub(frame_start.elapsed()) {
            tokio::time::sleep(remaining).await;
        }
    }

    Ok(())
}
