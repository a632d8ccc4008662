use {
    crate::state::DashboardState,
    crossterm::event::{self, Event, KeyCode, KeyEventKind},
    ratatui::{backend::CrosstermBackend, Terminal},
    std::{io::Stdout, sync::Arc, time::Duration},
    tokio::sync::RwLock,
};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// What a key press asks the dashboard to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextTab,
    PrevTab,
    Reload,
    None,
}

pub fn action_for(code: KeyCode) -> Action {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Tab | KeyCode::Right => Action::NextTab,
        KeyCode::BackTab | KeyCode::Left => Action::PrevTab,
        KeyCode::Char('r') => Action::Reload,
        _ => Action::None,
    }
}

/// Run the TUI event loop
///
/// Handles keyboard input and redraws after every event or poll timeout.
pub async fn run_ui(state: Arc<RwLock<DashboardState>>) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    crossterm::terminal::enable_raw_mode()?;

    // Alternate screen keeps stderr logs out of the dashboard buffer
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::cursor::Hide
    )?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, &state).await;

    // Restore terminal state even when the loop failed
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    crossterm::terminal::disable_raw_mode()?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &Arc<RwLock<DashboardState>>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        {
            let state = state.read().await;
            let area = terminal.size()?;
            terminal.draw(|f| {
                if let Err(e) = crate::ui::layout::render_layout(f, area, &state) {
                    log::error!("Layout render error: {}", e);
                }
            })?;
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match action_for(key.code) {
            Action::Quit => break,
            Action::NextTab => state.write().await.next_tab(),
            Action::PrevTab => state.write().await.prev_tab(),
            Action::Reload => {
                log::info!("🔄 Reloading dataset");
                state.write().await.reload().await?;
            }
            Action::None => {}
        }
    }

    Ok(())
}
