pub mod app;
pub mod ui;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pinkfit_core::{RecordRepository, RecordService};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::tui::app::{App, Tab};

pub fn run<R: RecordRepository>(service: RecordService<R>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(service);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<R: RecordRepository>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<R>,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }
        app.tick();
    }
    Ok(())
}

fn handle_key<R: RecordRepository>(app: &mut App<R>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => return app.quit(),
        KeyCode::Tab | KeyCode::BackTab => return app.switch_tab(),
        _ => {}
    }

    match app.tab {
        Tab::Input => match key.code {
            KeyCode::Enter => app.save(),
            KeyCode::Up | KeyCode::Down => app.toggle_focus(),
            KeyCode::Backspace => app.delete_char(),
            KeyCode::Char('q') => app.quit(),
            KeyCode::Char(c) => app.input_char(c),
            _ => {}
        },
        Tab::History => match key.code {
            KeyCode::Char('q') => app.quit(),
            KeyCode::Left | KeyCode::Char('h') => app.previous_period(),
            KeyCode::Right | KeyCode::Char('l') => app.next_period(),
            KeyCode::Char('m') => app.toggle_metric(),
            KeyCode::Char('i') => app.go_to_input(),
            _ => {}
        },
    }
}
