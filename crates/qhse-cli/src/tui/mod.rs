//! Full-screen browse mode: list screens, modal forms, stats, all backed
//! by the same form engine and client as the one-shot commands. The draw
//! loop owns the terminal; a worker thread owns the network.

mod app;
mod components;
mod theme;
mod ui;
mod worker;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use qhse_client::Client;
use qhse_types::Module;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use app::AppState;

pub fn run(client: Client, module: Module) -> Result<()> {
    let (request_tx, response_rx) = worker::spawn(client);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    ctrlc::set_handler(move || {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        std::process::exit(0);
    })?;

    let (mut state, initial) = AppState::new(module);
    let _ = request_tx.send(initial);

    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    while !state.should_quit {
        terminal.draw(|f| {
            ui::draw(f, &mut state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    for request in state.handle_key(key) {
                        let _ = request_tx.send(request);
                    }
                }
            }
        }

        while let Ok(response) = response_rx.try_recv() {
            state.handle_response(response);
        }

        if last_tick.elapsed() >= tick_rate {
            state.on_tick(Instant::now());
            last_tick = Instant::now();
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
